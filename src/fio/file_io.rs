use std::{
  fs::OpenOptions,
  io::Write,
  path::{Path, PathBuf},
};

use bytes::Bytes;
use log::error;

use crate::errors::{Errors, Result};

use super::{data_file_size, ensure_data_file, read_data_file, IOManager};

/// Rewrites the data file in place: truncate, then write.
///
/// A failure halfway through a write leaves a truncated file behind.
pub struct FileIO {
  file_path: PathBuf,
  sync_writes: bool,
}

impl FileIO {
  pub fn new<P>(file_path: P, sync_writes: bool) -> Result<Self>
  where
    P: AsRef<Path>,
  {
    ensure_data_file(&file_path)?;
    Ok(FileIO {
      file_path: file_path.as_ref().to_path_buf(),
      sync_writes,
    })
  }
}

impl IOManager for FileIO {
  fn read(&self) -> Result<Bytes> {
    read_data_file(&self.file_path)
  }

  fn write(&self, buf: &[u8]) -> Result<usize> {
    let mut file = match OpenOptions::new()
      .create(true)
      .write(true)
      .truncate(true)
      .open(&self.file_path)
    {
      Ok(file) => file,
      Err(e) => {
        error!("failed to open data file error: {}", e);
        return Err(Errors::FailedToOpenDataFile);
      }
    };

    if let Err(e) = file.write_all(buf) {
      error!("failed to write to data file: {}", e);
      return Err(Errors::FailedToWriteDataFile);
    }

    if self.sync_writes {
      if let Err(e) = file.sync_all() {
        error!("failed to sync data file: {}", e);
        return Err(Errors::FailedToSyncDataFile);
      }
    }

    Ok(buf.len())
  }

  fn size(&self) -> Result<u64> {
    data_file_size(&self.file_path)
  }

  fn path(&self) -> &Path {
    &self.file_path
  }
}
