use std::{
  ffi::OsString,
  fs::{self, File},
  io::Write,
  path::{Path, PathBuf},
};

use bytes::Bytes;
use log::{error, warn};

use crate::errors::{Errors, Result};

use super::{data_file_size, ensure_data_file, read_data_file, IOManager};

const TEMP_FILE_SUFFIX: &str = ".tmp";

/// Replaces the data file by writing a sibling temporary file and renaming
/// it over the target, so readers only ever see a complete file.
pub struct AtomicFileIO {
  file_path: PathBuf,
  temp_path: PathBuf,
  sync_writes: bool,
}

impl AtomicFileIO {
  pub fn new<P>(file_path: P, sync_writes: bool) -> Result<Self>
  where
    P: AsRef<Path>,
  {
    ensure_data_file(&file_path)?;
    let file_path = file_path.as_ref().to_path_buf();
    Ok(AtomicFileIO {
      temp_path: get_temp_file_path(&file_path),
      file_path,
      sync_writes,
    })
  }

  fn write_temp_file(&self, buf: &[u8]) -> Result<()> {
    let mut file = match File::create(&self.temp_path) {
      Ok(file) => file,
      Err(e) => {
        error!(
          "failed to create temp file {}: {}",
          self.temp_path.display(),
          e
        );
        return Err(Errors::FailedToCreateDataFile);
      }
    };

    if let Err(e) = file.write_all(buf) {
      error!("failed to write to temp file: {}", e);
      return Err(Errors::FailedToWriteDataFile);
    }

    if self.sync_writes {
      if let Err(e) = file.sync_all() {
        error!("failed to sync temp file: {}", e);
        return Err(Errors::FailedToSyncDataFile);
      }
    }

    Ok(())
  }

  fn discard_temp_file(&self) {
    if let Err(e) = fs::remove_file(&self.temp_path) {
      if e.kind() != std::io::ErrorKind::NotFound {
        warn!(
          "failed to remove temp file {}: {}",
          self.temp_path.display(),
          e
        );
      }
    }
  }
}

impl IOManager for AtomicFileIO {
  fn read(&self) -> Result<Bytes> {
    read_data_file(&self.file_path)
  }

  fn write(&self, buf: &[u8]) -> Result<usize> {
    if let Err(e) = self.write_temp_file(buf) {
      self.discard_temp_file();
      return Err(e);
    }

    if let Err(e) = fs::rename(&self.temp_path, &self.file_path) {
      error!(
        "failed to rename {} to {}: {}",
        self.temp_path.display(),
        self.file_path.display(),
        e
      );
      self.discard_temp_file();
      return Err(Errors::FailedToReplaceDataFile);
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

fn get_temp_file_path(file_path: &Path) -> PathBuf {
  let mut name = file_path
    .file_name()
    .map(|n| n.to_os_string())
    .unwrap_or_else(|| OsString::from("pkv"));
  name.push(TEMP_FILE_SUFFIX);
  file_path.with_file_name(name)
}
