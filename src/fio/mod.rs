pub mod atomic;
pub mod file_io;

use std::{
  fs::OpenOptions,
  path::{Path, PathBuf},
};

use bytes::Bytes;
use log::error;

use crate::{
  errors::{Errors, Result},
  option::IOManagerType,
};

use self::{atomic::AtomicFileIO, file_io::FileIO};

/// Abstract I/O management interface over a single whole-file data file.
pub trait IOManager: Sync + Send {
  /// Reads the full content of the data file.
  fn read(&self) -> Result<Bytes>;

  /// Replaces the full content of the data file with `buf`.
  fn write(&self, buf: &[u8]) -> Result<usize>;

  fn size(&self) -> Result<u64>;

  fn path(&self) -> &Path;
}

pub fn new_io_manager(
  file_path: &PathBuf,
  io_type: &IOManagerType,
  sync_writes: bool,
) -> Result<Box<dyn IOManager>> {
  match *io_type {
    IOManagerType::StandardFileIO => Ok(Box::new(FileIO::new(file_path, sync_writes)?)),
    IOManagerType::AtomicRename => Ok(Box::new(AtomicFileIO::new(file_path, sync_writes)?)),
  }
}

/// Creates an empty data file if none exists. An existing file is left as is.
pub(crate) fn ensure_data_file<P>(file_path: P) -> Result<()>
where
  P: AsRef<Path>,
{
  match OpenOptions::new()
    .create(true)
    .append(true)
    .open(file_path.as_ref())
  {
    Ok(_) => Ok(()),
    Err(e) => {
      error!(
        "failed to create data file {}: {}",
        file_path.as_ref().display(),
        e
      );
      Err(Errors::FailedToCreateDataFile)
    }
  }
}

pub(crate) fn read_data_file<P>(file_path: P) -> Result<Bytes>
where
  P: AsRef<Path>,
{
  match std::fs::read(file_path.as_ref()) {
    Ok(buf) => Ok(Bytes::from(buf)),
    Err(e) => {
      error!(
        "failed to read data file {}: {}",
        file_path.as_ref().display(),
        e
      );
      if e.kind() == std::io::ErrorKind::NotFound {
        Err(Errors::FailedToOpenDataFile)
      } else {
        Err(Errors::FailedToReadDataFile)
      }
    }
  }
}

pub(crate) fn data_file_size<P>(file_path: P) -> Result<u64>
where
  P: AsRef<Path>,
{
  match std::fs::metadata(file_path.as_ref()) {
    Ok(meta) => Ok(meta.len()),
    Err(e) => {
      error!(
        "failed to stat data file {}: {}",
        file_path.as_ref().display(),
        e
      );
      Err(Errors::FailedToOpenDataFile)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ensure_data_file_keeps_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keep.db");

    ensure_data_file(&path).unwrap();
    assert_eq!(data_file_size(&path).unwrap(), 0);

    std::fs::write(&path, b"name: Alice\n").unwrap();
    ensure_data_file(&path).unwrap();
    assert_eq!(read_data_file(&path).unwrap(), Bytes::from("name: Alice\n"));
  }

  #[test]
  fn test_ensure_data_file_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("pkv.db");

    let res = ensure_data_file(&path);
    assert_eq!(res.err().unwrap(), Errors::FailedToCreateDataFile);
  }

  #[test]
  fn test_new_io_manager() {
    let dir = tempfile::tempdir().unwrap();
    for (name, io_type) in [
      ("standard.db", IOManagerType::StandardFileIO),
      ("atomic.db", IOManagerType::AtomicRename),
    ] {
      let path = dir.path().join(name);
      let io_manager = new_io_manager(&path, &io_type, false).unwrap();
      assert!(path.is_file());
      assert_eq!(io_manager.path(), path.as_path());

      io_manager.write(b"k: v\n").unwrap();
      assert_eq!(io_manager.read().unwrap(), Bytes::from("k: v\n"));
      assert_eq!(io_manager.size().unwrap(), 5);
    }
  }
}
