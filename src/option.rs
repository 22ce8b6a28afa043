use lazy_static::lazy_static;
use std::path::PathBuf;

lazy_static! {
  pub static ref DEFAULT_FILE_PATH: PathBuf = PathBuf::from("pkv.db");
}

#[derive(Debug, Clone)]
pub struct Options {
  pub file_path: PathBuf,

  pub io_type: IOManagerType,

  pub read_mode: ReadMode,

  pub sync_writes: bool,
}

impl Default for Options {
  fn default() -> Self {
    Self {
      file_path: DEFAULT_FILE_PATH.clone(),
      io_type: IOManagerType::AtomicRename,
      read_mode: ReadMode::Relaxed,
      sync_writes: false,
    }
  }
}

/// How the data file is replaced on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IOManagerType {
  /// Truncate the data file and write the new content in place.
  StandardFileIO,

  /// Write a sibling temporary file, then rename it over the data file.
  AtomicRename,
}

/// Locking discipline of the read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
  /// Reads take no lock and may race with a concurrent writer.
  Relaxed,

  /// Reads take a shared lock and never overlap a mutation.
  Strict,
}
