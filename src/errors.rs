use std::result;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Errors {
  #[error("the data file path can not be empty")]
  FilePathIsEmpty,

  #[error("failed to create the data file")]
  FailedToCreateDataFile,

  #[error("failed to open the data file")]
  FailedToOpenDataFile,

  #[error("failed to read from the data file")]
  FailedToReadDataFile,

  #[error("failed to write to the data file")]
  FailedToWriteDataFile,

  #[error("failed to sync the data file")]
  FailedToSyncDataFile,

  #[error("failed to replace the data file")]
  FailedToReplaceDataFile,

  #[error("failed to copy the data file to the backup path")]
  FailedToBackupDataFile,

  #[error("the data file is corrupted: {0}")]
  DataFileCorrupted(String),

  #[error("failed to encode the records")]
  FailedToEncodeRecords,
}

/// Coarse category of an [`Errors`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Io,
  Deserialization,
  Serialization,
  Config,
}

impl Errors {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Errors::FilePathIsEmpty => ErrorKind::Config,
      Errors::DataFileCorrupted(_) => ErrorKind::Deserialization,
      Errors::FailedToEncodeRecords => ErrorKind::Serialization,
      Errors::FailedToCreateDataFile
      | Errors::FailedToOpenDataFile
      | Errors::FailedToReadDataFile
      | Errors::FailedToWriteDataFile
      | Errors::FailedToSyncDataFile
      | Errors::FailedToReplaceDataFile
      | Errors::FailedToBackupDataFile => ErrorKind::Io,
    }
  }
}

pub type Result<T> = result::Result<T, Errors>;
