#![allow(clippy::field_reassign_with_default)]
use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use fs_extra::file::{self, CopyOptions};
use log::{debug, error};
use parking_lot::{RwLock, RwLockReadGuard};

use crate::{
  codec::{decode_records, encode_records},
  errors::{Errors, Result},
  fio::{new_io_manager, IOManager},
  option::{Options, ReadMode},
  value::{Records, Value},
};

/// A persistent key-value store backed by a single YAML file.
///
/// Nothing is cached between calls: every operation decodes the data file
/// from scratch, and every mutation writes the whole mapping back before it
/// returns. Mutations on one `Store` are serialized by an exclusive lock.
/// Separate `Store` values, in this process or another, pointed at the same
/// file do not coordinate with each other.
pub struct Store {
  options: Arc<Options>,
  io_manager: Box<dyn IOManager>,
  pub(crate) lock: RwLock<()>,
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
  /// Number of keys in the store.
  pub key_num: usize,
  /// Size of the data file in bytes.
  pub file_size: u64,
}

impl Store {
  /// Opens a store, creating an empty data file if none exists yet.
  ///
  /// An existing file is never truncated and is not decoded here; a corrupted
  /// file surfaces on the first operation that reads it.
  pub fn open(opts: Options) -> Result<Self> {
    check_options(&opts)?;

    let io_manager = new_io_manager(&opts.file_path, &opts.io_type, opts.sync_writes)?;
    debug!(
      "opened store at {} with {:?}, {:?} reads",
      opts.file_path.display(),
      opts.io_type,
      opts.read_mode
    );

    Ok(Self {
      options: Arc::new(opts),
      io_manager,
      lock: RwLock::new(()),
    })
  }

  /// Opens a store at `file_path` with default options.
  pub fn open_path<P>(file_path: P) -> Result<Self>
  where
    P: AsRef<Path>,
  {
    let mut opts = Options::default();
    opts.file_path = file_path.as_ref().to_path_buf();
    Self::open(opts)
  }

  /// Returns the value stored under `key`, or `None` if the key is absent.
  ///
  /// In [`ReadMode::Relaxed`] this takes no lock and may observe a file that
  /// a concurrent in-place write has left half written.
  pub fn get(&self, key: &str) -> Result<Option<Value>> {
    let _guard = self.read_guard();
    let mut records = self.load_records()?;
    Ok(records.remove(key))
  }

  /// Inserts or overwrites `key` and rewrites the data file.
  pub fn set<V>(&self, key: &str, value: V) -> Result<()>
  where
    V: Into<Value>,
  {
    let _guard = self.lock.write();
    let mut records = self.load_records()?;
    records.insert(key.to_string(), value.into());
    self.dump_records(&records)?;
    debug!("set key {}", key);
    Ok(())
  }

  /// Removes `key` and rewrites the data file, returning the removed value.
  ///
  /// The file is rewritten even when the key was absent.
  pub fn erase(&self, key: &str) -> Result<Option<Value>> {
    let _guard = self.lock.write();
    let mut records = self.load_records()?;
    let old_value = records.remove(key);
    self.dump_records(&records)?;
    debug!("erased key {}, present: {}", key, old_value.is_some());
    Ok(old_value)
  }

  pub fn contains_key(&self, key: &str) -> Result<bool> {
    let _guard = self.read_guard();
    let records = self.load_records()?;
    Ok(records.contains_key(key))
  }

  /// Lists all keys in sorted order.
  pub fn list_keys(&self) -> Result<Vec<String>> {
    let _guard = self.read_guard();
    let records = self.load_records()?;
    Ok(records.into_keys().collect())
  }

  pub fn stat(&self) -> Result<Stat> {
    let _guard = self.read_guard();
    let records = self.load_records()?;
    let file_size = self.io_manager.size()?;
    Ok(Stat {
      key_num: records.len(),
      file_size,
    })
  }

  /// Copies the data file to `dest`. If `dest` is a directory the copy keeps
  /// the data file's name. Mutations are held off until the copy completes.
  pub fn backup<P>(&self, dest: P) -> Result<PathBuf>
  where
    P: AsRef<Path>,
  {
    let _guard = self.lock.read();

    let src = self.io_manager.path();
    let mut dest = dest.as_ref().to_path_buf();
    if dest.is_dir() {
      if let Some(name) = src.file_name() {
        dest = dest.join(name);
      }
    }

    let mut copy_opts = CopyOptions::new();
    copy_opts.overwrite = true;
    if let Err(e) = file::copy(src, &dest, &copy_opts) {
      error!("failed to copy data file to {}: {}", dest.display(), e);
      return Err(Errors::FailedToBackupDataFile);
    }
    debug!("backed up data file to {}", dest.display());
    Ok(dest)
  }

  pub fn path(&self) -> &Path {
    &self.options.file_path
  }

  pub fn options(&self) -> &Options {
    &self.options
  }

  fn read_guard(&self) -> Option<RwLockReadGuard<'_, ()>> {
    match self.options.read_mode {
      ReadMode::Strict => Some(self.lock.read()),
      ReadMode::Relaxed => None,
    }
  }

  fn load_records(&self) -> Result<Records> {
    let buf = self.io_manager.read()?;
    decode_records(&buf)
  }

  fn dump_records(&self, records: &Records) -> Result<()> {
    let buf = encode_records(records)?;
    self.io_manager.write(&buf)?;
    Ok(())
  }
}

fn check_options(opts: &Options) -> Result<()> {
  if opts.file_path.as_os_str().is_empty() {
    return Err(Errors::FilePathIsEmpty);
  }
  Ok(())
}
