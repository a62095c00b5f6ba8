//! Durable key-value store used for session persistence.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by a store implementation.
///
/// The Plex client treats persistence as best-effort: these are logged and
/// never returned to its callers.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("store I/O failed: {0}")]
  Io(#[from] io::Error),
}

/// Durable key-value collaborator.
///
/// An absent key is `Ok(None)`, never an error.
pub trait SessionStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
  fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
  fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// File-backed store keeping one JSON file per key under a data directory.
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  /// Create a store rooted at the given directory.
  pub fn new(dir: PathBuf) -> Self {
    Self { dir }
  }

  /// Create a store under the platform data directory, e.g.
  /// `~/.local/share/reelswipe` on Linux.
  pub fn default_location() -> Option<Self> {
    dirs::data_dir().map(|base| Self::new(base.join("reelswipe")))
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{key}.json"))
  }
}

impl SessionStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
    match fs::read(self.path_for(key)) {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
    fs::create_dir_all(&self.dir)?;
    fs::write(self.path_for(key), value)?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    match fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(e.into()),
    }
  }
}
