//! JSON file store
//!
//! Layout:
//!
//! ```text
//! {base_path}/
//! ├── {key}.json     # current blob
//! └── {key}.lock     # advisory lock held during reads and writes
//! ```
//!
//! Writes go to `{key}.json.tmp` first and are renamed into place, so a reader
//! never observes a half-written blob.

use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{KvStore, Result, StoreError};

/// Directory-backed store with one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Open or create a file store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|source| StoreError::Open {
            path: base_path.clone(),
            source,
        })?;
        debug!(?base_path, "Opened file store");
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the blob file for `key`
    pub fn blob_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    fn lock_file(&self, key: &str) -> Result<fs::File> {
        let path = self.base_path.join(format!("{}.lock", key));
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;
        Ok(file)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        if !path.exists() {
            debug!(key, "FileStore::get: no blob yet");
            return Ok(None);
        }

        let lock = self.lock_file(key)?;
        FileExt::lock_shared(&lock)?;
        let content = fs::read_to_string(&path)?;
        FileExt::unlock(&lock)?;

        debug!(key, bytes = content.len(), "FileStore::get: read blob");
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        let tmp_path = path.with_extension("json.tmp");

        let lock = self.lock_file(key)?;
        lock.lock_exclusive()?;

        let mut tmp = fs::File::create(&tmp_path)?;
        tmp.write_all(value.as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, &path)?;

        FileExt::unlock(&lock)?;

        info!(key, bytes = value.len(), "Wrote blob");
        Ok(())
    }
}

/// Keys become file names, so keep them to a portable character set
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey { key: key.to_string() })
    }
}
