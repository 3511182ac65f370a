//! ReviewStore - whole-blob key-value persistence
//!
//! A deliberately small storage surface: each key maps to one string blob that
//! is read in full and replaced in full. Callers own the serialization format.
//!
//! # Backends
//!
//! - [`MemoryStore`] - HashMap-backed, for tests and ephemeral use
//! - [`FileStore`] - one `{key}.json` file per key under a directory
//! - [`SqliteStore`] - a single `kv` table in a SQLite database
//!
//! # Example
//!
//! ```ignore
//! use reviewstore::{FileStore, KvStore};
//!
//! let mut store = FileStore::open(".reviewstore")?;
//! store.set("words", "[]")?;
//! assert_eq!(store.get("words")?.as_deref(), Some("[]"));
//! ```

mod error;
mod file;
mod memory;
mod sqlite;

pub use error::{Result, StoreError};
pub use file::{FileStore, validate_key};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Synchronous read-all/write-all key-value store
///
/// Implementations make each individual `get`/`set` atomic with respect to
/// other readers, but offer no read-modify-write protection: the last `set`
/// for a key wins.
pub trait KvStore {
    /// Read the blob stored under `key`, or `None` if nothing has been written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Current time as Unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
