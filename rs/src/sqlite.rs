//! SQLite store

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use tracing::{debug, info};

use crate::{KvStore, Result, StoreError, now_ms};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
)";

/// Single-table SQLite store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database file, creating parent directories as needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Open {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "Opened sqlite store");
        Self::with_connection(conn)
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        debug!(key, found = value.is_some(), "SqliteStore::get: called");
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now_ms()],
        )?;
        info!(key, bytes = value.len(), "Wrote blob");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("words").unwrap().is_none());
    }

    #[test]
    fn test_upsert() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("words", "[1]").unwrap();
        store.set("words", "[1,2]").unwrap();

        assert_eq!(store.get("words").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("data").join("review.db");

        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            store.set("ielts-copilot-review-words", "[]").unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        assert_eq!(store.get("ielts-copilot-review-words").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }
}
