//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid key '{key}': only ASCII letters, digits, '.', '_' and '-' are allowed")]
    InvalidKey { key: String },

    #[error("Failed to open store at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
