//! ReviewDeck configuration types and loading

use eyre::{Context, Result};
use reviewstore::{FileStore, KvStore, SqliteStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::DEFAULT_STORE_KEY;
use crate::intervals::{DEFAULT_INTERVALS, IntervalTable};

/// Main ReviewDeck configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Where the deck is persisted
    pub storage: StorageConfig,

    /// Interval policy
    pub schedule: ScheduleConfig,

    /// Interactive review behavior
    pub review: ReviewConfig,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        self.interval_table()?;
        if self.storage.key.is_empty() {
            return Err(eyre::eyre!("storage.key must not be empty"));
        }
        if self.storage.backend == Backend::File {
            reviewstore::validate_key(&self.storage.key)
                .context("storage.key cannot be used as a file name by the file backend")?;
        }
        Ok(())
    }

    /// Interval table built from `schedule.intervals`
    pub fn interval_table(&self) -> Result<IntervalTable> {
        IntervalTable::new(self.schedule.intervals.clone()).context("Invalid schedule.intervals")
    }

    /// Load configuration with fallback chain
    ///
    /// Runs before logging is set up, so its log events only reach a
    /// subscriber that an embedding caller installed first.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .reviewdeck.yml
        let local_config = PathBuf::from(".reviewdeck.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/reviewdeck/reviewdeck.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("reviewdeck").join("reviewdeck.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Open the configured store backend
    pub fn open_store(&self) -> Result<Box<dyn KvStore>> {
        debug!(backend = %self.storage.backend, path = %self.storage.path.display(), "open_store: called");
        let store: Box<dyn KvStore> = match self.storage.backend {
            Backend::File => Box::new(
                FileStore::open(&self.storage.path)
                    .context(format!("Failed to open file store at {}", self.storage.path.display()))?,
            ),
            Backend::Sqlite => {
                let db_path = self.storage.path.join("reviewdeck.db");
                Box::new(
                    SqliteStore::open(&db_path)
                        .context(format!("Failed to open sqlite store at {}", db_path.display()))?,
                )
            }
        };
        Ok(store)
    }

    /// Directory log files are written to
    pub fn log_dir(&self) -> PathBuf {
        self.storage.path.join("logs")
    }
}

/// Store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One JSON file per key
    #[default]
    File,
    /// SQLite database file
    Sqlite,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to persist the deck with
    pub backend: Backend,

    /// Data directory for the store (and logs)
    pub path: PathBuf,

    /// Key the deck is stored under
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        // Use XDG data directory (~/.local/share/reviewdeck on Linux)
        let path = dirs::data_local_dir()
            .map(|d| d.join("reviewdeck"))
            .unwrap_or_else(|| PathBuf::from(".reviewdeck"));

        Self {
            backend: Backend::File,
            path,
            key: DEFAULT_STORE_KEY.to_string(),
        }
    }
}

/// Interval policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Days until the next review, indexed by level
    pub intervals: Vec<u32>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

/// Interactive review configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Present due items in random order
    pub shuffle: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self { shuffle: true }
    }
}
