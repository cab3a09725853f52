//! Where the inventory document lives.
//!
//! Values come from the environment (`STOCKTRACK_DATA_DIR`,
//! `STOCKTRACK_STORAGE_KEY`); command-line flags override them in the binary.

use std::path::{Path, PathBuf};

use thiserror::Error;

use stocktrack_inventory::{DEFAULT_STORAGE_KEY, InventoryStore};

use crate::file_storage::{FileStorage, is_valid_key};

pub const DATA_DIR_ENV: &str = "STOCKTRACK_DATA_DIR";
pub const STORAGE_KEY_ENV: &str = "STOCKTRACK_STORAGE_KEY";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid storage key {0:?}: use letters, digits, '_', '-' or '.'")]
    InvalidStorageKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_dir: PathBuf,
    storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        storage_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let storage_key = storage_key.into();
        if !is_valid_key(&storage_key) {
            return Err(ConfigError::InvalidStorageKey(storage_key));
        }
        Ok(Self {
            data_dir: data_dir.into(),
            storage_key,
        })
    }

    /// Read the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an injectable variable source.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = read(DATA_DIR_ENV).map(PathBuf::from).unwrap_or_else(|| {
            tracing::debug!(default = DEFAULT_DATA_DIR, "{DATA_DIR_ENV} not set");
            defaults.data_dir
        });
        let storage_key = read(STORAGE_KEY_ENV).unwrap_or(defaults.storage_key);

        Self::new(data_dir, storage_key)
    }

    /// Replace the data directory, keeping the key.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Replace the storage key after validating it.
    pub fn with_storage_key(self, storage_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(self.data_dir, storage_key)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn open_store(&self) -> InventoryStore<FileStorage> {
        tracing::info!(
            data_dir = %self.data_dir.display(),
            storage_key = %self.storage_key,
            "opening inventory store"
        );
        InventoryStore::with_key(FileStorage::new(&self.data_dir), self.storage_key.clone())
    }
}
