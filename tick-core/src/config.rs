//! Tick store configuration.
//!
//! Loaded from `store.json` in the configuration directory. Every field has a
//! default, so a missing file (or a partial one) is valid.

use crate::fs::{load_state, PathManager};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STORE_CONFIG_FILE_NAME: &str = "store.json";

const DEFAULT_SWAP_BUCKET_SECS: i64 = 24 * 60 * 60;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("swap_bucket_secs must be positive, got {0}")]
    InvalidSwapBucket(i64),
    #[error("{0} must not be empty")]
    EmptyFileName(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Width of the bucket in which at most one swap entry per instrument is
    /// stored.
    pub swap_bucket_secs: i64,
    /// Tick snapshot file name, relative to the data directory.
    pub data_file: String,
    /// Instrument registry file name, relative to the data directory.
    pub registry_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            swap_bucket_secs: DEFAULT_SWAP_BUCKET_SECS,
            data_file: "ticks.bin".to_string(),
            registry_file: "instruments.json".to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads the configuration from the config directory, falling back to the
    /// defaults if `store.json` does not exist.
    ///
    /// # Returns
    ///
    /// * `Ok(StoreConfig)` once validated.
    /// * `Err` if the file is unreadable or holds invalid values.
    pub fn load(path_manager: &PathManager) -> Result<Self> {
        let path = path_manager.get_config_file_path(STORE_CONFIG_FILE_NAME);
        let config = if path.exists() {
            load_state(&path).with_context(|| format!("Failed to load config from {:?}", path))?
        } else {
            log::debug!("No config at {:?}, using defaults", path);
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swap_bucket_secs <= 0 {
            return Err(ConfigError::InvalidSwapBucket(self.swap_bucket_secs));
        }
        if self.data_file.is_empty() {
            return Err(ConfigError::EmptyFileName("data_file"));
        }
        if self.registry_file.is_empty() {
            return Err(ConfigError::EmptyFileName("registry_file"));
        }
        Ok(())
    }

    pub fn swap_bucket(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.swap_bucket_secs)
    }
}
