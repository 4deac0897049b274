use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{AisleResult, ConfigError};

/// SQLite storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path.
    pub db_path: String,
    /// Number of read-only connections in the pool (file-backed mode only).
    pub read_pool_size: usize,
    /// SQLite busy timeout in milliseconds.
    pub busy_timeout_ms: u64,
    /// Enable write-ahead logging.
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: defaults::DEFAULT_DB_PATH.to_string(),
            read_pool_size: defaults::DEFAULT_READ_POOL_SIZE,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
            wal_mode: true,
        }
    }
}

impl StorageConfig {
    pub(crate) fn validate(&self) -> AisleResult<()> {
        if self.read_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.read_pool_size".into(),
                reason: "must be at least 1".into(),
            }
            .into());
        }
        Ok(())
    }
}
