//! Layered configuration loaded from TOML. Every section defaults, so an empty
//! document is a valid config.

pub mod defaults;
mod observability_config;
mod ranking_config;
mod storage_config;

pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{AisleResult, ConfigError};

/// Root configuration for the Aisle engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AisleConfig {
    pub storage: StorageConfig,
    pub ranking: RankingConfig,
    pub observability: ObservabilityConfig,
}

impl AisleConfig {
    /// Parse a TOML document, filling gaps with defaults, then validate it.
    pub fn from_toml(input: &str) -> AisleResult<Self> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    pub fn from_file(path: &std::path::Path) -> AisleResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseFailed {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&raw)
    }

    pub fn validate(&self) -> AisleResult<()> {
        self.storage.validate()?;
        self.ranking.validate()?;
        Ok(())
    }
}
