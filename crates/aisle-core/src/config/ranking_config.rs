use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{AisleResult, ConfigError};

/// Rank engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Fraction added to the best peer rank for products never seen in a store.
    /// Must stay inside (0, 1) so the product lands before the next known rank.
    pub unranked_category_offset: f64,
    /// Category name used for products without a category.
    pub uncategorized_label: String,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            unranked_category_offset: defaults::DEFAULT_UNRANKED_CATEGORY_OFFSET,
            uncategorized_label: defaults::DEFAULT_UNCATEGORIZED_LABEL.to_string(),
        }
    }
}

impl RankingConfig {
    pub(crate) fn validate(&self) -> AisleResult<()> {
        let offset = self.unranked_category_offset;
        if !(offset > 0.0 && offset < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "ranking.unranked_category_offset".into(),
                reason: format!("{offset} is outside (0, 1)"),
            }
            .into());
        }
        Ok(())
    }
}
