//! Default values for every config section.

pub const DEFAULT_DB_PATH: &str = "aisle.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Offset added to the best-known rank of a category peer when an unseen
/// product inherits its position.
pub const DEFAULT_UNRANKED_CATEGORY_OFFSET: f64 = 0.1;
pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

pub const DEFAULT_LOG_LEVEL: &str = "info";
