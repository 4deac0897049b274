//! Error taxonomy. `AisleError` is the top-level error every crate returns.

mod aisle_error;
mod config_error;
mod storage_error;

pub use aisle_error::{AisleError, AisleResult};
pub use config_error::ConfigError;
pub use storage_error::StorageError;
