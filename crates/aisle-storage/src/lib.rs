//! # aisle-storage
//!
//! SQLite persistence layer: single write connection plus read pool,
//! versioned migrations, the co-purchase graph, and the list/item rows the
//! ordering engine reads and flags.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod unit_of_work;

pub use engine::StorageEngine;
pub use unit_of_work::SqliteUnitOfWork;

use aisle_core::errors::{AisleError, StorageError};

/// Wrap a SQLite failure message as an `AisleError`.
pub(crate) fn to_storage_err(message: String) -> AisleError {
    AisleError::StorageError(StorageError::SqliteError { message })
}
