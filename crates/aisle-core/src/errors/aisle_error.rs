use super::{ConfigError, StorageError};
use crate::models::{ItemId, ListId, ProductId, StoreId};

/// Top-level error for the Aisle engine.
///
/// Only persistence failures are expected to surface to a shopper. Ordering
/// anomalies never produce an error; they fall back to a deterministic order.
#[derive(Debug, thiserror::Error)]
pub enum AisleError {
    #[error("list not found: {id}")]
    ListNotFound { id: ListId },

    #[error("list item not found: {id}")]
    ItemNotFound { id: ItemId },

    #[error("product not found: {id}")]
    ProductNotFound { id: ProductId },

    #[error("store not found: {id}")]
    StoreNotFound { id: StoreId },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
}

impl AisleError {
    /// Whether retrying the same operation may succeed.
    ///
    /// Storage failures roll back the whole unit of work, so a retry starts
    /// from a clean state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AisleError::StorageError(StorageError::SqliteError { .. })
                | AisleError::StorageError(StorageError::TransactionFailed { .. })
        )
    }
}

/// Convenience alias used across the workspace.
pub type AisleResult<T> = Result<T, AisleError>;
