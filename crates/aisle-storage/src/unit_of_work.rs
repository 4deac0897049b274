//! Transaction-scoped handle handed to the session controller.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use tracing::warn;

use aisle_core::errors::{AisleResult, StorageError};
use aisle_core::models::{
    ItemId, ListId, ListStatus, ProductId, PurchasedItem, ShoppingList, StoreId,
};
use aisle_core::traits::{IEdgeSink, IUnitOfWork};

use crate::queries::{list_item_ops, list_ops, relation_ops};

/// Every call goes through the open transaction it borrows.
pub struct SqliteUnitOfWork<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUnitOfWork<'conn> {
    pub fn new(tx: &'conn Transaction<'_>) -> Self {
        Self { conn: tx }
    }
}

impl IEdgeSink for SqliteUnitOfWork<'_> {
    fn upsert_edge(
        &self,
        store_id: StoreId,
        predecessor: ProductId,
        successor: ProductId,
    ) -> AisleResult<bool> {
        relation_ops::upsert_edge(self.conn, store_id, predecessor, successor)
    }
}

impl IUnitOfWork for SqliteUnitOfWork<'_> {
    fn get_list(&self, list_id: ListId) -> AisleResult<Option<ShoppingList>> {
        list_ops::get_list(self.conn, list_id)
    }

    fn purchased_sequence(
        &self,
        list_id: ListId,
        uncommitted_only: bool,
    ) -> AisleResult<Vec<PurchasedItem>> {
        list_item_ops::purchased_sequence(self.conn, list_id, uncommitted_only)
    }

    fn mark_committed(&self, item_ids: &[ItemId]) -> AisleResult<usize> {
        list_item_ops::mark_committed(self.conn, item_ids)
    }

    fn set_list_status(&self, list_id: ListId, status: ListStatus) -> AisleResult<()> {
        list_ops::set_list_status(self.conn, list_id, status)
    }
}

/// Run `work` inside a `BEGIN IMMEDIATE` transaction on `conn`.
///
/// The write lock is taken up front so two processes committing against the
/// same store queue on the database instead of failing at commit time.
pub fn run_in_transaction<T>(
    conn: &Connection,
    work: impl FnOnce(&Transaction<'_>) -> AisleResult<T>,
) -> AisleResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate).map_err(|e| {
        StorageError::TransactionFailed {
            stage: "begin".into(),
            reason: e.to_string(),
        }
    })?;

    match work(&tx) {
        Ok(value) => {
            tx.commit().map_err(|e| StorageError::TransactionFailed {
                stage: "commit".into(),
                reason: e.to_string(),
            })?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(error = %rollback_err, "rollback failed after {e}");
            }
            Err(e)
        }
    }
}
