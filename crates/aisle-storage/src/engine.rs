//! StorageEngine: owns the ConnectionPool, runs migrations on open, and
//! implements the graph and shopping storage traits.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use aisle_core::config::StorageConfig;
use aisle_core::errors::{AisleError, AisleResult};
use aisle_core::models::{
    CandidateItem, ItemId, ListId, ListItem, Product, ProductId, ProductRelation, ShoppingList,
    Store, StoreId,
};
use aisle_core::traits::{IEdgeSink, IGraphStorage, IShoppingStorage, IUnitOfWork};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{catalog_ops, list_item_ops, list_ops, relation_ops};
use crate::unit_of_work::{run_in_transaction, SqliteUnitOfWork};

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine with default settings.
    pub fn open(path: &Path) -> AisleResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> AisleResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory engine (for testing). All reads go through the writer.
    pub fn open_in_memory() -> AisleResult<Self> {
        let pool = ConnectionPool::open_in_memory(&StorageConfig::default())?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> AisleResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> AisleResult<T>
    where
        F: FnOnce(&Connection) -> AisleResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    fn with_writer<F, T>(&self, f: F) -> AisleResult<T>
    where
        F: FnOnce(&Connection) -> AisleResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }

    // --- Catalog ---

    pub fn create_store(&self, name: &str) -> AisleResult<Store> {
        self.with_writer(|conn| catalog_ops::insert_store(conn, name))
    }

    pub fn create_product(&self, name: &str, category: Option<&str>) -> AisleResult<Product> {
        self.with_writer(|conn| catalog_ops::insert_product(conn, name, category))
    }

    pub fn get_product(&self, id: ProductId) -> AisleResult<Option<Product>> {
        self.with_reader(|conn| catalog_ops::get_product(conn, id))
    }

    // --- Lists ---

    pub fn create_list(&self, name: &str, store_id: Option<StoreId>) -> AisleResult<ShoppingList> {
        self.with_writer(|conn| {
            if let Some(store) = store_id {
                ensure_store(conn, store)?;
            }
            list_ops::insert_list(conn, name, store_id)
        })
    }

    pub fn set_list_store(&self, list_id: ListId, store_id: Option<StoreId>) -> AisleResult<()> {
        self.with_writer(|conn| {
            if let Some(store) = store_id {
                ensure_store(conn, store)?;
            }
            list_ops::set_list_store(conn, list_id, store_id)
        })
    }

    // --- Items ---

    pub fn add_item(
        &self,
        list_id: ListId,
        product_id: ProductId,
        quantity: u32,
    ) -> AisleResult<ItemId> {
        self.with_writer(|conn| {
            if list_ops::get_list(conn, list_id)?.is_none() {
                return Err(AisleError::ListNotFound { id: list_id });
            }
            if catalog_ops::get_product(conn, product_id)?.is_none() {
                return Err(AisleError::ProductNotFound { id: product_id });
            }
            list_item_ops::insert_item(conn, list_id, product_id, quantity)
        })
    }

    pub fn get_item(&self, id: ItemId) -> AisleResult<Option<ListItem>> {
        self.with_reader(|conn| list_item_ops::get_item(conn, id))
    }

    pub fn list_items(&self, list_id: ListId) -> AisleResult<Vec<ListItem>> {
        self.with_reader(|conn| list_item_ops::list_items(conn, list_id))
    }

    pub fn set_item_bought(&self, id: ItemId, bought: bool, at: DateTime<Utc>) -> AisleResult<()> {
        self.with_writer(|conn| list_item_ops::set_item_bought(conn, id, bought, at))
    }

    // --- Manual order ---

    pub fn set_manual_position(&self, id: ItemId, position: f64) -> AisleResult<()> {
        self.with_writer(|conn| list_item_ops::set_manual_position(conn, id, position))
    }

    pub fn apply_manual_order(&self, list_id: ListId, ordered: &[ItemId]) -> AisleResult<()> {
        self.with_writer(|conn| {
            run_in_transaction(conn, |tx| {
                list_item_ops::apply_manual_order(tx, list_id, ordered)
            })
        })
    }

    pub fn clear_manual_order(&self, list_id: ListId) -> AisleResult<usize> {
        self.with_writer(|conn| list_item_ops::clear_manual_order(conn, list_id))
    }

    // --- Graph diagnostics ---

    pub fn edge_weight(
        &self,
        store_id: StoreId,
        predecessor: ProductId,
        successor: ProductId,
    ) -> AisleResult<Option<u32>> {
        self.with_reader(|conn| relation_ops::get_weight(conn, store_id, predecessor, successor))
    }
}

fn ensure_store(conn: &Connection, store: StoreId) -> AisleResult<()> {
    if catalog_ops::store_exists(conn, store)? {
        Ok(())
    } else {
        Err(AisleError::StoreNotFound { id: store })
    }
}

impl IEdgeSink for StorageEngine {
    fn upsert_edge(
        &self,
        store_id: StoreId,
        predecessor: ProductId,
        successor: ProductId,
    ) -> AisleResult<bool> {
        self.with_writer(|conn| relation_ops::upsert_edge(conn, store_id, predecessor, successor))
    }
}

impl IGraphStorage for StorageEngine {
    fn get_edges(&self, store_id: StoreId) -> AisleResult<Vec<ProductRelation>> {
        self.with_reader(|conn| relation_ops::get_edges(conn, store_id))
    }

    fn edge_count(&self, store_id: StoreId) -> AisleResult<usize> {
        self.with_reader(|conn| relation_ops::edge_count(conn, store_id))
    }
}

impl IShoppingStorage for StorageEngine {
    fn get_list(&self, list_id: ListId) -> AisleResult<Option<ShoppingList>> {
        self.with_reader(|conn| list_ops::get_list(conn, list_id))
    }

    fn candidates(&self, list_id: ListId) -> AisleResult<Vec<CandidateItem>> {
        self.with_reader(|conn| list_item_ops::candidates(conn, list_id))
    }

    fn with_unit_of_work(
        &self,
        work: &mut dyn FnMut(&dyn IUnitOfWork) -> AisleResult<()>,
    ) -> AisleResult<()> {
        self.with_writer(|conn| {
            run_in_transaction(conn, |tx| {
                let uow = SqliteUnitOfWork::new(tx);
                work(&uow)
            })
        })
    }
}
