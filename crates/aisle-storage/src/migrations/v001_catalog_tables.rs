//! v001: stores, products.

use rusqlite::Connection;

use aisle_core::errors::AisleResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AisleResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS stores (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS products (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            category    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
