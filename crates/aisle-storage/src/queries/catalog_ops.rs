//! Stores and products.

use rusqlite::{params, Connection, OptionalExtension};

use aisle_core::errors::AisleResult;
use aisle_core::models::{Product, ProductId, Store, StoreId};

use crate::to_storage_err;

pub fn insert_store(conn: &Connection, name: &str) -> AisleResult<Store> {
    conn.execute("INSERT INTO stores (name) VALUES (?1)", params![name])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(Store {
        id: StoreId(conn.last_insert_rowid()),
        name: name.to_string(),
    })
}

pub fn insert_product(
    conn: &Connection,
    name: &str,
    category: Option<&str>,
) -> AisleResult<Product> {
    conn.execute(
        "INSERT INTO products (name, category) VALUES (?1, ?2)",
        params![name, category],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(Product {
        id: ProductId(conn.last_insert_rowid()),
        name: name.to_string(),
        category: category.map(str::to_string),
    })
}

pub fn get_product(conn: &Connection, id: ProductId) -> AisleResult<Option<Product>> {
    conn.query_row(
        "SELECT id, name, category FROM products WHERE id = ?1",
        params![id.get()],
        |row| {
            Ok(Product {
                id: ProductId(row.get(0)?),
                name: row.get(1)?,
                category: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn store_exists(conn: &Connection, id: StoreId) -> AisleResult<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM stores WHERE id = ?1)",
        params![id.get()],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
