//! v002: lists, list_items.

use rusqlite::Connection;

use aisle_core::errors::AisleResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AisleResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS lists (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            store_id    INTEGER REFERENCES stores(id) ON DELETE SET NULL,
            status      TEXT NOT NULL DEFAULT 'active'
                        CHECK (status IN ('active', 'completed', 'archived')),
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS list_items (
            id                   INTEGER PRIMARY KEY,
            list_id              INTEGER NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
            product_id           INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            quantity             INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 1),
            bought               INTEGER NOT NULL DEFAULT 0,
            bought_at            TEXT,
            committed            INTEGER NOT NULL DEFAULT 0,
            manual_sort_position REAL,
            manual_sort_store_id INTEGER REFERENCES stores(id) ON DELETE SET NULL
        );

        CREATE INDEX IF NOT EXISTS idx_items_list ON list_items(list_id);
        CREATE INDEX IF NOT EXISTS idx_items_purchases ON list_items(list_id, bought, bought_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
