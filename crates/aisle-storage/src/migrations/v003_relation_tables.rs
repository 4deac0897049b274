//! v003: product_relations (the per-store co-purchase graph).

use rusqlite::Connection;

use aisle_core::errors::AisleResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AisleResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS product_relations (
            store_id        INTEGER NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
            predecessor_id  INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            successor_id    INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            weight          INTEGER NOT NULL DEFAULT 1 CHECK (weight >= 1),
            created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (store_id, predecessor_id, successor_id),
            CHECK (predecessor_id <> successor_id)
        );

        CREATE INDEX IF NOT EXISTS idx_relations_successor
            ON product_relations(store_id, successor_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
