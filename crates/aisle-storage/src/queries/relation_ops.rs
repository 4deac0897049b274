//! Co-purchase graph edges: atomic upsert-increment and per-store reads.

use rusqlite::{params, Connection, OptionalExtension};

use aisle_core::constants::INITIAL_EDGE_WEIGHT;
use aisle_core::errors::{AisleResult, StorageError};
use aisle_core::models::{ProductId, ProductRelation, StoreId};

use crate::to_storage_err;

/// Insert the edge with `INITIAL_EDGE_WEIGHT`, or add 1 to an existing edge.
///
/// A single statement, so concurrent writers cannot lose an increment.
/// Self-loops are skipped and report `false`.
pub fn upsert_edge(
    conn: &Connection,
    store_id: StoreId,
    predecessor: ProductId,
    successor: ProductId,
) -> AisleResult<bool> {
    if predecessor == successor {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO product_relations (store_id, predecessor_id, successor_id, weight)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(store_id, predecessor_id, successor_id) DO UPDATE SET
            weight = weight + 1,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            store_id.get(),
            predecessor.get(),
            successor.get(),
            INITIAL_EDGE_WEIGHT
        ],
    )
    .map_err(|e| to_storage_err(format!("upsert edge {predecessor}->{successor}: {e}")))?;
    Ok(true)
}

/// All edges for a store, ordered by (predecessor, successor).
pub fn get_edges(conn: &Connection, store_id: StoreId) -> AisleResult<Vec<ProductRelation>> {
    let mut stmt = conn
        .prepare(
            "SELECT predecessor_id, successor_id, weight
             FROM product_relations
             WHERE store_id = ?1
             ORDER BY predecessor_id, successor_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![store_id.get()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut edges = Vec::new();
    for row in rows {
        let (predecessor, successor, weight) = row.map_err(|e| to_storage_err(e.to_string()))?;
        edges.push(ProductRelation {
            store_id,
            predecessor: ProductId(predecessor),
            successor: ProductId(successor),
            weight: to_weight(weight)?,
        });
    }
    Ok(edges)
}

pub fn edge_count(conn: &Connection, store_id: StoreId) -> AisleResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM product_relations WHERE store_id = ?1",
            params![store_id.get()],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

/// Weight of a single directed edge, if learned.
pub fn get_weight(
    conn: &Connection,
    store_id: StoreId,
    predecessor: ProductId,
    successor: ProductId,
) -> AisleResult<Option<u32>> {
    let weight: Option<i64> = conn
        .query_row(
            "SELECT weight FROM product_relations
             WHERE store_id = ?1 AND predecessor_id = ?2 AND successor_id = ?3",
            params![store_id.get(), predecessor.get(), successor.get()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    weight.map(to_weight).transpose()
}

fn to_weight(raw: i64) -> AisleResult<u32> {
    u32::try_from(raw).map_err(|_| {
        StorageError::CorruptRow {
            table: "product_relations".into(),
            details: format!("weight {raw} out of range"),
        }
        .into()
    })
}
