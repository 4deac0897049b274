//! List items: purchases, committed flags, manual positions, and the
//! candidate/purchase projections the engine reads.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use aisle_core::constants::MANUAL_POSITION_STEP;
use aisle_core::errors::{AisleError, AisleResult};
use aisle_core::models::{
    CandidateItem, ItemId, ListId, ListItem, ProductId, PurchaseEvent, PurchasedItem, StoreId,
};

use super::{format_timestamp, parse_timestamp};
use crate::to_storage_err;

const ITEM_COLUMNS: &str = "id, list_id, product_id, quantity, bought, bought_at, committed,
     manual_sort_position, manual_sort_store_id";

pub fn insert_item(
    conn: &Connection,
    list_id: ListId,
    product_id: ProductId,
    quantity: u32,
) -> AisleResult<ItemId> {
    conn.execute(
        "INSERT INTO list_items (list_id, product_id, quantity) VALUES (?1, ?2, ?3)",
        params![list_id.get(), product_id.get(), quantity.max(1)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(ItemId(conn.last_insert_rowid()))
}

pub fn get_item(conn: &Connection, id: ItemId) -> AisleResult<Option<ListItem>> {
    let raw = conn
        .query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM list_items WHERE id = ?1"),
            params![id.get()],
            RawItem::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    raw.map(RawItem::into_item).transpose()
}

pub fn list_items(conn: &Connection, list_id: ListId) -> AisleResult<Vec<ListItem>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM list_items WHERE list_id = ?1 ORDER BY id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![list_id.get()], RawItem::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut items = Vec::new();
    for row in rows {
        let raw = row.map_err(|e| to_storage_err(e.to_string()))?;
        items.push(raw.into_item()?);
    }
    Ok(items)
}

/// Toggle the bought flag. Buying stamps `at`; un-buying clears the timestamp
/// and leaves already learned weights and the committed flag alone.
pub fn set_item_bought(
    conn: &Connection,
    id: ItemId,
    bought: bool,
    at: DateTime<Utc>,
) -> AisleResult<()> {
    let bought_at = bought.then(|| format_timestamp(&at));
    let changed = conn
        .execute(
            "UPDATE list_items SET bought = ?2, bought_at = ?3 WHERE id = ?1",
            params![id.get(), bought, bought_at],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(AisleError::ItemNotFound { id });
    }
    Ok(())
}

/// Unbought items joined with product name and category, in insertion order.
pub fn candidates(conn: &Connection, list_id: ListId) -> AisleResult<Vec<CandidateItem>> {
    let mut stmt = conn
        .prepare(
            "SELECT i.id, i.product_id, p.name, p.category,
                    i.manual_sort_position, i.manual_sort_store_id
             FROM list_items i
             JOIN products p ON p.id = i.product_id
             WHERE i.list_id = ?1 AND i.bought = 0
             ORDER BY i.id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![list_id.get()], |row| {
            Ok(CandidateItem {
                item_id: ItemId(row.get(0)?),
                product_id: ProductId(row.get(1)?),
                name: row.get(2)?,
                category: row.get(3)?,
                manual_sort_position: row.get(4)?,
                manual_sort_store_id: row.get::<_, Option<i64>>(5)?.map(StoreId),
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Bought items with a timestamp, ordered by `(bought_at, id)`.
pub fn purchased_sequence(
    conn: &Connection,
    list_id: ListId,
    uncommitted_only: bool,
) -> AisleResult<Vec<PurchasedItem>> {
    let filter = if uncommitted_only {
        "AND committed = 0"
    } else {
        ""
    };
    let mut stmt = conn
        .prepare(&format!(
            "SELECT id, product_id, bought_at, committed
             FROM list_items
             WHERE list_id = ?1 AND bought = 1 AND bought_at IS NOT NULL {filter}
             ORDER BY bought_at, id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![list_id.get()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut sequence = Vec::new();
    for row in rows {
        let (item_id, product_id, bought_at, committed) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        sequence.push(PurchasedItem {
            item_id: ItemId(item_id),
            event: PurchaseEvent {
                product_id: ProductId(product_id),
                bought_at: parse_timestamp("list_items", &bought_at)?,
            },
            committed,
        });
    }
    Ok(sequence)
}

/// Flag items as committed. Items already committed are not counted.
pub fn mark_committed(conn: &Connection, ids: &[ItemId]) -> AisleResult<usize> {
    let mut stmt = conn
        .prepare_cached("UPDATE list_items SET committed = 1 WHERE id = ?1 AND committed = 0")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut changed = 0;
    for id in ids {
        changed += stmt
            .execute(params![id.get()])
            .map_err(|e| to_storage_err(format!("mark committed {id}: {e}")))?;
    }
    Ok(changed)
}

/// Record a manual position, stamped with the list's current store.
pub fn set_manual_position(conn: &Connection, id: ItemId, position: f64) -> AisleResult<()> {
    let changed = conn
        .execute(
            "UPDATE list_items
             SET manual_sort_position = ?2,
                 manual_sort_store_id = (SELECT store_id FROM lists WHERE lists.id = list_items.list_id)
             WHERE id = ?1",
            params![id.get(), position],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(AisleError::ItemNotFound { id });
    }
    Ok(())
}

/// Write positions `1.0, 2.0, …` for `ordered` items of `list_id`.
///
/// Callers wrap this in a transaction; an item outside the list aborts it.
pub fn apply_manual_order(
    conn: &Connection,
    list_id: ListId,
    ordered: &[ItemId],
) -> AisleResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "UPDATE list_items
             SET manual_sort_position = ?3,
                 manual_sort_store_id = (SELECT store_id FROM lists WHERE id = ?2)
             WHERE id = ?1 AND list_id = ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for (idx, id) in ordered.iter().enumerate() {
        let position = (idx + 1) as f64 * MANUAL_POSITION_STEP;
        let changed = stmt
            .execute(params![id.get(), list_id.get(), position])
            .map_err(|e| to_storage_err(e.to_string()))?;
        if changed == 0 {
            return Err(AisleError::ItemNotFound { id: *id });
        }
    }
    Ok(())
}

/// Drop manual positions recorded for the list's current store. Positions
/// recorded for other stores survive. Returns the number of items reset.
pub fn clear_manual_order(conn: &Connection, list_id: ListId) -> AisleResult<usize> {
    conn.execute(
        "UPDATE list_items
         SET manual_sort_position = NULL, manual_sort_store_id = NULL
         WHERE list_id = ?1
           AND manual_sort_position IS NOT NULL
           AND manual_sort_store_id IS (SELECT store_id FROM lists WHERE id = ?1)",
        params![list_id.get()],
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

struct RawItem {
    id: i64,
    list_id: i64,
    product_id: i64,
    quantity: u32,
    bought: bool,
    bought_at: Option<String>,
    committed: bool,
    manual_sort_position: Option<f64>,
    manual_sort_store_id: Option<i64>,
}

impl RawItem {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            list_id: row.get(1)?,
            product_id: row.get(2)?,
            quantity: row.get(3)?,
            bought: row.get(4)?,
            bought_at: row.get(5)?,
            committed: row.get(6)?,
            manual_sort_position: row.get(7)?,
            manual_sort_store_id: row.get(8)?,
        })
    }

    fn into_item(self) -> AisleResult<ListItem> {
        let bought_at = self
            .bought_at
            .as_deref()
            .map(|raw| parse_timestamp("list_items", raw))
            .transpose()?;
        Ok(ListItem {
            id: ItemId(self.id),
            list_id: ListId(self.list_id),
            product_id: ProductId(self.product_id),
            quantity: self.quantity,
            bought: self.bought,
            bought_at,
            committed: self.committed,
            manual_sort_position: self.manual_sort_position,
            manual_sort_store_id: self.manual_sort_store_id.map(StoreId),
        })
    }
}
