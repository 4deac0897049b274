//! Lists: creation, store context, lifecycle status.

use rusqlite::{params, Connection, OptionalExtension};

use aisle_core::errors::{AisleError, AisleResult, StorageError};
use aisle_core::models::{ListId, ListStatus, ShoppingList, StoreId};

use crate::to_storage_err;

pub fn insert_list(
    conn: &Connection,
    name: &str,
    store_id: Option<StoreId>,
) -> AisleResult<ShoppingList> {
    conn.execute(
        "INSERT INTO lists (name, store_id, status) VALUES (?1, ?2, ?3)",
        params![name, store_id.map(StoreId::get), ListStatus::Active.as_str()],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(ShoppingList {
        id: ListId(conn.last_insert_rowid()),
        name: name.to_string(),
        store_id,
        status: ListStatus::Active,
    })
}

pub fn get_list(conn: &Connection, id: ListId) -> AisleResult<Option<ShoppingList>> {
    let row = conn
        .query_row(
            "SELECT id, name, store_id, status FROM lists WHERE id = ?1",
            params![id.get()],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<i64>>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    let Some((id, name, store_id, status)) = row else {
        return Ok(None);
    };
    let status = ListStatus::from_str_name(&status).ok_or_else(|| StorageError::CorruptRow {
        table: "lists".into(),
        details: format!("unknown status {status:?}"),
    })?;
    Ok(Some(ShoppingList {
        id: ListId(id),
        name,
        store_id: store_id.map(StoreId),
        status,
    }))
}

/// Change which store the list is being shopped in. Manual positions stamped
/// for the previous store stay on the items but stop applying.
pub fn set_list_store(
    conn: &Connection,
    id: ListId,
    store_id: Option<StoreId>,
) -> AisleResult<()> {
    let changed = conn
        .execute(
            "UPDATE lists SET store_id = ?2 WHERE id = ?1",
            params![id.get(), store_id.map(StoreId::get)],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(AisleError::ListNotFound { id });
    }
    Ok(())
}

pub fn set_list_status(conn: &Connection, id: ListId, status: ListStatus) -> AisleResult<()> {
    let changed = conn
        .execute(
            "UPDATE lists SET status = ?2 WHERE id = ?1",
            params![id.get(), status.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(AisleError::ListNotFound { id });
    }
    Ok(())
}
