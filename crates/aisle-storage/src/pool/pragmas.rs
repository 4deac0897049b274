//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use aisle_core::config::StorageConfig;
use aisle_core::errors::AisleResult;

use crate::to_storage_err;

/// Pragmas for the write connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> AisleResult<()> {
    let journal = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal};
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {};
        PRAGMA foreign_keys = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Pragmas for read-only connections. Journal mode is a property of the
/// database file and is left to the writer.
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> AisleResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA busy_timeout = {};
        PRAGMA query_only = ON;
        ",
        config.busy_timeout_ms
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Whether WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> AisleResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
