//! Versioned schema migrations, recorded in `schema_version`.

mod v001_catalog_tables;
mod v002_list_tables;
mod v003_relation_tables;

use rusqlite::{params, Connection};
use tracing::debug;

use aisle_core::constants::SCHEMA_VERSION;
use aisle_core::errors::{AisleResult, StorageError};

type MigrationFn = fn(&Connection) -> AisleResult<()>;

const MIGRATIONS: [(u32, MigrationFn); SCHEMA_VERSION as usize] = [
    (1, v001_catalog_tables::migrate),
    (2, v002_list_tables::migrate),
    (3, v003_relation_tables::migrate),
];

/// Apply every migration newer than the recorded schema version, each in its
/// own transaction.
pub fn run_migrations(conn: &Connection) -> AisleResult<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| failed(0, e.to_string()))?;

    let current = current_version(conn)?;
    for (version, migrate) in MIGRATIONS {
        if version <= current {
            continue;
        }
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| failed(version, e.to_string()))?;
        migrate(&tx).map_err(|e| failed(version, e.to_string()))?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| failed(version, e.to_string()))?;
        tx.commit().map_err(|e| failed(version, e.to_string()))?;
        debug!(version, "applied schema migration");
    }
    current_version(conn)
}

pub fn current_version(conn: &Connection) -> AisleResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| failed(0, e.to_string()))
}

fn failed(version: u32, reason: String) -> aisle_core::AisleError {
    StorageError::MigrationFailed { version, reason }.into()
}
