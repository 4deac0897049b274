//! SQL for each table family. Every function takes a plain `&Connection` so
//! it runs the same on the writer, a reader, or inside a transaction.

pub mod catalog_ops;
pub mod list_item_ops;
pub mod list_ops;
pub mod relation_ops;

use chrono::{DateTime, SecondsFormat, Utc};

use aisle_core::errors::{AisleResult, StorageError};

/// Fixed-width RFC 3339 so text ordering in SQL is chronological.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(table: &str, raw: &str) -> AisleResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| {
            StorageError::CorruptRow {
                table: table.to_string(),
                details: format!("bad timestamp {raw:?}: {e}"),
            }
            .into()
        })
}
