//! Connection pool managing the write connection and read connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use aisle_core::config::StorageConfig;
use aisle_core::errors::AisleResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Owns the single writer and the read pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open the writer first so the file exists and WAL is on before any
    /// read-only connection attaches.
    pub fn open(path: &Path, config: &StorageConfig) -> AisleResult<Self> {
        let writer = WriteConnection::open(path, config)?;
        let readers = ReadPool::open(path, config)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// In-memory databases are private to their connection, so there is no
    /// read pool; every read goes through the writer.
    pub fn open_in_memory(config: &StorageConfig) -> AisleResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory(config)?,
            readers: None,
            db_path: None,
        })
    }
}
