//! Round-robin pool of SQLite connections.
//!
//! Concurrent resolutions each take a different connection, so one slow
//! statement doesn't hold up the others.

pub mod pragmas;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OpenFlags};

use querent_core::errors::StorageError;

use crate::to_storage_err;

/// Maximum number of pooled connections.
const MAX_POOL_SIZE: usize = 16;

/// A pool of read/write SQLite connections to one database.
pub struct ConnectionPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ConnectionPool {
    /// Open `pool_size` connections to the database file at `path`.
    pub fn open(path: &Path, pool_size: usize, busy_timeout_ms: u32) -> Result<Self, StorageError> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
            pragmas::apply_pragmas(&conn, busy_timeout_ms)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Open an in-memory pool. Uses a uniquely named shared-cache URI so all
    /// connections see the same database; it lives as long as the pool.
    pub fn open_in_memory(pool_size: usize) -> Result<Self, StorageError> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let uri = format!(
            "file:querent-{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4().simple()
        );
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(&uri, flags)
                .map_err(|e| to_storage_err(e.to_string()))?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")
                .map_err(|e| to_storage_err(e.to_string()))?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Take the next connection (round-robin).
    pub fn acquire(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        self.connections[idx]
            .lock()
            .map_err(|e| to_storage_err(format!("connection pool lock poisoned: {e}")))
    }

    /// Execute a closure with a connection from the pool.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.acquire()?;
        f(&guard)
    }

    /// Number of connections in the pool.
    pub fn size(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_size_is_clamped() {
        let pool = ConnectionPool::open_in_memory(0).unwrap();
        assert_eq!(pool.size(), 1);
        let pool = ConnectionPool::open_in_memory(64).unwrap();
        assert_eq!(pool.size(), MAX_POOL_SIZE);
    }

    #[test]
    fn in_memory_connections_share_one_database() {
        let pool = ConnectionPool::open_in_memory(3).unwrap();
        pool.with_conn(|conn| {
            conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (7);")
                .map_err(|e| to_storage_err(e.to_string()))
        })
        .unwrap();

        for _ in 0..3 {
            let x: i64 = pool
                .with_conn(|conn| {
                    conn.query_row("SELECT x FROM t", [], |row| row.get(0))
                        .map_err(|e| to_storage_err(e.to_string()))
                })
                .unwrap();
            assert_eq!(x, 7);
        }
    }

    #[test]
    fn separate_in_memory_pools_are_isolated() {
        let a = ConnectionPool::open_in_memory(1).unwrap();
        let b = ConnectionPool::open_in_memory(1).unwrap();
        a.with_conn(|conn| {
            conn.execute_batch("CREATE TABLE only_in_a (x INTEGER);")
                .map_err(|e| to_storage_err(e.to_string()))
        })
        .unwrap();
        let exists: i64 = b
            .with_conn(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE name = 'only_in_a'",
                    [],
                    |row| row.get(0),
                )
                .map_err(|e| to_storage_err(e.to_string()))
            })
            .unwrap();
        assert_eq!(exists, 0);
    }

    #[test]
    fn file_pool_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let pool = ConnectionPool::open(&dir.path().join("wal.db"), 2, 5_000).unwrap();
        let wal = pool.with_conn(pragmas::verify_wal_mode).unwrap();
        assert!(wal);
    }
}
