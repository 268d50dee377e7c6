//! # querent-storage
//!
//! SQLite persistence for Querent: the relational database the questions are
//! answered against (schema inspection + SQL execution) and a brute-force
//! cosine vector store backing the semantic cache.

pub mod database;
pub mod pool;
pub mod vector;

pub use database::SqliteDatabase;
pub use vector::SqliteVectorStore;

use querent_core::errors::StorageError;

/// Helper to convert a message into a `StorageError`.
pub(crate) fn to_storage_err(msg: impl Into<String>) -> StorageError {
    StorageError::SqliteError {
        message: msg.into(),
    }
}
