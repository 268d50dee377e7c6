//! Vector collections for the semantic cache.

pub mod codec;
mod sqlite_store;

pub use sqlite_store::SqliteVectorStore;
