//! Shared fixtures for Querent integration tests.
//!
//! The sample shopping/sales database, a legacy feedback log, and scripted
//! stand-ins for the embedding, generation, vector, and database
//! collaborators.

pub mod mocks;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use querent_storage::SqliteDatabase;

pub use mocks::{
    FailingEmbedder, FailingExecutor, FailingSchemaProvider, FailingVectorStore,
    ScriptedGenerator, SynonymEmbedder,
};

/// DDL and seed rows for the sample shop. Idempotent (`INSERT OR IGNORE`).
pub const SAMPLE_SHOP_SQL: &str = include_str!("../data/sample_shop.sql");

/// Directory holding the fixture data files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Create the shop tables and rows in `db`.
///
/// # Panics
/// Panics if the seed script fails.
pub fn seed_sample_database(db: &SqliteDatabase) {
    db.execute_batch(SAMPLE_SHOP_SQL)
        .unwrap_or_else(|e| panic!("Failed to seed sample database: {e}"));
}

/// A fresh in-memory database with the shop seeded.
pub fn sample_database() -> SqliteDatabase {
    let db = SqliteDatabase::open_in_memory()
        .unwrap_or_else(|e| panic!("Failed to open in-memory database: {e}"));
    seed_sample_database(&db);
    db
}
