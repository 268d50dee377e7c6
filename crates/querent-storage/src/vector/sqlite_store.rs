//! SQLite-backed vector collections.
//!
//! Brute-force cosine scan over little-endian f32 blobs. Good enough for a
//! query cache with thousands of entries; swap in Qdrant for more.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info};

use querent_core::errors::StorageError;
use querent_core::models::{ScoredPoint, VectorPoint};
use querent_core::traits::IVectorStore;

use super::codec::{bytes_to_f32_vec, cosine_similarity, f32_vec_to_bytes};
use crate::pool::pragmas;
use crate::to_storage_err;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vector_collections (
    name        TEXT PRIMARY KEY,
    dimensions  INTEGER NOT NULL,
    created_at  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS vector_points (
    collection  TEXT NOT NULL REFERENCES vector_collections(name),
    id          TEXT NOT NULL,
    embedding   BLOB NOT NULL,
    dimensions  INTEGER NOT NULL,
    payload     TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    PRIMARY KEY (collection, id)
);
";

/// Vector store persisted in its own SQLite database.
pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
}

impl SqliteVectorStore {
    /// Open (or create) a file-backed store.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn, 5_000)?;
        Self::init(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|e| to_storage_err(format!("vector store lock poisoned: {e}")))
    }

    /// Number of points stored in `collection`.
    pub fn count(&self, collection: &str) -> Result<usize, StorageError> {
        let conn = self.lock()?;
        let n: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM vector_points WHERE collection = ?1",
                params![collection],
                |row| row.get(0),
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        Ok(n as usize)
    }
}

fn collection_dimensions(conn: &Connection, collection: &str) -> Result<usize, StorageError> {
    let dims: Option<i64> = conn
        .query_row(
            "SELECT dimensions FROM vector_collections WHERE name = ?1",
            params![collection],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    dims.map(|d| d as usize)
        .ok_or_else(|| StorageError::CollectionNotFound {
            name: collection.to_string(),
        })
}

impl IVectorStore for SqliteVectorStore {
    fn collection_exists(&self, collection: &str) -> Result<bool, StorageError> {
        let conn = self.lock()?;
        match collection_dimensions(&conn, collection) {
            Ok(_) => Ok(true),
            Err(StorageError::CollectionNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create_collection(&self, collection: &str, dimensions: usize) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT INTO vector_collections (name, dimensions, created_at) VALUES (?1, ?2, ?3)",
            params![collection, dimensions as i64, Utc::now().to_rfc3339()],
        );
        match inserted {
            Ok(_) => {
                info!(collection, dimensions, "vector collection created");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::CollectionAlreadyExists {
                    name: collection.to_string(),
                })
            }
            Err(e) => Err(to_storage_err(e.to_string())),
        }
    }

    fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<(), StorageError> {
        let mut conn = self.lock()?;
        let dims = collection_dimensions(&conn, collection)?;
        if let Some(bad) = points.iter().find(|p| p.vector.len() != dims) {
            return Err(StorageError::DimensionMismatch {
                expected: dims,
                actual: bad.vector.len(),
            });
        }

        let tx = conn
            .transaction()
            .map_err(|e| to_storage_err(e.to_string()))?;
        let now = Utc::now().to_rfc3339();
        for point in &points {
            tx.execute(
                "INSERT INTO vector_points (collection, id, embedding, dimensions, payload, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(collection, id) DO UPDATE SET
                    embedding = excluded.embedding,
                    dimensions = excluded.dimensions,
                    payload = excluded.payload,
                    updated_at = excluded.updated_at",
                params![
                    collection,
                    point.id,
                    f32_vec_to_bytes(&point.vector),
                    dims as i64,
                    point.payload.to_string(),
                    now
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
        }
        tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
        debug!(collection, count = points.len(), "points upserted");
        Ok(())
    }

    fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, StorageError> {
        let conn = self.lock()?;
        let dims = collection_dimensions(&conn, collection)?;
        if vector.len() != dims {
            return Err(StorageError::DimensionMismatch {
                expected: dims,
                actual: vector.len(),
            });
        }
        if vector.iter().all(|x| *x == 0.0) {
            return Ok(vec![]);
        }

        let mut stmt = conn
            .prepare("SELECT id, embedding, payload FROM vector_points WHERE collection = ?1")
            .map_err(|e| to_storage_err(e.to_string()))?;
        let rows = stmt
            .query_map(params![collection], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Vec<u8>>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .map_err(|e| to_storage_err(e.to_string()))?;

        let mut scored = Vec::new();
        for row in rows {
            let (id, blob, payload) = row.map_err(|e| to_storage_err(e.to_string()))?;
            let stored = bytes_to_f32_vec(&blob);
            if stored.len() != dims {
                continue;
            }
            let payload = serde_json::from_str(&payload)
                .map_err(|e| to_storage_err(format!("payload of point {id}: {e}")))?;
            scored.push(ScoredPoint {
                score: cosine_similarity(vector, &stored),
                id,
                payload,
            });
        }

        // Sort by similarity descending.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);
        Ok(scored)
    }

    fn name(&self) -> &str {
        "sqlite-vectors"
    }
}
