//! SqliteVectorStore: provisioning, overwrite semantics, ranking, persistence.

use querent_core::errors::StorageError;
use querent_core::models::VectorPoint;
use querent_core::traits::IVectorStore;
use querent_storage::SqliteVectorStore;
use serde_json::json;

fn point(id: &str, vector: Vec<f32>, sql: &str) -> VectorPoint {
    VectorPoint {
        id: id.to_string(),
        vector,
        payload: json!({ "question": id, "sql_query": sql }),
    }
}

#[test]
fn create_collection_twice_reports_already_exists() {
    let store = SqliteVectorStore::open_in_memory().unwrap();
    assert!(!store.collection_exists("cache").unwrap());
    store.create_collection("cache", 3).unwrap();
    assert!(store.collection_exists("cache").unwrap());

    let err = store.create_collection("cache", 3).unwrap_err();
    assert!(matches!(err, StorageError::CollectionAlreadyExists { .. }));
}

#[test]
fn upsert_into_missing_collection_fails() {
    let store = SqliteVectorStore::open_in_memory().unwrap();
    let err = store
        .upsert("nope", vec![point("a", vec![1.0, 0.0], "SELECT 1")])
        .unwrap_err();
    assert!(matches!(err, StorageError::CollectionNotFound { .. }));
}

#[test]
fn upsert_same_id_overwrites() {
    let store = SqliteVectorStore::open_in_memory().unwrap();
    store.create_collection("cache", 2).unwrap();
    store
        .upsert("cache", vec![point("q", vec![1.0, 0.0], "SELECT 1")])
        .unwrap();
    store
        .upsert("cache", vec![point("q", vec![1.0, 0.0], "SELECT 2")])
        .unwrap();

    assert_eq!(store.count("cache").unwrap(), 1);
    let hits = store.search("cache", &[1.0, 0.0], 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].payload["sql_query"], "SELECT 2");
}

#[test]
fn search_ranks_by_cosine_descending() {
    let store = SqliteVectorStore::open_in_memory().unwrap();
    store.create_collection("cache", 2).unwrap();
    store
        .upsert(
            "cache",
            vec![
                point("far", vec![0.0, 1.0], "far"),
                point("near", vec![1.0, 0.1], "near"),
                point("mid", vec![1.0, 1.0], "mid"),
            ],
        )
        .unwrap();

    let hits = store.search("cache", &[1.0, 0.0], 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "near");
    assert_eq!(hits[1].id, "mid");
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn search_rejects_wrong_dimensions() {
    let store = SqliteVectorStore::open_in_memory().unwrap();
    store.create_collection("cache", 4).unwrap();
    let err = store.search("cache", &[1.0, 0.0], 1).unwrap_err();
    assert!(matches!(
        err,
        StorageError::DimensionMismatch {
            expected: 4,
            actual: 2
        }
    ));
}

#[test]
fn zero_query_vector_returns_nothing() {
    let store = SqliteVectorStore::open_in_memory().unwrap();
    store.create_collection("cache", 2).unwrap();
    store
        .upsert("cache", vec![point("a", vec![1.0, 0.0], "SELECT 1")])
        .unwrap();
    assert!(store.search("cache", &[0.0, 0.0], 1).unwrap().is_empty());
}

#[test]
fn points_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vectors.db");
    {
        let store = SqliteVectorStore::open(&path).unwrap();
        store.create_collection("cache", 2).unwrap();
        store
            .upsert("cache", vec![point("persisted", vec![0.6, 0.8], "SELECT 42")])
            .unwrap();
    }
    let store = SqliteVectorStore::open(&path).unwrap();
    assert!(store.collection_exists("cache").unwrap());
    let hits = store.search("cache", &[0.6, 0.8], 1).unwrap();
    assert_eq!(hits[0].payload["sql_query"], "SELECT 42");
}
