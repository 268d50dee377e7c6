//! Qdrant REST vector store.
//!
//! Uses the blocking reqwest client against the HTTP API:
//! `GET /collections/{name}`, `PUT /collections/{name}`,
//! `PUT /collections/{name}/points?wait=true` and
//! `POST /collections/{name}/points/search`.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use querent_core::config::CacheConfig;
use querent_core::errors::StorageError;
use querent_core::models::{ScoredPoint, VectorPoint};
use querent_core::traits::IVectorStore;

#[derive(Debug, Serialize)]
struct CreateCollection {
    vectors: VectorParams,
}

#[derive(Debug, Serialize)]
struct VectorParams {
    size: usize,
    distance: &'static str,
}

#[derive(Debug, Serialize)]
struct UpsertPoints<'a> {
    points: Vec<PointStruct<'a>>,
}

#[derive(Debug, Serialize)]
struct PointStruct<'a> {
    id: &'a str,
    vector: &'a [f32],
    payload: &'a Value,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: Value,
    score: f64,
    #[serde(default)]
    payload: Option<Value>,
}

/// Vector store backed by a Qdrant instance.
pub struct QdrantVectorStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl QdrantVectorStore {
    pub fn from_config(config: &CacheConfig) -> Result<Self, StorageError> {
        Self::new(
            &config.qdrant_url,
            config.qdrant_api_key.clone(),
            Duration::from_secs(config.qdrant_timeout_secs),
        )
    }

    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::BackendUnreachable {
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        let request = match &self.api_key {
            Some(key) => request.header("api-key", key),
            None => request,
        };
        request.send().map_err(|e| StorageError::BackendUnreachable {
            reason: e.to_string(),
        })
    }

    /// Map a non-success response to a storage error.
    fn failure(collection: &str, response: Response) -> StorageError {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        classify_failure(collection, status, &body)
    }
}

fn classify_failure(collection: &str, status: StatusCode, body: &str) -> StorageError {
    if status == StatusCode::CONFLICT || body.contains("already exists") {
        return StorageError::CollectionAlreadyExists {
            name: collection.to_string(),
        };
    }
    if status == StatusCode::NOT_FOUND {
        return StorageError::CollectionNotFound {
            name: collection.to_string(),
        };
    }
    StorageError::BackendUnreachable {
        reason: format!("qdrant returned {status}: {body}"),
    }
}

/// Qdrant ids are UUID strings or unsigned integers.
fn point_id(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl IVectorStore for QdrantVectorStore {
    fn collection_exists(&self, collection: &str) -> Result<bool, StorageError> {
        let response = self.send(self.client.get(self.url(&format!("/collections/{collection}"))))?;
        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::failure(collection, response)),
        }
    }

    fn create_collection(&self, collection: &str, dimensions: usize) -> Result<(), StorageError> {
        let body = CreateCollection {
            vectors: VectorParams {
                size: dimensions,
                distance: "Cosine",
            },
        };
        let response = self.send(
            self.client
                .put(self.url(&format!("/collections/{collection}")))
                .json(&body),
        )?;
        if !response.status().is_success() {
            return Err(Self::failure(collection, response));
        }
        info!(collection, dimensions, "qdrant collection created");
        Ok(())
    }

    fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<(), StorageError> {
        let body = UpsertPoints {
            points: points
                .iter()
                .map(|p| PointStruct {
                    id: &p.id,
                    vector: &p.vector,
                    payload: &p.payload,
                })
                .collect(),
        };
        let response = self.send(
            self.client
                .put(self.url(&format!("/collections/{collection}/points?wait=true")))
                .json(&body),
        )?;
        if !response.status().is_success() {
            return Err(Self::failure(collection, response));
        }
        debug!(collection, count = points.len(), "qdrant points upserted");
        Ok(())
    }

    fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, StorageError> {
        let body = SearchRequest {
            vector,
            limit,
            with_payload: true,
        };
        let response = self.send(
            self.client
                .post(self.url(&format!("/collections/{collection}/points/search")))
                .json(&body),
        )?;
        if !response.status().is_success() {
            return Err(Self::failure(collection, response));
        }
        let parsed: SearchResponse =
            response.json().map_err(|e| StorageError::BackendUnreachable {
                reason: format!("invalid search response: {e}"),
            })?;
        Ok(parsed
            .result
            .into_iter()
            .map(|hit| ScoredPoint {
                id: point_id(&hit.id),
                score: hit.score,
                payload: hit.payload.unwrap_or(Value::Null),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "qdrant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_body_uses_cosine_distance() {
        let body = serde_json::to_value(CreateCollection {
            vectors: VectorParams {
                size: 1536,
                distance: "Cosine",
            },
        })
        .unwrap();
        assert_eq!(body, json!({"vectors": {"size": 1536, "distance": "Cosine"}}));
    }

    #[test]
    fn search_response_accepts_numeric_and_uuid_ids() {
        let parsed: SearchResponse = serde_json::from_value(json!({
            "result": [
                {"id": "5c56c793-69f3-4fbf-87e6-c4bf54c28c26", "score": 0.93, "payload": {"sql_query": "SELECT 1"}},
                {"id": 42, "score": 0.5}
            ],
            "status": "ok",
            "time": 0.001
        }))
        .unwrap();
        assert_eq!(point_id(&parsed.result[0].id), "5c56c793-69f3-4fbf-87e6-c4bf54c28c26");
        assert_eq!(point_id(&parsed.result[1].id), "42");
        assert!(parsed.result[1].payload.is_none());
    }

    #[test]
    fn failures_are_classified() {
        assert!(matches!(
            classify_failure("c", StatusCode::CONFLICT, ""),
            StorageError::CollectionAlreadyExists { .. }
        ));
        assert!(matches!(
            classify_failure(
                "c",
                StatusCode::BAD_REQUEST,
                r#"{"status":{"error":"Wrong input: Collection `c` already exists!"}}"#
            ),
            StorageError::CollectionAlreadyExists { .. }
        ));
        assert!(matches!(
            classify_failure("c", StatusCode::NOT_FOUND, ""),
            StorageError::CollectionNotFound { .. }
        ));
        assert!(matches!(
            classify_failure("c", StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            StorageError::BackendUnreachable { .. }
        ));
    }

    #[test]
    fn unreachable_server_is_reported() {
        let store =
            QdrantVectorStore::new("http://127.0.0.1:9/", None, Duration::from_secs(2)).unwrap();
        assert_eq!(store.base_url, "http://127.0.0.1:9");
        let err = store.collection_exists("sql_query_cache").unwrap_err();
        assert!(matches!(err, StorageError::BackendUnreachable { .. }));
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let store =
            QdrantVectorStore::new("http://localhost:6333", Some("  ".into()), Duration::from_secs(1))
                .unwrap();
        assert!(store.api_key.is_none());
    }
}
