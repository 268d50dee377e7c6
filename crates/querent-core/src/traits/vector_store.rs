use crate::errors::StorageError;
use crate::models::{ScoredPoint, VectorPoint};

/// Nearest-neighbour search backend with named collections.
pub trait IVectorStore: Send + Sync {
    /// Whether `collection` has been provisioned.
    fn collection_exists(&self, collection: &str) -> Result<bool, StorageError>;

    /// Create `collection`. Returns `StorageError::CollectionAlreadyExists`
    /// when it is already present.
    fn create_collection(&self, collection: &str, dimensions: usize) -> Result<(), StorageError>;

    /// Insert or overwrite points by id.
    fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<(), StorageError>;

    /// Top `limit` points by cosine similarity, best first.
    fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, StorageError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
