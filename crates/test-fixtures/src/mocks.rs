//! Scripted collaborators.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use querent_core::errors::{EmbeddingError, ExecutionError, GenerationError, StorageError};
use querent_core::models::{Row, ScoredPoint, VectorPoint};
use querent_core::traits::{
    IEmbeddingProvider, IGenerationProvider, ISchemaProvider, ISqlExecutor, IVectorStore,
};

/// Words folded together before hashing.
const SYNONYMS: &[(&str, &str)] = &[
    ("best", "top"),
    ("greatest", "top"),
    ("highest", "top"),
    ("items", "products"),
    ("goods", "products"),
    ("clients", "customers"),
    ("buyers", "customers"),
    ("earnings", "revenue"),
    ("income", "revenue"),
];

/// Words dropped before hashing.
const STOPWORDS: &[&str] = &["the", "a", "an", "me", "show", "what", "are", "is", "all", "of"];

/// Deterministic bag-of-words embedder that treats common synonyms as the
/// same word, so near-duplicate questions land on the same vector.
pub struct SynonymEmbedder {
    dimensions: usize,
    calls: AtomicUsize,
}

impl SynonymEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn canonical_words(text: &str) -> Vec<String> {
        let synonyms: HashMap<&str, &str> = SYNONYMS.iter().copied().collect();
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty() && !STOPWORDS.contains(w))
            .map(|w| synonyms.get(w).copied().unwrap_or(w).to_string())
            .collect()
    }

    fn bucket(word: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in word.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }
}

impl IEmbeddingProvider for SynonymEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut vec = vec![0.0f32; self.dimensions];
        for word in Self::canonical_words(text) {
            vec[Self::bucket(&word, self.dimensions)] += 1.0;
        }
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vec.iter_mut().for_each(|x| *x /= norm);
        }
        Ok(vec)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "synonym-mock"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Embedder that always fails.
pub struct FailingEmbedder {
    pub dimensions: usize,
}

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "embedding service offline".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "failing-mock"
    }

    fn is_available(&self) -> bool {
        true
    }
}

enum Script {
    /// Responses in order; exhausted scripts fail with `EmptyResponse`.
    Sequence(Mutex<VecDeque<String>>),
    Always(String),
    Fail(String),
}

/// Generation provider returning canned completions and recording prompts.
pub struct ScriptedGenerator {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Return `responses` one per call, in order.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_script(Script::Sequence(Mutex::new(
            responses.into_iter().map(Into::into).collect(),
        )))
    }

    /// Return `response` on every call.
    pub fn always(response: impl Into<String>) -> Self {
        Self::with_script(Script::Always(response.into()))
    }

    /// Fail every call with `RequestFailed { reason }`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(reason.into()))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }
}

impl IGenerationProvider for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        match &self.script {
            Script::Sequence(queue) => queue
                .lock()
                .ok()
                .and_then(|mut q| q.pop_front())
                .ok_or(GenerationError::EmptyResponse),
            Script::Always(response) => Ok(response.clone()),
            Script::Fail(reason) => Err(GenerationError::RequestFailed {
                reason: reason.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted-mock"
    }
}

/// Vector store whose every operation reports the backend unreachable.
pub struct FailingVectorStore;

impl FailingVectorStore {
    fn unreachable() -> StorageError {
        StorageError::BackendUnreachable {
            reason: "connection refused".to_string(),
        }
    }
}

impl IVectorStore for FailingVectorStore {
    fn collection_exists(&self, _collection: &str) -> Result<bool, StorageError> {
        Err(Self::unreachable())
    }

    fn create_collection(&self, _collection: &str, _dimensions: usize) -> Result<(), StorageError> {
        Err(Self::unreachable())
    }

    fn upsert(&self, _collection: &str, _points: Vec<VectorPoint>) -> Result<(), StorageError> {
        Err(Self::unreachable())
    }

    fn search(
        &self,
        _collection: &str,
        _vector: &[f32],
        _limit: usize,
    ) -> Result<Vec<ScoredPoint>, StorageError> {
        Err(Self::unreachable())
    }

    fn name(&self) -> &str {
        "failing-mock"
    }
}

/// Executor that rejects every statement with `message`.
pub struct FailingExecutor {
    pub message: String,
}

impl ISqlExecutor for FailingExecutor {
    fn execute(&self, _sql: &str) -> Result<Vec<Row>, ExecutionError> {
        Err(ExecutionError::Statement {
            message: self.message.clone(),
        })
    }
}

/// Schema provider that cannot reach its database.
pub struct FailingSchemaProvider;

impl ISchemaProvider for FailingSchemaProvider {
    fn get_schema(&self) -> Result<String, StorageError> {
        Err(StorageError::SqliteError {
            message: "unable to open database file".to_string(),
        })
    }
}
