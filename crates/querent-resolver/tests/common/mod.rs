//! Engine wiring shared by the resolver integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use querent_cache::SemanticCache;
use querent_core::config::{CacheConfig, FeedbackConfig};
use querent_core::traits::{IEmbeddingProvider, ISchemaProvider, ISqlExecutor, IVectorStore};
use querent_feedback::FeedbackStore;
use querent_resolver::QuerentEngine;
use querent_storage::{SqliteDatabase, SqliteVectorStore};
use test_fixtures::{ScriptedGenerator, SynonymEmbedder};

pub const TOP_FIVE_SQL: &str =
    "SELECT product_name, price FROM products ORDER BY price DESC LIMIT 5";

pub struct Harness {
    pub engine: QuerentEngine,
    pub generator: Arc<ScriptedGenerator>,
    pub database: Arc<SqliteDatabase>,
}

pub struct HarnessBuilder {
    generator: ScriptedGenerator,
    vectors: Option<Arc<dyn IVectorStore>>,
    embedder: Option<Arc<dyn IEmbeddingProvider>>,
    schema: Option<Arc<dyn ISchemaProvider>>,
    executor: Option<Arc<dyn ISqlExecutor>>,
    feedback: Option<FeedbackStore>,
}

impl HarnessBuilder {
    pub fn new(generator: ScriptedGenerator) -> Self {
        Self {
            generator,
            vectors: None,
            embedder: None,
            schema: None,
            executor: None,
            feedback: None,
        }
    }

    pub fn vectors(mut self, vectors: Arc<dyn IVectorStore>) -> Self {
        self.vectors = Some(vectors);
        self
    }

    pub fn embedder(mut self, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn schema(mut self, schema: Arc<dyn ISchemaProvider>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn executor(mut self, executor: Arc<dyn ISqlExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn feedback_file(mut self, path: &Path) -> Self {
        self.feedback = Some(FeedbackStore::open(path, &FeedbackConfig::default()));
        self
    }

    pub fn build(self) -> Harness {
        let database = Arc::new(test_fixtures::sample_database());
        let vectors = self
            .vectors
            .unwrap_or_else(|| Arc::new(SqliteVectorStore::open_in_memory().unwrap()));
        let embedder = self
            .embedder
            .unwrap_or_else(|| Arc::new(SynonymEmbedder::new(256)));
        let cache = Arc::new(SemanticCache::new(vectors, embedder, &CacheConfig::default()));
        let feedback = Arc::new(
            self.feedback
                .unwrap_or_else(|| FeedbackStore::in_memory(&FeedbackConfig::default())),
        );
        let generator = Arc::new(self.generator);
        let schema = self.schema.unwrap_or_else(|| database.clone());
        let executor = self.executor.unwrap_or_else(|| database.clone());

        let engine = QuerentEngine::new(schema, executor, cache, feedback, generator.clone());
        Harness {
            engine,
            generator,
            database,
        }
    }
}

/// Default harness: sample shop, in-memory cache and feedback.
pub fn harness(generator: ScriptedGenerator) -> Harness {
    HarnessBuilder::new(generator).build()
}

pub fn actors(result: &querent_core::models::ResolutionResult) -> Vec<&str> {
    result.message_trail.iter().map(|s| s.actor.as_str()).collect()
}
