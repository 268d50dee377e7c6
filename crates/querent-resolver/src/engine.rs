//! QuerentEngine, the caller-facing surface.
//!
//! Owns the shared services (feedback store, semantic cache) and the
//! controller. Every service is `Send + Sync`, so one engine can serve
//! concurrent requests behind an `Arc`.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use querent_cache::{QdrantVectorStore, SemanticCache};
use querent_core::config::QuerentConfig;
use querent_core::errors::ValidationError;
use querent_core::models::{FailedPattern, FeedbackReceipt, OverallStats, ResolutionResult, Vote};
use querent_core::traits::{
    IEmbeddingProvider, IGenerationProvider, ISchemaProvider, ISqlExecutor, IVectorStore,
};
use querent_core::QuerentResult;
use querent_embeddings::EmbeddingEngine;
use querent_feedback::FeedbackStore;
use querent_generation::{GenerationPolicy, OpenAiChatProvider};
use querent_observability::feedback_span;
use querent_storage::{SqliteDatabase, SqliteVectorStore};

use crate::controller::ResolutionController;
use crate::state::ResolutionState;

pub struct QuerentEngine {
    controller: ResolutionController,
    feedback: Arc<FeedbackStore>,
    cache: Arc<SemanticCache>,
    schema: Arc<dyn ISchemaProvider>,
}

impl QuerentEngine {
    /// Assemble an engine from explicit collaborators.
    pub fn new(
        schema: Arc<dyn ISchemaProvider>,
        executor: Arc<dyn ISqlExecutor>,
        cache: Arc<SemanticCache>,
        feedback: Arc<FeedbackStore>,
        generator: Arc<dyn IGenerationProvider>,
    ) -> Self {
        let controller = ResolutionController::new(
            Arc::clone(&cache),
            Arc::clone(&feedback),
            Arc::clone(&schema),
            executor,
            GenerationPolicy::new(generator),
        );
        Self {
            controller,
            feedback,
            cache,
            schema,
        }
    }

    /// Build the default stack described by `config`: SQLite database,
    /// configured vector backend, embedding engine, file-backed feedback log,
    /// and an OpenAI-compatible chat provider.
    pub fn from_config(config: &QuerentConfig) -> QuerentResult<Self> {
        let database = Arc::new(SqliteDatabase::open(&config.database)?);

        let vectors: Arc<dyn IVectorStore> = match config.cache.backend.as_str() {
            "qdrant" => Arc::new(QdrantVectorStore::from_config(&config.cache)?),
            _ => Arc::new(SqliteVectorStore::open(Path::new(
                &config.cache.vector_store_path,
            ))?),
        };
        let embedder: Arc<dyn IEmbeddingProvider> =
            Arc::new(EmbeddingEngine::new(&config.embedding));
        let cache = Arc::new(SemanticCache::new(vectors, embedder, &config.cache));

        let feedback = Arc::new(FeedbackStore::open(
            &config.feedback.log_path,
            &config.feedback,
        ));
        let generator = Arc::new(OpenAiChatProvider::from_config(&config.generation)?);

        info!(
            database = %config.database.path,
            cache_backend = %config.cache.backend,
            feedback_log = %config.feedback.log_path,
            model = %config.generation.model,
            "QuerentEngine initialized"
        );
        Ok(Self::new(
            database.clone(),
            database,
            cache,
            feedback,
            generator,
        ))
    }

    /// Resolve a natural-language question. Failures are reported in the
    /// result's `error`, never as a panic or `Err`.
    pub fn resolve(&self, question: &str) -> ResolutionResult {
        if question.trim().is_empty() {
            let mut state = ResolutionState::new(question);
            state.fail(ValidationError::EmptyQuestion.to_string());
            return state.into_result(uuid::Uuid::new_v4().to_string());
        }
        self.controller.run(question)
    }

    /// Record a thumbs-up/down vote on `sql_query` as the answer to `question`.
    ///
    /// Invalid votes are rejected before the store is touched. A failed disk
    /// write is reported in `receipt.warning`; the vote still counts.
    pub fn record_feedback(
        &self,
        question: &str,
        sql_query: &str,
        vote: &str,
    ) -> QuerentResult<FeedbackReceipt> {
        let span = feedback_span!(vote);
        let _guard = span.enter();

        let vote: Vote = vote.parse()?;
        if question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion.into());
        }

        let receipt = match self.feedback.record(question, sql_query, vote) {
            Ok(metrics) => FeedbackReceipt {
                metrics,
                warning: None,
            },
            Err(e) => {
                warn!(error = %e, "feedback kept in memory only");
                FeedbackReceipt {
                    metrics: self.feedback.metrics_for(question),
                    warning: Some(format!("Feedback recorded but not persisted: {e}")),
                }
            }
        };
        info!(
            level = %receipt.metrics.performance_level,
            total = receipt.metrics.total_feedback,
            "feedback recorded"
        );
        Ok(receipt)
    }

    pub fn feedback_stats(&self) -> OverallStats {
        self.feedback.overall_stats()
    }

    pub fn failed_patterns(&self) -> Vec<FailedPattern> {
        self.feedback.failed_patterns()
    }

    /// Current database schema description.
    pub fn schema(&self) -> QuerentResult<String> {
        Ok(self.schema.get_schema()?)
    }

    pub fn feedback_store(&self) -> &Arc<FeedbackStore> {
        &self.feedback
    }

    pub fn cache(&self) -> &Arc<SemanticCache> {
        &self.cache
    }
}
