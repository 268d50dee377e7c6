//! The resolution state machine.
//!
//! Each `step` performs the work of the current stage, appends one trail
//! entry, and picks the next stage. No lock is held across a collaborator
//! call; the feedback store and cache synchronize internally.

use std::sync::Arc;

use tracing::{debug, info, warn};

use querent_cache::SemanticCache;
use querent_core::constants::actors;
use querent_core::errors::GenerationError;
use querent_core::models::ResolutionResult;
use querent_core::traits::{ISchemaProvider, ISqlExecutor};
use querent_feedback::FeedbackStore;
use querent_generation::GenerationPolicy;
use querent_observability::{cache_span, generation_span, resolution_span};

use crate::stage::Stage;
use crate::state::ResolutionState;

pub struct ResolutionController {
    cache: Arc<SemanticCache>,
    feedback: Arc<FeedbackStore>,
    schema: Arc<dyn ISchemaProvider>,
    executor: Arc<dyn ISqlExecutor>,
    policy: GenerationPolicy,
}

impl ResolutionController {
    pub fn new(
        cache: Arc<SemanticCache>,
        feedback: Arc<FeedbackStore>,
        schema: Arc<dyn ISchemaProvider>,
        executor: Arc<dyn ISqlExecutor>,
        policy: GenerationPolicy,
    ) -> Self {
        Self {
            cache,
            feedback,
            schema,
            executor,
            policy,
        }
    }

    /// Resolve `question` to completion.
    pub fn run(&self, question: &str) -> ResolutionResult {
        let resolution_id = uuid::Uuid::new_v4().to_string();
        let span = resolution_span!(resolution_id, question);
        let _guard = span.enter();

        let mut state = ResolutionState::new(question);
        while !state.next_step.is_terminal() {
            self.step(&mut state);
        }

        info!(
            cached = state.cached,
            rows = state.results.len(),
            error = state.error.is_some(),
            steps = state.message_trail.len(),
            "resolution finished"
        );
        state.into_result(resolution_id)
    }

    /// Perform the current stage and advance `state.next_step`.
    pub fn step(&self, state: &mut ResolutionState) {
        let stage = state.next_step;
        debug!(stage = %stage, "resolution step");
        match stage {
            Stage::CacheCheck => self.check_cache(state),
            Stage::Generate => self.generate(state),
            Stage::Execute => self.execute(state),
            Stage::Terminal => {}
        }
    }

    fn check_cache(&self, state: &mut ResolutionState) {
        let span = cache_span!("lookup");
        let _guard = span.enter();

        match self.cache.lookup(&state.question) {
            Ok(Some(hit)) => {
                info!(score = hit.score, original = %hit.original_question, "cache hit");
                state.cached = true;
                state.record(
                    actors::CACHE_AGENT,
                    format!("Cache hit! Found cached query: {}", hit.sql_query),
                );
                state.sql_query = hit.sql_query;
                state.next_step = Stage::Execute;
            }
            Ok(None) => {
                state.cached = false;
                state.record(actors::CACHE_AGENT, "Cache miss - routing to SQL generator");
                state.next_step = Stage::Generate;
            }
            Err(e) => {
                warn!(error = %e, "cache unavailable, treating as miss");
                state.cached = false;
                state.record(
                    actors::CACHE_AGENT,
                    format!("Cache unavailable ({e}) - routing to SQL generator"),
                );
                state.next_step = Stage::Generate;
            }
        }
    }

    fn generate(&self, state: &mut ResolutionState) {
        if state.cached {
            state.next_step = Stage::Execute;
            return;
        }
        let span = generation_span!(self.policy.provider_name());
        let _guard = span.enter();

        let metrics = self.feedback.metrics_for(&state.question);
        let examples = self.feedback.similar_successful(&state.question);
        state.feedback_metrics = Some(metrics.clone());
        state.similar_examples = examples.clone();

        let generated = self
            .schema
            .get_schema()
            .map_err(|e| GenerationError::SchemaUnavailable {
                reason: e.to_string(),
            })
            .and_then(|schema| {
                self.policy
                    .generate(&state.question, &schema, &metrics, &examples)
            });

        match generated {
            Ok(sql) => {
                let mut message = format!("Generated SQL: {sql}");
                if let Some(warning) = &metrics.warning {
                    message.push('\n');
                    message.push_str(warning);
                }
                info!(level = %metrics.performance_level, examples = examples.len(), "SQL generated");
                state.record(actors::SQL_GENERATOR, message);
                state.sql_query = sql;
                state.next_step = Stage::Execute;
            }
            Err(e) => {
                warn!(error = %e, "SQL generation failed");
                state.record(actors::SQL_GENERATOR, format!("Error generating SQL: {e}"));
                state.fail(e.to_string());
            }
        }
    }

    fn execute(&self, state: &mut ResolutionState) {
        match self.executor.execute(&state.sql_query) {
            Ok(rows) => {
                if !state.cached {
                    if let Err(e) = self.cache.store(&state.question, &state.sql_query) {
                        warn!(error = %e, "failed to cache generated query");
                    }
                }
                state.record(
                    actors::EXECUTOR,
                    format!("Executed query successfully. Found {} rows.", rows.len()),
                );
                state.results = rows;
            }
            Err(e) => {
                warn!(error = %e, sql = %state.sql_query, "query execution failed");
                state.record(actors::EXECUTOR, format!("Error executing query: {e}"));
                state.results.clear();
                state.error = Some(e.to_string());
            }
        }
        state.next_step = Stage::Terminal;
    }
}
