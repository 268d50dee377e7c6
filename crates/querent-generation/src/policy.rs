//! Generation policy: one prompt, one provider call, fence stripped.

use std::sync::Arc;

use tracing::debug;

use querent_core::errors::GenerationError;
use querent_core::models::{FeedbackEvent, Metrics};
use querent_core::traits::IGenerationProvider;

use crate::fence::strip_code_fence;
use crate::prompt::build_prompt;

pub struct GenerationPolicy {
    provider: Arc<dyn IGenerationProvider>,
}

impl GenerationPolicy {
    pub fn new(provider: Arc<dyn IGenerationProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate SQL for `question`. The text is not validated as SQL.
    pub fn generate(
        &self,
        question: &str,
        schema: &str,
        metrics: &Metrics,
        examples: &[FeedbackEvent],
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(question, schema, metrics, examples);
        debug!(
            provider = self.provider.name(),
            level = %metrics.performance_level,
            examples = examples.len(),
            prompt_len = prompt.len(),
            "requesting SQL generation"
        );
        let raw = self.provider.generate(&prompt)?;
        let sql = strip_code_fence(&raw);
        if sql.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(sql)
    }
}
