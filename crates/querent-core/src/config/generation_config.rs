use serde::{Deserialize, Serialize};

use super::defaults;

/// SQL generation (chat completion) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chat model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// OpenAI-compatible API base URL.
    pub base_url: String,
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Request timeout (seconds).
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            temperature: defaults::DEFAULT_TEMPERATURE,
            base_url: defaults::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: defaults::DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}
