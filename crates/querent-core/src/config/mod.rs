//! Configuration for every Querent subsystem.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables
//! 2. TOML file passed to [`QuerentConfig::load`]
//! 3. Compiled defaults (see [`defaults`])

mod cache_config;
mod database_config;
pub mod defaults;
mod embedding_config;
mod feedback_config;
mod generation_config;
mod observability_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use database_config::DatabaseConfig;
pub use embedding_config::EmbeddingConfig;
pub use feedback_config::FeedbackConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerentConfig {
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub feedback: FeedbackConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub observability: ObservabilityConfig,
}

impl QuerentConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    /// and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: QuerentConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: QuerentConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
                path: "<string>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `QUERENT_*` and provider environment variables on top of the
    /// current values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("QUERENT_DATABASE_PATH") {
            self.database.path = path;
        }
        if let Ok(path) = std::env::var("QUERENT_FEEDBACK_PATH") {
            self.feedback.log_path = path;
        }
        if let Ok(url) = std::env::var("QDRANT_URL") {
            self.cache.qdrant_url = url;
        }
        if let Ok(key) = std::env::var("QDRANT_API_KEY") {
            self.cache.qdrant_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            let key = key.trim().to_string();
            if self.embedding.api_key.is_none() {
                self.embedding.api_key = Some(key.clone());
            }
            if self.generation.api_key.is_none() {
                self.generation.api_key = Some(key);
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval("cache.similarity_threshold", self.cache.similarity_threshold)?;
        check_unit_interval(
            "feedback.example_similarity_threshold",
            self.feedback.example_similarity_threshold,
        )?;
        if self.feedback.example_limit == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "feedback.example_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.embedding.dimensions == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.dimensions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "database.pool_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !matches!(self.cache.backend.as_str(), "sqlite" | "qdrant") {
            return Err(ConfigError::ValidationFailed {
                field: "cache.backend".to_string(),
                message: format!("unknown backend '{}'", self.cache.backend),
            });
        }
        Ok(())
    }
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(())
}
