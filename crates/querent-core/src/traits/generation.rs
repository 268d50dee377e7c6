use crate::errors::GenerationError;

/// Language-generation collaborator. One request, one response, no state.
pub trait IGenerationProvider: Send + Sync {
    /// Send `prompt` and return the raw completion text.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
