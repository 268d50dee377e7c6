/// SQL generation errors. Fatal to the current resolution.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("generation provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("generation returned an empty response")]
    EmptyResponse,

    #[error("schema introspection failed: {reason}")]
    SchemaUnavailable { reason: String },
}
