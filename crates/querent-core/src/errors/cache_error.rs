/// Semantic cache errors. Every variant degrades a lookup to a miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("provisioning collection '{collection}' failed: {reason}")]
    ProvisioningFailed { collection: String, reason: String },

    #[error("cached entry '{id}' is malformed: {reason}")]
    MalformedEntry { id: String, reason: String },
}
