/// Input rejected before any state is touched.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid vote '{value}': expected 'up' or 'down'")]
    InvalidVote { value: String },

    #[error("question must not be empty")]
    EmptyQuestion,
}
