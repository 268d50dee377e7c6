//! # querent-generation
//!
//! Turns a question plus schema and feedback context into SQL via one call
//! to a generation provider.

pub mod fence;
pub mod policy;
pub mod prompt;
pub mod providers;

pub use fence::strip_code_fence;
pub use policy::GenerationPolicy;
pub use prompt::build_prompt;
pub use providers::OpenAiChatProvider;
