//! Generation providers.

mod openai_chat;

pub use openai_chat::OpenAiChatProvider;
