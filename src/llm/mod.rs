pub mod chat;
pub mod error;

pub use chat::{ new_client, ChatClient, CompletionRequest, CompletionResponse };
pub use error::LlmError;
