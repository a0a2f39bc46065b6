pub mod openai;

use async_trait::async_trait;
use std::sync::Arc;

use self::openai::OpenAIChatClient;
use super::LlmError;
use crate::config::AppConfig;
use crate::models::chat::Message;

/// One non-streaming chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_completion_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionResponse {
    /// `None` when the provider produced no choice or a null content field.
    pub response: Option<String>,
}

#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;

    fn get_model(&self) -> String;
}

pub fn new_client(config: &AppConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client = OpenAIChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
