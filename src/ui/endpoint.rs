use async_trait::async_trait;

use crate::agent::ChatAgent;
use crate::models::chat::ChatRequest;

/// What the page gets back from `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointOutcome {
    Reply(String),
    /// Non-200 answer or transport failure, with the `error` text if any.
    Failed(Option<String>),
}

impl EndpointOutcome {
    pub fn into_display_text(self) -> String {
        match self {
            EndpointOutcome::Reply(text) => text,
            EndpointOutcome::Failed(Some(msg)) if !msg.is_empty() => format!("Error: {}", msg),
            EndpointOutcome::Failed(_) => "Error: unknown".to_string(),
        }
    }
}

#[async_trait]
pub trait ChatEndpoint: Send + Sync {
    async fn send(&self, request: ChatRequest) -> EndpointOutcome;
}

#[async_trait]
impl ChatEndpoint for ChatAgent {
    async fn send(&self, request: ChatRequest) -> EndpointOutcome {
        match self.respond(request.messages).await {
            Ok(text) => EndpointOutcome::Reply(text),
            Err(e) => EndpointOutcome::Failed(Some(e.public_message())),
        }
    }
}
