use crate::config::{ AppConfig, PromptConfig };
use crate::llm::{ ChatClient, CompletionRequest, LlmError };
use crate::models::chat::{ ErrorResponse, Message };

use axum::http::StatusCode;
use axum::response::{ IntoResponse, Response };
use axum::Json;
use log::{ debug, error, info, warn };
use std::sync::Arc;
use thiserror::Error;

/// Shown to the user when the provider answers without any content.
pub const FALLBACK_REPLY: &str = "申し訳ありません、回答を生成できませんでした。";

const MISSING_CREDENTIAL: &str = "Missing OPENAI_API_KEY";
const GENERIC_SERVER_ERROR: &str = "Server error";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Provider(#[from] LlmError),
}

impl AgentError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Text returned to the browser in the `error` field.
    pub fn public_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() { GENERIC_SERVER_ERROR.to_string() } else { msg }
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.public_message() };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Stateless conversation handler shared by every request. Holds only
/// read-only configuration, so it is used behind a plain `Arc`.
#[derive(Clone)]
pub struct ChatAgent {
    config: Arc<AppConfig>,
    prompt: Arc<PromptConfig>,
    chat_client: Arc<dyn ChatClient>,
}

impl ChatAgent {
    pub fn new(
        config: Arc<AppConfig>,
        prompt: Arc<PromptConfig>,
        chat_client: Arc<dyn ChatClient>
    ) -> Self {
        Self { config, prompt, chat_client }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn prompt(&self) -> &PromptConfig {
        &self.prompt
    }

    /// `[system prompt] + conversation`, conversation untouched.
    pub fn build_messages(&self, conversation: Vec<Message>) -> Vec<Message> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(Message::system(self.prompt.system_prompt()));
        messages.extend(conversation);
        messages
    }

    pub async fn respond(&self, conversation: Vec<Message>) -> Result<String, AgentError> {
        if !self.config.has_credential() {
            error!("Rejecting chat request: {}", MISSING_CREDENTIAL);
            return Err(AgentError::Configuration(MISSING_CREDENTIAL.to_string()));
        }

        info!("Chat request with {} message(s)", conversation.len());
        let request = CompletionRequest {
            messages: self.build_messages(conversation),
            temperature: self.config.temperature,
            max_completion_tokens: self.config.max_completion_tokens,
        };

        let completion = match self.chat_client.complete(&request).await {
            Ok(c) => c,
            Err(e) => {
                error!("Completion call to {} failed: {}", self.chat_client.get_model(), e);
                return Err(AgentError::Provider(e));
            }
        };

        match completion.response {
            Some(text) if !text.is_empty() => {
                debug!("Completion returned {} chars", text.chars().count());
                Ok(text)
            }
            _ => {
                warn!("Completion returned no content, using fallback reply");
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::CompletionResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{ AtomicUsize, Ordering };
    use std::sync::Mutex;
    use std::time::Duration;

    enum Reply {
        Text(Option<String>),
        Fail,
    }

    struct StubClient {
        reply: Reply,
        calls: AtomicUsize,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl StubClient {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self { reply, calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()) })
        }
    }

    #[async_trait]
    impl ChatClient for StubClient {
        async fn complete(
            &self,
            request: &CompletionRequest
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Reply::Text(t) => Ok(CompletionResponse { response: t.clone() }),
                Reply::Fail => Err(LlmError::Timeout(Duration::from_secs(300))),
            }
        }

        fn get_model(&self) -> String {
            "stub".into()
        }
    }

    fn agent(client: Arc<StubClient>, with_key: bool) -> ChatAgent {
        let config = AppConfig {
            api_key: with_key.then(|| "sk-test".to_string()),
            ..AppConfig::default()
        };
        ChatAgent::new(Arc::new(config), PromptConfig::builtin(), client)
    }

    #[tokio::test]
    async fn prepends_system_prompt_and_keeps_input() {
        let stub = StubClient::new(Reply::Text(Some("B".into())));
        let agent = agent(stub.clone(), true);
        let input = vec![Message::user("A"), Message::assistant("x"), Message::user("  y ")];

        let reply = agent.respond(input.clone()).await.unwrap();
        assert_eq!(reply, "B");

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let sent = &seen[0].messages;
        assert_eq!(sent[0], Message::system(PromptConfig::builtin().system_prompt()));
        assert_eq!(&sent[1..], &input[..]);
        assert_eq!(seen[0].temperature, 1.0);
        assert_eq!(seen[0].max_completion_tokens, 1500);
    }

    #[tokio::test]
    async fn missing_credential_never_calls_provider() {
        let stub = StubClient::new(Reply::Text(Some("B".into())));
        let agent = agent(stub.clone(), false);

        let err = agent.respond(vec![Message::user("A")]).await.unwrap_err();
        assert!(matches!(err, AgentError::Configuration(_)));
        assert_eq!(err.public_message(), "Missing OPENAI_API_KEY");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_content_uses_fallback() {
        for reply in [None, Some(String::new())] {
            let stub = StubClient::new(Reply::Text(reply));
            let text = agent(stub, true).respond(vec![Message::user("A")]).await.unwrap();
            assert_eq!(text, FALLBACK_REPLY);
        }
    }

    #[tokio::test]
    async fn provider_failure_is_reported_once() {
        let stub = StubClient::new(Reply::Fail);
        let err = agent(stub.clone(), true).respond(vec![Message::user("A")]).await.unwrap_err();
        assert!(matches!(err, AgentError::Provider(LlmError::Timeout(_))));
        assert!(!err.public_message().is_empty());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_conversation_sends_only_the_system_prompt() {
        let stub = StubClient::new(Reply::Text(Some("hello".into())));
        agent(stub.clone(), true).respond(Vec::new()).await.unwrap();
        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen[0].messages.len(), 1);
        assert_eq!(seen[0].messages[0].role, crate::models::chat::Role::System);
    }
}
