#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::{ Arc, Mutex };
use std::time::Duration;

use wisdom_ring::agent::ChatAgent;
use wisdom_ring::config::{ AppConfig, PromptConfig };
use wisdom_ring::llm::{ ChatClient, CompletionRequest, CompletionResponse, LlmError };

#[derive(Clone, Copy)]
pub enum Canned {
    Text(&'static str),
    Empty,
    Timeout,
    Api(u16, &'static str),
}

/// Stand-in for the completion API that records every request it sees.
pub struct RecordingClient {
    replies: Mutex<Vec<Canned>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingClient {
    /// Replies are handed out in order; the last one repeats.
    pub fn new(replies: Vec<Canned>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Result<CompletionResponse, LlmError> {
        let mut replies = self.replies.lock().unwrap();
        let canned = if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies.first().copied().unwrap_or(Canned::Empty)
        };
        match canned {
            Canned::Text(t) => Ok(CompletionResponse { response: Some(t.to_string()) }),
            Canned::Empty => Ok(CompletionResponse { response: None }),
            Canned::Timeout => Err(LlmError::Timeout(Duration::from_secs(300))),
            Canned::Api(status, message) =>
                Err(LlmError::Api { status, message: message.to_string() }),
        }
    }
}

#[async_trait]
impl ChatClient for RecordingClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.next_reply()
    }

    fn get_model(&self) -> String {
        "recording".to_string()
    }
}

pub fn agent_with(client: Arc<RecordingClient>, api_key: Option<&str>) -> ChatAgent {
    let config = AppConfig {
        api_key: api_key.map(str::to_string),
        ..AppConfig::default()
    };
    ChatAgent::new(Arc::new(config), PromptConfig::builtin(), client)
}
