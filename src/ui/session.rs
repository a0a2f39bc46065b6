use crate::models::chat::{ ChatRequest, Message };
use super::endpoint::{ ChatEndpoint, EndpointOutcome };
use log::debug;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    ScrollToLatest,
    Dispatch(ChatRequest),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a request is already in flight")]
    Busy,
    #[error("no request is awaiting a response")]
    NoPendingRequest,
}

/// A key press in the message box.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyInput<'_> {
    /// Ctrl+Enter or Cmd+Enter sends; plain Enter inserts a newline.
    pub fn is_submit_shortcut(&self) -> bool {
        self.key == "Enter" && (self.ctrl || self.meta)
    }
}

/// In-memory conversation for one browser session.
///
/// At most one request is outstanding: `submit` moves to
/// [`SessionState::AwaitingResponse`] and only `receive` leaves it.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    state: SessionState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            state: SessionState::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    pub fn can_submit(&self) -> bool {
        !self.is_awaiting() && !self.input.trim().is_empty()
    }

    pub fn can_reset(&self) -> bool {
        !self.is_awaiting()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn submit(&mut self) -> Result<Vec<UiEffect>, SessionError> {
        if self.is_awaiting() {
            return Err(SessionError::Busy);
        }
        if self.input.trim().is_empty() {
            return Ok(Vec::new());
        }

        let content = std::mem::take(&mut self.input);
        self.messages.push(Message::user(content));
        self.state = SessionState::AwaitingResponse;
        debug!("Submitting conversation of {} message(s)", self.messages.len());

        let request = ChatRequest { messages: self.messages.clone() };
        Ok(vec![UiEffect::ScrollToLatest, UiEffect::Dispatch(request)])
    }

    pub fn on_key(&mut self, key: KeyInput<'_>) -> Result<Vec<UiEffect>, SessionError> {
        if key.is_submit_shortcut() { self.submit() } else { Ok(Vec::new()) }
    }

    pub fn receive(&mut self, outcome: EndpointOutcome) -> Result<Vec<UiEffect>, SessionError> {
        if !self.is_awaiting() {
            return Err(SessionError::NoPendingRequest);
        }
        self.messages.push(Message::assistant(outcome.into_display_text()));
        self.state = SessionState::Idle;
        Ok(vec![UiEffect::ScrollToLatest])
    }

    pub fn reset(&mut self) -> Result<Vec<UiEffect>, SessionError> {
        if self.is_awaiting() {
            return Err(SessionError::Busy);
        }
        self.messages.clear();
        Ok(vec![UiEffect::ScrollToLatest])
    }

    /// Submits the current input and waits for the endpoint's answer.
    /// Returns `Ok(false)` when the input was blank and nothing was sent.
    pub async fn exchange<E>(&mut self, endpoint: &E) -> Result<bool, SessionError>
        where E: ChatEndpoint + ?Sized
    {
        let request = self
            .submit()?
            .into_iter()
            .find_map(|effect| match effect {
                UiEffect::Dispatch(req) => Some(req),
                UiEffect::ScrollToLatest => None,
            });
        let Some(request) = request else {
            return Ok(false);
        };
        let outcome = endpoint.send(request).await;
        self.receive(outcome)?;
        Ok(true)
    }
}
