use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Http(#[source] reqwest::Error),

    /// Non-2xx answer from the provider.
    #[error("{status} {message}")]
    Api {
        status: u16,
        message: String,
    },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl LlmError {
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(timeout)
        } else if err.is_decode() {
            LlmError::MalformedResponse(err.to_string())
        } else {
            LlmError::Http(err)
        }
    }
}
