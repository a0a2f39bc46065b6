use async_trait::async_trait;
use log::debug;
use reqwest::{ Client as HttpClient, header::{ HeaderMap, HeaderValue, CONTENT_TYPE, AUTHORIZATION } };
use serde::{ Deserialize, Serialize };
use std::time::Duration;

use super::{ ChatClient, CompletionRequest, CompletionResponse };
use crate::config::AppConfig;
use crate::llm::LlmError;
use crate::models::chat::Message;

pub struct OpenAIChatClient {
    http: HttpClient,
    model: String,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_completion_tokens: u32,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIErrorBody {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

impl OpenAIChatClient {
    pub fn new(
        api_key: Option<&str>,
        model: String,
        base_url: String,
        timeout: Duration
    ) -> Result<Self, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|e|
                LlmError::Config(format!("Invalid API key format: {}", e))
            )?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(e.to_string()))?;

        Ok(Self {
            http,
            model,
            base_url,
            timeout,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        Self::new(
            config.api_key.as_deref(),
            config.model.as_str().to_string(),
            config.base_url.clone(),
            config.request_timeout
        )
    }

    fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/v1/chat/completions") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<OpenAIErrorBody>(body) {
        return parsed.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("status code (no body)").to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ChatClient for OpenAIChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = self.endpoint();
        let req = OpenAIChatRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_completion_tokens: request.max_completion_tokens,
        };
        debug!("POST {} model={} messages={}", url, self.model, request.messages.len());

        let resp = self.http
            .post(&url)
            .json(&req)
            .send().await
            .map_err(|e| LlmError::from_reqwest(e, self.timeout))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| LlmError::from_reqwest(e, self.timeout))?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let parsed: OpenAIResponse = serde_json
            ::from_str(&body)
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let content = parsed.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        Ok(CompletionResponse { response: content })
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }
}
