use crate::cli::Args;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const TEMPERATURE: f32 = 1.0;
pub const MAX_COMPLETION_TOKENS: u32 = 1500;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChatModel {
    #[default]
    Gpt5,
    Custom(String),
}

impl ChatModel {
    pub fn as_str(&self) -> &str {
        match self {
            ChatModel::Gpt5 => "gpt-5",
            ChatModel::Custom(name) => name,
        }
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatModel {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "gpt-5" => Ok(ChatModel::Gpt5),
            other => Ok(ChatModel::Custom(other.to_string())),
        }
    }
}

/// Everything the completion endpoint needs from the environment, resolved
/// once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: ChatModel,
    pub base_url: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: ChatModel::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: TEMPERATURE,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            request_timeout: REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let model: ChatModel = args.openai_model
            .as_deref()
            .map(|m| m.parse::<ChatModel>().unwrap_or_default())
            .unwrap_or_default();
        let base_url = match &args.openai_base_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        };
        Self {
            api_key: args.openai_api_key.clone().filter(|k| !k.trim().is_empty()),
            model,
            base_url,
            ..Self::default()
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}
