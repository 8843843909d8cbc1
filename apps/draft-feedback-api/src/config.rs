//! Language-model client configuration
//!
//! Read from the environment (after `.env` is loaded) and handed to the
//! client at construction; nothing else reads credentials.

use std::time::Duration;

use anyhow::{anyhow, Result};

/// Default OpenAI-compatible API root
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Settings for the chat-completions client
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token; without one every call fails over to the fallback item
    pub api_key: Option<String>,
    /// API root, without the trailing `/chat/completions`
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Request timeout; `None` leaves the client default in place
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            timeout: None,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - OPENAI_API_KEY: API key (optional)
    /// - OPENAI_BASE_URL: API root (default: https://api.openai.com/v1)
    /// - OPENAI_MODEL: Model name (default: gpt-4o-mini)
    /// - LLM_MAX_TOKENS: Completion token limit (default: 1500)
    /// - LLM_TEMPERATURE: Sampling temperature (default: 0.7)
    /// - LLM_TIMEOUT_SECS: Request timeout in seconds (default: none)
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = get("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());

        let base_url = get("OPENAI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let model = get("OPENAI_MODEL").unwrap_or(defaults.model);

        let max_tokens = match get("LLM_MAX_TOKENS") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow!("Invalid LLM_MAX_TOKENS: {}", v))?,
            None => defaults.max_tokens,
        };

        let temperature = match get("LLM_TEMPERATURE") {
            Some(v) => v
                .parse()
                .map_err(|_| anyhow!("Invalid LLM_TEMPERATURE: {}", v))?,
            None => defaults.temperature,
        };

        let timeout = match get("LLM_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(
                v.parse()
                    .map_err(|_| anyhow!("Invalid LLM_TIMEOUT_SECS: {}", v))?,
            )),
            None => None,
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
            timeout,
        })
    }

    /// Override the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full chat-completions endpoint URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
