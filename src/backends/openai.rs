//! OpenAI-compatible API client implementation for chat functionality.
//!
//! Besides the response body (id, model, usage), this backend reads the
//! `x-ratelimit-*` response headers into [`RateLimit`] metadata.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chat::{
    ChatMessage, ChatProvider, ChatResponse, ChatResponseMetadata, ChatRole, RateLimit, Usage,
};
use crate::error::LLMError;
use crate::LLMProvider;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Configuration for the OpenAI client.
#[derive(Debug)]
pub struct OpenAIConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL, overridable for OpenAI-compatible servers.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// System prompt to guide model behavior.
    pub system: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,
}

/// Client for interacting with OpenAI's API (or a compatible server).
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAI {
    /// Shared configuration wrapped in Arc for cheap cloning.
    pub config: Arc<OpenAIConfig>,
    /// HTTP client for making requests.
    pub client: Client,
}

#[derive(Serialize)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAIChatChoice>,
    usage: Option<Usage>,
    #[serde(skip)]
    rate_limit: RateLimit,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    content: Option<String>,
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text().unwrap_or_default())
    }
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }

    fn metadata(&self) -> ChatResponseMetadata {
        ChatResponseMetadata::builder()
            .id(&self.id)
            .model(&self.model)
            .usage(self.usage.clone().unwrap_or_default())
            .rate_limit(self.rate_limit.clone())
            .build()
    }
}

impl OpenAI {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
        top_p: Option<f32>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self::with_client(
            builder.build().expect("Failed to build reqwest Client"),
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
            timeout_seconds,
            system,
            top_p,
        )
    }

    /// Creates a new OpenAI client with a custom HTTP client.
    #[allow(clippy::too_many_arguments)]
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
        top_p: Option<f32>,
    ) -> Self {
        Self {
            config: Arc::new(OpenAIConfig {
                api_key: api_key.into(),
                base_url: base_url
                    .unwrap_or(DEFAULT_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                model: model.unwrap_or("gpt-4o-mini".to_string()),
                max_tokens,
                temperature,
                system,
                timeout_seconds,
                top_p,
            }),
            client,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn system(&self) -> Option<&str> {
        self.config.system.as_deref()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    /// Sends a chat request to the chat-completions endpoint.
    ///
    /// # Arguments
    ///
    /// * `messages` - The conversation history as a slice of chat messages
    ///
    /// # Returns
    ///
    /// The provider's response or an error
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        if self.config.api_key.is_empty() {
            return Err(LLMError::AuthError("Missing OpenAI API key".to_string()));
        }

        let mut openai_msgs: Vec<OpenAIChatMessage> = messages
            .iter()
            .map(|m| OpenAIChatMessage {
                role: match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: &m.content,
            })
            .collect();

        if let Some(system) = &self.config.system {
            openai_msgs.insert(
                0,
                OpenAIChatMessage {
                    role: "system",
                    content: system,
                },
            );
        }

        let body = OpenAIChatRequest {
            model: &self.config.model,
            messages: openai_msgs,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("OpenAI request payload: {}", json);
            }
        }

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let mut request = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body);

        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let resp = request.send().await?;

        log::debug!("OpenAI HTTP status: {}", resp.status());

        let resp = resp.error_for_status()?;

        let rate_limit = rate_limit_from_headers(resp.headers());
        let mut json_resp: OpenAIChatResponse = resp.json().await?;
        json_resp.rate_limit = rate_limit;

        Ok(Box::new(json_resp))
    }
}

impl LLMProvider for OpenAI {}

fn rate_limit_from_headers(headers: &HeaderMap) -> RateLimit {
    let number = |name: &str| -> u64 {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or(0)
    };
    let reset = |name: &str| -> Duration {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_reset_duration)
            .unwrap_or(Duration::ZERO)
    };

    RateLimit {
        requests_limit: number("x-ratelimit-limit-requests"),
        requests_remaining: number("x-ratelimit-remaining-requests"),
        requests_reset: reset("x-ratelimit-reset-requests"),
        tokens_limit: number("x-ratelimit-limit-tokens"),
        tokens_remaining: number("x-ratelimit-remaining-tokens"),
        tokens_reset: reset("x-ratelimit-reset-tokens"),
    }
}

/// Parses reset values in the `1h2m3s` / `59ms` form the ratelimit headers use.
fn parse_reset_duration(value: &str) -> Option<Duration> {
    if value.is_empty() {
        return None;
    }

    let mut total = Duration::ZERO;
    let mut digits = String::new();
    let mut unit = String::new();

    for ch in value.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            if !unit.is_empty() {
                total += segment_duration(&digits, &unit)?;
                digits.clear();
                unit.clear();
            }
            digits.push(ch);
        } else if ch.is_ascii_alphabetic() {
            if digits.is_empty() {
                return None;
            }
            unit.push(ch);
        } else {
            return None;
        }
    }

    total += segment_duration(&digits, &unit)?;
    Some(total)
}

fn segment_duration(digits: &str, unit: &str) -> Option<Duration> {
    let amount: f64 = digits.parse().ok()?;
    let seconds = match unit {
        "h" => amount * 3600.0,
        "m" => amount * 60.0,
        // a bare trailing number counts as seconds
        "s" | "" => amount,
        "ms" => amount / 1000.0,
        _ => return None,
    };
    Some(Duration::from_secs_f64(seconds))
}
