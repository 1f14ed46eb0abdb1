//! Ollama API client implementation for chat functionality.
//!
//! This is the default judge backend: grounded-factuality models such as
//! Bespoke-Minicheck are served locally through Ollama.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chat::{
    ChatMessage, ChatProvider, ChatResponse, ChatResponseMetadata, ChatRole, Usage,
};
use crate::error::LLMError;
use crate::LLMProvider;

/// Configuration for the Ollama client.
#[derive(Debug)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    pub base_url: String,
    /// Optional bearer token for proxied Ollama deployments.
    pub api_key: Option<String>,
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
    /// Top-k sampling parameter.
    pub top_k: Option<u32>,
}

/// Client for interacting with an Ollama server.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Shared configuration wrapped in Arc for cheap cloning.
    pub config: Arc<OllamaConfig>,
    /// HTTP client for making requests.
    pub client: Client,
}

#[derive(Serialize)]
struct OllamaChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Deserialize, Debug)]
struct OllamaChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    created_at: String,
    message: Option<OllamaChatMsg>,
    #[serde(default)]
    total_duration: Option<u64>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct OllamaChatMsg {
    content: String,
}

impl std::fmt::Display for OllamaChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text().unwrap_or_default())
    }
}

impl ChatResponse for OllamaChatResponse {
    fn text(&self) -> Option<String> {
        self.message.as_ref().and_then(|m| {
            if m.content.is_empty() {
                None
            } else {
                Some(m.content.clone())
            }
        })
    }

    fn usage(&self) -> Option<Usage> {
        if self.prompt_eval_count.is_none() && self.eval_count.is_none() {
            return None;
        }
        let prompt_tokens = self.prompt_eval_count.unwrap_or(0);
        let completion_tokens = self.eval_count.unwrap_or(0);
        Some(Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
            ..Usage::default()
        })
    }

    fn metadata(&self) -> ChatResponseMetadata {
        let mut builder = ChatResponseMetadata::builder()
            .model(&self.model)
            .usage(self.usage().unwrap_or_default());
        if !self.created_at.is_empty() {
            builder = builder.key_value("created_at", self.created_at.clone());
        }
        if let Some(total_duration) = self.total_duration {
            builder = builder.key_value("total_duration", total_duration);
        }
        builder.build()
    }
}

impl Ollama {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
        top_p: Option<f32>,
        top_k: Option<u32>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self::with_client(
            builder.build().expect("Failed to build reqwest Client"),
            base_url,
            api_key,
            model,
            max_tokens,
            temperature,
            timeout_seconds,
            system,
            top_p,
            top_k,
        )
    }

    /// Creates a new Ollama client with a custom HTTP client.
    #[allow(clippy::too_many_arguments)]
    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
        system: Option<String>,
        top_p: Option<f32>,
        top_k: Option<u32>,
    ) -> Self {
        Self {
            config: Arc::new(OllamaConfig {
                base_url: base_url.into().trim_end_matches('/').to_string(),
                api_key,
                model: model.unwrap_or("bespoke-minicheck".to_string()),
                max_tokens,
                temperature,
                system,
                timeout_seconds,
                top_p,
                top_k,
            }),
            client,
        }
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
impl ChatProvider for Ollama {
    /// Sends a chat request to an Ollama server.
    ///
    /// # Arguments
    ///
    /// * `messages` - The conversation history as a slice of chat messages
    ///
    /// # Returns
    ///
    /// The provider's response or an error
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let mut ollama_msgs: Vec<OllamaChatMessage> = messages
            .iter()
            .map(|m| OllamaChatMessage {
                role: match m.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: &m.content,
            })
            .collect();

        if let Some(system) = &self.config.system {
            ollama_msgs.insert(
                0,
                OllamaChatMessage {
                    role: "system",
                    content: system,
                },
            );
        }

        let body = OllamaChatRequest {
            model: &self.config.model,
            messages: ollama_msgs,
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
                num_predict: self.config.max_tokens,
            },
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("Ollama request payload: {}", json);
            }
        }

        let url = format!("{}/api/chat", self.config.base_url);
        let mut request = self.client.post(url).json(&body);

        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        if let Some(timeout) = self.config.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let resp = request.send().await?;

        log::debug!("Ollama HTTP status: {}", resp.status());

        let resp = resp.error_for_status()?;

        let json_resp: OllamaChatResponse = resp.json().await?;

        Ok(Box::new(json_resp))
    }
}

impl LLMProvider for Ollama {}

#[cfg(test)]
mod tests {
    use super::*;

    fn ollama_for(server: &mockito::ServerGuard) -> Ollama {
        Ollama::new(
            server.url(),
            None,
            Some("bespoke-minicheck".to_string()),
            None,
            Some(0.0),
            None,
            None,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn chat_parses_text_and_usage() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "model": "bespoke-minicheck",
                    "created_at": "2025-01-01T00:00:00Z",
                    "message": {"role": "assistant", "content": "Yes"},
                    "done": true,
                    "total_duration": 12345,
                    "prompt_eval_count": 41,
                    "eval_count": 1
                }"#,
            )
            .create_async()
            .await;

        let provider = ollama_for(&server);
        let messages = [ChatMessage::user().content("Claim: ...").build()];
        let response = provider.chat(&messages).await.unwrap();

        assert_eq!(response.text().as_deref(), Some("Yes"));
        let usage = response.usage().unwrap();
        assert_eq!(usage.prompt_tokens, 41);
        assert_eq!(usage.completion_tokens, 1);
        assert_eq!(usage.total_tokens, 42);

        let metadata = response.metadata();
        assert_eq!(metadata.model(), "bespoke-minicheck");
        assert_eq!(metadata.usage().total_tokens, 42);
        assert_eq!(metadata.get("total_duration"), Some(&serde_json::json!(12345)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_without_message_yields_no_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"model": "bespoke-minicheck", "done": true}"#)
            .create_async()
            .await;

        let provider = ollama_for(&server);
        let response = provider
            .chat(&[ChatMessage::user().content("hi").build()])
            .await
            .unwrap();

        assert_eq!(response.text(), None);
        assert_eq!(response.usage(), None);
        assert!(response.metadata().usage().is_empty());
    }

    #[tokio::test]
    async fn http_error_status_surfaces_as_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(500)
            .create_async()
            .await;

        let provider = ollama_for(&server);
        let result = provider
            .chat(&[ChatMessage::user().content("hi").build()])
            .await;

        assert!(matches!(result, Err(LLMError::HttpError(_))));
    }
}
