use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;
use super::metadata::ChatResponseMetadata;
use super::usage::Usage;

/// A provider's answer to a chat request.
///
/// Implementations hold whatever the provider returned; accessors that the
/// provider does not populate fall back to empty values so callers never
/// branch on absence.
pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    fn text(&self) -> Option<String>;
    fn usage(&self) -> Option<Usage> {
        None
    }
    fn metadata(&self) -> ChatResponseMetadata {
        ChatResponseMetadata::default()
    }
}

/// Trait for providers that support chat-style interactions.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    /// Sends a conversation to the provider and returns its response.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError>;
}
