mod message;
mod metadata;
mod traits;
mod usage;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole};
pub use metadata::{
    ChatResponseMetadata, ChatResponseMetadataBuilder, PromptFilterMetadata, PromptMetadata,
    RateLimit,
};
pub use traits::{ChatProvider, ChatResponse};
pub use usage::{CompletionTokensDetails, PromptTokensDetails, Usage};
