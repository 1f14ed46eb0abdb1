//! Response-level metadata returned by providers alongside a chat response.
//!
//! Every field has a concrete empty variant, so consumers read metadata
//! without branching on absence: an unset rate limit is the all-zero
//! `RateLimit`, unreported usage is the all-zero `Usage`, and so on.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::usage::Usage;

/// Provider metadata for a single chat response.
///
/// Built once via [`ChatResponseMetadata::builder`] and read-only afterwards.
/// Equality and hashing are structural over id, model, rate limit, usage, and
/// prompt metadata; the extra key/value bag does not participate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatResponseMetadata {
    id: String,
    model: String,
    rate_limit: RateLimit,
    usage: Usage,
    prompt_metadata: PromptMetadata,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    extra: HashMap<String, serde_json::Value>,
}

impl ChatResponseMetadata {
    /// Starts building a new metadata value.
    pub fn builder() -> ChatResponseMetadataBuilder {
        ChatResponseMetadataBuilder::new()
    }

    /// Unique identifier of the chat completion operation.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The model that handled the request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Provider rate-limit metadata, all-zero when not reported.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Token usage, all-zero when not reported.
    pub fn usage(&self) -> &Usage {
        &self.usage
    }

    /// Prompt metadata gathered by the provider while processing the request.
    pub fn prompt_metadata(&self) -> &PromptMetadata {
        &self.prompt_metadata
    }

    /// Untyped provider-specific extras.
    pub fn extra(&self) -> &HashMap<String, serde_json::Value> {
        &self.extra
    }

    /// Looks up a single entry in the extras bag.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

impl PartialEq for ChatResponseMetadata {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.model == other.model
            && self.rate_limit == other.rate_limit
            && self.usage == other.usage
            && self.prompt_metadata == other.prompt_metadata
    }
}

impl Eq for ChatResponseMetadata {}

impl Hash for ChatResponseMetadata {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.model.hash(state);
        self.rate_limit.hash(state);
        self.usage.hash(state);
        self.prompt_metadata.hash(state);
    }
}

impl fmt::Display for ChatResponseMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ id: {}, usage: {:?}, rate_limit: {:?} }}",
            self.id, self.usage, self.rate_limit
        )
    }
}

/// Incremental builder for [`ChatResponseMetadata`].
///
/// Not meant to be shared across producers; build the value once and share
/// that instead.
#[derive(Debug, Default)]
pub struct ChatResponseMetadataBuilder {
    metadata: ChatResponseMetadata,
}

impl ChatResponseMetadataBuilder {
    /// Creates a builder with every field at its empty variant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the completion identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.metadata.id = id.into();
        self
    }

    /// Sets the model that handled the request.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.metadata.model = model.into();
        self
    }

    /// Sets the rate-limit metadata.
    pub fn rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.metadata.rate_limit = rate_limit;
        self
    }

    /// Sets the token usage.
    pub fn usage(mut self, usage: Usage) -> Self {
        self.metadata.usage = usage;
        self
    }

    /// Sets the prompt metadata.
    pub fn prompt_metadata(mut self, prompt_metadata: PromptMetadata) -> Self {
        self.metadata.prompt_metadata = prompt_metadata;
        self
    }

    /// Adds one provider-specific extra entry.
    pub fn key_value(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.extra.insert(key.into(), value.into());
        self
    }

    /// Finalizes the metadata value.
    pub fn build(self) -> ChatResponseMetadata {
        self.metadata
    }
}

/// Provider rate-limit metadata.
///
/// The all-zero `Default` value is the "not reported" variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateLimit {
    /// Maximum number of requests permitted before exhaustion.
    pub requests_limit: u64,
    /// Requests remaining before exhaustion.
    pub requests_remaining: u64,
    /// Time until the request limit resets.
    pub requests_reset: Duration,
    /// Maximum number of tokens permitted before exhaustion.
    pub tokens_limit: u64,
    /// Tokens remaining before exhaustion.
    pub tokens_remaining: u64,
    /// Time until the token limit resets.
    pub tokens_reset: Duration,
}

impl RateLimit {
    /// The neutral value used when a provider reports no rate-limit headers.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any rate-limit information was reported.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Prompt metadata gathered by a provider during request processing, one
/// entry per prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptMetadata {
    entries: Vec<PromptFilterMetadata>,
}

impl PromptMetadata {
    /// The neutral, entry-less value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates prompt metadata from per-prompt entries.
    pub fn from_entries(entries: Vec<PromptFilterMetadata>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PromptFilterMetadata> {
        self.entries.iter()
    }

    /// Entry for the prompt at the given index, if the provider reported one.
    pub fn for_prompt(&self, prompt_index: usize) -> Option<&PromptFilterMetadata> {
        self.entries.iter().find(|e| e.prompt_index == prompt_index)
    }
}

/// Per-prompt metadata such as content-filter annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptFilterMetadata {
    /// Index of the prompt this entry refers to.
    pub prompt_index: usize,
    /// Raw provider annotation for the prompt.
    pub content_filter_results: String,
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(metadata: &ChatResponseMetadata) -> u64 {
        let mut hasher = DefaultHasher::new();
        metadata.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn builder_defaults_to_empty_variants() {
        let metadata = ChatResponseMetadata::builder()
            .id("x")
            .model("m")
            .build();

        assert_eq!(metadata.id(), "x");
        assert_eq!(metadata.model(), "m");
        assert!(metadata.rate_limit().is_empty());
        assert!(metadata.usage().is_empty());
        assert!(metadata.prompt_metadata().is_empty());
        assert!(metadata.extra().is_empty());
    }

    #[test]
    fn unset_builder_yields_all_empty_fields() {
        let metadata = ChatResponseMetadata::builder().build();
        assert_eq!(metadata.id(), "");
        assert_eq!(metadata.model(), "");
        assert!(metadata.rate_limit().is_empty());
        assert!(metadata.usage().is_empty());
    }

    #[test]
    fn identical_fields_are_equal_and_share_a_hash() {
        let build = || {
            ChatResponseMetadata::builder()
                .id("chatcmpl-1")
                .model("bespoke-minicheck")
                .usage(Usage {
                    prompt_tokens: 10,
                    completion_tokens: 1,
                    total_tokens: 11,
                    ..Usage::default()
                })
                .build()
        };

        let a = build();
        let b = build();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn changing_one_field_breaks_equality() {
        let a = ChatResponseMetadata::builder().id("1").model("m").build();
        let b = ChatResponseMetadata::builder().id("1").model("n").build();
        assert_ne!(a, b);
    }

    #[test]
    fn extra_bag_is_excluded_from_equality() {
        let a = ChatResponseMetadata::builder()
            .id("1")
            .key_value("total_duration", 42)
            .build();
        let b = ChatResponseMetadata::builder().id("1").build();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a.get("total_duration"), Some(&serde_json::json!(42)));
        assert_eq!(b.get("total_duration"), None);
    }

    #[test]
    fn display_renders_id_usage_and_rate_limit() {
        let metadata = ChatResponseMetadata::builder().id("abc").build();
        let rendered = metadata.to_string();
        assert!(rendered.contains("id: abc"));
        assert!(rendered.contains("usage:"));
        assert!(rendered.contains("rate_limit:"));
    }

    #[test]
    fn prompt_metadata_lookup_by_index() {
        let metadata = PromptMetadata::from_entries(vec![PromptFilterMetadata {
            prompt_index: 0,
            content_filter_results: "safe".to_string(),
        }]);
        assert_eq!(
            metadata.for_prompt(0).map(|e| e.content_filter_results.as_str()),
            Some("safe")
        );
        assert!(metadata.for_prompt(1).is_none());
    }
}
