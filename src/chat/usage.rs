use serde::{Deserialize, Serialize};

/// Usage metadata for a chat response.
///
/// The all-zero `Default` value doubles as the "usage not reported" variant,
/// so response metadata can always carry a concrete `Usage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[serde(alias = "input_tokens")]
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    #[serde(alias = "output_tokens")]
    pub completion_tokens: u32,
    /// Total number of tokens used
    pub total_tokens: u32,
    /// Breakdown of completion tokens, if available
    #[serde(
        skip_serializing_if = "Option::is_none",
        alias = "output_tokens_details",
        default
    )]
    pub completion_tokens_details: Option<CompletionTokensDetails>,
    /// Breakdown of prompt tokens, if available
    #[serde(
        skip_serializing_if = "Option::is_none",
        alias = "input_tokens_details",
        default
    )]
    pub prompt_tokens_details: Option<PromptTokensDetails>,
}

impl Usage {
    /// The neutral value used when a provider reports no usage.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any token counts were reported.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Breakdown of completion tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionTokensDetails {
    /// Tokens used for reasoning (for reasoning models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u32>,
    /// Tokens used for audio output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_tokens: Option<u32>,
}

/// Breakdown of prompt tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptTokensDetails {
    /// Tokens used for cached content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_tokens: Option<u32>,
    /// Tokens used for audio input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_usage_reports_empty() {
        assert!(Usage::empty().is_empty());
    }

    #[test]
    fn reported_usage_is_not_empty() {
        let usage = Usage {
            prompt_tokens: 12,
            completion_tokens: 1,
            total_tokens: 13,
            ..Usage::default()
        };
        assert!(!usage.is_empty());
    }

    #[test]
    fn deserializes_ollama_style_aliases() {
        let usage: Usage =
            serde_json::from_str(r#"{"input_tokens":5,"output_tokens":2,"total_tokens":7}"#)
                .unwrap();
        assert_eq!(usage.prompt_tokens, 5);
        assert_eq!(usage.completion_tokens, 2);
        assert_eq!(usage.total_tokens, 7);
    }
}
