//! Fact-checking of claims against grounding documents.
//!
//! Verifies whether a statement (the "claim") is logically supported by a
//! provided context (the "document") by asking a delegate judge model. Small
//! grounded-factuality models such as Bespoke-Minicheck are well suited as the
//! judge; `for_bespoke_minicheck` configures the bare prompt those models are
//! fine-tuned on. This is not a closed-book quiz: claims are only ever checked
//! against the supplied documents.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::chat::ChatMessage;
use crate::error::LLMError;
use crate::LLMProvider;

use super::types::{EvaluationRequest, EvaluationResponse};
use super::{Evaluator, ProviderFactory};

const DEFAULT_EVALUATION_PROMPT: &str = r#"Evaluate whether or not the following claim is supported by the provided document.
Respond with "yes" if the claim is supported, or "no" if it is not.
Document:
{document}
Claim:
{claim}"#;

const BESPOKE_MINICHECK_PROMPT: &str = r#"Document:
{document}
Claim:
{claim}"#;

/// Evaluator that checks whether a claim is entailed by its grounding
/// documents.
///
/// Stateless apart from the configured prompt template and provider factory; a
/// fresh provider is built for every call, so one instance is safe to share
/// across tasks. Any answer other than an exact case-insensitive `"yes"` is a
/// negative verdict: malformed judge output fails closed rather than raising.
pub struct FactCheckingEvaluator {
    provider_factory: Box<ProviderFactory>,
    evaluation_prompt: String,
}

impl FactCheckingEvaluator {
    /// Creates an evaluator with the default yes/no instruction prompt,
    /// suitable for general-purpose judge models.
    pub fn new<F>(provider_factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn LLMProvider>, LLMError> + Send + Sync + 'static,
    {
        Self::with_prompt(provider_factory, DEFAULT_EVALUATION_PROMPT)
    }

    /// Creates an evaluator with a custom prompt template.
    ///
    /// The template's `{document}` and `{claim}` placeholders are substituted
    /// literally before dispatch.
    pub fn with_prompt<F>(provider_factory: F, evaluation_prompt: impl Into<String>) -> Self
    where
        F: Fn() -> Result<Box<dyn LLMProvider>, LLMError> + Send + Sync + 'static,
    {
        Self {
            provider_factory: Box::new(provider_factory),
            evaluation_prompt: evaluation_prompt.into(),
        }
    }

    /// Creates an evaluator configured for Bespoke-Minicheck style judge
    /// models, which expect the bare document/claim pair without instructions.
    pub fn for_bespoke_minicheck<F>(provider_factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn LLMProvider>, LLMError> + Send + Sync + 'static,
    {
        Self::with_prompt(provider_factory, BESPOKE_MINICHECK_PROMPT)
    }

    /// The configured prompt template.
    pub fn evaluation_prompt(&self) -> &str {
        &self.evaluation_prompt
    }

    fn render_prompt(&self, document: &str, claim: &str) -> String {
        self.evaluation_prompt
            .replace("{document}", document)
            .replace("{claim}", claim)
    }
}

#[async_trait]
impl Evaluator for FactCheckingEvaluator {
    /// Evaluates whether the response content in the request is factually
    /// supported by the supporting data in the same request.
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResponse, LLMError> {
        let claim = request.response_content();
        let document = request.joined_supporting_data();
        let prompt = self.render_prompt(&document, claim);

        let provider = (self.provider_factory)()?;
        let messages = [ChatMessage::user().content(prompt).build()];
        let response = provider.chat(&messages).await?;

        let metadata = response.metadata();
        log::debug!("Fact check answered by model={} {metadata}", metadata.model());

        let answer = response.text().unwrap_or_default();
        let passed = answer.eq_ignore_ascii_case("yes");

        Ok(EvaluationResponse::new(passed, "", HashMap::new()))
    }
}
