//! Evaluation of LLM responses against supporting context.

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::LLMError;
use crate::LLMProvider;

#[path = "evaluator/types.rs"]
mod types;

#[path = "evaluator/fact_checking.rs"]
mod fact_checking;

pub use fact_checking::FactCheckingEvaluator;
pub use types::{EvaluationRequest, EvaluationResponse};

/// A function type producing a fresh provider for each evaluation call.
///
/// Injecting a factory rather than a ready provider keeps evaluators stateless
/// and lets callers defer provider configuration until evaluation time.
pub type ProviderFactory = dyn Fn() -> Result<Box<dyn LLMProvider>, LLMError> + Send + Sync;

/// Trait for components that judge an LLM response.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Evaluates a single request.
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResponse, LLMError>;

    /// Evaluates several requests concurrently, failing on the first error.
    async fn evaluate_all(
        &self,
        requests: &[EvaluationRequest],
    ) -> Result<Vec<EvaluationResponse>, LLMError> {
        let futures = requests.iter().map(|request| self.evaluate(request));
        join_all(futures).await.into_iter().collect()
    }
}
