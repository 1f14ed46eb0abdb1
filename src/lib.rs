//! Grounded-factuality evaluation for LLM responses.
//!
//! This crate answers one question: is a claim supported by a document? The
//! check is delegated to a secondary judge model (typically a small, cheap one
//! such as Bespoke-Minicheck served by Ollama) whose free-text answer is
//! reduced to a boolean verdict. Anything other than an exact,
//! case-insensitive `"yes"` counts as "not supported", so ambiguous answers
//! fail closed instead of raising.
//!
//! ```no_run
//! use groundcheck::builder::{LLMBackend, LLMBuilder};
//! use groundcheck::evaluator::{EvaluationRequest, Evaluator, FactCheckingEvaluator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), groundcheck::error::LLMError> {
//!     let evaluator = FactCheckingEvaluator::for_bespoke_minicheck(|| {
//!         LLMBuilder::new()
//!             .backend(LLMBackend::Ollama)
//!             .model("bespoke-minicheck")
//!             .build()
//!     });
//!
//!     let request = EvaluationRequest::new(
//!         "The sky is blue.",
//!         vec!["The sky is blue because of Rayleigh scattering.".to_string()],
//!     );
//!
//!     let verdict = evaluator.evaluate(&request).await?;
//!     println!("supported: {}", verdict.passed());
//!     Ok(())
//! }
//! ```

/// Backend implementations for supported judge-model providers.
pub mod backends;
/// Builder for configuring and instantiating providers.
pub mod builder;
/// Chat messages, provider traits, and response metadata.
pub mod chat;
/// Error types.
pub mod error;
/// Evaluation requests, responses, and the fact-checking evaluator.
pub mod evaluator;

use chat::ChatProvider;

/// Core trait implemented by every provider a builder can produce.
///
/// Today this is chat only; it exists as a distinct trait so provider-wide
/// capabilities can grow without touching the chat seam.
pub trait LLMProvider: ChatProvider {}

pub use builder::{LLMBackend, LLMBuilder};
pub use chat::{ChatMessage, ChatResponse, ChatResponseMetadata, RateLimit, Usage};
pub use error::LLMError;
pub use evaluator::{EvaluationRequest, EvaluationResponse, Evaluator, FactCheckingEvaluator};

/// Initializes env_logger-based logging for binaries that want it.
///
/// Library code only emits through the `log` facade; calling this is optional.
#[cfg(feature = "logging")]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
