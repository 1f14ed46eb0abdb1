mod ollama;
mod openai;

use crate::{builder::LLMBackend, error::LLMError, LLMProvider};

use crate::builder::state::BuilderState;

pub(super) fn build_backend(
    state: &mut BuilderState,
    backend: LLMBackend,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    match backend {
        LLMBackend::OpenAI => openai::build_openai(state),
        LLMBackend::Ollama => ollama::build_ollama(state),
    }
}
