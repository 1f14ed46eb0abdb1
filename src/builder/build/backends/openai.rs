use crate::{error::LLMError, LLMProvider};

use super::super::helpers;
use crate::builder::state::BuilderState;

#[cfg(feature = "openai")]
pub(super) fn build_openai(state: &mut BuilderState) -> Result<Box<dyn LLMProvider>, LLMError> {
    let key = helpers::require_api_key(state, "OpenAI")?;
    let timeout = helpers::timeout_or_default(state);

    let provider = crate::backends::openai::OpenAI::new(
        key,
        state.base_url.take(),
        state.model.take(),
        state.max_tokens,
        state.temperature,
        timeout,
        state.system.take(),
        state.top_p,
    );

    Ok(Box::new(provider))
}

#[cfg(not(feature = "openai"))]
pub(super) fn build_openai(_state: &mut BuilderState) -> Result<Box<dyn LLMProvider>, LLMError> {
    Err(LLMError::InvalidRequest(
        "OpenAI feature not enabled".to_string(),
    ))
}
