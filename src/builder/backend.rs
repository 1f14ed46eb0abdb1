use crate::error::LLMError;

/// Supported judge-model backend providers.
#[derive(Debug, Clone, PartialEq)]
pub enum LLMBackend {
    OpenAI,
    Ollama,
}

impl std::str::FromStr for LLMBackend {
    type Err = LLMError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LLMBackend::OpenAI),
            "ollama" => Ok(LLMBackend::Ollama),
            _ => Err(LLMError::InvalidRequest(format!(
                "Unknown LLM backend: {s}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_backends_case_insensitively() {
        assert_eq!("ollama".parse::<LLMBackend>().unwrap(), LLMBackend::Ollama);
        assert_eq!("OpenAI".parse::<LLMBackend>().unwrap(), LLMBackend::OpenAI);
    }

    #[test]
    fn unknown_backend_is_an_invalid_request() {
        let err = "anthropic".parse::<LLMBackend>().unwrap_err();
        assert!(matches!(err, LLMError::InvalidRequest(_)));
    }
}
