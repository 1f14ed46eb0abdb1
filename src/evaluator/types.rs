use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Input to an evaluation: the claim under test and its grounding context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    response_content: String,
    supporting_data: Vec<String>,
}

impl EvaluationRequest {
    /// Creates a request from the response text to check and the documents it
    /// must be grounded in.
    pub fn new(response_content: impl Into<String>, supporting_data: Vec<String>) -> Self {
        Self {
            response_content: response_content.into(),
            supporting_data,
        }
    }

    /// The claim under evaluation.
    pub fn response_content(&self) -> &str {
        &self.response_content
    }

    /// The grounding documents.
    pub fn supporting_data(&self) -> &[String] {
        &self.supporting_data
    }

    /// The grounding documents joined into one context block.
    pub fn joined_supporting_data(&self) -> String {
        self.supporting_data.join("\n")
    }
}

/// Outcome of an evaluation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    passed: bool,
    feedback: String,
    metadata: HashMap<String, serde_json::Value>,
}

impl EvaluationResponse {
    pub fn new(
        passed: bool,
        feedback: impl Into<String>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            passed,
            feedback: feedback.into(),
            metadata,
        }
    }

    /// Whether the evaluation passed.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Free-text feedback from the evaluator, empty when none was produced.
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Evaluator-specific metadata about the run.
    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_supporting_data_uses_newlines() {
        let request = EvaluationRequest::new(
            "claim",
            vec!["first document".to_string(), "second document".to_string()],
        );
        assert_eq!(
            request.joined_supporting_data(),
            "first document\nsecond document"
        );
    }

    #[test]
    fn empty_supporting_data_joins_to_empty_string() {
        let request = EvaluationRequest::new("claim", Vec::new());
        assert_eq!(request.joined_supporting_data(), "");
    }

    #[test]
    fn response_accessors_return_constructed_values() {
        let response = EvaluationResponse::new(true, "", HashMap::new());
        assert!(response.passed());
        assert_eq!(response.feedback(), "");
        assert!(response.metadata().is_empty());
    }
}
