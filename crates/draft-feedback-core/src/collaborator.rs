//! Boundary to the language-model collaborator
//!
//! The model is an opaque, fallible function from numbered text to a list of
//! loosely-typed candidate records. Implementations hold their own
//! credentials, so the orchestrator can be driven by a stub in tests.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::CollaboratorError;
use crate::numbering::NumberedText;

lazy_static! {
    /// First `[` through last `]`, across newlines
    static ref EMBEDDED_ARRAY_PATTERN: Regex = Regex::new(r"(?s)\[.*\]").unwrap();
}

/// Source of candidate feedback records for a numbered draft
#[async_trait]
pub trait FeedbackSource: Send + Sync {
    async fn request_feedback(
        &self,
        numbered: &NumberedText,
    ) -> Result<Vec<Value>, CollaboratorError>;
}

/// Parse a model reply into candidate records
///
/// Tries the whole reply as a JSON array first. Failing that, parses the
/// widest bracketed substring, which recovers arrays wrapped in prose or
/// code fences. Best effort: when several arrays appear with text between
/// them the recovery fails and the caller falls back.
pub fn parse_candidates(raw: &str) -> Result<Vec<Value>, CollaboratorError> {
    let raw = raw.trim();

    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
        return Ok(items);
    }

    let embedded = EMBEDDED_ARRAY_PATTERN
        .find(raw)
        .ok_or_else(|| CollaboratorError::Unparseable("no JSON array in reply".to_string()))?;

    match serde_json::from_str::<Value>(embedded.as_str()) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(CollaboratorError::Unparseable(
            "embedded JSON is not an array".to_string(),
        )),
        Err(e) => Err(CollaboratorError::Unparseable(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_plain_array() {
        let items = parse_candidates(r#"[{"category": "Style"}]"#).unwrap();
        assert_eq!(items, vec![json!({"category": "Style"})]);
    }

    #[test]
    fn test_parse_array_in_code_fence() {
        let raw = "Here is the feedback:\n```json\n[\n  {\"comments\": \"ok\"}\n]\n```\n";
        let items = parse_candidates(raw).unwrap();
        assert_eq!(items, vec![json!({"comments": "ok"})]);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_candidates("  []  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_object_without_array_fails() {
        assert!(matches!(
            parse_candidates(r#"{"feedback": "none"}"#),
            Err(CollaboratorError::Unparseable(_))
        ));
    }

    #[test]
    fn test_parse_prose_fails() {
        assert!(matches!(
            parse_candidates("I could not find any issues."),
            Err(CollaboratorError::Unparseable(_))
        ));
    }

    #[test]
    fn test_parse_two_separate_arrays_fails() {
        // Greedy recovery spans both arrays and the prose between them
        assert!(parse_candidates("first [1] then [2]").is_err());
    }
}
