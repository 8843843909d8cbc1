//! Error types for draft feedback processing

use thiserror::Error;

/// Errors surfaced to the caller of the orchestrator
#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of the language-model collaborator
///
/// Never reaches the caller: the orchestrator substitutes a fallback item.
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("No API credentials configured")]
    MissingCredentials,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Collaborator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Collaborator returned an empty reply")]
    EmptyReply,

    #[error("Could not parse feedback JSON: {0}")]
    Unparseable(String),
}

/// Reason a single candidate record was dropped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemRejection {
    #[error("Candidate is not a JSON object")]
    NotAnObject,

    #[error("word_range is not an object")]
    MalformedRange,

    #[error("word_range.{field} is not an integer")]
    InvalidIndex { field: &'static str },

    #[error("Word range {start}..={end} is outside 1..={word_count}")]
    OutOfRange {
        start: i64,
        end: i64,
        word_count: usize,
    },

    #[error("Word range {start}..={end} is inverted")]
    Inverted { start: i64, end: i64 },
}
