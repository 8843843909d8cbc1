//! Draft submission pipeline
//!
//! Validates the draft, numbers its words, asks the collaborator for
//! feedback, filters the candidates and translates the survivors into
//! character spans.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::collaborator::FeedbackSource;
use crate::error::FeedbackError;
use crate::feedback::{fallback_candidate, FeedbackItem};
use crate::numbering::number_tokens;
use crate::tokenize::tokenize;
use crate::translate::{CharSpan, WordMap};

/// Everything produced for one draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackReport {
    /// Items that passed validation, in collaborator order
    pub feedback: Vec<FeedbackItem>,
    pub word_count: usize,
    pub numbered_text: String,
    /// One span per item in `feedback`
    pub character_positions: Vec<CharSpan>,
}

/// Runs drafts through the collaborator
#[derive(Clone)]
pub struct FeedbackOrchestrator {
    source: Arc<dyn FeedbackSource>,
}

impl FeedbackOrchestrator {
    pub fn new(source: Arc<dyn FeedbackSource>) -> Self {
        Self { source }
    }

    /// Produce feedback spans for `text`
    ///
    /// Collaborator failures degrade to a single synthetic item. Only empty
    /// input and internal inconsistencies are returned as errors.
    pub async fn submit(&self, text: &str) -> Result<FeedbackReport, FeedbackError> {
        if text.trim().is_empty() {
            return Err(FeedbackError::EmptyText);
        }

        let tokens = tokenize(text);
        let numbered = number_tokens(&tokens);
        let word_count = numbered.word_count;
        info!("Draft received: {} words", word_count);

        let candidates = match self.source.request_feedback(&numbered).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Feedback collaborator failed, using fallback item: {}", e);
                vec![fallback_candidate(word_count)]
            }
        };

        let feedback = accept_candidates(&candidates, word_count);
        let spans = WordMap::from_tokens(&tokens).spans(&feedback);

        // Every accepted range lies within the word map built from the same tokens
        if spans.len() != feedback.len() {
            return Err(FeedbackError::Internal(format!(
                "{} accepted items produced {} spans",
                feedback.len(),
                spans.len()
            )));
        }

        info!(
            "Feedback ready: {} of {} candidates accepted",
            feedback.len(),
            candidates.len()
        );

        Ok(FeedbackReport {
            feedback,
            word_count,
            numbered_text: numbered.text,
            character_positions: spans,
        })
    }
}

/// Keep the candidates that validate against `word_count`
pub fn accept_candidates(candidates: &[Value], word_count: usize) -> Vec<FeedbackItem> {
    candidates
        .iter()
        .enumerate()
        .filter_map(
            |(i, candidate)| match FeedbackItem::from_candidate(candidate, word_count) {
                Ok(item) => Some(item),
                Err(reason) => {
                    debug!("Dropping feedback candidate {}: {}", i, reason);
                    None
                }
            },
        )
        .collect()
}
