//! Tests for the draft feedback server
//!
//! Test categories:
//! - HTTP endpoints against the full router, with stubbed model replies
//! - Properties of the fallback path for arbitrary drafts

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use draft_feedback_core::{
    CollaboratorError, FeedbackOrchestrator, FeedbackSource, NumberedText,
};
use serde_json::Value;

use crate::AppState;

/// What the stub model does when asked for feedback
enum StubReply {
    Candidates(Vec<Value>),
    Fail,
    Panic,
}

struct StubSource {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackSource for StubSource {
    async fn request_feedback(
        &self,
        _numbered: &NumberedText,
    ) -> Result<Vec<Value>, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Candidates(items) => Ok(items.clone()),
            StubReply::Fail => Err(CollaboratorError::Transport("timed out".to_string())),
            StubReply::Panic => panic!("stub model exploded"),
        }
    }
}

fn state_with(source: Arc<StubSource>) -> AppState {
    AppState {
        orchestrator: FeedbackOrchestrator::new(source),
    }
}

#[cfg(test)]
mod http_endpoint_tests {
    //! HTTP endpoint integration tests using axum-test

    use super::*;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::build_router;

    fn create_test_server(source: Arc<StubSource>) -> TestServer {
        TestServer::new(build_router(state_with(source))).unwrap()
    }

    fn sample_feedback() -> Vec<Value> {
        vec![
            json!({"category": "Style", "word_range": {"start": 1, "end": 1}, "comments": "Warmer greeting?"}),
            json!({"category": "Grammar", "word_range": {"start": 2, "end": 3}, "comments": "Comma splice"}),
            json!({"category": "Clarity", "word_range": {"start": 3, "end": 2}, "comments": "Inverted"}),
            json!({"category": "Content", "word_range": {"start": 4, "end": 99}, "comments": "Too far"}),
        ]
    }

    #[tokio::test]
    async fn test_root_returns_200() {
        let server = create_test_server(StubSource::new(StubReply::Fail));
        let response = server.get("/").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["message"], "Text Editor Feedback API is running");
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server(StubSource::new(StubReply::Fail));
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "Text Editor Feedback API");
    }

    #[tokio::test]
    async fn test_submit_draft_returns_spans() {
        let server = create_test_server(StubSource::new(StubReply::Candidates(
            sample_feedback(),
        )));

        let response = server
            .post("/submit-draft")
            .json(&json!({"text": "Hello world, this is fine."}))
            .await;

        response.assert_status_ok();
        let spans = response.json::<Vec<(usize, usize)>>();
        assert_eq!(spans, vec![(0, 5), (6, 11)]);
    }

    #[tokio::test]
    async fn test_submit_draft_rejects_empty_text() {
        let source = StubSource::new(StubReply::Candidates(sample_feedback()));
        let server = create_test_server(source.clone());

        for text in ["", "   \n\t"] {
            let response = server
                .post("/submit-draft")
                .json(&json!({ "text": text }))
                .await;

            response.assert_status_bad_request();
            let json = response.json::<Value>();
            assert_eq!(json["detail"], "Text cannot be empty");
        }
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_draft_rejects_missing_text_field() {
        let server = create_test_server(StubSource::new(StubReply::Fail));

        let response = server
            .post("/submit-draft")
            .json(&json!({"draft": "wrong field"}))
            .await;

        assert!(response.status_code().is_client_error());
    }

    #[tokio::test]
    async fn test_submit_draft_falls_back_when_model_fails() {
        let server = create_test_server(StubSource::new(StubReply::Fail));

        let response = server
            .post("/submit-draft")
            .json(&json!({"text": "The quick brown fox jumps over the lazy dog"}))
            .await;

        response.assert_status_ok();
        // "The quick brown fox jumps"
        let spans = response.json::<Vec<(usize, usize)>>();
        assert_eq!(spans, vec![(0, 25)]);
    }

    #[tokio::test]
    async fn test_submit_draft_panic_is_generic_500() {
        let server = create_test_server(StubSource::new(StubReply::Panic));

        let response = server
            .post("/submit-draft")
            .json(&json!({"text": "anything"}))
            .await;

        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let json = response.json::<Value>();
        assert_eq!(json["detail"], "Error processing draft");
    }

    #[tokio::test]
    async fn test_submit_draft_detailed_report() {
        let server = create_test_server(StubSource::new(StubReply::Candidates(
            sample_feedback(),
        )));

        let response = server
            .post("/submit-draft/detailed")
            .json(&json!({"text": "Hello world, this is fine."}))
            .await;

        response.assert_status_ok();
        let json = response.json::<Value>();
        assert_eq!(json["word_count"], 5);
        assert_eq!(
            json["numbered_text"],
            "[1]Hello [2]world, [3]this [4]is [5]fine."
        );
        assert_eq!(json["character_positions"], json!([[0, 5], [6, 11]]));
        assert_eq!(json["feedback"].as_array().unwrap().len(), 2);
        assert_eq!(json["feedback"][1]["category"], "Grammar");
        assert_eq!(
            json["feedback"][1]["word_range"],
            json!({"start": 2, "end": 3})
        );
        assert_eq!(json["feedback"][1]["comments"], "Comma splice");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn draft_text() -> impl Strategy<Value = String> {
        "[a-z,.!]{1,8}([ \t\n]{1,3}[a-z,.!]{1,8}){0,12}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Property: a failing model always yields one span over the first min(5, n) words
        #[test]
        fn fallback_covers_leading_words(text in draft_text()) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let report = runtime
                .block_on(state_with(StubSource::new(StubReply::Fail)).orchestrator.submit(&text))
                .unwrap();

            let words: Vec<&str> = text.split_whitespace().collect();
            let covered = words.len().min(5);
            prop_assert_eq!(report.word_count, words.len());
            prop_assert_eq!(report.character_positions.len(), 1);

            let span = report.character_positions[0];
            let highlighted: String = text.chars().skip(span.offset).take(span.length).collect();
            prop_assert_eq!(highlighted.split_whitespace().collect::<Vec<_>>(), words[..covered].to_vec());
        }
    }
}
