//! OpenAI-compatible chat-completions client
//!
//! Sends the numbered draft with an editorial prompt and hands the reply
//! text to [`parse_candidates`]. Any failure is reported as a
//! [`CollaboratorError`]; the orchestrator decides what to do with it.

use async_trait::async_trait;
use draft_feedback_core::{parse_candidates, CollaboratorError, FeedbackSource, NumberedText};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::LlmConfig;

const SYSTEM_PROMPT: &str = "You are a writing assistant giving constructive, specific feedback \
on drafts. Reply with valid JSON only.";

/// Build the user prompt for a numbered draft
pub fn build_prompt(numbered: &NumberedText) -> String {
    format!(
        r#"Review the draft below. Every word is prefixed with its number in brackets, like [1]word [2]another [3]word.

Draft ({word_count} words):
{text}

Reply with a JSON array. Each element must have:
- "category": one of "Grammar", "Style", "Content", "Structure", "Clarity"
- "word_range": an object with "start" and "end", the bracketed numbers of the first and last word the comment applies to
- "comments": the feedback itself

Give as many useful items as you can. Ranges must not overlap and must use the numbers exactly as shown.
The ranges will be highlighted in the draft, so keep them small: a word or a sentence is better than a paragraph. Only highlight a whole paragraph when it needs rewriting as a whole, and never the whole draft. Together the highlights should cover no more than about a tenth of the text.

Example:
[
  {{
    "category": "Grammar",
    "word_range": {{"start": 5, "end": 7}},
    "comments": "Consider revising this phrase for better clarity."
  }}
]

Return only the JSON array."#,
        word_count = numbered.word_count,
        text = numbered.text,
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Feedback source backed by a chat-completions endpoint
pub struct OpenAiFeedbackSource {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiFeedbackSource {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }
}

#[async_trait]
impl FeedbackSource for OpenAiFeedbackSource {
    async fn request_feedback(
        &self,
        numbered: &NumberedText,
    ) -> Result<Vec<Value>, CollaboratorError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CollaboratorError::MissingCredentials)?;

        let prompt = build_prompt(numbered);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        info!(
            "Requesting feedback from {} ({} words)",
            self.config.model, numbered.word_count
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::Unparseable(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CollaboratorError::EmptyReply)?;

        debug!("Model reply: {}", content);

        parse_candidates(&content)
    }
}
