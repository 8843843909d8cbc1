//! Feedback items and validation of untrusted candidate records
//!
//! The language model is asked for a JSON array of
//! `{category, word_range: {start, end}, comments}` objects, but nothing it
//! returns is trusted. Each candidate is coerced field by field and then
//! checked against the draft's word count. Candidates that fail are dropped,
//! never repaired.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ItemRejection;

/// Comment used when a candidate has none
pub const MISSING_COMMENT: &str = "No comment provided";

/// Comment attached to the synthetic item used when the model call fails
pub const FALLBACK_COMMENT: &str = "Consider expanding on your main points for better clarity.";

/// Number of leading words covered by the synthetic fallback item
pub const FALLBACK_WORDS: usize = 5;

/// Feedback category
///
/// The set is advisory: labels the model invents map to [`Category::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    Grammar,
    Style,
    Content,
    Structure,
    Clarity,
    General,
}

impl Category {
    /// Map a label to a category, case-insensitively
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "grammar" => Category::Grammar,
            "style" => Category::Style,
            "content" => Category::Content,
            "structure" => Category::Structure,
            "clarity" => Category::Clarity,
            _ => Category::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Grammar => "Grammar",
            Category::Style => "Style",
            Category::Content => "Content",
            Category::Structure => "Structure",
            Category::Clarity => "Clarity",
            Category::General => "General",
        }
    }
}

/// Inclusive range of 1-based word indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordRange {
    pub start: usize,
    pub end: usize,
}

impl WordRange {
    pub fn is_single_word(&self) -> bool {
        self.start == self.end
    }
}

/// A validated piece of feedback
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackItem {
    pub category: Category,
    pub word_range: WordRange,
    pub comments: String,
}

impl FeedbackItem {
    /// Coerce an untrusted candidate and validate it against `word_count`
    pub fn from_candidate(candidate: &Value, word_count: usize) -> Result<Self, ItemRejection> {
        let fields = candidate.as_object().ok_or(ItemRejection::NotAnObject)?;

        let category = match fields.get("category") {
            Some(Value::String(label)) => Category::from_label(label),
            _ => Category::General,
        };

        let (start, end) = match fields.get("word_range") {
            None | Some(Value::Null) => (1, 1),
            Some(Value::Object(range)) => (
                coerce_index(range, "start")?,
                coerce_index(range, "end")?,
            ),
            Some(_) => return Err(ItemRejection::MalformedRange),
        };

        let comments = match fields.get("comments") {
            Some(Value::String(text)) => text.clone(),
            _ => MISSING_COMMENT.to_string(),
        };

        let word_range = validate_range(start, end, word_count)?;

        Ok(Self {
            category,
            word_range,
            comments,
        })
    }
}

/// Read a word index, defaulting to 1 when absent
///
/// Accepts JSON integers, integral floats and strings holding an integer.
fn coerce_index(range: &Map<String, Value>, field: &'static str) -> Result<i64, ItemRejection> {
    let invalid = ItemRejection::InvalidIndex { field };

    match range.get(field) {
        None | Some(Value::Null) => Ok(1),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(invalid),
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid),
        Some(_) => Err(invalid),
    }
}

/// Check `1 <= start <= end <= word_count`
fn validate_range(start: i64, end: i64, word_count: usize) -> Result<WordRange, ItemRejection> {
    let in_bounds = |i: i64| i >= 1 && usize::try_from(i).is_ok_and(|i| i <= word_count);

    if !in_bounds(start) || !in_bounds(end) {
        return Err(ItemRejection::OutOfRange {
            start,
            end,
            word_count,
        });
    }
    if start > end {
        return Err(ItemRejection::Inverted { start, end });
    }

    Ok(WordRange {
        start: start as usize,
        end: end as usize,
    })
}

/// Synthetic candidate substituted when the model call fails
///
/// Covers the first `min(5, word_count)` words and goes through the same
/// validation as any other candidate.
pub fn fallback_candidate(word_count: usize) -> Value {
    json!({
        "category": Category::Content.as_str(),
        "word_range": { "start": 1, "end": word_count.min(FALLBACK_WORDS) },
        "comments": FALLBACK_COMMENT,
    })
}
