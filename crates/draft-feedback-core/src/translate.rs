//! Translation of word ranges into character spans
//!
//! A span runs from the first character of the start word through the last
//! character of the end word, so any whitespace and punctuation between
//! them is highlighted too.

use serde::Serialize;

use crate::feedback::{FeedbackItem, WordRange};
use crate::tokenize::{tokenize, Token};

/// Character position of a single word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordPosition {
    pub offset: usize,
    pub len: usize,
}

/// Highlightable region of the original text, in `char` units
///
/// Serialized as the pair `[offset, length]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "(usize, usize)")]
pub struct CharSpan {
    pub offset: usize,
    pub length: usize,
}

impl From<CharSpan> for (usize, usize) {
    fn from(span: CharSpan) -> Self {
        (span.offset, span.length)
    }
}

/// Lookup from word index to character position
#[derive(Debug, Clone, Default)]
pub struct WordMap {
    // positions[i] belongs to word index i + 1
    positions: Vec<WordPosition>,
}

impl WordMap {
    pub fn from_tokens(tokens: &[Token<'_>]) -> Self {
        let positions = tokens
            .iter()
            .filter(|t| t.is_word())
            .map(|t| WordPosition {
                offset: t.offset,
                len: t.len,
            })
            .collect();

        Self { positions }
    }

    pub fn word_count(&self) -> usize {
        self.positions.len()
    }

    /// Position of the word with the given 1-based index
    pub fn position(&self, index: usize) -> Option<WordPosition> {
        index
            .checked_sub(1)
            .and_then(|i| self.positions.get(i))
            .copied()
    }

    /// Span covering `range`, or `None` if either end is not a word
    pub fn span(&self, range: WordRange) -> Option<CharSpan> {
        let first = self.position(range.start)?;
        if range.is_single_word() {
            return Some(CharSpan {
                offset: first.offset,
                length: first.len,
            });
        }

        let last = self.position(range.end)?;
        let end = last.offset + last.len;
        // Inverted ranges never reach here from validation; skip them if they do
        if end <= first.offset {
            return None;
        }

        Some(CharSpan {
            offset: first.offset,
            length: end - first.offset,
        })
    }

    /// Spans for `items` in order, skipping ranges that fall outside the text
    pub fn spans(&self, items: &[FeedbackItem]) -> Vec<CharSpan> {
        items
            .iter()
            .filter_map(|item| self.span(item.word_range))
            .collect()
    }
}

/// Convert the word ranges of `items` into character spans of `text`
pub fn translate_ranges(text: &str, items: &[FeedbackItem]) -> Vec<CharSpan> {
    WordMap::from_tokens(&tokenize(text)).spans(items)
}
