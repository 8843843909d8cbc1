//! Word numbering
//!
//! Prefixes every word of a draft with an `[N]` marker so the language model
//! can refer to words by index.

use serde::Serialize;

use crate::tokenize::{tokenize, Token, TokenKind};

/// A draft annotated with word markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedText {
    /// The draft with `[N]` in front of each word, whitespace untouched
    pub text: String,
    /// Number of words in the draft
    pub word_count: usize,
}

/// Number each word in `text`
///
/// Whitespace-only input comes back unchanged with a word count of zero.
pub fn number_words(text: &str) -> NumberedText {
    number_tokens(&tokenize(text))
}

/// Number an existing tokenization
pub fn number_tokens(tokens: &[Token<'_>]) -> NumberedText {
    let mut out = String::new();
    let mut word_count = 0;

    for token in tokens {
        match token.kind {
            TokenKind::Word(index) => {
                word_count = index;
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
                out.push_str(token.text);
            }
            TokenKind::Gap => out.push_str(token.text),
        }
    }

    NumberedText {
        text: out,
        word_count,
    }
}
