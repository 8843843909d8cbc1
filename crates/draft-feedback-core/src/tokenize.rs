//! Word/gap segmentation shared by numbering and range translation
//!
//! Text is split left-to-right into maximal runs of non-whitespace ("words")
//! and whitespace ("gaps"). Whitespace is the Unicode `White_Space` property,
//! as matched by the regex `\s` class.
//!
//! The language model never re-tokenizes the draft: it only echoes back the
//! `[N]` markers it was shown. Numbering and translation both go through
//! [`tokenize`], so they always agree on which run carries which index.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A word run or a gap run, whichever starts at the cursor
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\S+|\s+").unwrap();
}

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Run of non-whitespace characters, carrying its 1-based word index
    Word(usize),
    /// Run of whitespace characters
    Gap,
}

/// A maximal word or gap run within the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The run itself, borrowed from the original text
    pub text: &'a str,
    /// Offset of the first character, counted in `char`s
    pub offset: usize,
    /// Length of the run, counted in `char`s
    pub len: usize,
}

impl Token<'_> {
    /// Word index if this token is a word
    pub fn word_index(&self) -> Option<usize> {
        match self.kind {
            TokenKind::Word(index) => Some(index),
            TokenKind::Gap => None,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word(_))
    }
}

/// Segment `text` into alternating word and gap tokens
///
/// The tokens cover the text with no overlaps and no holes, so joining
/// their `text` fields gives back the input exactly.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    let mut words = 0;

    for m in TOKEN_PATTERN.find_iter(text) {
        let run = m.as_str();
        let len = run.chars().count();

        // A run is all-whitespace or all-non-whitespace, so the first char decides
        let kind = match run.chars().next() {
            Some(c) if c.is_whitespace() => TokenKind::Gap,
            _ => {
                words += 1;
                TokenKind::Word(words)
            }
        };

        tokens.push(Token {
            kind,
            text: run,
            offset: cursor,
            len,
        });
        cursor += len;
    }

    tokens
}

/// Number of word tokens in `text`
pub fn count_words(text: &str) -> usize {
    tokenize(text).iter().filter(|t| t.is_word()).count()
}
