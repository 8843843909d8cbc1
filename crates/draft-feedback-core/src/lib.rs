//! Draft feedback core
//!
//! Maps between the three coordinate systems used when a language model
//! reviews a draft:
//!
//! - character offsets in the original text
//! - 1-based word indices shown to the model as `[N]` markers
//! - `[offset, length]` character spans returned for highlighting
//!
//! The model itself sits behind [`FeedbackSource`]; everything it returns
//! is validated before use.

pub mod collaborator;
pub mod error;
pub mod feedback;
pub mod numbering;
pub mod orchestrator;
pub mod tokenize;
pub mod translate;

pub use collaborator::{parse_candidates, FeedbackSource};
pub use error::{CollaboratorError, FeedbackError, ItemRejection};
pub use feedback::{fallback_candidate, Category, FeedbackItem, WordRange};
pub use numbering::{number_tokens, number_words, NumberedText};
pub use orchestrator::{accept_candidates, FeedbackOrchestrator, FeedbackReport};
pub use tokenize::{count_words, tokenize, Token, TokenKind};
pub use translate::{translate_ranges, CharSpan, WordMap, WordPosition};
