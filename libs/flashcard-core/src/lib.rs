//! Flashcard syntax detection shared by the block sync engine and backend.
//!
//! Provides:
//! - Parser for inline card markup (separator cards and cloze deletions)
//! - Shared types (CardType, CardDirection, FlashcardParseResult)

pub mod error;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use parser::{card_patterns, parse_flashcard};
pub use types::{CardDirection, CardType, Flashcard, FlashcardParseResult, SidedCardType};
