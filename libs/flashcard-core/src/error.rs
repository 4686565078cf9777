//! Error types for flashcard-core.

use thiserror::Error;

/// Errors raised when a flat parse record does not describe a valid result.
///
/// Parsing text never fails; these only surface when rebuilding a
/// [`FlashcardParseResult`](crate::types::FlashcardParseResult) from stored data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("card record is missing its card type")]
    MissingCardType,

    #[error("{card_type} card record is missing its direction")]
    MissingDirection { card_type: String },

    #[error("card record is missing its front")]
    MissingFront,

    #[error("cloze card record is missing its occlusions")]
    MissingOcclusions,

    #[error("record mixes cloze and front/back fields")]
    MixedFields,

    #[error("non-card record carries card field {field}")]
    UnexpectedField { field: &'static str },
}
