//! Flashcard syntax endpoints

use axum::{extract::rejection::JsonRejection, Json};
use flashcard_core::{card_patterns, parse_flashcard};

use crate::error::Result;
use crate::models::*;

/// POST /api/flashcards/parse
pub async fn parse(
    payload: std::result::Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<FlashcardParseResult>> {
    let Json(payload) = payload?;
    Ok(Json(parse_flashcard(&payload.text)))
}

/// GET /api/flashcards/patterns
pub async fn patterns() -> Json<PatternListResponse> {
    let patterns = card_patterns()
        .map(|(marker, card_type, card_direction)| PatternInfo {
            marker: marker.to_string(),
            card_type,
            card_direction,
        })
        .collect();
    Json(PatternListResponse { patterns })
}
