//! API request and response types

use serde::{Deserialize, Serialize};

pub use block_sync::{BlockData, Node, SyncStatus};
pub use flashcard_core::{CardDirection, CardType, FlashcardParseResult};

/// POST /api/flashcards/parse body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    pub text: String,
}

/// One row of the marker table, in precedence order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternInfo {
    pub marker: String,
    pub card_type: CardType,
    pub card_direction: CardDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternListResponse {
    pub patterns: Vec<PatternInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockListResponse {
    pub document_id: String,
    pub blocks: Vec<BlockData>,
}
