//! Document sync endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// PUT /api/documents/{doc_id}/tree
/// Submit the editor's current tree; called on every change
pub async fn submit_tree(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
    tree: std::result::Result<Json<Node>, JsonRejection>,
) -> Result<Json<SyncStatus>> {
    let Json(tree) = tree?;
    let status = state.sessions.submit_tree(&doc_id, &tree)?;
    Ok(Json(status))
}

/// GET /api/documents/{doc_id}/session
pub async fn session_status(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<SyncStatus>> {
    state
        .sessions
        .status(&doc_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No open session for {}", doc_id)))
}

/// DELETE /api/documents/{doc_id}/session
/// Close the editing session, flushing pending changes
pub async fn close_session(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<StatusCode> {
    if state.sessions.close(&doc_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("No open session for {}", doc_id)))
    }
}

/// GET /api/documents/{doc_id}/blocks
pub async fn list_blocks(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<BlockListResponse>> {
    let blocks = state
        .store
        .get_blocks(&doc_id)
        .ok_or_else(|| ApiError::NotFound(format!("Document {} has not been synced", doc_id)))?;
    Ok(Json(BlockListResponse {
        document_id: doc_id,
        blocks,
    }))
}

/// GET /api/documents/{doc_id}/cards
pub async fn list_cards(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<Json<BlockListResponse>> {
    let blocks = state
        .store
        .get_cards(&doc_id)
        .ok_or_else(|| ApiError::NotFound(format!("Document {} has not been synced", doc_id)))?;
    Ok(Json(BlockListResponse {
        document_id: doc_id,
        blocks,
    }))
}
