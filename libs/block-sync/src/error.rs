//! Error types for block-sync.

use thiserror::Error;

/// Result type alias using SyncError.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Configuration errors raised when a sync session is created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("document id is required to start block sync")]
    MissingDocumentId,

    #[error("invalid sync config: {0}")]
    InvalidConfig(String),
}
