//! Outbound persistence callbacks.

use crate::block::BlockData;

/// Error returned by a sink. The engine logs it and moves on.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

pub type SinkResult = std::result::Result<(), SinkError>;

/// Receiver of block changes for one document.
///
/// Calls are fire-and-forget: the engine never retries, and its pending state
/// is cleared whether or not a call succeeds. Wrap the sink to add retries.
pub trait BlockSink: Send + 'static {
    /// Called exactly once per session, before any update, with every block.
    fn initial_sync(&mut self, document_id: &str, blocks: &[BlockData]) -> SinkResult;

    /// Called once per new or changed block in a flush.
    fn block_update(&mut self, document_id: &str, block: &BlockData) -> SinkResult;

    /// Called at most once per flush with every removed node id.
    fn blocks_delete(&mut self, document_id: &str, node_ids: &[String]) -> SinkResult;
}
