//! Block sink writing into the in-memory store.

use std::sync::Arc;

use block_sync::{BlockData, BlockSink, SinkResult};

use crate::db::BlockStore;

pub struct StoreSink {
    store: Arc<BlockStore>,
}

impl StoreSink {
    pub fn new(store: Arc<BlockStore>) -> Self {
        Self { store }
    }
}

impl BlockSink for StoreSink {
    fn initial_sync(&mut self, document_id: &str, blocks: &[BlockData]) -> SinkResult {
        tracing::info!(document_id, blocks = blocks.len(), "Initial block sync");
        self.store.replace_document(document_id, blocks);
        Ok(())
    }

    fn block_update(&mut self, document_id: &str, block: &BlockData) -> SinkResult {
        tracing::debug!(document_id, node_id = %block.node_id, "Block updated");
        self.store.upsert_block(document_id, block);
        Ok(())
    }

    fn blocks_delete(&mut self, document_id: &str, node_ids: &[String]) -> SinkResult {
        let removed = self.store.delete_blocks(document_id, node_ids);
        tracing::debug!(document_id, requested = node_ids.len(), removed, "Blocks deleted");
        Ok(())
    }
}
