//! In-memory block store keyed by document then node id.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use block_sync::BlockData;

type Documents = HashMap<String, HashMap<String, BlockData>>;

/// Persisted blocks for every synced document.
#[derive(Default)]
pub struct BlockStore {
    documents: RwLock<Documents>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything held for a document.
    pub fn replace_document(&self, document_id: &str, blocks: &[BlockData]) {
        let blocks = blocks
            .iter()
            .map(|block| (block.node_id.clone(), block.clone()))
            .collect();
        self.write().insert(document_id.to_string(), blocks);
    }

    pub fn upsert_block(&self, document_id: &str, block: &BlockData) {
        self.write()
            .entry(document_id.to_string())
            .or_default()
            .insert(block.node_id.clone(), block.clone());
    }

    /// Remove blocks, returning how many existed.
    pub fn delete_blocks(&self, document_id: &str, node_ids: &[String]) -> usize {
        let mut documents = self.write();
        let Some(blocks) = documents.get_mut(document_id) else {
            return 0;
        };
        node_ids
            .iter()
            .filter(|node_id| blocks.remove(node_id.as_str()).is_some())
            .count()
    }

    /// Blocks ordered by position, or `None` if the document was never synced.
    pub fn get_blocks(&self, document_id: &str) -> Option<Vec<BlockData>> {
        let documents = self.read();
        let mut blocks: Vec<BlockData> = documents.get(document_id)?.values().cloned().collect();
        blocks.sort_by_key(|block| block.position);
        Some(blocks)
    }

    pub fn get_cards(&self, document_id: &str) -> Option<Vec<BlockData>> {
        let mut blocks = self.get_blocks(document_id)?;
        blocks.retain(|block| block.flashcard.is_card());
        Some(blocks)
    }

    fn read(&self) -> RwLockReadGuard<'_, Documents> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Documents> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }
}
