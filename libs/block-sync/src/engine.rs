//! Block diff state machine.
//!
//! [`BlockSync`] has no clock: callers feed it tree changes and decide when to
//! call [`BlockSync::flush`]. [`crate::DebouncedSync`] adds the timer.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::block::{extract_blocks, BlockData};
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::node::Node;
use crate::sink::BlockSink;

/// What a tree-change notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// First notification; the sink received the full block list.
    InitialSync { blocks: usize },
    /// Same tree as last time (selection-only change).
    Unchanged,
    /// Tree was diffed against the snapshot.
    Diffed { pending_updates: usize, pending_deletes: usize },
}

impl ChangeOutcome {
    /// Whether a flush should be (re)scheduled.
    pub fn needs_flush(&self) -> bool {
        matches!(
            self,
            Self::Diffed { pending_updates, pending_deletes }
                if *pending_updates > 0 || *pending_deletes > 0
        )
    }
}

/// Counters exposed to hosts for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub initial_sync_done: bool,
    pub pending_updates: usize,
    pub pending_deletes: usize,
}

/// Keeps one document's blocks in step with an external store.
pub struct BlockSync<S: BlockSink> {
    document_id: String,
    config: SyncConfig,
    sink: S,
    last_doc: Option<Node>,
    previous_blocks: HashMap<String, BlockData>,
    pending_updates: HashMap<String, BlockData>,
    pending_deletes: BTreeSet<String>,
    initial_sync_done: bool,
}

impl<S: BlockSink> BlockSync<S> {
    /// Start a session. Fails if the document id is blank or the config is invalid.
    pub fn new(document_id: impl Into<String>, config: SyncConfig, sink: S) -> Result<Self> {
        let document_id = document_id.into();
        if document_id.trim().is_empty() {
            return Err(SyncError::MissingDocumentId);
        }
        config.validate()?;

        Ok(Self {
            document_id,
            config,
            sink,
            last_doc: None,
            previous_blocks: HashMap::new(),
            pending_updates: HashMap::new(),
            pending_deletes: BTreeSet::new(),
            initial_sync_done: false,
        })
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_initial_sync_done(&self) -> bool {
        self.initial_sync_done
    }

    pub fn pending_updates(&self) -> usize {
        self.pending_updates.len()
    }

    pub fn pending_deletes(&self) -> usize {
        self.pending_deletes.len()
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            initial_sync_done: self.initial_sync_done,
            pending_updates: self.pending_updates.len(),
            pending_deletes: self.pending_deletes.len(),
        }
    }

    /// Blocks the store is believed to hold after the next flush.
    pub fn snapshot(&self) -> &HashMap<String, BlockData> {
        &self.previous_blocks
    }

    /// Process a tree-change notification.
    pub fn handle_change(&mut self, doc: &Node) -> ChangeOutcome {
        if self.last_doc.as_ref() == Some(doc) {
            return ChangeOutcome::Unchanged;
        }
        self.last_doc = Some(doc.clone());

        let blocks = extract_blocks(doc, &self.config.attribute_name);

        if !self.initial_sync_done {
            tracing::debug!(
                document_id = %self.document_id,
                blocks = blocks.len(),
                "initial block sync"
            );
            if let Err(e) = self.sink.initial_sync(&self.document_id, &blocks) {
                tracing::warn!(document_id = %self.document_id, error = %e, "initial sync failed");
            }
            let count = blocks.len();
            self.previous_blocks = into_snapshot(blocks);
            self.initial_sync_done = true;
            return ChangeOutcome::InitialSync { blocks: count };
        }

        let current = into_snapshot(blocks);

        for (node_id, block) in &current {
            let unchanged = self
                .previous_blocks
                .get(node_id)
                .is_some_and(|previous| block.is_unchanged_from(previous));
            if !unchanged {
                self.pending_deletes.remove(node_id);
                self.pending_updates.insert(node_id.clone(), block.clone());
            }
        }

        for node_id in self.previous_blocks.keys() {
            if !current.contains_key(node_id) {
                self.pending_updates.remove(node_id);
                self.pending_deletes.insert(node_id.clone());
            }
        }

        self.previous_blocks = current;

        ChangeOutcome::Diffed {
            pending_updates: self.pending_updates.len(),
            pending_deletes: self.pending_deletes.len(),
        }
    }

    /// Deliver staged changes to the sink and clear them.
    pub fn flush(&mut self) {
        if !self.pending_updates.is_empty() {
            let mut updates: Vec<BlockData> =
                self.pending_updates.drain().map(|(_, block)| block).collect();
            updates.sort_by(|a, b| {
                a.position
                    .cmp(&b.position)
                    .then_with(|| a.node_id.cmp(&b.node_id))
            });

            tracing::debug!(
                document_id = %self.document_id,
                count = updates.len(),
                "flushing block updates"
            );
            for block in &updates {
                if let Err(e) = self.sink.block_update(&self.document_id, block) {
                    tracing::warn!(
                        document_id = %self.document_id,
                        node_id = %block.node_id,
                        error = %e,
                        "block update failed"
                    );
                }
            }
        }

        if !self.pending_deletes.is_empty() {
            let node_ids: Vec<String> =
                std::mem::take(&mut self.pending_deletes).into_iter().collect();

            tracing::debug!(
                document_id = %self.document_id,
                count = node_ids.len(),
                "flushing block deletes"
            );
            if let Err(e) = self.sink.blocks_delete(&self.document_id, &node_ids) {
                tracing::warn!(document_id = %self.document_id, error = %e, "block delete failed");
            }
        }
    }
}

fn into_snapshot(blocks: Vec<BlockData>) -> HashMap<String, BlockData> {
    blocks
        .into_iter()
        .map(|block| (block.node_id.clone(), block))
        .collect()
}
