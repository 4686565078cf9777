//! Block extraction: one record per identified node.

use std::collections::HashSet;

use flashcard_core::{parse_flashcard, FlashcardParseResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node::{Node, Visit};

/// Synchronization unit derived from an identified node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockData {
    pub node_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Node,
    pub text_content: String,
    /// Index among identified blocks, in document order.
    pub position: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub flashcard: FlashcardParseResult,
}

impl BlockData {
    fn from_node(node: &Node, node_id: String, attribute_name: &str, position: usize) -> Self {
        let text_content = node.text_content();
        let attrs: Map<String, Value> = node
            .attrs
            .iter()
            .filter(|(name, value)| name.as_str() != attribute_name && !value.is_null())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Self {
            node_id,
            kind: node.kind.clone(),
            content: node.clone(),
            flashcard: parse_flashcard(&text_content),
            text_content,
            position,
            attrs: (!attrs.is_empty()).then_some(attrs),
        }
    }

    /// Whether nothing the store cares about differs from `previous`.
    ///
    /// Compares kind, text, position, full content and every card field.
    pub fn is_unchanged_from(&self, previous: &BlockData) -> bool {
        self.kind == previous.kind
            && self.text_content == previous.text_content
            && self.position == previous.position
            && self.content == previous.content
            && self.flashcard == previous.flashcard
    }
}

/// Extract every identified block from `doc`.
///
/// An identified node is atomic: nodes nested inside it are never extracted
/// on their own.
pub fn extract_blocks(doc: &Node, attribute_name: &str) -> Vec<BlockData> {
    let mut blocks = Vec::new();
    let mut seen = HashSet::new();

    doc.descendants(&mut |node| {
        let Some(node_id) = node.attr_str(attribute_name) else {
            return Visit::Descend;
        };
        if !seen.insert(node_id.clone()) {
            tracing::warn!(node_id = %node_id, "duplicate block id in document, keeping first");
            return Visit::Skip;
        }
        let position = blocks.len();
        blocks.push(BlockData::from_node(node, node_id, attribute_name, position));
        Visit::Skip
    });

    blocks
}
