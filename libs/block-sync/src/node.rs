//! Editable document tree, in the editor's JSON shape.
//!
//! ```json
//! {"type": "doc", "content": [
//!   {"type": "paragraph", "attrs": {"id": "p1"}, "content": [
//!     {"type": "text", "text": "front >> back"}
//!   ]}
//! ]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Visitor signal for [`Node::descendants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Descend,
    /// Do not walk into this node's children.
    Skip,
}

/// A node of the document tree. Compared by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Value>,
}

impl Node {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attrs: Map::new(),
            content: Vec::new(),
            text: None,
            marks: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new("text")
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = content;
        self
    }

    pub fn is_hard_break(&self) -> bool {
        matches!(self.kind.as_str(), "hardBreak" | "hard_break")
    }

    /// Read an attribute as an identifier string.
    ///
    /// Numbers are stringified; null, empty strings and other values count as absent.
    pub fn attr_str(&self, name: &str) -> Option<String> {
        match self.attrs.get(name)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Flattened text of this node and everything below it.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        } else if self.is_hard_break() {
            out.push('\n');
        }
        for child in &self.content {
            child.collect_text(out);
        }
    }

    /// Depth-first walk over all descendants in document order.
    ///
    /// The node itself is not visited. Returning [`Visit::Skip`] keeps the walk
    /// out of that node's subtree.
    pub fn descendants<F>(&self, visitor: &mut F)
    where
        F: FnMut(&Node) -> Visit,
    {
        for child in &self.content {
            if visitor(child) == Visit::Descend {
                child.descendants(visitor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Node {
        Node::new("doc").with_content(vec![
            Node::new("heading")
                .with_attr("level", 1)
                .with_content(vec![Node::text("Title")]),
            Node::new("bulletList").with_content(vec![Node::new("listItem")
                .with_content(vec![Node::new("paragraph").with_content(vec![
                    Node::text("one"),
                    Node::new("hardBreak"),
                    Node::text("two"),
                ])])]),
        ])
    }

    #[test]
    fn text_content_concatenates_and_breaks_lines() {
        let doc = sample();
        assert_eq!(doc.text_content(), "Titleone\ntwo");
        assert_eq!(doc.content[1].text_content(), "one\ntwo");
    }

    #[test]
    fn descendants_visit_in_document_order() {
        let mut kinds = Vec::new();
        sample().descendants(&mut |node| {
            kinds.push(node.kind.clone());
            Visit::Descend
        });
        assert_eq!(
            kinds,
            vec![
                "heading", "text", "bulletList", "listItem", "paragraph", "text", "hardBreak",
                "text"
            ]
        );
    }

    #[test]
    fn skip_stops_descent() {
        let mut kinds = Vec::new();
        sample().descendants(&mut |node| {
            kinds.push(node.kind.clone());
            if node.kind == "bulletList" {
                Visit::Skip
            } else {
                Visit::Descend
            }
        });
        assert_eq!(kinds, vec!["heading", "text", "bulletList"]);
    }

    #[test]
    fn attr_str_accepts_strings_and_numbers() {
        let node = Node::new("paragraph")
            .with_attr("id", "abc")
            .with_attr("num", 7)
            .with_attr("empty", "")
            .with_attr("none", Value::Null);
        assert_eq!(node.attr_str("id").as_deref(), Some("abc"));
        assert_eq!(node.attr_str("num").as_deref(), Some("7"));
        assert_eq!(node.attr_str("empty"), None);
        assert_eq!(node.attr_str("none"), None);
        assert_eq!(node.attr_str("missing"), None);
    }

    #[test]
    fn deserialize_editor_json() {
        let node: Node = serde_json::from_value(json!({
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "attrs": { "id": "p1" },
                "content": [{ "type": "text", "text": "hi", "marks": [{ "type": "bold" }] }]
            }]
        }))
        .unwrap();
        assert_eq!(node.content[0].attr_str("id").as_deref(), Some("p1"));
        assert_eq!(node.text_content(), "hi");
        assert_eq!(node.content[0].content[0].marks.len(), 1);
    }
}
