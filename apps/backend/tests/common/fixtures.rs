//! Test fixtures for building editor document trees.

use serde_json::{json, Value};

/// Paragraph with a block id and a single text run.
pub fn paragraph(id: &str, text: &str) -> Value {
    json!({
        "type": "paragraph",
        "attrs": { "id": id },
        "content": [{ "type": "text", "text": text }]
    })
}

/// Heading with a block id.
pub fn heading(id: &str, level: u8, text: &str) -> Value {
    json!({
        "type": "heading",
        "attrs": { "id": id, "level": level },
        "content": [{ "type": "text", "text": text }]
    })
}

/// List item owning a nested paragraph; the item carries the id.
pub fn list_item(id: &str, text: &str) -> Value {
    json!({
        "type": "bulletList",
        "content": [{
            "type": "listItem",
            "attrs": { "id": id },
            "content": [{
                "type": "paragraph",
                "attrs": { "id": format!("{}-inner", id) },
                "content": [{ "type": "text", "text": text }]
            }]
        }]
    })
}

/// Wrap blocks in a document node.
pub fn doc(blocks: Vec<Value>) -> Value {
    json!({ "type": "doc", "content": blocks })
}

/// Sample study notes mixing prose and cards.
pub fn sample_notes() -> Value {
    doc(vec![
        heading("h1", 1, "Geography"),
        paragraph("p1", "{{Paris}} is the capital of {{France}}"),
        paragraph("p2", "Largest ocean >> Pacific"),
        paragraph("p3", "Some ordinary prose."),
        list_item("li1", "Continent count :: seven"),
    ])
}
