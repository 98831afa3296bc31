//! Text extraction from cell content.
//!
//! The text of a cell is what copy, sort, filter and sum operate on. Each node
//! contributes its own normalized value followed by the text of its children:
//! - markers contribute nothing and are not descended
//! - checkboxes and radios contribute their value only when checked
//! - drop-downs contribute their current value, never their options
//! - images are replaced by their alt text
//! - an empty line break contributes a single `\n`

use crate::types::{CellId, Node, Table};

/// Text of a single node and its descendants.
pub fn extract(node: &Node) -> String {
    match node {
        Node::Marker => String::new(),
        Node::Text { text } => normalize(text),
        Node::Toggle { value, checked } => {
            if *checked {
                normalize(value)
            } else {
                String::new()
            }
        }
        Node::Input { value, .. } | Node::Select { value, .. } => normalize(value),
        Node::Image { alt } => alt.clone(),
        Node::LineBreak => "\n".to_string(),
        Node::Element { children, .. } => extract_all(children),
    }
}

/// Concatenated text of a node list.
pub fn extract_all(nodes: &[Node]) -> String {
    nodes.iter().map(extract).collect()
}

/// Text of a cell, or empty for an unknown handle.
pub fn cell_text(table: &Table, id: CellId) -> String {
    table
        .cell(id)
        .map(|c| extract_all(&c.content))
        .unwrap_or_default()
}

/// Strip surrounding whitespace, and every line break together with the
/// whitespace that follows it.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.trim().chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\n' || ch == '\r' {
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            continue;
        }
        out.push(ch);
    }
    out
}
