use serde::{Deserialize, Serialize};

use super::Node;

/// Stable handle to a cell in a [`Table`](super::Table) arena.
///
/// Every matrix position covered by a spanning cell stores the same handle, so span
/// membership is a handle comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub usize);

/// Stable handle to a row in a [`Table`](super::Table) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl RowId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Row group a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Head,
    Body,
    Foot,
}

/// `th` versus `td`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    Header,
    #[default]
    Data,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub kind: CellKind,
    /// Owning row.
    pub row: RowId,
    /// Rows covered, at least 1.
    pub row_span: usize,
    /// Columns covered, at least 1.
    pub col_span: usize,
    /// Content node tree in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
    /// Content-editable: pasted text replaces the whole content.
    #[serde(default)]
    pub editable: bool,
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub section: Section,
    /// Cells in document order.
    pub cells: Vec<CellId>,
    /// Shown when the table was loaded. Rows without it never enter a matrix.
    pub visible: bool,
    /// Hidden by the active column filter.
    #[serde(default)]
    pub filtered: bool,
}
