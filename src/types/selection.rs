use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::CellId;

/// How a selection rectangle was shaped from its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionType {
    /// Standard cell selection (default)
    #[default]
    CellRange,
    /// Anchor is a body row header: the rectangle runs to the end of the row
    RowRange,
    /// Anchor is a column header: the rectangle runs to the last visible row
    ColumnRange,
}

/// Normalized rectangle in matrix coordinates, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRange {
    pub row1: usize,
    pub col1: usize,
    pub row2: usize,
    pub col2: usize,
}

impl CellRange {
    /// Build from two arbitrary corners.
    pub fn from_corners(a: (usize, usize), b: (usize, usize)) -> Self {
        Self {
            row1: a.0.min(b.0),
            col1: a.1.min(b.1),
            row2: a.0.max(b.0),
            col2: a.1.max(b.1),
        }
    }

    pub fn single(row: usize, col: usize) -> Self {
        Self::from_corners((row, col), (row, col))
    }

    pub fn height(&self) -> usize {
        self.row2 - self.row1 + 1
    }

    pub fn width(&self) -> usize {
        self.col2 - self.col1 + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row1..=self.row2).contains(&row) && (self.col1..=self.col2).contains(&col)
    }

    /// Smallest range covering both.
    pub fn union(&self, other: &CellRange) -> CellRange {
        CellRange {
            row1: self.row1.min(other.row1),
            col1: self.col1.min(other.col1),
            row2: self.row2.max(other.row2),
            col2: self.col2.max(other.col2),
        }
    }
}

/// Direction of a keyboard navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
    /// Enter moves down, like `Down`.
    Enter,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Left),
            "ArrowUp" => Some(Self::Up),
            "ArrowRight" => Some(Self::Right),
            "ArrowDown" => Some(Self::Down),
            "Enter" => Some(Self::Enter),
            _ => None,
        }
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Landed on a different logical cell.
    Moved(CellId),
    /// The step would leave the matrix; the selection should stay where it is.
    Blocked,
}

impl Navigation {
    /// Resulting cell, falling back to `current` when blocked.
    pub fn cell_or(self, current: CellId) -> CellId {
        match self {
            Self::Moved(id) => id,
            Self::Blocked => current,
        }
    }
}

/// Anchor/focus selection with ctrl-extended union of highlighted cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// First-clicked endpoint.
    pub anchor: Option<CellId>,
    /// Current endpoint.
    pub focus: Option<CellId>,
    /// How the latest rectangle was shaped from anchor and focus.
    pub shape: SelectionType,
    /// Whether the latest rectangle was unioned with the previous highlight.
    pub ctrl_extend: bool,
    /// Visible cells currently highlighted.
    pub selected: BTreeSet<CellId>,
    /// Pointer is held down.
    pub dragging: bool,
    /// The current range was copied and shows the dashed outline.
    pub copy_marquee: bool,
}

impl SelectionState {
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
