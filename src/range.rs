//! Range resolution and keyboard navigation over a logical matrix.
//!
//! Endpoints are cell handles, not positions: a spanning endpoint contributes its
//! whole footprint to the bounding rectangle.

use crate::grid::{GridSet, LogicalMatrix, MatrixRow};
use crate::types::{
    CellId, CellKind, CellRange, Direction, Navigation, Section, SelectionType, Table,
};

/// Smallest rectangle covering every position held by `a` or `b`.
///
/// Returns `None` when neither cell occurs in the matrix.
pub fn bounding_range(matrix: &LogicalMatrix, a: CellId, b: CellId) -> Option<CellRange> {
    let mut found: Option<CellRange> = None;
    for (r, row) in matrix.rows().iter().enumerate() {
        for (c, &id) in row.cells.iter().enumerate() {
            if id == a || id == b {
                let here = CellRange::single(r, c);
                found = Some(found.map_or(here, |f| f.union(&here)));
            }
        }
    }
    found
}

/// Sub-matrix for `range`, keeping each row's source. Out-of-bounds parts are cut.
pub fn extract_range(matrix: &LogicalMatrix, range: &CellRange) -> LogicalMatrix {
    let rows = matrix
        .rows()
        .iter()
        .skip(range.row1)
        .take(range.height())
        .map(|row| MatrixRow {
            source: row.source,
            cells: row
                .cells
                .iter()
                .skip(range.col1)
                .take(range.width())
                .copied()
                .collect(),
        })
        .collect();
    LogicalMatrix::new(rows)
}

/// Move from `current` one logical cell in `direction`, or to the matrix edge.
///
/// Stepping repeats while the position still belongs to `current`, so spans are
/// skipped as a whole. Leaving the matrix, or a jump that lands on `current`
/// itself, is [`Navigation::Blocked`].
pub fn navigate(
    matrix: &LogicalMatrix,
    current: CellId,
    direction: Direction,
    jump_to_edge: bool,
) -> Navigation {
    let Some((mut row, mut col)) = matrix.position_of(current) else {
        return Navigation::Blocked;
    };

    if jump_to_edge {
        match direction {
            Direction::Left => col = 0,
            Direction::Up => row = 0,
            Direction::Right => col = matrix.width().saturating_sub(1),
            Direction::Down | Direction::Enter => row = matrix.height().saturating_sub(1),
        }
        return match matrix.get(row, col) {
            Some(id) if id != current => Navigation::Moved(id),
            _ => Navigation::Blocked,
        };
    }

    let mut moved = current;
    while moved == current {
        match direction {
            Direction::Left => {
                let Some(c) = col.checked_sub(1) else {
                    return Navigation::Blocked;
                };
                col = c;
            }
            Direction::Up => {
                let Some(r) = row.checked_sub(1) else {
                    return Navigation::Blocked;
                };
                row = r;
            }
            Direction::Right => col += 1,
            Direction::Down | Direction::Enter => row += 1,
        }
        let Some(id) = matrix.get(row, col) else {
            return Navigation::Blocked;
        };
        moved = id;
    }
    Navigation::Moved(moved)
}

/// Which selection-shaping modes are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapePolicy {
    pub column_select: bool,
    pub row_select: bool,
}

impl Default for ShapePolicy {
    fn default() -> Self {
        Self {
            column_select: true,
            row_select: true,
        }
    }
}

/// Adjust the focus of a selection whose anchor is a header cell.
///
/// - A header cell in the head selects down to the last visible row, in the
///   rightmost column of the focus.
/// - The leading header cell of a body row selects to the last column of the
///   focus's body row.
///
/// When the target cannot be found (focus outside the relevant matrix, no visible
/// row) the focus is returned unchanged as a plain cell range. Headless tables are
/// never shaped.
pub fn shape_selection(
    table: &Table,
    grid: &GridSet,
    anchor: CellId,
    focus: CellId,
    policy: ShapePolicy,
) -> (CellId, SelectionType) {
    let unchanged = (focus, SelectionType::CellRange);
    if table.is_headless() {
        return unchanged;
    }
    let Some(anchor_cell) = table.cell(anchor) else {
        return unchanged;
    };
    if anchor_cell.kind != CellKind::Header {
        return unchanged;
    }

    match table.section_of(anchor) {
        Some(Section::Head) if policy.column_select => {
            let Some(range) = bounding_range(&grid.all, focus, focus) else {
                return unchanged;
            };
            grid.all
                .rows()
                .iter()
                .rev()
                .find(|row| table.is_row_visible(row.source))
                .and_then(|row| row.cells.get(range.col2).copied())
                .map_or(unchanged, |id| (id, SelectionType::ColumnRange))
        }
        Some(Section::Body) if policy.row_select && table.is_leading_cell(anchor) => {
            let Some(range) = bounding_range(&grid.body, focus, focus) else {
                return unchanged;
            };
            grid.body
                .row(range.row1)
                .and_then(|row| row.cells.last().copied())
                .map_or(unchanged, |id| (id, SelectionType::RowRange))
        }
        _ => unchanged,
    }
}
