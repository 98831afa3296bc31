//! Logical matrix construction.
//!
//! Expands the span-annotated rows of a [`Table`] into a dense grid in which every
//! position covered by a spanning cell holds that cell's handle:
//!
//! ```text
//! <tr><td rowspan=2>A</td><td>B</td></tr>      A B
//! <tr><td>C</td></tr>                     =>   A C
//! ```
//!
//! Rows hidden at load time are dropped before expansion. Filtered rows stay in the
//! matrix, even across rebuilds; check [`Table::is_row_visible`] on
//! [`MatrixRow::source`].

use serde::Serialize;

use crate::error::{Result, SheetGridError};
use crate::types::{CellId, RowId, Section, Table};

/// One row of a logical matrix, remembering the table row it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixRow {
    pub source: RowId,
    pub cells: Vec<CellId>,
}

/// Dense row-major grid of cell handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogicalMatrix {
    rows: Vec<MatrixRow>,
}

impl LogicalMatrix {
    pub fn new(rows: Vec<MatrixRow>) -> Self {
        Self { rows }
    }

    /// Row-wise concatenation.
    pub fn concat(parts: &[&LogicalMatrix]) -> Self {
        Self {
            rows: parts.iter().flat_map(|m| m.rows.iter().cloned()).collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Column count (the matrix is rectangular once built).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellId> {
        self.rows.get(row)?.cells.get(col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&MatrixRow> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<MatrixRow> {
        self.rows
    }

    /// Top-left position of a cell, scanning row-major.
    pub fn position_of(&self, id: CellId) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.cells.iter().position(|c| *c == id).map(|c| (r, c))
        })
    }

    /// Row index of a matrix row by its source table row.
    pub fn row_of_source(&self, source: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.source == source)
    }
}

/// Matrices of the three row groups plus their concatenation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridSet {
    pub head: LogicalMatrix,
    pub body: LogicalMatrix,
    pub foot: LogicalMatrix,
    pub all: LogicalMatrix,
}

impl GridSet {
    /// Re-derive `all` after the body changed (sorting).
    pub fn replace_body(&mut self, body: LogicalMatrix) {
        self.body = body;
        self.all = LogicalMatrix::concat(&[&self.head, &self.body, &self.foot]);
    }
}

/// Build the head, body, foot and combined matrices of a table.
///
/// # Errors
/// Returns [`SheetGridError::Grid`] when a segment cannot be expanded densely or
/// the non-empty segments disagree on their column count.
pub fn build(table: &Table) -> Result<GridSet> {
    let head = build_segment(table, table.section_rows(Section::Head))?;
    let body = build_segment(table, table.section_rows(Section::Body))?;
    let foot = build_segment(table, table.section_rows(Section::Foot))?;

    let widths: Vec<(&str, usize)> = [("head", &head), ("body", &body), ("foot", &foot)]
        .into_iter()
        .filter(|(_, m)| !m.is_empty())
        .map(|(name, m)| (name, m.width()))
        .collect();
    if let Some(&(first_name, first_width)) = widths.first() {
        if let Some(&(name, width)) = widths.iter().find(|(_, w)| *w != first_width) {
            return Err(SheetGridError::Grid(format!(
                "{name} has {width} columns but {first_name} has {first_width}"
            )));
        }
    }

    let all = LogicalMatrix::concat(&[&head, &body, &foot]);
    tracing::debug!(
        head = head.height(),
        body = body.height(),
        foot = foot.height(),
        cols = all.width(),
        "built logical matrix"
    );
    Ok(GridSet {
        head,
        body,
        foot,
        all,
    })
}

/// Expand one row group. Rows hidden at load time are skipped.
///
/// # Errors
/// Returns [`SheetGridError::Grid`] for zero spans, row spans running past the
/// last row of the group, overlapping spans, and gaps in the resulting grid.
pub fn build_segment(table: &Table, rows: &[RowId]) -> Result<LogicalMatrix> {
    let visible: Vec<RowId> = rows
        .iter()
        .copied()
        .filter(|id| table.is_row_laid_out(*id))
        .collect();
    let mut slots: Vec<Vec<Option<CellId>>> = vec![Vec::new(); visible.len()];

    for (r, row_id) in visible.iter().enumerate() {
        let Some(row) = table.row(*row_id) else {
            continue;
        };
        for (natural_col, &id) in row.cells.iter().enumerate() {
            let Some(cell) = table.cell(id) else {
                continue;
            };
            if cell.row_span == 0 || cell.col_span == 0 {
                return Err(SheetGridError::Grid(format!(
                    "cell {} has a zero span ({}x{})",
                    id.index(),
                    cell.row_span,
                    cell.col_span
                )));
            }
            if r + cell.row_span > slots.len() {
                return Err(SheetGridError::Grid(format!(
                    "cell {} spans {} rows from row {r} but the group has {} rows",
                    id.index(),
                    cell.row_span,
                    slots.len()
                )));
            }

            // Earlier row spans may already hold the natural slot.
            let mut x = natural_col;
            while slots
                .get(r)
                .and_then(|line| line.get(x))
                .is_some_and(Option::is_some)
            {
                x += 1;
            }

            for line in slots.iter_mut().skip(r).take(cell.row_span) {
                if line.len() < x + cell.col_span {
                    line.resize(x + cell.col_span, None);
                }
                for slot in line.iter_mut().skip(x).take(cell.col_span) {
                    if let Some(other) = slot {
                        return Err(SheetGridError::Grid(format!(
                            "cell {} overlaps cell {}",
                            id.index(),
                            other.index()
                        )));
                    }
                    *slot = Some(id);
                }
            }
        }
    }

    let width = slots.iter().map(Vec::len).max().unwrap_or(0);
    let mut matrix = Vec::with_capacity(visible.len());
    for (r, (line, source)) in slots.into_iter().zip(visible).enumerate() {
        if line.len() < width {
            return Err(SheetGridError::Grid(format!(
                "row {r} covers {} of {width} columns",
                line.len()
            )));
        }
        let mut cells = Vec::with_capacity(width);
        for (c, slot) in line.into_iter().enumerate() {
            let Some(id) = slot else {
                return Err(SheetGridError::Grid(format!("gap at row {r}, column {c}")));
            };
            cells.push(id);
        }
        matrix.push(MatrixRow { source, cells });
    }
    Ok(LogicalMatrix::new(matrix))
}
