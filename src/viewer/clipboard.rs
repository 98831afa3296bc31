//! Copy and paste for `TableSession`.
//!
//! Copy produces TSV text for the host to place on the system clipboard; paste
//! takes clipboard text and plans which value lands in which cell before anything
//! is written.

use serde::Serialize;

use super::TableSession;
use crate::error::Result;
use crate::grid::LogicalMatrix;
use crate::range::extract_range;
use crate::text::{cell_text, extract_all};
use crate::tsv::{decode, encode, tiled_value, trim_trailing_line};
use crate::types::{CellId, CellRange, Node};

/// One value of a planned paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteAssignment {
    /// Matrix row in the combined matrix.
    pub row: usize,
    /// Matrix column.
    pub col: usize,
    pub cell: CellId,
    pub value: String,
}

impl TableSession {
    /// TSV of the visible rows of `matrix`.
    fn visible_tsv(&self, matrix: &LogicalMatrix) -> String {
        let rows: Vec<Vec<String>> = matrix
            .rows()
            .iter()
            .filter(|row| self.table.is_row_visible(row.source))
            .map(|row| {
                row.cells
                    .iter()
                    .map(|id| cell_text(&self.table, *id))
                    .collect()
            })
            .collect();
        encode(&rows)
    }

    /// TSV of a range of the combined matrix. Hidden rows are skipped.
    pub fn range_tsv(&self, range: &CellRange) -> String {
        self.visible_tsv(&extract_range(&self.grid.all, range))
    }

    /// Copy the current selection and show the copy marquee.
    pub fn copy(&mut self) -> Option<String> {
        let range = self.selection_range()?;
        let tsv = self.range_tsv(&range);
        self.selection.copy_marquee = true;
        Some(tsv)
    }

    /// The whole table as TSV.
    pub fn copy_all(&self) -> String {
        self.visible_tsv(&self.grid.all)
    }

    /// Plan a paste of clipboard `text` over the current selection.
    ///
    /// The decoded block repeats across the selection, so one value fills every
    /// cell and a 2x2 block tiles a 4x4 range. Hidden rows are skipped, and a cell
    /// spanning several positions takes the value of its first one.
    ///
    /// # Errors
    /// Returns [`SheetGridError::Tsv`](crate::error::SheetGridError::Tsv) when the
    /// text has an unterminated quoted field.
    pub fn paste(&self, text: &str) -> Result<Vec<PasteAssignment>> {
        let Some(range) = self.selection_range() else {
            return Ok(Vec::new());
        };
        let mut block = decode(text).map_err(|e| {
            tracing::warn!(error = %e, "rejected paste");
            e
        })?;
        if self.config.trim_trailing_paste_line {
            trim_trailing_line(&mut block);
        }

        let mut assignments: Vec<PasteAssignment> = Vec::new();
        let visible_rows = extract_range(&self.grid.all, &range)
            .into_rows()
            .into_iter()
            .enumerate()
            .filter(|(_, row)| self.table.is_row_visible(row.source));
        for (r, (offset, row)) in visible_rows.enumerate() {
            for (c, cell) in row.cells.into_iter().enumerate() {
                if assignments.iter().any(|a| a.cell == cell) {
                    continue;
                }
                let Some(value) = tiled_value(&block, r, c) else {
                    continue;
                };
                assignments.push(PasteAssignment {
                    row: range.row1 + offset,
                    col: range.col1 + c,
                    cell,
                    value: value.to_string(),
                });
            }
        }
        tracing::debug!(
            rows = block.len(),
            cells = assignments.len(),
            range = %range.to_a1(),
            "planned paste"
        );
        Ok(assignments)
    }

    /// Write planned values into the cells.
    ///
    /// A content-editable cell gets its whole content replaced by the text;
    /// otherwise the first enabled input or drop-down inside the cell takes the
    /// value. Cells with neither are left alone. Returns the number of cells whose
    /// text changed.
    pub fn apply_paste(&mut self, assignments: &[PasteAssignment]) -> usize {
        let mut changed = 0;
        for a in assignments {
            let Some(cell) = self.table.cell_mut(a.cell) else {
                continue;
            };
            if cell.editable {
                if extract_all(&cell.content) != a.value {
                    cell.content = vec![Node::text(a.value.as_str())];
                    changed += 1;
                }
                continue;
            }
            let Some(target) = cell.content.iter_mut().find_map(Node::first_editable_mut) else {
                continue;
            };
            match target {
                Node::Input { value, .. } if *value != a.value => {
                    value.clone_from(&a.value);
                    changed += 1;
                }
                Node::Select { value, options, .. }
                    if *value != a.value && (options.is_empty() || options.contains(&a.value)) =>
                {
                    value.clone_from(&a.value);
                    changed += 1;
                }
                _ => {}
            }
        }
        if changed > 0 {
            self.schedule_sum();
        }
        changed
    }
}
