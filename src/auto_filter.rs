//! Column filtering of body rows.
//!
//! A filter reads the text at one column of every body matrix row and decides the
//! row's visibility from scratch; earlier filters do not narrow the candidates.
//! Filtered rows keep their place in the matrix, and their flag is separate from
//! load-time visibility, so [`clear_filter`] can show them again after a rebuild.

use crate::grid::LogicalMatrix;
use crate::text::cell_text;
use crate::types::{FilterPredicate, Table};

/// Visibility of each body matrix row under `predicate` applied to `column`.
///
/// Rows too short to reach `column` are hidden.
pub fn apply_filter(
    table: &Table,
    body: &LogicalMatrix,
    column: usize,
    predicate: &FilterPredicate,
) -> Vec<bool> {
    body.rows()
        .iter()
        .map(|row| {
            row.cells
                .get(column)
                .is_some_and(|id| predicate.matches(&cell_text(table, *id)))
        })
        .collect()
}

/// Write visibility flags onto the source rows of the body matrix as filter state.
///
/// Returns the number of rows left visible.
pub fn apply_visibility(table: &mut Table, body: &LogicalMatrix, visible: &[bool]) -> usize {
    let mut shown = 0;
    for (row, &flag) in body.rows().iter().zip(visible) {
        table.set_row_filtered(row.source, !flag);
        if flag {
            shown += 1;
        }
    }
    tracing::debug!(rows = body.height(), shown, "applied filter");
    shown
}

/// Show every filtered body row again. Rows hidden at load time stay hidden.
pub fn clear_filter(table: &mut Table) -> usize {
    let shown = table.clear_filtered();
    tracing::debug!(shown, "cleared filter");
    shown
}

/// Number of body matrix rows whose source row is visible.
pub fn visible_rows(table: &Table, body: &LogicalMatrix) -> usize {
    body.rows()
        .iter()
        .filter(|r| table.is_row_visible(r.source))
        .count()
}
