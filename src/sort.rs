//! Body row sorting.
//!
//! Only the body matrix is reordered; head and foot rows stay in place. The sort is
//! stable, so rows with equal keys keep their current relative order and a sort by
//! a second column refines the first.

use std::cmp::Ordering;

use crate::grid::{LogicalMatrix, MatrixRow};
use crate::numfmt::{is_numeric, strip_grouping};
use crate::text::cell_text;
use crate::types::{RowId, Table};

/// Compare two sort keys.
///
/// When both keys are non-empty numbers once `,` separators are removed they are
/// compared numerically (`"2" < "12"`, `"-12,229" < "-3"`). Otherwise the original
/// keys are compared as strings.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let a2 = strip_grouping(a);
    let b2 = strip_grouping(b);
    if is_numeric(&a2) && is_numeric(&b2) {
        if let (Ok(x), Ok(y)) = (a2.parse::<f64>(), b2.parse::<f64>()) {
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }
    a.cmp(b)
}

/// Key of a matrix row: the text of every position in the column range, joined.
///
/// A cell spanning several columns of the range contributes once per position.
pub fn row_key(table: &Table, row: &MatrixRow, column_start: usize, column_span: usize) -> String {
    row.cells
        .iter()
        .skip(column_start)
        .take(column_span.max(1))
        .map(|id| cell_text(table, *id))
        .collect()
}

/// Stable sort of the body matrix by the columns `column_start..column_start + column_span`.
pub fn sort_body(
    table: &Table,
    body: &LogicalMatrix,
    column_start: usize,
    column_span: usize,
    ascending: bool,
) -> LogicalMatrix {
    let mut keyed: Vec<(String, MatrixRow)> = body
        .rows()
        .iter()
        .map(|row| (row_key(table, row, column_start, column_span), row.clone()))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = compare_keys(a, b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    tracing::debug!(
        rows = keyed.len(),
        column_start,
        column_span,
        ascending,
        "sorted body"
    );
    LogicalMatrix::new(keyed.into_iter().map(|(_, row)| row).collect())
}

/// Make the table's body row order follow a sorted matrix.
///
/// Rows that were hidden when the matrix was built are kept after the sorted ones.
pub fn apply_order(table: &mut Table, sorted: &LogicalMatrix) {
    let order: Vec<RowId> = sorted.rows().iter().map(|r| r.source).collect();
    table.reorder_body(&order);
}
