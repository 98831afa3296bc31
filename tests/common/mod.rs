//! Common test utilities and assertion helpers.
//!
//! Sessions built here run on a [`ManualClock`], so sum debouncing is driven by
//! the test rather than by wall time.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::time::Duration;

use sheetgrid::config::SessionConfig;
use sheetgrid::grid::LogicalMatrix;
use sheetgrid::schedule::ManualClock;
use sheetgrid::types::{CellId, Section, Table};
use sheetgrid::viewer::TableSession;

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Session Helpers
// ============================================================================

/// Session with default options and a hand-driven clock.
pub fn session(table: Table) -> (TableSession, ManualClock) {
    session_with(table, SessionConfig::default())
}

pub fn session_with(table: Table, config: SessionConfig) -> (TableSession, ManualClock) {
    let clock = ManualClock::new();
    let s = TableSession::with_clock(table, config, clock.clone()).expect("table should lay out");
    (s, clock)
}

/// Handle at a position of the combined matrix.
pub fn at(s: &TableSession, row: usize, col: usize) -> CellId {
    s.grid()
        .all
        .get(row, col)
        .unwrap_or_else(|| panic!("no cell at ({row}, {col})"))
}

/// Press on one position and release on another.
pub fn drag(s: &mut TableSession, from: (usize, usize), to: (usize, usize)) {
    let a = at(s, from.0, from.1);
    let b = at(s, to.0, to.1);
    s.pointer_down(a, false, false);
    s.pointer_over(b, false);
    s.pointer_up(b, false);
}

/// Let the sum debounce elapse and run it.
pub fn settle(s: &mut TableSession, clock: &ManualClock) {
    clock.advance(s.config().sum_debounce() + Duration::from_millis(1));
    s.tick();
}

// ============================================================================
// Text Helpers
// ============================================================================

pub fn matrix_texts(s: &TableSession, matrix: &LogicalMatrix) -> Vec<Vec<String>> {
    matrix
        .rows()
        .iter()
        .map(|row| row.cells.iter().map(|id| s.cell_text(*id)).collect())
        .collect()
}

/// Text of one column over the visible body rows, in display order.
pub fn visible_column(s: &TableSession, col: usize) -> Vec<String> {
    s.grid()
        .body
        .rows()
        .iter()
        .filter(|row| s.table().is_row_visible(row.source))
        .map(|row| s.cell_text(row.cells[col]))
        .collect()
}

/// Texts of the selected cells, in handle order.
pub fn selected_texts(s: &TableSession) -> Vec<String> {
    s.selected_cells().iter().map(|id| s.cell_text(*id)).collect()
}

/// Body row handles in table order.
pub fn body_order(table: &Table) -> Vec<usize> {
    table
        .section_rows(Section::Body)
        .iter()
        .map(|r| r.index())
        .collect()
}
