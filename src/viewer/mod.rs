//! `TableSession` - the per-table state machine behind a spreadsheet-like UI.
//!
//! The host layer captures pointer, keyboard and clipboard events and forwards
//! them as intents; the session owns everything those intents read or change:
//! - the table and its logical matrices
//! - anchor/focus selection and the highlighted cell set
//! - filter history, sort mark and the debounced selection sum
//!
//! Intents live in submodules by concern: `events` (pointer and keyboard),
//! `clipboard` (copy and paste) and `menu` (context menus, sort, filter).

mod clipboard;
mod events;
mod menu;

pub use clipboard::PasteAssignment;
pub use menu::ContextInfo;

use std::collections::BTreeSet;

use crate::config::SessionConfig;
use crate::error::Result;
use crate::grid::{build, GridSet};
use crate::range::{bounding_range, extract_range, shape_selection};
use crate::schedule::{Clock, MonotonicClock};
use crate::sum::{sum_texts, SumAggregator};
use crate::text::cell_text;
use crate::types::{CellId, CellRange, FilterState, SelectionState, SortState, SumState, Table};

pub struct TableSession {
    table: Table,
    grid: GridSet,
    selection: SelectionState,
    filter: FilterState,
    sort: Option<SortState>,
    sum: SumAggregator,
    config: SessionConfig,
    /// Target of the last context menu.
    clicked: Option<CellId>,
    clock: Box<dyn Clock>,
}

impl TableSession {
    /// # Errors
    /// Returns [`SheetGridError::Grid`](crate::error::SheetGridError::Grid) when the
    /// table's spans cannot be laid out.
    pub fn new(table: Table, config: SessionConfig) -> Result<Self> {
        Self::with_clock(table, config, MonotonicClock::new())
    }

    /// Like [`TableSession::new`] with an explicit time source for the sum debounce.
    ///
    /// # Errors
    /// See [`TableSession::new`].
    pub fn with_clock(
        table: Table,
        config: SessionConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        let grid = build(&table)?;
        Ok(Self {
            table,
            grid,
            selection: SelectionState::default(),
            filter: FilterState::default(),
            sort: None,
            sum: SumAggregator::new(config.sum_debounce()),
            config,
            clicked: None,
            clock: Box::new(clock),
        })
    }

    /// # Errors
    /// Returns markup errors from [`parse_table`](crate::html::parse_table) and
    /// layout errors from the grid build.
    pub fn from_html(xhtml: &str, config: SessionConfig) -> Result<Self> {
        Self::new(crate::html::parse_table(xhtml)?, config)
    }

    /// Rebuild the matrices after a structural change made through [`TableSession::table_mut`].
    ///
    /// Rows hidden at load time drop out of the matrices; filtered rows stay in and
    /// keep their filter state. The selection is reset.
    ///
    /// # Errors
    /// See [`TableSession::new`].
    pub fn rebuild(&mut self) -> Result<()> {
        self.grid = build(&self.table)?;
        self.clear_selection();
        self.clicked = None;
        Ok(())
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn grid(&self) -> &GridSet {
        &self.grid
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// No visible head rows: header-driven selection and the row count are off.
    pub fn is_headless(&self) -> bool {
        self.table.is_headless()
    }

    pub fn cell_text(&self, id: CellId) -> String {
        cell_text(&self.table, id)
    }

    /// Redraw the selection from the current anchor and focus.
    ///
    /// Header anchors may widen the focus into a row or column selection. Without
    /// `ctrl` the previous highlight is replaced, with it the new rectangle is added.
    pub fn select_rectangle(&mut self, ctrl: bool) {
        let Some(focus) = self.selection.focus.or(self.selection.anchor) else {
            return;
        };
        let anchor = self.selection.anchor.unwrap_or(focus);

        let (focus, shape) = shape_selection(
            &self.table,
            &self.grid,
            anchor,
            focus,
            self.config.shape_policy(),
        );
        self.selection.anchor = Some(anchor);
        self.selection.focus = Some(focus);
        self.selection.shape = shape;

        let Some(range) = bounding_range(&self.grid.all, anchor, focus) else {
            return;
        };
        if !ctrl {
            self.selection.selected.clear();
        }
        for row in extract_range(&self.grid.all, &range).rows() {
            if self.table.is_row_visible(row.source) {
                self.selection.selected.extend(row.cells.iter().copied());
            }
        }
        self.selection.ctrl_extend = ctrl;
        self.selection.copy_marquee = false;
        self.schedule_sum();
    }

    /// Drop the selection and the copy marquee.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.schedule_sum();
    }

    /// Bounding range of anchor and focus in the combined matrix.
    pub fn selection_range(&self) -> Option<CellRange> {
        let anchor = self.selection.anchor?;
        let focus = self.selection.focus.unwrap_or(anchor);
        bounding_range(&self.grid.all, anchor, focus)
    }

    /// Highlighted cells, in handle order.
    pub fn selected_cells(&self) -> Vec<CellId> {
        self.selection.selected.iter().copied().collect()
    }

    /// First and last column of the selection, for highlighting column headers.
    pub fn selected_columns(&self) -> Option<(usize, usize)> {
        self.selection_range().map(|r| (r.col1, r.col2))
    }

    /// Queue a sum over the visible highlighted cells.
    fn schedule_sum(&mut self) {
        let texts: Vec<String> = self
            .selection
            .selected
            .iter()
            .filter(|id| self.table.is_cell_visible(**id))
            .map(|id| cell_text(&self.table, *id))
            .collect();
        self.sum.schedule_recompute(self.clock.now(), texts);
    }

    /// Sum of the distinct visible cells inside `range`, computed right away.
    ///
    /// A spanning cell counts once however many positions of the range it covers.
    pub fn range_sum(&self, range: &CellRange) -> f64 {
        let cells: BTreeSet<CellId> = extract_range(&self.grid.all, range)
            .rows()
            .iter()
            .filter(|row| self.table.is_row_visible(row.source))
            .flat_map(|row| row.cells.iter().copied())
            .collect();
        sum_texts(cells.iter().map(|id| cell_text(&self.table, *id)))
    }

    /// Run a due sum computation. Returns the new state when one ran.
    pub fn tick(&mut self) -> Option<SumState> {
        self.sum.poll(self.clock.now())
    }

    pub fn sum_state(&self) -> SumState {
        self.sum.state()
    }

    /// Last computed sum, grouped for display.
    pub fn sum_text(&self) -> String {
        self.sum.text()
    }
}
