//! Context menus, sorting and filtering for `TableSession`.
//!
//! Sort and filter act on the cell the last context menu was opened on; the
//! column footprint of that cell decides which columns are read.

use serde::Serialize;

use super::TableSession;
use crate::auto_filter::{apply_filter, apply_visibility, clear_filter, visible_rows};
use crate::range::bounding_range;
use crate::sort::{apply_order, sort_body};
use crate::text::cell_text;
use crate::types::{
    CellId, CellKind, FilterEntry, FilterPredicate, FilterState, Section, SortState,
};

/// What a context menu shows when it opens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    /// Text of the clicked cell, offered as the equals / not-equals filter value.
    pub text: String,
    /// Filters applied so far, newest last.
    pub history: Vec<FilterEntry>,
    /// Last computed selection sum.
    pub sum: String,
    /// Whether the filter items are offered. Headless tables have none.
    pub filterable: bool,
}

impl TableSession {
    fn context_info(&self, cell: CellId) -> ContextInfo {
        ContextInfo {
            text: cell_text(&self.table, cell),
            history: self.filter.history.clone(),
            sum: self.sum_text(),
            filterable: !self.is_headless(),
        }
    }

    fn is_column_header(&self, cell: CellId) -> bool {
        self.table.section_of(cell) == Some(Section::Head)
            && self.table.cell(cell).is_some_and(|c| c.kind == CellKind::Header)
    }

    /// Context menu on a head cell. Selects its column; returns `None` (and forgets
    /// the clicked cell) when `cell` is not a header.
    pub fn context_header(&mut self, cell: CellId) -> Option<ContextInfo> {
        if !self.is_column_header(cell) {
            self.clicked = None;
            return None;
        }
        self.clicked = Some(cell);
        self.selection.anchor = Some(cell);
        self.selection.focus = Some(cell);
        self.select_rectangle(false);
        Some(self.context_info(cell))
    }

    /// Context menu on a body or foot cell.
    ///
    /// A cell that is already highlighted keeps the current selection; otherwise it
    /// becomes the new selection, added to the old one with `ctrl`.
    pub fn context_body(&mut self, cell: CellId, ctrl: bool) -> Option<ContextInfo> {
        if !matches!(self.table.section_of(cell), Some(Section::Body | Section::Foot)) {
            self.clicked = None;
            return None;
        }
        self.clicked = Some(cell);
        if !self.selection.selected.contains(&cell) {
            self.selection.anchor = Some(cell);
            self.selection.focus = Some(cell);
            if !ctrl {
                self.selection.selected.clear();
            }
        }
        self.select_rectangle(true);
        Some(self.context_info(cell))
    }

    pub fn clicked_cell(&self) -> Option<CellId> {
        self.clicked
    }

    /// Sort the body by the clicked cell's columns. Returns false without a target.
    pub fn sort(&mut self, ascending: bool) -> bool {
        let Some(clicked) = self.clicked else {
            return false;
        };
        let Some(range) = bounding_range(&self.grid.all, clicked, clicked) else {
            return false;
        };

        let sorted = sort_body(&self.table, &self.grid.body, range.col1, range.width(), ascending);
        apply_order(&mut self.table, &sorted);
        self.grid.replace_body(sorted);

        if self.is_column_header(clicked) {
            self.sort = Some(SortState {
                header: clicked,
                ascending,
            });
        }
        self.selection.copy_marquee = false;
        true
    }

    /// Double-click on a column header: ascending, unless that header is already
    /// sorted ascending.
    pub fn toggle_sort(&mut self, header: CellId) -> bool {
        if !self.is_column_header(header) {
            return false;
        }
        let ascending = !self.sort.is_some_and(|s| s.header == header && s.ascending);
        self.clicked = Some(header);
        self.sort(ascending)
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    /// Filter body rows on the clicked cell's column.
    ///
    /// Returns false for headless tables, when there is no target, or when the
    /// predicate is an empty search.
    pub fn filter(&mut self, predicate: &FilterPredicate) -> bool {
        if predicate.is_noop() || self.is_headless() {
            return false;
        }
        let Some(clicked) = self.clicked else {
            return false;
        };
        let Some(range) = bounding_range(&self.grid.all, clicked, clicked) else {
            return false;
        };

        let flags = apply_filter(&self.table, &self.grid.body, range.col1, predicate);
        apply_visibility(&mut self.table, &self.grid.body, &flags);
        self.filter.record(range.col1, predicate.label(), predicate.is_negated());
        self.clear_selection();
        true
    }

    /// Show every filtered body row and forget the filter history.
    pub fn clear_filter(&mut self) {
        clear_filter(&mut self.table);
        self.filter.clear();
        self.clear_selection();
    }

    /// Visible body rows, as shown in the row counter.
    pub fn visible_row_count(&self) -> usize {
        visible_rows(&self.table, &self.grid.body)
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }
}
