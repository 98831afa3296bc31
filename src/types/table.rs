use serde::{Deserialize, Serialize};

use super::{Cell, CellId, CellKind, Node, Row, RowId, Section};

/// Arena-backed table: head, body and foot row groups over shared cell storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    cells: Vec<Cell>,
    rows: Vec<Row>,
    head: Vec<RowId>,
    body: Vec<RowId>,
    foot: Vec<RowId>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty, visible row to a section.
    pub fn push_row(&mut self, section: Section) -> RowId {
        let id = RowId(self.rows.len());
        self.rows.push(Row {
            section,
            cells: Vec::new(),
            visible: true,
            filtered: false,
        });
        self.section_rows_mut(section).push(id);
        id
    }

    /// Append a cell to the end of `row`.
    ///
    /// Spans are stored as given; zero spans are rejected later by the grid build.
    pub fn push_cell(
        &mut self,
        row: RowId,
        kind: CellKind,
        row_span: usize,
        col_span: usize,
        content: Vec<Node>,
    ) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(Cell {
            kind,
            row,
            row_span,
            col_span,
            content,
            editable: false,
        });
        if let Some(r) = self.rows.get_mut(row.index()) {
            r.cells.push(id);
        }
        id
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.index())
    }

    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id.index())
    }

    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
        self.rows.get_mut(id.index())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows of a section in display order.
    pub fn section_rows(&self, section: Section) -> &[RowId] {
        match section {
            Section::Head => &self.head,
            Section::Body => &self.body,
            Section::Foot => &self.foot,
        }
    }

    fn section_rows_mut(&mut self, section: Section) -> &mut Vec<RowId> {
        match section {
            Section::Head => &mut self.head,
            Section::Body => &mut self.body,
            Section::Foot => &mut self.foot,
        }
    }

    /// Replace the display order of the body rows.
    ///
    /// Rows missing from `order` keep their relative order after the given ones;
    /// unknown or duplicate ids are ignored.
    pub fn reorder_body(&mut self, order: &[RowId]) {
        let mut next: Vec<RowId> = Vec::with_capacity(self.body.len());
        for id in order {
            if self.body.contains(id) && !next.contains(id) {
                next.push(*id);
            }
        }
        for id in &self.body {
            if !next.contains(id) {
                next.push(*id);
            }
        }
        self.body = next;
    }

    /// Shown on screen: present at load time and not filtered out.
    pub fn is_row_visible(&self, id: RowId) -> bool {
        self.row(id).is_some_and(|r| r.visible && !r.filtered)
    }

    /// Present at load time. Only these rows are laid out into matrices.
    pub fn is_row_laid_out(&self, id: RowId) -> bool {
        self.row(id).is_some_and(|r| r.visible)
    }

    pub fn set_row_visible(&mut self, id: RowId, visible: bool) {
        if let Some(r) = self.row_mut(id) {
            r.visible = visible;
        }
    }

    pub fn set_row_filtered(&mut self, id: RowId, filtered: bool) {
        if let Some(r) = self.row_mut(id) {
            r.filtered = filtered;
        }
    }

    /// Reset the filter flag of every body row. Returns how many rows it showed again.
    pub fn clear_filtered(&mut self) -> usize {
        let mut shown = 0;
        for id in &self.body {
            if let Some(r) = self.rows.get_mut(id.index()) {
                if r.filtered {
                    r.filtered = false;
                    shown += 1;
                }
            }
        }
        shown
    }

    /// A cell is visible when its owning row is.
    pub fn is_cell_visible(&self, id: CellId) -> bool {
        self.cell(id).is_some_and(|c| self.is_row_visible(c.row))
    }

    pub fn section_of(&self, id: CellId) -> Option<Section> {
        let cell = self.cell(id)?;
        self.row(cell.row).map(|r| r.section)
    }

    /// Whether `id` is the first cell of its row in document order.
    pub fn is_leading_cell(&self, id: CellId) -> bool {
        self.cell(id)
            .and_then(|c| self.row(c.row))
            .is_some_and(|r| r.cells.first() == Some(&id))
    }

    /// A table without visible head rows has no header-driven behaviour.
    pub fn is_headless(&self) -> bool {
        !self.head.iter().any(|id| self.is_row_visible(*id))
    }
}
