//! Pointer and keyboard intents for `TableSession`.

use super::TableSession;
use crate::range::navigate;
use crate::types::{CellId, Direction, Navigation};

impl TableSession {
    /// Primary button pressed on a cell. With `shift` the anchor is kept and only
    /// the focus moves.
    pub fn pointer_down(&mut self, cell: CellId, shift: bool, ctrl: bool) {
        if !shift || self.selection.anchor.is_none() {
            self.selection.anchor = Some(cell);
        }
        self.selection.focus = Some(cell);
        self.selection.dragging = true;
        self.select_rectangle(ctrl);
    }

    /// Pointer entered a cell. Only stretches the rectangle while dragging.
    pub fn pointer_over(&mut self, cell: CellId, ctrl: bool) {
        if !self.selection.dragging {
            return;
        }
        self.selection.focus = Some(cell);
        self.select_rectangle(ctrl);
    }

    /// Primary button released on a cell.
    pub fn pointer_up(&mut self, cell: CellId, ctrl: bool) {
        if self.selection.anchor.is_none() {
            return;
        }
        self.selection.focus = Some(cell);
        self.selection.dragging = false;
        self.select_rectangle(ctrl);
    }

    /// Click anywhere outside the table.
    pub fn click_outside(&mut self) {
        self.clicked = None;
        self.clear_selection();
    }

    /// Arrow or Enter key. Moves the focus with `shift`, otherwise the whole
    /// selection collapses onto the new cell. `jump` goes to the matrix edge.
    ///
    /// A blocked step leaves the selection untouched.
    pub fn key_navigate(&mut self, direction: Direction, shift: bool, jump: bool) -> Navigation {
        let current = if shift {
            self.selection.focus.or(self.selection.anchor)
        } else {
            self.selection.anchor
        };
        let Some(current) = current else {
            return Navigation::Blocked;
        };

        let nav = navigate(&self.grid.all, current, direction, jump);
        if let Navigation::Moved(cell) = nav {
            if !shift {
                self.selection.anchor = Some(cell);
            }
            self.selection.focus = Some(cell);
            self.select_rectangle(false);
        }
        nav
    }

    /// Escape hides the copy marquee. The clipboard itself is left alone.
    pub fn escape(&mut self) {
        if self.selection.is_active() {
            self.selection.copy_marquee = false;
        }
    }

    /// Dispatch a DOM key name. Returns whether the key was consumed.
    pub fn key(&mut self, key: &str, shift: bool, ctrl: bool) -> bool {
        if !self.selection.is_active() {
            return false;
        }
        if key == "Escape" {
            self.escape();
            return true;
        }
        match Direction::from_key(key) {
            Some(direction) => {
                self.key_navigate(direction, shift, ctrl);
                true
            }
            None => false,
        }
    }
}
