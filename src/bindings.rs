//! JavaScript surface of a table session.
//!
//! The page keeps the DOM; cells are addressed by their handle, which is the
//! document-order index of the `th`/`td` element in the loaded table.
//!
//! ```javascript
//! import init, { SheetGrid } from 'sheetgrid';
//! await init();
//! const grid = new SheetGrid(table.outerHTML);
//! grid.pointer_down(cellIndex, e.shiftKey, e.ctrlKey || e.metaKey);
//! navigator.clipboard.writeText(grid.copy());
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::SessionConfig;
use crate::types::{CellId, CellRange, Direction, FilterPredicate, Navigation};
use crate::viewer::TableSession;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectionView {
    range: Option<CellRange>,
    a1: Option<String>,
    cells: Vec<CellId>,
    copied: bool,
}

#[wasm_bindgen]
pub struct SheetGrid {
    session: TableSession,
}

#[wasm_bindgen]
impl SheetGrid {
    /// Load a table from XHTML markup, with optional JSON session options.
    #[wasm_bindgen(constructor)]
    pub fn new(xhtml: &str, config_json: Option<String>) -> Result<SheetGrid, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => SessionConfig::from_json(&json).map_err(js_err)?,
            None => SessionConfig::default(),
        };
        let session = TableSession::from_html(xhtml, config).map_err(js_err)?;
        Ok(SheetGrid { session })
    }

    pub fn pointer_down(&mut self, cell: usize, shift: bool, ctrl: bool) {
        self.session.pointer_down(CellId(cell), shift, ctrl);
    }

    pub fn pointer_over(&mut self, cell: usize, ctrl: bool) {
        self.session.pointer_over(CellId(cell), ctrl);
    }

    pub fn pointer_up(&mut self, cell: usize, ctrl: bool) {
        self.session.pointer_up(CellId(cell), ctrl);
    }

    pub fn click_outside(&mut self) {
        self.session.click_outside();
    }

    /// Handle a `KeyboardEvent.key`. Returns true when the default action should
    /// be cancelled.
    pub fn key(&mut self, key: &str, shift: bool, ctrl: bool) -> bool {
        self.session.key(key, shift, ctrl)
    }

    /// Arrow/Enter navigation. Returns true when the selection moved.
    pub fn key_navigate(&mut self, key: &str, shift: bool, jump: bool) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        matches!(
            self.session.key_navigate(direction, shift, jump),
            Navigation::Moved(_)
        )
    }

    pub fn copy(&mut self) -> Option<String> {
        self.session.copy()
    }

    pub fn copy_all(&self) -> String {
        self.session.copy_all()
    }

    /// Paste clipboard text over the selection. Returns the number of changed cells.
    pub fn paste(&mut self, text: &str) -> Result<usize, JsValue> {
        let plan = self.session.paste(text).map_err(js_err)?;
        Ok(self.session.apply_paste(&plan))
    }

    /// Planned paste as `[{row, col, cell, value}]`, without writing anything.
    pub fn plan_paste(&self, text: &str) -> Result<JsValue, JsValue> {
        let plan = self.session.paste(text).map_err(js_err)?;
        serde_wasm_bindgen::to_value(&plan).map_err(js_err)
    }

    pub fn context_header(&mut self, cell: usize) -> Result<JsValue, JsValue> {
        let info = self.session.context_header(CellId(cell));
        serde_wasm_bindgen::to_value(&info).map_err(js_err)
    }

    pub fn context_body(&mut self, cell: usize, ctrl: bool) -> Result<JsValue, JsValue> {
        let info = self.session.context_body(CellId(cell), ctrl);
        serde_wasm_bindgen::to_value(&info).map_err(js_err)
    }

    pub fn sort(&mut self, ascending: bool) -> bool {
        self.session.sort(ascending)
    }

    pub fn toggle_sort(&mut self, header: usize) -> bool {
        self.session.toggle_sort(CellId(header))
    }

    /// Sorted body row order, as indices of the loaded `tr` elements.
    pub fn body_order(&self) -> Vec<usize> {
        self.session
            .table()
            .section_rows(crate::types::Section::Body)
            .iter()
            .map(|r| r.index())
            .collect()
    }

    pub fn filter_equals(&mut self, text: &str) -> bool {
        self.session.filter(&FilterPredicate::Equals(text.to_string()))
    }

    pub fn filter_not_equals(&mut self, text: &str) -> bool {
        self.session.filter(&FilterPredicate::NotEquals(text.to_string()))
    }

    pub fn filter_contains(&mut self, text: &str) -> bool {
        self.session.filter(&FilterPredicate::Contains(text.to_string()))
    }

    pub fn clear_filter(&mut self) {
        self.session.clear_filter();
    }

    /// Visibility of every loaded row, in `tr` document order.
    pub fn row_visibility(&self) -> Vec<u8> {
        let table = self.session.table();
        (0..table.row_count())
            .map(|i| u8::from(table.is_row_visible(crate::types::RowId(i))))
            .collect()
    }

    pub fn visible_row_count(&self) -> usize {
        self.session.visible_row_count()
    }

    /// Poll the sum debounce; call from a timer. Returns true when the sum changed.
    pub fn tick(&mut self) -> bool {
        self.session.tick().is_some()
    }

    pub fn sum_text(&self) -> String {
        self.session.sum_text()
    }

    pub fn cell_text(&self, cell: usize) -> String {
        self.session.cell_text(CellId(cell))
    }

    /// Current selection as `{range, a1, cells, copied}`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        let range = self.session.selection_range();
        let view = SelectionView {
            range,
            a1: range.map(|r| r.to_a1()),
            cells: self.session.selected_cells(),
            copied: self.session.selection().copy_marquee,
        };
        serde_wasm_bindgen::to_value(&view).map_err(js_err)
    }
}
