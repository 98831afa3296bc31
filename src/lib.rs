//! sheetgrid - spreadsheet-style behaviour for HTML tables
//!
//! Turns a table of rows and span-annotated cells into a dense logical grid and
//! runs spreadsheet operations over it:
//! - rectangular selection across merged cells, with row and column selection
//!   from header cells
//! - arrow-key navigation that steps over spans
//! - TSV copy and tiled paste
//! - stable numeric-aware sorting and column filters
//! - a debounced sum of the selected numbers
//!
//! # Usage (Rust)
//!
//! ```
//! use sheetgrid::config::SessionConfig;
//! use sheetgrid::viewer::TableSession;
//!
//! let xhtml = "<table><tr><td>1</td><td>2</td></tr></table>";
//! let mut session = TableSession::from_html(xhtml, SessionConfig::default())?;
//! let last = session.grid().all.get(0, 1).ok_or("empty grid")?;
//! let first = session.grid().all.get(0, 0).ok_or("empty grid")?;
//! session.pointer_down(first, false, false);
//! session.pointer_up(last, false);
//! assert_eq!(session.copy().as_deref(), Some("1\t2"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { SheetGrid, tsv_decode_json } from 'sheetgrid';
//! await init();
//! const grid = new SheetGrid(table.outerHTML);
//! ```

// Model and algorithms
pub mod auto_filter;
pub mod cell_ref;
pub mod config;
pub mod error;
pub mod grid;
pub mod html;
pub mod numfmt;
pub mod range;
pub mod schedule;
pub mod sort;
pub mod sum;
pub mod text;
pub mod tsv;
pub mod types;
pub mod xml_helpers;

// Session and host bindings
pub mod bindings;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use bindings::SheetGrid;
pub use viewer::TableSession;

pub use types::*;

/// Encode a JSON array of string arrays as TSV text
///
/// # Errors
/// Returns an error if `rows_json` is not an array of string arrays.
#[wasm_bindgen]
pub fn tsv_encode_json(rows_json: &str) -> Result<String, JsValue> {
    let rows: Vec<Vec<String>> =
        serde_json::from_str(rows_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(tsv::encode(&rows))
}

/// Decode TSV text and return the rows as a JSON string
///
/// # Errors
/// Returns an error if the text has an unterminated quoted field.
#[wasm_bindgen]
pub fn tsv_decode_json(text: &str) -> Result<String, JsValue> {
    let rows = tsv::decode(text).map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&rows)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Format a number with thousands separators, as shown for selection sums
#[must_use]
#[wasm_bindgen]
pub fn format_sum(value: f64) -> String {
    sum::format_sum(value)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
