//! Structured error types for sheetgrid.
//!
//! Structural problems in the input table are fatal for a grid build; everything
//! else (navigation at an edge, non-numeric sort keys) is modelled as a value,
//! not an error.

/// Failures while decoding a TSV block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TsvError {
    /// A quoted field was opened but never closed.
    #[error("unterminated quoted field starting on row {row} at byte {offset}")]
    UnterminatedQuote { row: usize, offset: usize },
}

/// All errors that can occur in sheetgrid.
#[derive(Debug, thiserror::Error)]
pub enum SheetGridError {
    /// The span layout of the table cannot be expanded into a dense matrix.
    #[error("Malformed grid: {0}")]
    Grid(String),

    /// Clipboard text could not be decoded.
    #[error("TSV decode: {0}")]
    Tsv(#[from] TsvError),

    /// XML parsing error from quick-xml.
    #[error("XML parsing: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Table markup was well-formed XML but not a usable table.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid session configuration.
    #[error("Config: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetGridError>;

#[cfg(target_arch = "wasm32")]
impl From<SheetGridError> for wasm_bindgen::JsValue {
    fn from(e: SheetGridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
