//! Session options.
//!
//! Every field has a default, so `{}` is a complete configuration:
//!
//! ```json
//! { "sumDebounceMs": 250, "rowSelect": false }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::range::ShapePolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    /// Quiet period before the selection sum is recomputed.
    pub sum_debounce_ms: u64,
    /// Dragging from a column header selects whole columns.
    pub column_select: bool,
    /// Dragging from a row's leading header cell selects whole rows.
    pub row_select: bool,
    /// Ignore the empty last line of clipboard text ending in a line break.
    pub trim_trailing_paste_line: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sum_debounce_ms: 500,
            column_select: true,
            row_select: true,
            trim_trailing_paste_line: true,
        }
    }
}

impl SessionConfig {
    /// # Errors
    /// Returns [`SheetGridError::Config`](crate::error::SheetGridError::Config) for
    /// malformed JSON or a field of the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sum_debounce(&self) -> Duration {
        Duration::from_millis(self.sum_debounce_ms)
    }

    pub fn shape_policy(&self) -> ShapePolicy {
        ShapePolicy {
            column_select: self.column_select,
            row_select: self.row_select,
        }
    }
}
