use serde::{Deserialize, Serialize};

use super::CellId;

/// Last computed selection sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SumState {
    pub value: f64,
    /// A recompute is scheduled but has not run yet.
    pub pending: bool,
}

/// Which header carries the sort mark, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub header: CellId,
    pub ascending: bool,
}

impl SortState {
    /// Arrow drawn in the header mark.
    pub fn mark(&self) -> &'static str {
        if self.ascending {
            "↓"
        } else {
            "↑"
        }
    }
}
