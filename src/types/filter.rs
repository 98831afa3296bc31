use serde::{Deserialize, Serialize};

/// A filter applied to one body column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operator", content = "val", rename_all = "camelCase")]
pub enum FilterPredicate {
    /// Substring search (the header search box).
    Contains(String),
    /// Keep rows whose text equals the value.
    Equals(String),
    /// Keep rows whose text differs from the value.
    NotEquals(String),
}

impl FilterPredicate {
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Contains(needle) => text.contains(needle.as_str()),
            Self::Equals(val) => text == val,
            Self::NotEquals(val) => text != val,
        }
    }

    /// Literal text shown in the filter history.
    pub fn label(&self) -> &str {
        match self {
            Self::Contains(s) | Self::Equals(s) | Self::NotEquals(s) => s,
        }
    }

    pub fn is_negated(&self) -> bool {
        matches!(self, Self::NotEquals(_))
    }

    /// An empty search box filters nothing.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Contains(s) if s.is_empty())
    }
}

/// One entry of the filter history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEntry {
    pub label: String,
    /// Shown struck through ("not equals").
    pub negated: bool,
}

/// Applied filters, newest last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_column: Option<usize>,
    pub history: Vec<FilterEntry>,
}

impl FilterState {
    pub fn record(&mut self, column: usize, label: impl Into<String>, negated: bool) {
        self.active_column = Some(column);
        self.history.push(FilterEntry {
            label: label.into(),
            negated,
        });
    }

    pub fn clear(&mut self) {
        self.active_column = None;
        self.history.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.history.is_empty()
    }
}
