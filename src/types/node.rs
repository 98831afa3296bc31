use serde::{Deserialize, Serialize};

/// A content node inside a table cell.
///
/// The set of kinds is closed: every node the loader understands maps onto one of
/// these, and text extraction is a single `match` over them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    /// Raw character data.
    Text { text: String },
    /// A hard line break (`<br>`).
    LineBreak,
    /// A purely visual indicator (sort arrow, menu button). Never contributes text.
    Marker,
    /// An image; its alt text stands in for its content.
    Image { alt: String },
    /// Checkbox or radio input. Contributes its value only while checked.
    Toggle { value: String, checked: bool },
    /// Text input or textarea.
    Input {
        value: String,
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
    /// Drop-down list. Only the current value counts; options are not descended.
    Select {
        value: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
        #[serde(default = "default_enabled")]
        enabled: bool,
    },
    /// Any other element; its text is the text of its children.
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
    },
}

fn default_enabled() -> bool {
    true
}

impl Node {
    /// Text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Generic element with children.
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Element {
            tag: tag.into(),
            children,
        }
    }

    /// Enabled text input.
    pub fn input(value: impl Into<String>) -> Self {
        Self::Input {
            value: value.into(),
            enabled: true,
        }
    }

    /// Image with alt text.
    pub fn image(alt: impl Into<String>) -> Self {
        Self::Image { alt: alt.into() }
    }

    /// Checkbox/radio.
    pub fn toggle(value: impl Into<String>, checked: bool) -> Self {
        Self::Toggle {
            value: value.into(),
            checked,
        }
    }

    /// Whether pasted text can be written into this node.
    pub fn is_editable_target(&self) -> bool {
        matches!(
            self,
            Self::Input { enabled: true, .. } | Self::Select { enabled: true, .. }
        )
    }

    /// Depth-first search for the first node that accepts pasted text.
    pub fn first_editable_mut(&mut self) -> Option<&mut Node> {
        if self.is_editable_target() {
            return Some(self);
        }
        match self {
            Self::Element { children, .. } => {
                children.iter_mut().find_map(Node::first_editable_mut)
            }
            _ => None,
        }
    }
}
