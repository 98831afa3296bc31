//! Table loader for XHTML markup.
//!
//! Reads the first `<table>` of a document into a [`Table`]:
//!
//! ```xml
//! <table>
//!   <thead><tr><th>Name</th><th>Qty</th></tr></thead>
//!   <tbody>
//!     <tr><td rowspan="2">Apples</td><td>3</td></tr>
//!     <tr style="display:none"><td>5</td></tr>
//!   </tbody>
//! </table>
//! ```
//!
//! Rows outside any row group belong to the body, and every `<tbody>` feeds the
//! same body. Cell content becomes a [`Node`] tree; form controls keep their current
//! value, and elements classed `markbox` become [`Node::Marker`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, SheetGridError};
use crate::types::{CellKind, Node, RowId, Section, Table};
use crate::xml_helpers::{attr_string, attr_usize, has_attr, has_class, local_name_string};

/// Parse the first table in `xhtml`.
///
/// # Errors
/// Returns [`SheetGridError::Xml`] for malformed markup and [`SheetGridError::Parse`]
/// when there is no table, a cell sits outside a row, or the table never closes.
pub fn parse_table(xhtml: &str) -> Result<Table> {
    let mut reader = Reader::from_str(xhtml);
    reader.trim_text(false);

    let mut loader = Loader::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => loader.start(e, false)?,
            Event::Empty(ref e) => loader.start(e, true)?,
            Event::End(ref e) => {
                let name = std::str::from_utf8(e.local_name().as_ref())
                    .unwrap_or("")
                    .to_ascii_lowercase();
                loader.end(&name);
            }
            Event::Text(ref t) if loader.in_cell() => {
                let text = t.unescape_with(resolve_html_entity)?;
                loader.text(&text);
            }
            Event::CData(t) if loader.in_cell() => {
                loader.text(&String::from_utf8_lossy(&t.into_inner()));
            }
            Event::Eof => break,
            _ => {}
        }
        if loader.done {
            break;
        }
    }

    if !loader.seen_table {
        return Err(SheetGridError::Parse("no <table> element".to_string()));
    }
    if !loader.done {
        return Err(SheetGridError::Parse("unterminated <table>".to_string()));
    }
    tracing::debug!(cells = loader.table.cell_count(), "loaded table");
    Ok(loader.table)
}

/// Named entities that commonly appear in table markup but are not predefined XML.
fn resolve_html_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "nbsp" => Some("\u{a0}"),
        "copy" => Some("©"),
        "reg" => Some("®"),
        "yen" => Some("¥"),
        "euro" => Some("€"),
        "times" => Some("×"),
        "ndash" => Some("–"),
        "mdash" => Some("—"),
        "hellip" => Some("…"),
        "darr" => Some("↓"),
        "uarr" => Some("↑"),
        _ => None,
    }
}

#[derive(Default)]
struct Loader {
    table: Table,
    seen_table: bool,
    done: bool,
    section: Option<Section>,
    row: Option<RowId>,
    cell: Option<PendingCell>,
}

impl Loader {
    fn in_cell(&self) -> bool {
        self.cell.is_some()
    }

    fn start(&mut self, e: &BytesStart, empty: bool) -> Result<()> {
        let name = local_name_string(e);

        if let Some(cell) = &mut self.cell {
            cell.open(e, name);
            if empty {
                cell.close();
            }
            return Ok(());
        }

        if !self.seen_table {
            if name == "table" {
                self.seen_table = true;
                self.done = empty;
            }
            return Ok(());
        }

        match name.as_str() {
            "thead" | "tbody" | "tfoot" => {
                self.section = if empty { None } else { section_of(&name) };
            }
            "tr" => {
                let id = self.table.push_row(self.section.unwrap_or(Section::Body));
                if is_hidden(e) {
                    self.table.set_row_visible(id, false);
                }
                self.row = if empty { None } else { Some(id) };
            }
            "th" | "td" => {
                let Some(row) = self.row else {
                    return Err(SheetGridError::Parse(format!("<{name}> outside of a <tr>")));
                };
                let mut cell = PendingCell {
                    row,
                    kind: if name == "th" {
                        CellKind::Header
                    } else {
                        CellKind::Data
                    },
                    row_span: attr_usize(e, b"rowspan").unwrap_or(1),
                    col_span: attr_usize(e, b"colspan").unwrap_or(1),
                    editable: attr_string(e, b"contenteditable")
                        .is_some_and(|v| matches!(v.as_str(), "" | "true" | "plaintext-only")),
                    content: Vec::new(),
                    frames: Vec::new(),
                };
                if empty {
                    cell.finish(&mut self.table);
                } else {
                    self.cell = Some(cell);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end(&mut self, name: &str) {
        if self.cell.is_some() {
            let closes_cell = matches!(name, "th" | "td")
                && self.cell.as_ref().is_some_and(|c| c.frames.is_empty());
            if closes_cell {
                if let Some(cell) = self.cell.take() {
                    cell.finish(&mut self.table);
                }
            } else if let Some(cell) = &mut self.cell {
                cell.close();
            }
            return;
        }
        if !self.seen_table {
            return;
        }
        match name {
            "thead" | "tbody" | "tfoot" => self.section = None,
            "tr" => self.row = None,
            "table" => self.done = true,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(cell) = &mut self.cell {
            cell.text(text);
        }
    }
}

fn section_of(name: &str) -> Option<Section> {
    match name {
        "thead" => Some(Section::Head),
        "tbody" => Some(Section::Body),
        "tfoot" => Some(Section::Foot),
        _ => None,
    }
}

/// `hidden` attribute or an inline `display: none`.
fn is_hidden(e: &BytesStart) -> bool {
    if has_attr(e, b"hidden") {
        return true;
    }
    attr_string(e, b"style").is_some_and(|style| {
        let compact: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        compact.contains("display:none")
    })
}

struct PendingCell {
    row: RowId,
    kind: CellKind,
    row_span: usize,
    col_span: usize,
    editable: bool,
    content: Vec<Node>,
    frames: Vec<Frame>,
}

/// An element whose end tag has not been seen yet.
struct Frame {
    tag: String,
    kind: FrameKind,
    children: Vec<Node>,
    text: String,
    options: Vec<(String, bool)>,
}

enum FrameKind {
    Marker,
    /// Node fixed at the start tag (`input`, `img`, `br`); children are ignored.
    Leaf(Node),
    Textarea { enabled: bool },
    Select { enabled: bool },
    SelectOption { value: Option<String>, selected: bool },
    Element,
}

impl PendingCell {
    fn open(&mut self, e: &BytesStart, tag: String) {
        let kind = if has_class(e, "markbox") {
            FrameKind::Marker
        } else {
            match tag.as_str() {
                "br" => FrameKind::Leaf(Node::LineBreak),
                "img" => FrameKind::Leaf(Node::image(attr_string(e, b"alt").unwrap_or_default())),
                "input" => FrameKind::Leaf(input_node(e)),
                "textarea" => FrameKind::Textarea {
                    enabled: !has_attr(e, b"disabled") && !has_attr(e, b"readonly"),
                },
                "select" => FrameKind::Select {
                    enabled: !has_attr(e, b"disabled"),
                },
                "option" => FrameKind::SelectOption {
                    value: attr_string(e, b"value"),
                    selected: has_attr(e, b"selected"),
                },
                _ => FrameKind::Element,
            }
        };
        self.frames.push(Frame {
            tag,
            kind,
            children: Vec::new(),
            text: String::new(),
            options: Vec::new(),
        });
    }

    fn close(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let node = match frame.kind {
            FrameKind::Marker => Node::Marker,
            FrameKind::Leaf(node) => node,
            FrameKind::Textarea { enabled } => Node::Input {
                value: frame.text,
                enabled,
            },
            FrameKind::Select { enabled } => {
                let value = frame
                    .options
                    .iter()
                    .find(|(_, selected)| *selected)
                    .or_else(|| frame.options.first())
                    .map(|(v, _)| v.clone())
                    .unwrap_or_default();
                Node::Select {
                    value,
                    options: frame.options.into_iter().map(|(v, _)| v).collect(),
                    enabled,
                }
            }
            FrameKind::SelectOption { value, selected } => {
                let value = value.unwrap_or_else(|| frame.text.trim().to_string());
                // Options may sit inside an <optgroup>.
                let select = self
                    .frames
                    .iter_mut()
                    .rev()
                    .find(|f| matches!(f.kind, FrameKind::Select { .. }));
                if let Some(select) = select {
                    select.options.push((value, selected));
                }
                return;
            }
            FrameKind::Element => Node::element(frame.tag, frame.children),
        };
        self.attach(node);
    }

    fn attach(&mut self, node: Node) {
        match self.frames.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.content.push(node),
        }
    }

    fn text(&mut self, text: &str) {
        match self.frames.last_mut() {
            Some(frame) => match frame.kind {
                FrameKind::Textarea { .. } | FrameKind::SelectOption { .. } => {
                    frame.text.push_str(text);
                }
                FrameKind::Element => frame.children.push(Node::text(text)),
                FrameKind::Marker | FrameKind::Leaf(_) | FrameKind::Select { .. } => {}
            },
            None => self.content.push(Node::text(text)),
        }
    }

    fn finish(mut self, table: &mut Table) {
        // Unclosed inner elements are folded into their parents.
        while !self.frames.is_empty() {
            self.close();
        }
        let id = table.push_cell(self.row, self.kind, self.row_span, self.col_span, self.content);
        if let Some(cell) = table.cell_mut(id) {
            cell.editable = self.editable;
        }
    }
}

fn input_node(e: &BytesStart) -> Node {
    let kind = attr_string(e, b"type")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if matches!(kind.as_str(), "checkbox" | "radio") {
        Node::toggle(
            attr_string(e, b"value").unwrap_or_else(|| "on".to_string()),
            has_attr(e, b"checked"),
        )
    } else {
        Node::Input {
            value: attr_string(e, b"value").unwrap_or_default(),
            enabled: !has_attr(e, b"disabled") && !has_attr(e, b"readonly"),
        }
    }
}
