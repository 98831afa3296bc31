//! Test fixtures for building tables in memory.
//!
//! `TableBuilder` assembles a [`Table`] directly; `HtmlBuilder` writes the same
//! kind of table as XHTML markup for the loader.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{cell, TableBuilder};
//!
//! let table = TableBuilder::new()
//!     .head(&["Name", "Qty"])
//!     .body(&["apple", "3"])
//!     .row(Section::Body, vec![cell("pear").rowspan(2), cell("5")])
//!     .body(&["7"])
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use sheetgrid::types::{CellKind, Node, Section, Table};

// ============================================================================
// Cell Builder
// ============================================================================

/// Description of one cell for [`TableBuilder`].
#[derive(Debug, Clone)]
pub struct CellSpec {
    pub kind: CellKind,
    pub content: Vec<Node>,
    pub row_span: usize,
    pub col_span: usize,
    pub editable: bool,
}

/// Data cell with plain text.
pub fn cell(text: &str) -> CellSpec {
    CellSpec {
        kind: CellKind::Data,
        content: vec![Node::text(text)],
        row_span: 1,
        col_span: 1,
        editable: false,
    }
}

/// Header cell with plain text.
pub fn header(text: &str) -> CellSpec {
    CellSpec {
        kind: CellKind::Header,
        ..cell(text)
    }
}

impl CellSpec {
    pub fn rowspan(mut self, n: usize) -> Self {
        self.row_span = n;
        self
    }

    pub fn colspan(mut self, n: usize) -> Self {
        self.col_span = n;
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn content(mut self, nodes: Vec<Node>) -> Self {
        self.content = nodes;
        self
    }
}

// ============================================================================
// Table Builder
// ============================================================================

#[derive(Debug, Clone)]
struct RowSpec {
    section: Section,
    cells: Vec<CellSpec>,
    visible: bool,
}

/// Builder for [`Table`]s. Cell handles are assigned in the order cells are added,
/// row by row.
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    rows: Vec<RowSpec>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head row of header cells.
    pub fn head(self, texts: &[&str]) -> Self {
        let cells = texts.iter().map(|t| header(t)).collect();
        self.row(Section::Head, cells)
    }

    /// Body row of data cells.
    pub fn body(self, texts: &[&str]) -> Self {
        let cells = texts.iter().map(|t| cell(t)).collect();
        self.row(Section::Body, cells)
    }

    /// Body row led by a header cell, as used for row selection.
    pub fn body_with_row_header(self, label: &str, texts: &[&str]) -> Self {
        let mut cells = vec![header(label)];
        cells.extend(texts.iter().map(|t| cell(t)));
        self.row(Section::Body, cells)
    }

    /// Foot row of data cells.
    pub fn foot(self, texts: &[&str]) -> Self {
        let cells = texts.iter().map(|t| cell(t)).collect();
        self.row(Section::Foot, cells)
    }

    pub fn row(mut self, section: Section, cells: Vec<CellSpec>) -> Self {
        self.rows.push(RowSpec {
            section,
            cells,
            visible: true,
        });
        self
    }

    /// Hide the most recently added row.
    pub fn hidden(mut self) -> Self {
        if let Some(last) = self.rows.last_mut() {
            last.visible = false;
        }
        self
    }

    pub fn build(self) -> Table {
        let mut table = Table::new();
        for spec in self.rows {
            let row = table.push_row(spec.section);
            table.set_row_visible(row, spec.visible);
            for c in spec.cells {
                let id = table.push_cell(row, c.kind, c.row_span, c.col_span, c.content);
                table.cell_mut(id).unwrap().editable = c.editable;
            }
        }
        table
    }
}

// ============================================================================
// Ready-made tables
// ============================================================================

/// Head `Fruit | Qty | Price`, four body rows and a foot row.
///
/// ```text
/// Fruit  Qty  Price
/// apple  3    $1,200
/// pear   12   300.50
/// plum   -3   n/a
/// apple  2    45
/// Total  14   -
/// ```
pub fn fruit_table() -> Table {
    TableBuilder::new()
        .head(&["Fruit", "Qty", "Price"])
        .body(&["apple", "3", "$1,200"])
        .body(&["pear", "12", "300.50"])
        .body(&["plum", "-3", "n/a"])
        .body(&["apple", "2", "45"])
        .foot(&["Total", "14", "-"])
        .build()
}

/// 4x4 body with a 2x2 block in the middle and no head.
///
/// ```text
/// a b c d
/// e F F g
/// h F F i
/// j k l m
/// ```
pub fn block_table() -> Table {
    TableBuilder::new()
        .body(&["a", "b", "c", "d"])
        .row(
            Section::Body,
            vec![cell("e"), cell("F").rowspan(2).colspan(2), cell("g")],
        )
        .body(&["h", "i"])
        .body(&["j", "k", "l", "m"])
        .build()
}

/// Table with header cells leading each body row.
///
/// ```text
///      Q1  Q2  Q3
/// r1   1   2   3
/// r2   4   5   6
/// ```
pub fn row_header_table() -> Table {
    TableBuilder::new()
        .head(&["", "Q1", "Q2", "Q3"])
        .body_with_row_header("r1", &["1", "2", "3"])
        .body_with_row_header("r2", &["4", "5", "6"])
        .build()
}

/// Editable grid: `rows x cols` cells holding text inputs with empty values.
pub fn input_grid(rows: usize, cols: usize) -> Table {
    let mut builder = TableBuilder::new();
    for _ in 0..rows {
        let cells = (0..cols)
            .map(|_| cell("").content(vec![Node::input("")]))
            .collect();
        builder = builder.row(Section::Body, cells);
    }
    builder.build()
}

// ============================================================================
// XHTML Builder
// ============================================================================

/// Builder for XHTML table markup.
#[derive(Debug, Clone, Default)]
pub struct HtmlBuilder {
    head: Vec<String>,
    body: Vec<String>,
    foot: Vec<String>,
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn tr(tag: &str, texts: &[&str]) -> String {
    let cells: String = texts
        .iter()
        .map(|t| format!("<{tag}>{}</{tag}>", escape(t)))
        .collect();
    format!("<tr>{cells}</tr>")
}

impl HtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(mut self, texts: &[&str]) -> Self {
        self.head.push(tr("th", texts));
        self
    }

    pub fn body(mut self, texts: &[&str]) -> Self {
        self.body.push(tr("td", texts));
        self
    }

    pub fn foot(mut self, texts: &[&str]) -> Self {
        self.foot.push(tr("td", texts));
        self
    }

    /// Body row given as literal markup, for spans and form controls.
    pub fn raw_body(mut self, tr_markup: &str) -> Self {
        self.body.push(tr_markup.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut out = String::from("<table>");
        if !self.head.is_empty() {
            out.push_str(&format!("<thead>{}</thead>", self.head.concat()));
        }
        out.push_str(&format!("<tbody>{}</tbody>", self.body.concat()));
        if !self.foot.is_empty() {
            out.push_str(&format!("<tfoot>{}</tfoot>", self.foot.concat()));
        }
        out.push_str("</table>");
        out
    }
}
