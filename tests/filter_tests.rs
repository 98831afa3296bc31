//! Column filters, filter history and the visible row count.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]

mod common;
mod fixtures;

use pretty_assertions::assert_eq;
use sheetgrid::types::{FilterEntry, FilterPredicate};

use common::{at, drag, session, visible_column};
use fixtures::{fruit_table, TableBuilder};

fn entry(label: &str, negated: bool) -> FilterEntry {
    FilterEntry {
        label: label.to_string(),
        negated,
    }
}

#[test]
fn test_equals() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    assert!(s.filter(&FilterPredicate::Equals("apple".into())));
    assert_eq!(visible_column(&s, 1), vec!["3", "2"]);
    assert_eq!(s.visible_row_count(), 2);
}

#[test]
fn test_not_equals_is_recorded_negated() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::NotEquals("apple".into()));
    assert_eq!(visible_column(&s, 0), vec!["pear", "plum"]);
    assert_eq!(s.filter_state().history, vec![entry("apple", true)]);
    assert_eq!(s.filter_state().active_column, Some(0));
}

#[test]
fn test_contains() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::Contains("p".into()));
    assert_eq!(s.visible_row_count(), 4);
    s.filter(&FilterPredicate::Contains("ea".into()));
    assert_eq!(visible_column(&s, 0), vec!["pear"]);
}

#[test]
fn test_empty_search_does_nothing() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    assert!(!s.filter(&FilterPredicate::Contains(String::new())));
    assert!(!s.filter_state().is_active());
    assert_eq!(s.visible_row_count(), 4);
}

#[test]
fn test_filter_from_body_cell_uses_its_column() {
    let (mut s, _) = session(fruit_table());
    let info = s.context_body(at(&s, 2, 1), false).unwrap();
    assert_eq!(info.text, "12");
    s.filter(&FilterPredicate::Equals(info.text));
    assert_eq!(visible_column(&s, 0), vec!["pear"]);
}

#[test]
fn test_later_filter_is_evaluated_on_every_row() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::Equals("apple".into()));
    s.context_header(at(&s, 0, 1)).unwrap();
    s.filter(&FilterPredicate::Equals("12".into()));

    // The second filter brings back a row the first one hid.
    assert_eq!(visible_column(&s, 0), vec!["pear"]);
    assert_eq!(
        s.filter_state().history,
        vec![entry("apple", false), entry("12", false)]
    );
    assert_eq!(s.filter_state().active_column, Some(1));
}

#[test]
fn test_history_shows_in_context_menu() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::NotEquals("plum".into()));
    let info = s.context_header(at(&s, 0, 2)).unwrap();
    assert_eq!(info.history, vec![entry("plum", true)]);
    assert_eq!(info.text, "Price");
}

#[test]
fn test_clear_is_idempotent() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::Equals("pear".into()));
    s.clear_filter();
    assert_eq!(s.visible_row_count(), 4);
    assert!(s.filter_state().history.is_empty());
    assert_eq!(s.filter_state().active_column, None);

    s.clear_filter();
    assert_eq!(s.visible_row_count(), 4);
}

#[test]
fn test_clear_after_rebuild_shows_filtered_rows() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::Equals("apple".into()));
    s.rebuild().unwrap();
    assert_eq!(s.grid().body.height(), 4);
    assert_eq!(s.visible_row_count(), 2);

    s.clear_filter();
    assert_eq!(s.visible_row_count(), 4);
    assert_eq!(visible_column(&s, 0), vec!["apple", "pear", "plum", "apple"]);
}

#[test]
fn test_clear_keeps_rows_hidden_at_load() {
    let table = TableBuilder::new()
        .head(&["k"])
        .body(&["a"])
        .body(&["b"])
        .hidden()
        .body(&["a"])
        .build();
    let (mut s, _) = session(table);
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::NotEquals("a".into()));
    assert_eq!(s.visible_row_count(), 0);

    s.clear_filter();
    assert_eq!(visible_column(&s, 0), vec!["a", "a"]);
    assert_eq!(s.table().section_rows(sheetgrid::types::Section::Body).len(), 3);
}

#[test]
fn test_filter_clears_selection() {
    let (mut s, _) = session(fruit_table());
    drag(&mut s, (1, 0), (2, 2));
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::Equals("pear".into()));
    assert!(!s.selection().is_active());
}

#[test]
fn test_copy_skips_hidden_rows() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::Equals("pear".into()));
    assert_eq!(s.copy_all(), "Fruit\tQty\tPrice\npear\t12\t300.50\nTotal\t14\t-");

    // A range over hidden rows copies only the visible ones.
    drag(&mut s, (1, 0), (4, 0));
    assert_eq!(s.copy().as_deref(), Some("pear"));
}

#[test]
fn test_selection_skips_hidden_rows() {
    let (mut s, _) = session(fruit_table());
    s.context_header(at(&s, 0, 0)).unwrap();
    s.filter(&FilterPredicate::NotEquals("pear".into()));
    drag(&mut s, (1, 1), (3, 1));
    let texts: Vec<String> = s.selected_cells().iter().map(|id| s.cell_text(*id)).collect();
    assert_eq!(texts, vec!["3", "-3"]);
}

#[test]
fn test_headless_table_offers_no_filter() {
    let table = TableBuilder::new()
        .body(&["x", "1"])
        .body(&["y", "2"])
        .body(&["x", "3"])
        .build();
    let (mut s, _) = session(table);
    let info = s.context_body(at(&s, 0, 0), false).unwrap();
    assert!(!info.filterable);
    assert!(!s.filter(&FilterPredicate::Equals("x".into())));
    assert_eq!(visible_column(&s, 1), vec!["1", "2", "3"]);
    assert!(s.filter_state().history.is_empty());
}
