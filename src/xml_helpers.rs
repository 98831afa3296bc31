//! Attribute helpers for the table markup loader.
//!
//! Attributes are read in HTML mode, so a bare `checked` or `hidden` without a
//! value is accepted and reads as an empty string.

use quick_xml::events::BytesStart;

/// Extract an attribute value by key, entity-unescaped.
///
/// Returns `None` if the attribute is missing or not valid UTF-8.
pub fn attr_string(e: &BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.html_attributes().flatten() {
        if attr.key.as_ref().eq_ignore_ascii_case(key) {
            return attr.unescape_value().ok().map(|s| s.into_owned());
        }
    }
    None
}

/// Extract a `usize` attribute value by key.
pub fn attr_usize(e: &BytesStart, key: &[u8]) -> Option<usize> {
    attr_string(e, key).and_then(|s| s.trim().parse().ok())
}

/// Whether a boolean HTML attribute (`checked`, `disabled`, ...) is present.
pub fn has_attr(e: &BytesStart, key: &[u8]) -> bool {
    e.html_attributes()
        .flatten()
        .any(|attr| attr.key.as_ref().eq_ignore_ascii_case(key))
}

/// Whether the `class` attribute lists `class`.
pub fn has_class(e: &BytesStart, class: &str) -> bool {
    attr_string(e, b"class").is_some_and(|list| list.split_whitespace().any(|c| c == class))
}

/// Get the local element name, lowercased.
///
/// Returns empty string if not valid UTF-8.
#[inline]
pub fn local_name_string(e: &BytesStart) -> String {
    let bytes = e.local_name();
    std::str::from_utf8(bytes.as_ref())
        .unwrap_or("")
        .to_ascii_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn make_start(xml: &str) -> BytesStart<'_> {
        // Strip < and > / /> to get just the tag content
        let content = xml
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim_end_matches('/')
            .trim_end();
        BytesStart::from_content(content, content.find(' ').unwrap_or(content.len()))
    }

    #[test]
    fn test_attr_string_unescapes() {
        let e = make_start(r#"<input value="a &amp; b" />"#);
        assert_eq!(attr_string(&e, b"value"), Some("a & b".to_string()));
        assert_eq!(attr_string(&e, b"missing"), None);
    }

    #[test]
    fn test_attr_usize() {
        let e = make_start(r#"<td rowspan="3" colspan="x" />"#);
        assert_eq!(attr_usize(&e, b"rowspan"), Some(3));
        assert_eq!(attr_usize(&e, b"colspan"), None);
    }

    #[test]
    fn test_bare_boolean_attribute() {
        let e = make_start(r#"<input type="checkbox" checked />"#);
        assert!(has_attr(&e, b"checked"));
        assert!(!has_attr(&e, b"disabled"));
    }

    #[test]
    fn test_has_class() {
        let e = make_start(r#"<div class="markbox wide" />"#);
        assert!(has_class(&e, "markbox"));
        assert!(!has_class(&e, "mark"));
    }

    #[test]
    fn test_local_name_lowercased() {
        let e = make_start("<TD>");
        assert_eq!(local_name_string(&e), "td");
    }
}
