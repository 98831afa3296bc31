//! Tab-separated clipboard text.
//!
//! Rows are separated by `\n` and fields by `\t`, the way spreadsheets put a
//! range on the clipboard. A field containing a tab, a line break or a `"` is
//! wrapped in quotes with inner quotes doubled.

use crate::error::TsvError;

/// Escape a cell value for TSV/clipboard format.
///
/// If the value contains tabs, line breaks, or quotes, wrap in quotes and escape
/// internal quotes.
pub fn escape_cell_value(value: &str) -> String {
    let needs_quoting = value.contains('\t')
        || value.contains('\n')
        || value.contains('\r')
        || value.contains('"');

    if needs_quoting {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

/// Encode a text matrix. The caller decides which rows are included.
pub fn encode<S: AsRef<str>>(rows: &[Vec<S>]) -> String {
    let mut result = String::new();
    for (r, row) in rows.iter().enumerate() {
        if r > 0 {
            result.push('\n');
        }
        for (c, value) in row.iter().enumerate() {
            if c > 0 {
                result.push('\t');
            }
            result.push_str(&escape_cell_value(value.as_ref()));
        }
    }
    result
}

/// Decode clipboard text into rows of fields.
///
/// `\r\n`, `\r` and `\n` all end a row; empty fields are kept, so decoding is the
/// exact inverse of [`encode`]. Empty input is one row holding one empty field.
///
/// A `"` opens a quoted field only at the start of a field; elsewhere it is taken
/// literally, as is anything between a closing quote and the next delimiter.
///
/// # Errors
/// Returns [`TsvError::UnterminatedQuote`] when a quoted field never closes.
pub fn decode(text: &str) -> Result<Vec<Vec<String>>, TsvError> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut at_field_start = true;
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' if at_field_start => {
                loop {
                    match chars.next() {
                        None => {
                            return Err(TsvError::UnterminatedQuote {
                                row: rows.len(),
                                offset,
                            })
                        }
                        Some((_, '"')) => {
                            if chars.next_if(|&(_, c)| c == '"').is_some() {
                                field.push('"');
                            } else {
                                break;
                            }
                        }
                        Some((_, c)) => field.push(c),
                    }
                }
                at_field_start = false;
            }
            '\t' => {
                row.push(std::mem::take(&mut field));
                at_field_start = true;
            }
            '\r' | '\n' => {
                if ch == '\r' {
                    chars.next_if(|&(_, c)| c == '\n');
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                at_field_start = true;
            }
            c => {
                field.push(c);
                at_field_start = false;
            }
        }
    }
    row.push(field);
    rows.push(row);
    Ok(rows)
}

/// Drop the empty last row left by clipboard text ending in a line break.
pub fn trim_trailing_line(rows: &mut Vec<Vec<String>>) {
    let trailing_empty = rows.len() > 1
        && rows
            .last()
            .is_some_and(|last| last.len() == 1 && last.iter().all(String::is_empty));
    if trailing_empty {
        rows.pop();
    }
}

/// Value pasted at `(row, col)` of a destination range: the decoded block repeats
/// in both directions.
pub fn tiled_value(decoded: &[Vec<String>], row: usize, col: usize) -> Option<&str> {
    if decoded.is_empty() {
        return None;
    }
    let line = decoded.get(row % decoded.len())?;
    if line.is_empty() {
        return None;
    }
    line.get(col % line.len()).map(String::as_str)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("plain", "plain" ; "no quoting")]
    #[test_case("a\tb", "\"a\tb\"" ; "tab")]
    #[test_case("a\nb", "\"a\nb\"" ; "newline")]
    #[test_case("a\rb", "\"a\rb\"" ; "carriage return")]
    #[test_case("say \"hi\"", "\"say \"\"hi\"\"\"" ; "quotes doubled")]
    fn test_escape_cell_value(input: &str, expected: &str) {
        assert_eq!(escape_cell_value(input), expected);
    }

    #[test]
    fn test_encode_joins_rows_and_fields() {
        let rows = vec![vec!["a", "b"], vec!["c", ""]];
        assert_eq!(encode(&rows), "a\tb\nc\t");
    }

    #[test]
    fn test_decode_line_break_flavours() {
        let rows = decode("a\r\nb\rc\nd").unwrap();
        assert_eq!(rows, vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn test_decode_keeps_empty_fields() {
        assert_eq!(decode("\ta\t").unwrap(), vec![vec!["", "a", ""]]);
        assert_eq!(decode("").unwrap(), vec![vec![""]]);
    }

    #[test]
    fn test_decode_quoted_field() {
        let rows = decode("\"x\ty\"\t\"say \"\"hi\"\"\"\n\"multi\nline\"").unwrap();
        assert_eq!(rows[0], vec!["x\ty", "say \"hi\""]);
        assert_eq!(rows[1], vec!["multi\nline"]);
    }

    #[test]
    fn test_decode_unterminated_quote() {
        let err = decode("ok\n\"never closed").unwrap_err();
        assert_eq!(err, TsvError::UnterminatedQuote { row: 1, offset: 3 });
    }

    #[test]
    fn test_decode_lenient_quotes() {
        assert_eq!(decode("ab\"c").unwrap(), vec![vec!["ab\"c"]]);
        assert_eq!(decode("\"ab\"c\td").unwrap(), vec![vec!["abc", "d"]]);
    }

    #[test]
    fn test_trim_trailing_line() {
        let mut rows = decode("a\tb\n").unwrap();
        trim_trailing_line(&mut rows);
        assert_eq!(rows, vec![vec!["a", "b"]]);

        let mut single = decode("").unwrap();
        trim_trailing_line(&mut single);
        assert_eq!(single, vec![vec![""]]);
    }

    #[test]
    fn test_tiled_value_repeats() {
        let block = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        assert_eq!(tiled_value(&block, 0, 0), Some("a"));
        assert_eq!(tiled_value(&block, 2, 3), Some("b"));
        assert_eq!(tiled_value(&block, 3, 2), Some("c"));
        assert_eq!(tiled_value(&[], 0, 0), None);
    }
}
