//! A1-style references to logical matrix positions.
//!
//! Columns are letters (`A`..`Z`, `AA`..), rows are 1-based numbers. Both map to
//! 0-based matrix indices. `$` absolute markers are accepted and ignored.

use crate::types::CellRange;

/// Parse a reference like "B3" into `(col, row)`, both 0-indexed.
///
/// Letters must come before digits; anything else is rejected.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(usize, usize)> {
    let mut col: usize = 0;
    let mut row: usize = 0;
    let mut saw_col = false;
    let mut saw_row = false;

    for b in cell_ref.trim().bytes() {
        match b {
            b'$' => continue,
            b'A'..=b'Z' | b'a'..=b'z' if !saw_row => {
                let upper = b.to_ascii_uppercase();
                col = col
                    .checked_mul(26)?
                    .checked_add(usize::from(upper - b'A') + 1)?;
                saw_col = true;
            }
            b'0'..=b'9' if saw_col => {
                row = row.checked_mul(10)?.checked_add(usize::from(b - b'0'))?;
                saw_row = true;
            }
            _ => return None,
        }
    }

    if !saw_col || !saw_row || row == 0 {
        return None;
    }
    Some((col - 1, row - 1))
}

/// Parse "A1:C3" or a single "B2" into a normalized range.
pub fn parse_cell_range(range: &str) -> Option<CellRange> {
    let (start, end) = range.split_once(':').unwrap_or((range, range));
    let (c1, r1) = parse_cell_ref(start)?;
    let (c2, r2) = parse_cell_ref(end)?;
    Some(CellRange::from_corners((r1, c1), (r2, c2)))
}

/// Column letters for a 0-based column index (0 → "A", 26 → "AA").
pub fn col_to_letter(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26, so the sum stays inside 'A'..='Z'.
        letters.push(char::from(b'A' + u8::try_from(rem).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

impl CellRange {
    /// "A1" for a single position, "A1:C3" otherwise.
    pub fn to_a1(&self) -> String {
        let start = format!("{}{}", col_to_letter(self.col1), self.row1 + 1);
        if self.row1 == self.row2 && self.col1 == self.col2 {
            start
        } else {
            format!("{start}:{}{}", col_to_letter(self.col2), self.row2 + 1)
        }
    }
}
