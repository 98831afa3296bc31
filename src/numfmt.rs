//! Numeric detection and formatting for cell text.
//!
//! Cell text is duck-typed: a string counts as a number when, after removing
//! `,` grouping separators, it is an optional `-` followed by digits with at most
//! one decimal point. Exponent notation (`2e3`) is deliberately not a number.

/// Strict numeric pattern: `-?` then digits with at most one `.`, at least one digit.
pub fn is_numeric(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let mut digits = 0usize;
    let mut dots = 0usize;
    for ch in body.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Remove `,` grouping separators.
pub fn strip_grouping(s: &str) -> String {
    s.chars().filter(|c| *c != ',').collect()
}

/// Parse text as a number after stripping grouping separators.
pub fn numeric_value(s: &str) -> Option<f64> {
    let stripped = strip_grouping(s);
    if !is_numeric(&stripped) {
        return None;
    }
    stripped.parse().ok()
}

/// First run of number-like characters (`,` `.` `-` and digits) in `s`.
pub fn first_numeric_run(s: &str) -> Option<&str> {
    let is_part = |c: char| c.is_ascii_digit() || matches!(c, ',' | '.' | '-');
    let start = s.find(is_part)?;
    let rest = s.get(start..)?;
    let len = rest.find(|c: char| !is_part(c)).unwrap_or(rest.len());
    rest.get(..len)
}

/// Number contained in free text such as `"$1,200"` or `"300.50 kg"`.
pub fn extract_number(s: &str) -> Option<f64> {
    first_numeric_run(s).and_then(numeric_value)
}

/// Render a number with `,` thousands separators in the integer part.
pub fn format_grouped(value: f64) -> String {
    let raw = value.to_string();
    let (sign, rest) = match raw.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", raw.as_str()),
    };
    let (int, frac) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut out = String::with_capacity(raw.len() + int.len() / 3);
    out.push_str(sign);
    let len = int.len();
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 && ch.is_ascii_digit() {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}
