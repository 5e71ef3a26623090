//! Conversions between cents and user-facing dollar strings.

use crate::model::Cents;

/// Render cents as US dollars, e.g. `123456` -> `"$1,234.56"`, `-5` -> `"-$0.05"`.
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{:02}", abs % 100)
}

/// Parse a user-typed amount into cents.
///
/// Everything except digits, `.` and `-` is dropped first, so `"$1,234.50"`
/// parses as 123450. The longest numeric prefix of what remains is used and
/// rounded to the nearest cent; input without one yields 0.
pub fn parse_cents(input: &str) -> Cents {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let number = numeric_prefix(&cleaned);
    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => (value * 100.0).round() as Cents,
        _ => 0,
    }
}

/// `-?digits*(.digits*)?` from the start of `s`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    &s[..end]
}
