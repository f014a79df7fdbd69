//! Number formatting for report text.

/// Group a whole number with comma thousands separators.
fn group_digits(whole: u64) -> String {
    if whole < 1_000 {
        return whole.to_string();
    }
    let digits = whole.to_string();
    let mut reversed = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            reversed.push(',');
        }
        reversed.push(ch);
    }
    reversed.chars().rev().collect()
}

/// Unit counts: truncate toward zero, then group.
pub fn format_units(value: f64) -> String {
    let whole = value.abs().trunc() as u64;
    let sign = if value <= -1.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(whole))
}

/// Currency amounts: round to the nearest whole unit, then group.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_digits(rounded.abs() as u64))
}
