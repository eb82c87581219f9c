//! Display formatting of monetary amounts.

/// Formats an amount for display: rounded to the nearest integer, digits
/// grouped by three with a plain space, no decimals.
///
/// Negative and non-finite inputs format as `"0"`; amounts are never shown
/// with a sign.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_string();
    }
    let rounded = value.round();
    if rounded >= u64::MAX as f64 {
        return group_thousands(&u64::MAX.to_string());
    }
    group_thousands(&(rounded as u64).to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
