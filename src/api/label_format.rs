/// Formats a slice share such as `42.5%`.
#[must_use]
pub fn format_ratio_percent(percent: f64, decimals: u8) -> String {
    format!("{percent:.prec$}%", prec = usize::from(decimals))
}

/// Formats `value` with at most `max_decimals` digits, dropping trailing zeros.
#[must_use]
pub fn format_compact(value: f64, max_decimals: u8) -> String {
    let text = format!("{value:.prec$}", prec = usize::from(max_decimals));
    if !text.contains('.') {
        return text;
    }
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Scalar ring value followed by an optional unit, e.g. `25 km`.
#[must_use]
pub fn format_scalar_value(value: f64, unit: &str) -> String {
    let number = format_compact(value, 2);
    if unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}
