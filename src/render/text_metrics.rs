//! Deterministic text size estimates.
//!
//! Composers lay out labels before any backend is involved, so widths come
//! from per-glyph factors rather than real font metrics.

/// Estimated rendered width of `text` at `font_size_px`.
#[must_use]
pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Estimated line height for `font_size_px`.
#[must_use]
pub fn estimate_text_height_px(font_size_px: f64) -> f64 {
    font_size_px * 1.2
}

/// First `max_chars` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
