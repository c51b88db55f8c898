//! Width-aware text fitting for fixed-size cells.

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` to at most `max_width` columns, marking the cut with `…`.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// The last columns of `text` that fit in `max_width`. Used for inputs so the
/// end being typed stays visible.
pub fn tail(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > max_width {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}

/// Display columns taken by the first `chars` chars of `text`.
pub fn columns(text: &str, chars: usize) -> usize {
    text.chars().take(chars).map(|c| c.width().unwrap_or(0)).sum()
}

/// Rows to draw so that `selected` stays inside a viewport of `height` rows.
pub fn visible_window(selected: usize, len: usize, height: usize) -> Range<usize> {
    if height == 0 || len == 0 {
        return 0..0;
    }
    let start = selected.saturating_sub(height - 1).min(len.saturating_sub(height));
    start..(start + height).min(len)
}
