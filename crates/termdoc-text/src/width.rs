#![forbid(unsafe_code)]

//! Width measurement and whitespace tokenization.

use unicode_width::UnicodeWidthStr;

/// Visible width of `text`: one column per `char`.
#[inline]
#[must_use]
pub fn visible_width(text: &str) -> usize {
    text.chars().count()
}

/// Whether `text` is non-empty and made only of whitespace.
#[inline]
#[must_use]
pub fn is_whitespace_run(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_whitespace)
}

/// Whether `text` contains glyphs whose terminal cell width differs from
/// [`visible_width`] (wide East-Asian characters, combining marks, emoji).
///
/// Layout keeps counting chars; this is a diagnostic for callers that want
/// to know the output may be misaligned on a real terminal.
#[must_use]
pub fn has_wide_glyphs(text: &str) -> bool {
    text.width() != visible_width(text)
}

/// Split `text` into alternating whitespace / non-whitespace runs.
///
/// Concatenating the returned slices reproduces `text` exactly.
#[must_use]
pub fn split_whitespace_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        if in_whitespace.is_some_and(|prev| prev != is_ws) {
            runs.push(&text[start..idx]);
            start = idx;
        }
        in_whitespace = Some(is_ws);
    }

    if start < text.len() {
        runs.push(&text[start..]);
    }

    runs
}
