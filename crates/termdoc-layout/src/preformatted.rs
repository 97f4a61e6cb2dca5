#![forbid(unsafe_code)]

//! Literal, never-wrapped lines.

use termdoc_style::Style;
use termdoc_text::Inline;

use crate::layout::{BlockLayout, LayoutParams, push_spaces};

/// Literal lines of text that are never wrapped.
///
/// A preformatted block can force its container wider than requested but
/// never shrinks below its longest line.
#[derive(Debug, Clone)]
pub struct PreformattedBlock {
    layout: LayoutParams,
    lines: Vec<Inline>,
    width: usize,
}

impl PreformattedBlock {
    /// Create a block from unstyled lines.
    ///
    /// Each entry is split further at line separators (`\n`, `\r\n`, a
    /// lone `\r`, NEL, U+2028 and U+2029), and trailing empty pieces are
    /// discarded. An entry that is empty to begin with stays one empty line.
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::styled(lines, Style::NORMAL)
    }

    /// Create a block whose lines all share `style`.
    #[must_use]
    pub fn styled<I, S>(lines: I, style: Style) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut split = Vec::new();
        for entry in lines {
            split.extend(
                split_lines(entry.as_ref())
                    .into_iter()
                    .map(|line| Inline::new(line.to_owned(), style)),
            );
        }
        let width = split.iter().map(Inline::visible_width).max().unwrap_or(0);
        Self {
            layout: LayoutParams::new(),
            lines: split,
            width,
        }
    }

    /// A single empty line, used as a vertical spacer.
    #[must_use]
    pub fn blank_line() -> Self {
        Self::new([""])
    }

    /// The stored lines.
    #[must_use]
    pub fn lines(&self) -> &[Inline] {
        &self.lines
    }
}

fn is_line_separator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if !is_line_separator(c) {
            continue;
        }
        pieces.push(&text[start..index]);
        start = index + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }
    pieces.push(&text[start..]);
    while pieces.len() > 1 && pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }
    pieces
}

impl BlockLayout for PreformattedBlock {
    fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    fn raw_width(&self) -> usize {
        self.width
    }

    fn min_width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.lines.len()
    }

    fn visible_width(&self) -> usize {
        self.width.max(self.requested_width().unwrap_or(0))
    }

    fn append_line_content_to(&self, out: &mut String, line: usize, with_styles: bool) {
        let Some(inline) = self.lines.get(line) else {
            self.append_padding_to(out);
            return;
        };
        inline.append_to(out, with_styles);
        if self.fill() {
            push_spaces(out, self.visible_width() - inline.visible_width());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(block: &PreformattedBlock) -> String {
        let mut out = String::new();
        block.append_lines_to(&mut out, false, "\n");
        out
    }

    #[test]
    fn geometry_from_longest_line() {
        let block = PreformattedBlock::new(["abcdef", "abc"]);
        assert_eq!(block.raw_width(), 6);
        assert_eq!(block.min_width(), 6);
        assert_eq!(block.height(), 2);
    }

    #[test]
    fn entries_split_on_newlines() {
        let block = PreformattedBlock::new(["one\ntwo\r\nthree"]);
        assert_eq!(block.height(), 3);
        assert_eq!(render(&block), "one\ntwo\nthree\n");
    }

    #[test]
    fn every_line_separator_breaks() {
        let block = PreformattedBlock::new(["ab\rcd\u{85}e\u{2028}f\u{2029}gh\r\n"]);
        assert_eq!(block.height(), 5);
        assert_eq!(block.raw_width(), 2);
        assert_eq!(render(&block), "ab\ncd\ne\nf\ngh\n");
        assert_eq!(split_lines("a\r\rb"), vec!["a", "", "b"]);
    }

    #[test]
    fn trailing_newline_dropped_but_empty_line_kept() {
        assert_eq!(PreformattedBlock::new(["a\n"]).height(), 1);
        assert_eq!(PreformattedBlock::new([""]).height(), 1);
        assert_eq!(PreformattedBlock::new(["a\n\nb"]).height(), 3);
        assert_eq!(PreformattedBlock::new(Vec::<String>::new()).height(), 0);
    }

    #[test]
    fn never_narrower_than_content() {
        let mut block = PreformattedBlock::new(["abcdef"]);
        block.set_requested_width(Some(2));
        assert_eq!(block.visible_width(), 6);
        block.set_requested_width(Some(9));
        assert_eq!(block.visible_width(), 9);
    }

    #[test]
    fn pads_only_when_filling() {
        let mut block = PreformattedBlock::new(["ab", "abcd"]);
        block.set_requested_width(Some(5));
        assert_eq!(render(&block), "ab\nabcd\n");
        block.set_fill(true);
        assert_eq!(render(&block), "ab   \nabcd \n");
    }

    #[test]
    fn styled_lines() {
        let block = PreformattedBlock::styled(["x"], Style::ITALIC);
        let mut out = String::new();
        block.append_line_content_to(&mut out, 0, true);
        assert_eq!(out, "\x1b[0;3mx\x1b[0m");
    }

    #[test]
    fn blank_line_is_one_empty_line() {
        let block = PreformattedBlock::blank_line();
        assert_eq!(block.height(), 1);
        assert_eq!(block.raw_width(), 0);
        assert_eq!(render(&block), "\n");
    }
}
