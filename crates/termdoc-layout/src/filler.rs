#![forbid(unsafe_code)]

//! Pattern-tiling blocks (rules, borders, gutters).

use termdoc_text::Inline;

use crate::layout::{BlockLayout, LayoutParams, push_spaces};

/// A block that tiles one pattern across its width.
///
/// The pattern is repeated char by char, so the last repetition may be
/// partial: `"ab"` at width 5 renders `"ababa"`. The style escape is emitted
/// once around the whole line.
///
/// A filler reports a height of one line but draws its pattern for every
/// line it is asked for, so a border column stays continuous next to
/// multi-line grid cells.
#[derive(Debug, Clone)]
pub struct FillerBlock {
    layout: LayoutParams,
    pattern: Inline,
}

impl FillerBlock {
    /// Create a filler tiling `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<Inline>) -> Self {
        Self {
            layout: LayoutParams::new(),
            pattern: pattern.into(),
        }
    }

    /// Create a filler repeating a single char.
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        Self::new(Inline::raw(String::from(ch)))
    }

    /// The tiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &Inline {
        &self.pattern
    }
}

impl BlockLayout for FillerBlock {
    fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    fn raw_width(&self) -> usize {
        self.pattern.visible_width()
    }

    fn min_width(&self) -> usize {
        self.raw_width().min(1)
    }

    fn height(&self) -> usize {
        1
    }

    fn visible_width(&self) -> usize {
        self.requested_width().unwrap_or_else(|| self.raw_width())
    }

    fn append_line_content_to(&self, out: &mut String, _line: usize, with_styles: bool) {
        let width = self.visible_width();
        if width == 0 {
            return;
        }
        if self.pattern.is_empty() {
            push_spaces(out, width);
            return;
        }
        let tiled: String = self.pattern.text().chars().cycle().take(width).collect();
        self.pattern.append_text_to(out, &tiled, with_styles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termdoc_style::Style;

    fn line(block: &FillerBlock, with_styles: bool) -> String {
        let mut out = String::new();
        block.append_line_content_to(&mut out, 0, with_styles);
        out
    }

    #[test]
    fn tiles_partial_pattern() {
        let mut block = FillerBlock::new("ab");
        block.set_requested_width(Some(5));
        assert_eq!(line(&block, false), "ababa");
    }

    #[test]
    fn unconstrained_uses_pattern_width() {
        let block = FillerBlock::new("-=-");
        assert_eq!(block.visible_width(), 3);
        assert_eq!(line(&block, false), "-=-");
    }

    #[test]
    fn geometry() {
        let block = FillerBlock::new("abc");
        assert_eq!(block.raw_width(), 3);
        assert_eq!(block.min_width(), 1);
        assert_eq!(block.height(), 1);
    }

    #[test]
    fn style_emitted_once() {
        let mut block = FillerBlock::new(Inline::styled("-", Style::BOLD));
        block.set_requested_width(Some(3));
        assert_eq!(line(&block, true), "\x1b[0;1m---\x1b[0m");
    }

    #[test]
    fn every_line_draws_pattern() {
        let block = FillerBlock::from_char('│');
        let mut out = String::new();
        block.append_line_content_to(&mut out, 3, false);
        assert_eq!(out, "│");
    }

    #[test]
    fn zero_width_draws_nothing() {
        let mut block = FillerBlock::new(Inline::styled("x", Style::BOLD));
        block.set_requested_width(Some(0));
        assert_eq!(line(&block, true), "");
    }

    #[test]
    fn empty_pattern_pads() {
        let mut block = FillerBlock::new("");
        assert_eq!(block.min_width(), 0);
        block.set_requested_width(Some(2));
        assert_eq!(line(&block, false), "  ");
    }

    #[test]
    fn append_to_renders_single_line() {
        let mut block = FillerBlock::new("=");
        block.set_requested_width(Some(4));
        let mut out = String::new();
        block.append_lines_to(&mut out, false, "\n");
        assert_eq!(out, "====\n");
    }
}
