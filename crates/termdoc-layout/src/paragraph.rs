#![forbid(unsafe_code)]

//! Word-wrapped paragraphs.
//!
//! Wrapping is greedy and only breaks at whitespace runs:
//!
//! 1. The first word of a line is always placed, even when it is wider
//!    than the line. Long words overflow; they are never truncated.
//! 2. Each following word is tried together with the whitespace before it.
//!    It is kept if the line still fits, otherwise the line is rolled back
//!    and the word starts the next line.
//! 3. Whitespace after the last word is dropped.

use std::cell::RefCell;

use termdoc_style::Style;
use termdoc_text::{Inline, InlineSequence};

use crate::layout::{BlockLayout, LayoutParams, push_spaces};

/// Horizontal alignment of paragraph lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Alignment {
    /// Flush left; trailing padding only when filling.
    #[default]
    Left,
    /// Centered; the odd column goes to the right.
    Center,
    /// Flush right.
    Right,
}

/// A block of styled text wrapped to its requested width.
#[derive(Debug, Clone)]
pub struct ParagraphBlock {
    layout: LayoutParams,
    alignment: Alignment,
    content: InlineSequence,
    lines: RefCell<Option<Vec<InlineSequence>>>,
}

impl ParagraphBlock {
    /// Create a paragraph owning `content`.
    #[must_use]
    pub fn new(alignment: Alignment, content: InlineSequence) -> Self {
        Self {
            layout: LayoutParams::new(),
            alignment,
            content,
            lines: RefCell::new(None),
        }
    }

    /// Create a whitespace-compacting paragraph from plain text.
    #[must_use]
    pub fn from_text(alignment: Alignment, text: &str) -> Self {
        Self::from_styled_text(alignment, text, Style::NORMAL)
    }

    /// Create a whitespace-compacting paragraph from text in one style.
    #[must_use]
    pub fn from_styled_text(alignment: Alignment, text: &str, style: Style) -> Self {
        let mut content = InlineSequence::new(true);
        content.add_inlines_for_string(text, style);
        Self::new(alignment, content)
    }

    /// The paragraph's alignment.
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// The unwrapped content.
    #[must_use]
    pub fn content(&self) -> &InlineSequence {
        &self.content
    }

    /// Run `f` over the wrapped lines, wrapping first if the cache is stale.
    pub fn with_lines<R>(&self, f: impl FnOnce(&[InlineSequence]) -> R) -> R {
        if self.lines.borrow().is_none() {
            let lines = self.compute_lines();
            *self.lines.borrow_mut() = Some(lines);
        }
        match self.lines.borrow().as_deref() {
            Some(lines) => f(lines),
            None => f(&[]),
        }
    }

    /// The wrapped lines as plain text.
    #[must_use]
    pub fn line_texts(&self) -> Vec<String> {
        self.with_lines(|lines| lines.iter().map(InlineSequence::to_plain_text).collect())
    }

    fn compute_lines(&self) -> Vec<InlineSequence> {
        match self.requested_width() {
            None => vec![self.content.clone()],
            Some(width) => wrap_inlines(&self.content, width),
        }
    }
}

/// Greedily wrap `content` into lines no wider than `width`, except for
/// lines holding a single overflowing word.
///
/// # Panics
///
/// Panics if an iteration consumes no runs, which would otherwise loop
/// forever. This is an internal invariant, not an input condition.
#[must_use]
pub fn wrap_inlines(content: &InlineSequence, width: usize) -> Vec<InlineSequence> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("paragraph_wrap", width, runs = content.len()).entered();

    let is_word = |inline: &Inline| !inline.is_whitespace();
    let len = content.len();
    let mut lines = Vec::new();
    let mut pos = content.find_first(0, is_word);

    while pos < len {
        let start = pos;
        let mut line = content.empty_like();

        pos = content.copy_to(&mut line, pos, is_word);
        loop {
            let accepted = line.len();
            let word_start = content.copy_to(&mut line, pos, Inline::is_whitespace);
            if word_start >= len {
                line.truncate_to(accepted);
                pos = len;
                break;
            }
            let word_end = content.copy_to(&mut line, word_start, is_word);
            if line.visible_width() <= width {
                pos = word_end;
            } else {
                line.truncate_to(accepted);
                pos = word_start;
                break;
            }
        }

        if pos == start {
            #[cfg(feature = "tracing")]
            tracing::error!(position = pos, width, "paragraph wrap consumed no runs");
            panic!("paragraph wrap consumed no runs at index {pos} (width {width})");
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

impl BlockLayout for ParagraphBlock {
    fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    fn raw_width(&self) -> usize {
        self.content.visible_width()
    }

    /// Adjacent non-whitespace runs wrap as one word, so they count together.
    fn min_width(&self) -> usize {
        self.content.max_word_width()
    }

    fn height(&self) -> usize {
        self.with_lines(<[InlineSequence]>::len)
    }

    fn visible_width(&self) -> usize {
        match self.requested_width() {
            None => self.raw_width(),
            Some(width) => self.with_lines(|lines| {
                lines
                    .iter()
                    .map(InlineSequence::visible_width)
                    .fold(width, usize::max)
            }),
        }
    }

    fn invalidate(&self) {
        self.lines.borrow_mut().take();
    }

    fn append_line_content_to(&self, out: &mut String, line: usize, with_styles: bool) {
        let visible = self.visible_width();
        let fill = self.fill();
        let rendered = self.with_lines(|lines| {
            let Some(content) = lines.get(line) else {
                return false;
            };
            let spaces = visible.saturating_sub(content.visible_width());
            match self.alignment {
                Alignment::Left => {
                    content.append_to(out, with_styles);
                    if fill {
                        push_spaces(out, spaces);
                    }
                }
                Alignment::Center => {
                    let leading = spaces / 2;
                    push_spaces(out, leading);
                    content.append_to(out, with_styles);
                    if fill {
                        push_spaces(out, spaces - leading);
                    }
                }
                Alignment::Right => {
                    push_spaces(out, spaces);
                    content.append_to(out, with_styles);
                }
            }
            true
        });
        if !rendered {
            self.append_padding_to(out);
        }
    }
}
