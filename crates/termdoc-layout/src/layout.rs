#![forbid(unsafe_code)]

//! The geometry and rendering contract shared by every block.

use std::cell::Cell;

/// Line terminator used by [`BlockLayout::append_to`].
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator used by [`BlockLayout::append_to`].
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Mutable layout parameters owned by a block.
///
/// `requested_width` of `None` means unconstrained.
#[derive(Debug, Clone, Default)]
pub struct LayoutParams {
    fill: Cell<bool>,
    requested_width: Cell<Option<usize>>,
}

impl LayoutParams {
    /// Unconstrained, non-filling parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fill: Cell::new(false),
            requested_width: Cell::new(None),
        }
    }

    /// Whether the block expands to its requested width.
    #[inline]
    #[must_use]
    pub fn fill(&self) -> bool {
        self.fill.get()
    }

    /// The width constraint, if any.
    #[inline]
    #[must_use]
    pub fn requested_width(&self) -> Option<usize> {
        self.requested_width.get()
    }

    /// Store new parameters; returns whether anything changed.
    pub(crate) fn update(&self, fill: bool, requested_width: Option<usize>) -> bool {
        let changed = self.fill.get() != fill || self.requested_width.get() != requested_width;
        self.fill.set(fill);
        self.requested_width.set(requested_width);
        changed
    }
}

/// Append `count` spaces to `out`.
#[inline]
pub(crate) fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n(' ', count));
}

/// Geometry queries and line rendering common to all blocks.
///
/// Widths are in columns, heights in lines. All queries are pure with
/// respect to the current layout parameters: asking twice without an
/// intervening parameter change yields the same answer.
pub trait BlockLayout {
    /// The block's layout parameters.
    fn layout(&self) -> &LayoutParams;

    /// Intrinsic width with no constraint applied.
    fn raw_width(&self) -> usize;

    /// Smallest width the block renders at without breaking content.
    fn min_width(&self) -> usize;

    /// Number of lines at the current layout parameters.
    fn height(&self) -> usize;

    /// Width actually used at the current layout parameters.
    fn visible_width(&self) -> usize;

    /// Append the content of `line` (no terminator).
    ///
    /// The default, used for lines a block has no content for, emits blank
    /// padding of [`visible_width`](Self::visible_width) when filling and
    /// nothing otherwise.
    fn append_line_content_to(&self, out: &mut String, _line: usize, _with_styles: bool) {
        self.append_padding_to(out);
    }

    /// Drop derived state that depends on the layout parameters.
    fn invalidate(&self) {}

    /// Overwrite the layout parameters.
    ///
    /// Containers call this on their children while computing their own
    /// layout; derived state is invalidated only if something changed.
    fn apply_layout(&self, fill: bool, requested_width: Option<usize>) {
        if self.layout().update(fill, requested_width) {
            self.invalidate();
        }
    }

    /// Whether the block expands to its requested width.
    fn fill(&self) -> bool {
        self.layout().fill()
    }

    /// The width constraint, if any.
    fn requested_width(&self) -> Option<usize> {
        self.layout().requested_width()
    }

    /// Set the fill flag.
    fn set_fill(&mut self, fill: bool) {
        self.apply_layout(fill, self.requested_width());
    }

    /// Set the width constraint (`None` for unconstrained).
    fn set_requested_width(&mut self, requested_width: Option<usize>) {
        self.apply_layout(self.fill(), requested_width);
    }

    /// Append blank padding of the visible width when filling.
    fn append_padding_to(&self, out: &mut String) {
        if self.fill() {
            push_spaces(out, self.visible_width());
        }
    }

    /// Append every line, each followed by `line_ending`.
    fn append_lines_to(&self, out: &mut String, with_styles: bool, line_ending: &str) {
        for line in 0..self.height() {
            self.append_line_content_to(out, line, with_styles);
            out.push_str(line_ending);
        }
    }

    /// Append every line, each followed by [`LINE_ENDING`].
    fn append_to(&self, out: &mut String, with_styles: bool) {
        self.append_lines_to(out, with_styles, LINE_ENDING);
    }
}
