#![forbid(unsafe_code)]

//! Styled inline runs.
//!
//! An [`Inline`] is the atomic unit of document text: a string and the
//! [`Style`] it is drawn with. Inlines are immutable once built.
//!
//! # Example
//! ```
//! use termdoc_style::Style;
//! use termdoc_text::Inline;
//!
//! let word = Inline::styled("Error:", Style::BOLD);
//! assert_eq!(word.visible_width(), 6);
//!
//! let mut out = String::new();
//! word.append_to(&mut out, true);
//! assert_eq!(out, "\x1b[0;1mError:\x1b[0m");
//! ```

use std::borrow::Cow;

use termdoc_style::{Style, append_reset, append_style_string};

use crate::width::{is_whitespace_run, visible_width};

/// An immutable styled run of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Inline {
    text: Cow<'static, str>,
    style: Style,
}

impl Inline {
    /// Create a run with an explicit style.
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<Cow<'static, str>>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create an unstyled run.
    #[inline]
    #[must_use]
    pub fn raw(text: impl Into<Cow<'static, str>>) -> Self {
        Self::new(text, Style::NORMAL)
    }

    /// Create a styled run.
    #[inline]
    #[must_use]
    pub fn styled(text: impl Into<Cow<'static, str>>, style: Style) -> Self {
        Self::new(text, style)
    }

    /// The run's text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The run's style.
    #[inline]
    #[must_use]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Whether the run is non-empty and every char is whitespace.
    #[inline]
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        is_whitespace_run(&self.text)
    }

    /// Whether the run has no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Width in columns (char count).
    #[inline]
    #[must_use]
    pub fn visible_width(&self) -> usize {
        visible_width(&self.text)
    }

    /// Append the run to `out`.
    ///
    /// With `with_styles` and a non-normal style the text is wrapped in a
    /// style sequence and a reset.
    pub fn append_to(&self, out: &mut String, with_styles: bool) {
        self.append_text_to(out, &self.text, with_styles);
    }

    /// Append `text` to `out` using this run's style.
    ///
    /// Used when the stored text is not emitted verbatim (compacted
    /// whitespace, tiled patterns) but the style still applies once.
    pub fn append_text_to(&self, out: &mut String, text: &str, with_styles: bool) {
        let styled = with_styles && !self.style.is_normal();
        if styled {
            append_style_string(out, self.style);
        }
        out.push_str(text);
        if styled {
            append_reset(out);
        }
    }
}

impl From<&'static str> for Inline {
    fn from(text: &'static str) -> Self {
        Self::raw(text)
    }
}

impl From<String> for Inline {
    fn from(text: String) -> Self {
        Self::raw(text)
    }
}
