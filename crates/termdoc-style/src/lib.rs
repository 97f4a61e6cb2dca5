#![forbid(unsafe_code)]

//! Text styles for termdoc.
//!
//! A [`Style`] is a plain bitmask of text attributes. It carries no colors:
//! documents are rendered either as plain text or with the four SGR
//! attributes below.
//!
//! # Example
//! ```
//! use termdoc_style::{Style, append_style_string, parse_sgr};
//!
//! let mut out = String::new();
//! append_style_string(&mut out, Style::BOLD | Style::UNDERLINED);
//! assert_eq!(out, "\x1b[0;1;4m");
//! assert_eq!(parse_sgr(&out), Some(Style::BOLD | Style::UNDERLINED));
//! ```

pub mod sgr;

use smallvec::SmallVec;

pub use sgr::{FLAG_TABLE, SGR_RESET, append_reset, append_style_string, parse_sgr};

bitflags::bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Style: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Italic text.
        const ITALIC        = 0b0000_0010;
        /// Underlined text.
        const UNDERLINED    = 0b0000_0100;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b0000_1000;
    }
}

impl Style {
    /// No attributes.
    pub const NORMAL: Self = Self::empty();

    /// Whether this is the plain style.
    #[inline]
    #[must_use]
    pub const fn is_normal(self) -> bool {
        self.is_empty()
    }

    /// SGR parameter codes for the set flags, in [`FLAG_TABLE`] order.
    ///
    /// [`append_style_string`] writes these after the leading reset.
    #[must_use]
    pub fn sgr_codes(self) -> SmallVec<[u8; 4]> {
        FLAG_TABLE
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, code)| *code)
            .collect()
    }
}
