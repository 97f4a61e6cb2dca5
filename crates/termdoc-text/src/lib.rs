#![forbid(unsafe_code)]

//! Text primitives for termdoc.
//!
//! - [`Inline`] - an immutable styled run of text, the smallest content unit
//! - [`InlineSequence`] - an ordered, owned list of runs with an optional
//!   whitespace-compaction policy
//! - [`width`] - width measurement and whitespace tokenization helpers
//!
//! Widths are measured as a plain count of `char`s. Wide glyphs and
//! combining marks are not treated specially; see
//! [`width::has_wide_glyphs`] for detecting content where that matters.
//!
//! # Example
//! ```
//! use termdoc_style::Style;
//! use termdoc_text::InlineSequence;
//!
//! let mut seq = InlineSequence::new(true);
//! seq.add_inlines_for_string("Hello   lovely World!", Style::NORMAL);
//! assert_eq!(seq.len(), 5);
//! // The three-space run is measured as a single space.
//! assert_eq!(seq.visible_width(), 19);
//! assert_eq!(seq.max_inline_length(), 6);
//! ```

pub mod inline;
pub mod sequence;
pub mod width;

pub use inline::Inline;
pub use sequence::InlineSequence;
pub use width::{has_wide_glyphs, is_whitespace_run, split_whitespace_runs, visible_width};
