#![forbid(unsafe_code)]

//! Markdown to termdoc block trees.
//!
//! [`FormatBuilder`] walks a CommonMark (plus GFM tables and strikethrough)
//! event stream and produces a [`Block`] ready for layout:
//!
//! | Markdown | Block |
//! |----------|-------|
//! | heading 1 / 2 / 3 | paragraph styled bold+underlined+italic / underlined+bold / underlined |
//! | paragraph | left-aligned paragraph; emphasis, strong, strikethrough styled |
//! | list | two-column grid: marker, item content |
//! | block quote, indented code | two-column grid behind a four-space gutter |
//! | fenced code, HTML | preformatted lines |
//! | table | decorated table, or undecorated when the header row is blank |
//! | thematic break | `─` filler |
//!
//! # Example
//! ```
//! use termdoc_layout::BlockLayout;
//! use termdoc_markdown::FormatBuilder;
//!
//! let mut block = FormatBuilder::new().build("# Title\n\nSome *body* text.");
//! block.set_requested_width(Some(12));
//! let mut out = String::new();
//! block.append_lines_to(&mut out, false, "\n");
//! assert_eq!(out, "Title\n\nSome body\ntext.\n");
//! ```

pub mod builder;

pub use builder::{FormatBuilder, heading_style};

use termdoc_layout::Block;

/// Build `markdown` with default options.
#[must_use]
pub fn markdown_to_block(markdown: &str) -> Block {
    FormatBuilder::new().build(markdown)
}
