#![forbid(unsafe_code)]

//! Block layout for termdoc.
//!
//! A document is a tree of [`Block`]s. Every block answers the same geometry
//! questions ([`BlockLayout`]) and renders itself one line at a time:
//!
//! - [`EmptyBlock`] - nothing, or blank padding when filling
//! - [`FillerBlock`] - a pattern tiled to the available width
//! - [`PreformattedBlock`] - literal lines, never wrapped
//! - [`ParagraphBlock`] - greedily word-wrapped styled text
//! - [`SequenceBlock`] - children stacked vertically
//! - [`GridBlock`] - cells in rows and negotiated columns; also tables
//!
//! Layout parameters (`fill`, `requested_width`) flow strictly top-down: a
//! container overwrites its children's parameters and never reads a
//! decision back from them.
//!
//! # Example
//! ```
//! use termdoc_layout::{Alignment, Block, BlockLayout, ParagraphBlock};
//!
//! let mut block = Block::from(ParagraphBlock::from_text(Alignment::Left, "Hello lovely World!"));
//! block.set_requested_width(Some(15));
//! assert_eq!(block.render_to_string(false), "Hello lovely\nWorld!\n");
//! ```
//!
//! # Threading
//!
//! Blocks use `Cell`/`RefCell` for layout parameters and derived caches, so
//! they are `Send` but not `Sync`. A tree is owned and mutated by one caller.

pub mod block;
pub mod empty;
pub mod filler;
pub mod grid;
pub mod layout;
pub mod measure;
pub mod paragraph;
pub mod preformatted;
pub mod sequence;
pub mod table;

pub use block::Block;
pub use empty::EmptyBlock;
pub use filler::FillerBlock;
pub use grid::{GridBlock, GridMetrics, negotiate_column_widths};
pub use layout::{BlockLayout, LINE_ENDING, LayoutParams};
pub use measure::Measurement;
pub use paragraph::{Alignment, ParagraphBlock, wrap_inlines};
pub use preformatted::PreformattedBlock;
pub use sequence::SequenceBlock;
pub use table::BoxChars;

pub use termdoc_style::Style;
pub use termdoc_text::{Inline, InlineSequence};
