#![forbid(unsafe_code)]

//! The closed set of block variants.

use crate::empty::EmptyBlock;
use crate::filler::FillerBlock;
use crate::grid::GridBlock;
use crate::layout::{BlockLayout, LINE_ENDING, LayoutParams};
use crate::paragraph::{Alignment, ParagraphBlock};
use crate::preformatted::PreformattedBlock;
use crate::sequence::SequenceBlock;

/// Any block in a document tree.
#[derive(Debug, Clone)]
pub enum Block {
    /// No content.
    Empty(EmptyBlock),
    /// A tiled pattern.
    Filler(FillerBlock),
    /// Literal lines.
    Preformatted(PreformattedBlock),
    /// Word-wrapped text.
    Paragraph(ParagraphBlock),
    /// Vertically stacked children.
    Sequence(SequenceBlock),
    /// Rows and columns of children.
    Grid(GridBlock),
}

impl Default for Block {
    fn default() -> Self {
        Self::empty()
    }
}

impl Block {
    /// An empty block.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty(EmptyBlock::new())
    }

    /// A single blank line.
    #[must_use]
    pub fn blank_line() -> Self {
        Self::Preformatted(PreformattedBlock::blank_line())
    }

    /// A whitespace-compacting paragraph of plain text.
    #[must_use]
    pub fn paragraph(alignment: Alignment, text: &str) -> Self {
        Self::Paragraph(ParagraphBlock::from_text(alignment, text))
    }

    /// Render every line terminated by the platform line ending.
    #[must_use]
    pub fn render_to_string(&self, with_styles: bool) -> String {
        let mut out = String::new();
        self.append_lines_to(&mut out, with_styles, LINE_ENDING);
        out
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty(_) => "empty",
            Self::Filler(_) => "filler",
            Self::Preformatted(_) => "preformatted",
            Self::Paragraph(_) => "paragraph",
            Self::Sequence(_) => "sequence",
            Self::Grid(_) => "grid",
        }
    }
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            Block::Empty($inner) => $body,
            Block::Filler($inner) => $body,
            Block::Preformatted($inner) => $body,
            Block::Paragraph($inner) => $body,
            Block::Sequence($inner) => $body,
            Block::Grid($inner) => $body,
        }
    };
}

impl BlockLayout for Block {
    fn layout(&self) -> &LayoutParams {
        dispatch!(self, b => b.layout())
    }

    fn raw_width(&self) -> usize {
        dispatch!(self, b => b.raw_width())
    }

    fn min_width(&self) -> usize {
        dispatch!(self, b => b.min_width())
    }

    fn height(&self) -> usize {
        dispatch!(self, b => b.height())
    }

    fn visible_width(&self) -> usize {
        dispatch!(self, b => b.visible_width())
    }

    fn append_line_content_to(&self, out: &mut String, line: usize, with_styles: bool) {
        dispatch!(self, b => b.append_line_content_to(out, line, with_styles))
    }

    fn invalidate(&self) {
        dispatch!(self, b => b.invalidate())
    }

    fn apply_layout(&self, fill: bool, requested_width: Option<usize>) {
        dispatch!(self, b => b.apply_layout(fill, requested_width))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Block {
                fn from(block: $ty) -> Self {
                    Self::$variant(block)
                }
            }
        )*
    };
}

impl_from_variant!(
    Empty(EmptyBlock),
    Filler(FillerBlock),
    Preformatted(PreformattedBlock),
    Paragraph(ParagraphBlock),
    Sequence(SequenceBlock),
    Grid(GridBlock),
);
