#![forbid(unsafe_code)]

//! Width bounds of cells and grid columns.

use crate::layout::BlockLayout;

/// The narrowest and widest a block or column can be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
    /// Widest unbreakable content.
    pub minimum: usize,
    /// Unwrapped width.
    pub maximum: usize,
}

impl Measurement {
    /// Bounds of an empty column.
    pub const ZERO: Self = Self {
        minimum: 0,
        maximum: 0,
    };

    /// Create bounds from a minimum and maximum width.
    #[must_use]
    pub const fn new(minimum: usize, maximum: usize) -> Self {
        Self { minimum, maximum }
    }

    /// A block's min width and raw width.
    #[must_use]
    pub fn of(block: &impl BlockLayout) -> Self {
        Self::new(block.min_width(), block.raw_width())
    }

    /// Bounds of a column holding cells measured as `self` and `other`:
    /// the column must fit the widest of each.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            minimum: self.minimum.max(other.minimum),
            maximum: self.maximum.max(other.maximum),
        }
    }

    /// Whether the bounds coincide, leaving nothing to negotiate.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        self.minimum == self.maximum
    }
}
