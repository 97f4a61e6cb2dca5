#![forbid(unsafe_code)]

//! The block with no content.

use crate::layout::{BlockLayout, LayoutParams};

/// A block with no content.
///
/// It has no lines of its own; when filling it reports its requested width
/// so a container can pad the space it occupies. Unpopulated grid cells are
/// empty blocks.
#[derive(Debug, Clone, Default)]
pub struct EmptyBlock {
    layout: LayoutParams,
}

impl EmptyBlock {
    /// Create an empty block.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layout: LayoutParams::new(),
        }
    }
}

impl BlockLayout for EmptyBlock {
    fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    fn raw_width(&self) -> usize {
        0
    }

    fn min_width(&self) -> usize {
        0
    }

    fn height(&self) -> usize {
        0
    }

    fn visible_width(&self) -> usize {
        if self.fill() {
            self.requested_width().unwrap_or(0)
        } else {
            0
        }
    }
}
