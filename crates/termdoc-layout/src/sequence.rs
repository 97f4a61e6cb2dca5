#![forbid(unsafe_code)]

//! Vertical stacking of blocks.

use crate::block::Block;
use crate::layout::{BlockLayout, LayoutParams};

/// Children rendered one after another, top to bottom.
///
/// Setting the sequence's layout parameters overwrites every child's.
#[derive(Debug, Clone, Default)]
pub struct SequenceBlock {
    layout: LayoutParams,
    children: Vec<Block>,
}

impl SequenceBlock {
    /// Create a sequence owning `children`.
    #[must_use]
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            layout: LayoutParams::new(),
            children,
        }
    }

    /// The children, in rendering order.
    #[must_use]
    pub fn children(&self) -> &[Block] {
        &self.children
    }
}

impl FromIterator<Block> for SequenceBlock {
    fn from_iter<T: IntoIterator<Item = Block>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl BlockLayout for SequenceBlock {
    fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    fn raw_width(&self) -> usize {
        self.children
            .iter()
            .map(BlockLayout::raw_width)
            .max()
            .unwrap_or(0)
    }

    /// Children wrap independently, so the narrowest child bounds the group.
    fn min_width(&self) -> usize {
        self.children
            .iter()
            .map(BlockLayout::min_width)
            .min()
            .unwrap_or(0)
    }

    fn height(&self) -> usize {
        self.children.iter().map(BlockLayout::height).sum()
    }

    fn visible_width(&self) -> usize {
        let widest = self
            .children
            .iter()
            .map(BlockLayout::visible_width)
            .max()
            .unwrap_or(0);
        if self.fill() {
            widest.max(self.requested_width().unwrap_or(0))
        } else {
            widest
        }
    }

    fn apply_layout(&self, fill: bool, requested_width: Option<usize>) {
        self.layout.update(fill, requested_width);
        for child in &self.children {
            child.apply_layout(fill, requested_width);
        }
    }

    fn append_line_content_to(&self, out: &mut String, line: usize, with_styles: bool) {
        let mut local = line;
        for child in &self.children {
            let height = child.height();
            if local < height {
                child.append_line_content_to(out, local, with_styles);
                return;
            }
            local -= height;
        }
        self.append_padding_to(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filler::FillerBlock;
    use crate::paragraph::{Alignment, ParagraphBlock};
    use crate::preformatted::PreformattedBlock;

    fn sample() -> SequenceBlock {
        SequenceBlock::new(vec![
            PreformattedBlock::new(["abcdef", "ab"]).into(),
            ParagraphBlock::from_text(Alignment::Left, "one two three").into(),
        ])
    }

    fn render(block: &SequenceBlock) -> String {
        let mut out = String::new();
        block.append_lines_to(&mut out, false, "\n");
        out
    }

    #[test]
    fn geometry_aggregates_children() {
        let block = sample();
        assert_eq!(block.raw_width(), 13);
        assert_eq!(block.min_width(), 5);
        assert_eq!(block.height(), 3);
        assert_eq!(block.visible_width(), 13);
    }

    #[test]
    fn empty_sequence() {
        let block = SequenceBlock::default();
        assert_eq!(block.raw_width(), 0);
        assert_eq!(block.min_width(), 0);
        assert_eq!(block.height(), 0);
        assert_eq!(render(&block), "");
    }

    #[test]
    fn width_cascades_to_children() {
        let mut block = sample();
        block.set_requested_width(Some(7));
        assert!(block.children().iter().all(|c| c.requested_width() == Some(7)));
        assert_eq!(render(&block), "abcdef\nab\none two\nthree\n");
    }

    #[test]
    fn cascade_overwrites_child_settings() {
        let mut child = Block::from(FillerBlock::new("-"));
        child.set_requested_width(Some(3));
        child.set_fill(true);
        let mut block = SequenceBlock::new(vec![child]);
        block.set_fill(false);
        assert!(!block.children()[0].fill());
        assert_eq!(block.children()[0].requested_width(), None);
    }

    #[test]
    fn fill_widens_to_request() {
        let mut block = SequenceBlock::new(vec![PreformattedBlock::new(["ab"]).into()]);
        block.set_requested_width(Some(6));
        assert_eq!(block.visible_width(), 2);
        block.set_fill(true);
        assert_eq!(block.visible_width(), 6);
        assert_eq!(render(&block), "ab    \n");
    }

    #[test]
    fn routes_lines_to_owning_child() {
        let block = sample();
        let mut out = String::new();
        block.append_line_content_to(&mut out, 2, false);
        assert_eq!(out, "one two three");
    }

    #[test]
    fn zero_height_children_are_skipped() {
        let block = SequenceBlock::new(vec![
            Block::empty(),
            PreformattedBlock::new(["x"]).into(),
            Block::empty(),
            PreformattedBlock::new(["y"]).into(),
        ]);
        assert_eq!(render(&block), "x\ny\n");
    }
}
