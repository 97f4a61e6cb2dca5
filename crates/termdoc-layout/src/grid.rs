#![forbid(unsafe_code)]

//! Grids of blocks with negotiated column widths.
//!
//! # Column negotiation
//!
//! Each column is measured as the widest raw width and widest min width of
//! its cells. Unconstrained, every column gets its raw width. Constrained to
//! `W` columns:
//!
//! 1. Columns whose min and max agree are fixed and their width is taken
//!    out of the budget.
//! 2. The remaining columns are visited left to right; each gets
//!    `clamp(budget / remaining_columns, min, max)` and the budget shrinks
//!    by what it got.
//!
//! This is a greedy, order-dependent split. A wide-minimum column late in
//! the order can push the total past `W` even when `W` covers the sum of
//! minimums.
//!
//! # Cell layout
//!
//! Once widths are known every cell's requested width is set to its
//! column's width. Cells outside the last column always fill; the last
//! column fills only when the grid itself does. A filling grid pads every
//! line out to its requested width when that exceeds the column total.

use std::cell::RefCell;

use crate::block::Block;
use crate::layout::{BlockLayout, LayoutParams, push_spaces};
use crate::measure::Measurement;

/// Column widths and row heights derived from a grid's cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridMetrics {
    /// Width of every column.
    pub column_widths: Vec<usize>,
    /// Height of every row at those widths.
    pub row_heights: Vec<usize>,
}

/// Rows and columns of blocks.
///
/// Storage is dense: setting a cell beyond the current bounds grows the grid
/// and fills the new positions with empty blocks.
#[derive(Debug, Clone, Default)]
pub struct GridBlock {
    layout: LayoutParams,
    rows: Vec<Vec<Block>>,
    column_count: usize,
    metrics: RefCell<Option<GridMetrics>>,
}

impl GridBlock {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from rows of cells; short rows are padded.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Block>>) -> Self {
        let mut grid = Self::new();
        for (row, cells) in rows.into_iter().enumerate() {
            for (column, cell) in cells.into_iter().enumerate() {
                grid.set_cell(row, column, cell);
            }
        }
        grid
    }

    /// Place `block` at (`row`, `column`), growing the grid as needed.
    pub fn set_cell(&mut self, row: usize, column: usize, block: impl Into<Block>) {
        if column >= self.column_count {
            self.column_count = column + 1;
            for cells in &mut self.rows {
                cells.resize_with(self.column_count, Block::empty);
            }
        }
        while self.rows.len() <= row {
            self.rows
                .push(std::iter::repeat_with(Block::empty).take(self.column_count).collect());
        }
        self.rows[row][column] = block.into();
        self.invalidate();
    }

    /// The cell at (`row`, `column`), or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&Block> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Number of rows (one more than the largest row index set).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (one more than the largest column index set).
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Take the cells out of the grid, row by row.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<Block>> {
        self.rows
    }

    /// Per-column bounds: widest min width and widest raw width of the
    /// column's cells.
    #[must_use]
    pub fn column_bounds(&self) -> Vec<Measurement> {
        let mut bounds = vec![Measurement::ZERO; self.column_count];
        for cells in &self.rows {
            for (bound, cell) in bounds.iter_mut().zip(cells) {
                *bound = bound.union(Measurement::of(cell));
            }
        }
        bounds
    }

    /// Final column widths at the current layout parameters.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        self.with_metrics(|metrics| metrics.column_widths.clone())
    }

    /// Row heights at the current layout parameters.
    #[must_use]
    pub fn row_heights(&self) -> Vec<usize> {
        self.with_metrics(|metrics| metrics.row_heights.clone())
    }

    /// Run `f` over the derived metrics, computing them if stale.
    pub fn with_metrics<R>(&self, f: impl FnOnce(&GridMetrics) -> R) -> R {
        if let Some(metrics) = self.metrics.borrow().as_ref() {
            return f(metrics);
        }
        let metrics = self.compute_metrics();
        let result = f(&metrics);
        *self.metrics.borrow_mut() = Some(metrics);
        result
    }

    fn columns_width(&self) -> usize {
        self.with_metrics(|metrics| metrics.column_widths.iter().sum())
    }

    fn compute_metrics(&self) -> GridMetrics {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "grid_layout",
            rows = self.rows.len(),
            columns = self.column_count,
            requested = ?self.requested_width()
        )
        .entered();

        let column_widths = negotiate_column_widths(&self.column_bounds(), self.requested_width());
        let last = self.column_count.saturating_sub(1);
        let fill = self.fill();
        for cells in &self.rows {
            for (column, (cell, width)) in cells.iter().zip(&column_widths).enumerate() {
                cell.apply_layout(column != last || fill, Some(*width));
            }
        }
        let row_heights = self
            .rows
            .iter()
            .map(|cells| cells.iter().map(BlockLayout::height).max().unwrap_or(0))
            .collect();

        GridMetrics {
            column_widths,
            row_heights,
        }
    }
}

/// Split `requested` columns across columns with the given bounds.
///
/// `None` gives every column its maximum. See the [module docs](self) for
/// the allocation order.
#[must_use]
pub fn negotiate_column_widths(bounds: &[Measurement], requested: Option<usize>) -> Vec<usize> {
    let Some(available) = requested else {
        return bounds.iter().map(|bound| bound.maximum).collect();
    };

    let mut widths = vec![0; bounds.len()];
    let mut budget = available;
    let mut variable = Vec::new();
    for (column, bound) in bounds.iter().enumerate() {
        if bound.is_fixed() {
            widths[column] = bound.maximum;
            budget = budget.saturating_sub(bound.maximum);
        } else {
            variable.push(column);
        }
    }

    // An exhausted budget leaves a zero share, so later columns get their
    // minimum.
    let mut remaining = variable.len();
    for column in variable {
        let bound = bounds[column];
        let share = budget / remaining;
        let width = share.max(bound.minimum).min(bound.maximum);
        #[cfg(feature = "tracing")]
        tracing::trace!(column, share, width, "column width assigned");
        widths[column] = width;
        budget = budget.saturating_sub(width);
        remaining -= 1;
    }

    widths
}

impl BlockLayout for GridBlock {
    fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    fn raw_width(&self) -> usize {
        self.column_bounds().iter().map(|bound| bound.maximum).sum()
    }

    fn min_width(&self) -> usize {
        self.column_bounds().iter().map(|bound| bound.minimum).sum()
    }

    fn height(&self) -> usize {
        self.with_metrics(|metrics| metrics.row_heights.iter().sum())
    }

    fn visible_width(&self) -> usize {
        let columns = self.columns_width();
        if self.fill() {
            columns.max(self.requested_width().unwrap_or(0))
        } else {
            columns
        }
    }

    fn invalidate(&self) {
        self.metrics.borrow_mut().take();
    }

    fn append_line_content_to(&self, out: &mut String, line: usize, with_styles: bool) {
        let row_heights = self.row_heights();
        let mut local = line;
        for (cells, height) in self.rows.iter().zip(row_heights) {
            if local < height {
                for cell in cells {
                    cell.append_line_content_to(out, local, with_styles);
                }
                if self.fill() {
                    push_spaces(out, self.visible_width() - self.columns_width());
                }
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

    fn text(s: &str) -> Block {
        ParagraphBlock::from_text(Alignment::Left, s).into()
    }

    fn render(block: &GridBlock) -> String {
        let mut out = String::new();
        block.append_lines_to(&mut out, false, "\n");
        out
    }

    #[test]
    fn empty_grid_has_no_geometry() {
        let grid = GridBlock::new();
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), 0);
        assert_eq!(grid.height(), 0);
        assert_eq!(grid.visible_width(), 0);
        assert_eq!(render(&grid), "");
    }

    #[test]
    fn sparse_cells_grow_dense_storage() {
        let mut grid = GridBlock::new();
        grid.set_cell(2, 1, text("x"));
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.cell(0, 0).map(BlockLayout::height), Some(0));
        assert!(grid.cell(3, 0).is_none());
        grid.set_cell(0, 3, text("y"));
        assert_eq!(grid.column_count(), 4);
        assert!(grid.cell(2, 3).is_some());
    }

    #[test]
    fn unconstrained_columns_get_raw_width() {
        let grid = GridBlock::from_rows(vec![
            vec![text("a"), text("bbb")],
            vec![text("cc"), text("d")],
        ]);
        assert_eq!(grid.column_widths(), vec![2, 3]);
        assert_eq!(render(&grid), "a bbb\nccd\n");
    }

    #[test]
    fn last_column_follows_grid_fill() {
        let mut grid = GridBlock::from_rows(vec![
            vec![text("a"), text("bbb")],
            vec![text("cc"), text("d")],
        ]);
        grid.set_fill(true);
        assert_eq!(render(&grid), "a bbb\nccd  \n");
    }

    #[test]
    fn fixed_columns_taken_first() {
        let bounds = [
            Measurement::new(3, 3),
            Measurement::new(2, 10),
            Measurement::new(2, 10),
        ];
        assert_eq!(negotiate_column_widths(&bounds, Some(13)), vec![3, 5, 5]);
    }

    #[test]
    fn shares_clamped_to_bounds() {
        let bounds = [Measurement::new(1, 2), Measurement::new(1, 20)];
        // First column capped at 2, leaving 18 for the second.
        assert_eq!(negotiate_column_widths(&bounds, Some(20)), vec![2, 18]);
    }

    #[test]
    fn allocation_is_order_dependent() {
        let bounds = [Measurement::new(0, 8), Measurement::new(10, 12)];
        // 10 / 2 = 5 goes to the first column before the second's minimum
        // of 10 is considered, so the total overshoots.
        assert_eq!(negotiate_column_widths(&bounds, Some(10)), vec![5, 10]);
        let swapped = [Measurement::new(10, 12), Measurement::new(0, 8)];
        assert_eq!(negotiate_column_widths(&swapped, Some(10)), vec![10, 0]);
    }

    #[test]
    fn negative_budget_falls_back_to_minimums() {
        let bounds = [Measurement::new(4, 4), Measurement::new(2, 9)];
        assert_eq!(negotiate_column_widths(&bounds, Some(1)), vec![4, 2]);
    }

    #[test]
    fn huge_budget_gives_every_column_its_maximum() {
        let bounds = [Measurement::new(1, 5), Measurement::new(1, 7)];
        assert_eq!(negotiate_column_widths(&bounds, Some(usize::MAX)), vec![5, 7]);
        assert_eq!(negotiate_column_widths(&bounds, Some(1 << 63)), vec![5, 7]);
        let with_fixed = [Measurement::new(usize::MAX, usize::MAX), Measurement::new(0, 3)];
        assert_eq!(
            negotiate_column_widths(&with_fixed, Some(1 << 63)),
            vec![usize::MAX, 0]
        );
    }

    #[test]
    fn unconstrained_negotiation() {
        let bounds = [Measurement::new(1, 4), Measurement::new(2, 2)];
        assert_eq!(negotiate_column_widths(&bounds, None), vec![4, 2]);
    }

    #[test]
    fn constrained_grid_wraps_cells() {
        let mut grid = GridBlock::from_rows(vec![vec![
            PreformattedBlock::new(["- "]).into(),
            text("alpha beta gamma"),
        ]]);
        grid.set_requested_width(Some(12));
        assert_eq!(grid.column_widths(), vec![2, 10]);
        assert_eq!(grid.row_heights(), vec![2]);
        assert_eq!(render(&grid), "- alpha beta\n  gamma\n");
    }

    #[test]
    fn geometry_sums_columns_and_rows() {
        let grid = GridBlock::from_rows(vec![
            vec![text("ab cd"), text("x")],
            vec![text("e"), text("yyyy zz")],
        ]);
        assert_eq!(grid.raw_width(), 12);
        assert_eq!(grid.min_width(), 6);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.visible_width(), 12);
    }

    #[test]
    fn cells_receive_column_width_and_fill() {
        let grid = GridBlock::from_rows(vec![vec![text("a"), text("b")]]);
        let _ = grid.height();
        let first = grid.cell(0, 0).map(|c| (c.fill(), c.requested_width()));
        let last = grid.cell(0, 1).map(|c| (c.fill(), c.requested_width()));
        assert_eq!(first, Some((true, Some(1))));
        assert_eq!(last, Some((false, Some(1))));
    }

    #[test]
    fn metrics_recomputed_after_width_change() {
        let mut grid = GridBlock::from_rows(vec![vec![text("one two three")]]);
        assert_eq!(grid.height(), 1);
        grid.set_requested_width(Some(5));
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.height(), 3);
        grid.set_requested_width(None);
        assert_eq!(grid.height(), 1);
    }

    #[test]
    fn short_cells_padded_within_row() {
        let grid = GridBlock::from_rows(vec![vec![
            PreformattedBlock::new(["a"]).into(),
            PreformattedBlock::new(["b1", "b2"]).into(),
        ]]);
        assert_eq!(render(&grid), "ab1\n b2\n");
    }

    #[test]
    fn filler_columns_repeat_on_every_line() {
        let grid = GridBlock::from_rows(vec![vec![
            FillerBlock::from_char('|').into(),
            PreformattedBlock::new(["x", "y"]).into(),
        ]]);
        assert_eq!(render(&grid), "|x\n|y\n");
    }

    #[test]
    fn filling_grid_pads_to_requested_width() {
        let mut grid = GridBlock::from_rows(vec![
            vec![PreformattedBlock::new(["• "]).into(), text("ab")],
            vec![PreformattedBlock::new(["• "]).into(), text("c")],
        ]);
        grid.set_requested_width(Some(6));
        assert_eq!(grid.visible_width(), 4);
        assert_eq!(render(&grid), "• ab\n• c\n");
        grid.set_fill(true);
        assert_eq!(grid.column_widths(), vec![2, 2]);
        assert_eq!(grid.visible_width(), 6);
        assert_eq!(render(&grid), "• ab  \n• c   \n");
    }

    #[test]
    fn nested_grid_keeps_table_frame_aligned() {
        let inner = GridBlock::from_rows(vec![vec![
            PreformattedBlock::new(["• "]).into(),
            text("ab"),
        ]]);
        let table = GridBlock::from_rows(vec![
            vec![inner.into(), text("x")],
            vec![text("longer cell"), text("y")],
        ])
        .into_table(true);
        assert_eq!(
            render(&table),
            concat!(
                "┌───────────┬─┐\n",
                "│• ab       │x│\n",
                "├───────────┼─┤\n",
                "│longer cell│y│\n",
                "└───────────┴─┘\n",
            )
        );
    }

    #[test]
    fn nested_grid_gets_cell_width() {
        let inner = GridBlock::from_rows(vec![vec![text("aa bb"), text("cc")]]);
        let mut outer = GridBlock::from_rows(vec![vec![inner.into()]]);
        outer.set_requested_width(Some(4));
        assert_eq!(render(&outer), "aacc\nbb\n");
    }
}
