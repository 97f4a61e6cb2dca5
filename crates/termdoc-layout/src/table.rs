#![forbid(unsafe_code)]

//! Turning grids into tables.

use crate::filler::FillerBlock;
use crate::grid::GridBlock;

/// Characters used to frame a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    pub top_left: char,
    pub top_tee: char,
    pub top_right: char,
    pub left_tee: char,
    pub cross: char,
    pub right_tee: char,
    pub bottom_left: char,
    pub bottom_tee: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxChars {
    /// Light box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_tee: '┬',
        top_right: '┐',
        left_tee: '├',
        cross: '┼',
        right_tee: '┤',
        bottom_left: '└',
        bottom_tee: '┴',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// ASCII-only frame.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_tee: '+',
        top_right: '+',
        left_tee: '+',
        cross: '+',
        right_tee: '+',
        bottom_left: '+',
        bottom_tee: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl GridBlock {
    /// Convert into a table framed with [`BoxChars::SQUARE`].
    ///
    /// See [`into_table_with`](Self::into_table_with).
    #[must_use]
    pub fn into_table(self, decorated: bool) -> GridBlock {
        self.into_table_with(decorated, &BoxChars::SQUARE)
    }

    /// Convert into a table.
    ///
    /// Decorated, an `R`x`C` grid becomes `R + 3` rows by `2C + 1` columns:
    /// a top border, row 0, a separator under it, the remaining rows and a
    /// bottom border, with vertical bars between and around the columns.
    /// Undecorated, it stays `R` rows with a one-space column between
    /// neighbouring cells. A grid with no rows or no columns gives an empty
    /// grid.
    #[must_use]
    pub fn into_table_with(self, decorated: bool, chars: &BoxChars) -> GridBlock {
        let columns = self.column_count();
        let rows = self.into_rows();
        let mut table = GridBlock::new();
        if rows.is_empty() || columns == 0 {
            return table;
        }

        if !decorated {
            for (r, cells) in rows.into_iter().enumerate() {
                for (c, cell) in cells.into_iter().enumerate() {
                    if c > 0 {
                        table.set_cell(r, 2 * c - 1, FillerBlock::new(" "));
                    }
                    table.set_cell(r, 2 * c, cell);
                }
            }
            return table;
        }

        let last_row = rows.len() + 2;
        set_border_row(&mut table, 0, columns, chars.top_left, chars.top_tee, chars.top_right, chars);
        set_border_row(&mut table, 2, columns, chars.left_tee, chars.cross, chars.right_tee, chars);
        set_border_row(
            &mut table,
            last_row,
            columns,
            chars.bottom_left,
            chars.bottom_tee,
            chars.bottom_right,
            chars,
        );
        for (r, cells) in rows.into_iter().enumerate() {
            let row = if r == 0 { 1 } else { r + 2 };
            for (c, cell) in cells.into_iter().enumerate() {
                table.set_cell(row, 2 * c, FillerBlock::from_char(chars.vertical));
                table.set_cell(row, 2 * c + 1, cell);
            }
            table.set_cell(row, 2 * columns, FillerBlock::from_char(chars.vertical));
        }
        table
    }
}

fn set_border_row(
    table: &mut GridBlock,
    row: usize,
    columns: usize,
    left: char,
    junction: char,
    right: char,
    chars: &BoxChars,
) {
    for c in 0..=columns {
        let corner = match c {
            0 => left,
            c if c == columns => right,
            _ => junction,
        };
        table.set_cell(row, 2 * c, FillerBlock::from_char(corner));
        if c < columns {
            table.set_cell(row, 2 * c + 1, FillerBlock::from_char(chars.horizontal));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::layout::BlockLayout;
    use crate::paragraph::{Alignment, ParagraphBlock};

    fn text(s: &str) -> Block {
        ParagraphBlock::from_text(Alignment::Left, s).into()
    }

    fn grid(cells: &[&[&str]]) -> GridBlock {
        GridBlock::from_rows(
            cells
                .iter()
                .map(|row| row.iter().map(|s| text(s)).collect())
                .collect(),
        )
    }

    fn render(block: &GridBlock) -> String {
        let mut out = String::new();
        block.append_lines_to(&mut out, false, "\n");
        out
    }

    #[test]
    fn decorated_two_by_two() {
        let table = grid(&[&["a", "b"], &["c", "d"]]).into_table(true);
        assert_eq!(render(&table), "┌─┬─┐\n│a│b│\n├─┼─┤\n│c│d│\n└─┴─┘\n");
    }

    #[test]
    fn decorated_shape() {
        let table = grid(&[&["a", "b", "c"], &["d", "e", "f"], &["g", "h", "i"]]).into_table(true);
        assert_eq!(table.row_count(), 6);
        assert_eq!(table.column_count(), 7);
        assert_eq!(table.height(), 6);
    }

    #[test]
    fn single_row_still_has_separator() {
        let table = grid(&[&["x"]]).into_table(true);
        assert_eq!(render(&table), "┌─┐\n│x│\n├─┤\n└─┘\n");
    }

    #[test]
    fn ascii_frame() {
        let table = grid(&[&["ab", "c"]]).into_table_with(true, &BoxChars::ASCII);
        assert_eq!(render(&table), "+--+-+\n|ab|c|\n+--+-+\n+--+-+\n");
    }

    #[test]
    fn borders_stretch_with_wrapped_cells() {
        let mut table = grid(&[&["head", "h"], &["one two", "x"]]).into_table(true);
        table.set_requested_width(Some(9));
        assert_eq!(
            render(&table),
            "┌─────┬─┐\n│head │h│\n├─────┼─┤\n│one  │x│\n│two  │ │\n└─────┴─┘\n"
        );
    }

    #[test]
    fn undecorated_interleaves_spaces() {
        let table = grid(&[&["a", "bb"], &["ccc", "d"]]).into_table(false);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.height(), 2);
        assert_eq!(render(&table), "a   bb\nccc d\n");
    }

    #[test]
    fn undecorated_preserves_cell_order() {
        let table = grid(&[&["1", "2", "3"], &["4", "5", "6"]]).into_table(false);
        let mut seen = Vec::new();
        for r in 0..table.row_count() {
            for c in (0..table.column_count()).step_by(2) {
                if let Some(Block::Paragraph(p)) = table.cell(r, c) {
                    seen.push(p.content().to_plain_text());
                }
            }
        }
        assert_eq!(seen, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn empty_grid_gives_empty_table() {
        let table = GridBlock::new().into_table(true);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.height(), 0);
        assert_eq!(render(&table), "");
    }
}
