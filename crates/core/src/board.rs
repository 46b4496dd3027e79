//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (10x20 by default) where each cell is
//! empty or holds the color of a locked piece. Cells are stored in a flat
//! row-major vector for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom;
//! row 0 is the top. Negative y is the hidden area above the board.

use crate::pieces::Shape;
use crate::types::Cell;

/// Result of merging a shape into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Cells written into the board
    pub written: u8,
    /// At least one filled cell landed above row 0
    pub topped_out: bool,
}

/// The game board using flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position blocks a piece cell
    ///
    /// Columns outside the board and rows at or below the floor block.
    /// Rows above the top (y < 0) never block.
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        if x < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.get(x, y).is_some_and(|cell| cell.is_occupied())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_occupied()))
    }

    /// Check if a row has no filled cells
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_empty()))
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // chunks_exact panics on 0; an empty board has no rows either way.
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Clear all full rows and return how many were removed
    ///
    /// Remaining rows keep their relative order and settle at the bottom;
    /// the freed rows at the top become empty. Uses a two-pointer pass from
    /// the bottom so non-contiguous full rows are handled in one sweep.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = Cell::Empty;
        }

        cleared
    }

    /// Copy the filled cells of `shape` anchored at (x, y) into the board
    ///
    /// Cells below row 0 that are in bounds are written with their color.
    /// Cells above row 0 are not written and flag a top-out instead.
    /// Callers are expected to have checked collision first; cells that fall
    /// outside the board horizontally or below the floor are skipped.
    pub fn merge(&mut self, shape: &Shape, x: i16, y: i16) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        for (dx, dy, color) in shape.filled() {
            let px = x + dx;
            let py = y + dy;
            if py < 0 {
                outcome.topped_out = true;
                continue;
            }
            if self.set(px, py, Cell::Occupied(color)) {
                outcome.written += 1;
            }
        }

        outcome
    }

    /// Number of occupied cells on the board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy rows into `out`, reusing its allocations
    pub fn write_rows(&self, out: &mut Vec<Vec<Cell>>) {
        let height = self.height as usize;
        out.truncate(height);
        for (y, row) in self.rows().enumerate().take(height) {
            match out.get_mut(y) {
                Some(dst) => {
                    dst.clear();
                    dst.extend_from_slice(row);
                }
                None => out.push(row.to_vec()),
            }
        }
    }

    /// Convert to rows for display or testing
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let mut out = Vec::with_capacity(self.height as usize);
        self.write_rows(&mut out);
        out
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::Empty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::shape_for;
    use crate::types::{Color, PieceKind};

    fn fill_row(board: &mut Board, y: i16) {
        for x in 0..board.width() as i16 {
            board.set(x, y, Cell::Occupied(Color::Cyan));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_is_occupied_bounds() {
        let board = Board::new(10, 20);
        assert!(board.is_occupied(-1, 5));
        assert!(board.is_occupied(10, 5));
        assert!(board.is_occupied(3, 20));
        // Hidden rows above the top never block
        assert!(!board.is_occupied(3, -1));
        assert!(!board.is_occupied(3, -4));
        assert!(!board.is_occupied(3, 0));
    }

    #[test]
    fn test_is_occupied_filled_cell() {
        let mut board = Board::new(10, 20);
        board.set(4, 7, Cell::Occupied(Color::Red));
        assert!(board.is_occupied(4, 7));
        assert!(!board.is_occupied(5, 7));
    }

    #[test]
    fn test_clear_single_bottom_row() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 19);
        board.set(0, 18, Cell::Occupied(Color::Blue));

        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.get(0, 19), Some(Cell::Occupied(Color::Blue)));
        assert!(board.is_row_empty(18));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = Board::new(10, 20);
        board.set(2, 19, Cell::Occupied(Color::Blue));
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_adjacent_rows() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 18);
        fill_row(&mut board, 19);
        board.set(7, 17, Cell::Occupied(Color::Green));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.get(7, 19), Some(Cell::Occupied(Color::Green)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_merge_writes_color() {
        let mut board = Board::new(10, 20);
        let outcome = board.merge(&shape_for(PieceKind::O), 4, 18);
        assert_eq!(outcome.written, 4);
        assert!(!outcome.topped_out);
        assert_eq!(board.get(4, 18), Some(Cell::Occupied(Color::Yellow)));
        assert_eq!(board.get(5, 19), Some(Cell::Occupied(Color::Yellow)));
    }

    #[test]
    fn test_merge_above_top_flags_top_out() {
        let mut board = Board::new(10, 20);
        // O piece with its upper row at y = -1
        let outcome = board.merge(&shape_for(PieceKind::O), 4, -1);
        assert!(outcome.topped_out);
        assert_eq!(outcome.written, 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(5, 0));
    }

    #[test]
    fn test_rows_and_write_rows() {
        let mut board = Board::new(3, 2);
        board.set(1, 1, Cell::Occupied(Color::Red));
        assert_eq!(board.rows().count(), 2);

        let mut out = vec![vec![Cell::Occupied(Color::Blue); 5]; 4];
        board.write_rows(&mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], vec![Cell::Empty; 3]);
        assert_eq!(
            out[1],
            vec![Cell::Empty, Cell::Occupied(Color::Red), Cell::Empty]
        );
    }

    #[test]
    fn test_clear_board() {
        let mut board = Board::new(10, 20);
        fill_row(&mut board, 10);
        board.clear();
        assert_eq!(board.filled_count(), 0);
    }
}
