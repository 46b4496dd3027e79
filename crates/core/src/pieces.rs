//! Pieces module - tetromino catalog and matrix rotation
//!
//! Each tetromino is a small rectangular occupancy matrix whose filled cells
//! carry the piece's color. Rotation is a plain 90° clockwise matrix rotation;
//! an N×M shape becomes M×N.

use serde::{Serialize, Serializer};

use crate::types::{Cell, Color, PieceKind};

/// Largest side of any shape matrix
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupancy matrix of a piece, at most 4x4
///
/// Cells outside `rows x cols` are always `Cell::Empty`, so two shapes compare
/// equal exactly when their visible matrices match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[Cell; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a 0/1 mask, painting filled cells with `color`
    ///
    /// Returns `None` if the mask is empty, ragged, or larger than 4x4.
    pub fn from_mask(mask: &[&[u8]], color: Color) -> Option<Self> {
        let rows = mask.len();
        let cols = mask.first().map_or(0, |r| r.len());
        if rows == 0 || cols == 0 || rows > MAX_SHAPE_DIM || cols > MAX_SHAPE_DIM {
            return None;
        }
        if mask.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self::paint(mask, color))
    }

    fn paint(mask: &[&[u8]], color: Color) -> Self {
        let mut cells = [[Cell::Empty; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in mask.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v != 0 {
                    cells[r][c] = Cell::Occupied(color);
                }
            }
        }

        Self {
            rows: mask.len() as u8,
            cols: mask[0].len() as u8,
            cells,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Cell at (row, col); `Cell::Empty` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= self.rows as usize || col >= self.cols as usize {
            return Cell::Empty;
        }
        self.cells[row][col]
    }

    /// Filled cells as `(col, row, color)` offsets from the top-left anchor
    pub fn filled(&self) -> impl Iterator<Item = (i16, i16, Color)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize).filter_map(move |c| {
                self.cells[r][c]
                    .color()
                    .map(|color| (c as i16, r as i16, color))
            })
        })
    }

    /// Number of filled cells (4 for every catalog shape)
    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }

    /// Rotate 90° clockwise: `new[c][r] = old[rows - 1 - r][c]`
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[Cell::Empty; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for c in 0..cols {
            for r in 0..rows {
                cells[c][r] = self.cells[rows - 1 - r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Visible matrix as rows of cells
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.rows as usize)
            .map(|r| self.cells[r][..self.cols as usize].to_vec())
            .collect()
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

const I_MASK: &[&[u8]] = &[&[1, 1, 1, 1]];
const J_MASK: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const L_MASK: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];
const O_MASK: &[&[u8]] = &[&[1, 1], &[1, 1]];
const S_MASK: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const T_MASK: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const Z_MASK: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];

fn mask_for(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => I_MASK,
        PieceKind::J => J_MASK,
        PieceKind::L => L_MASK,
        PieceKind::O => O_MASK,
        PieceKind::S => S_MASK,
        PieceKind::T => T_MASK,
        PieceKind::Z => Z_MASK,
    }
}

/// Spawn-orientation shape for a piece kind
pub fn shape_for(kind: PieceKind) -> Shape {
    Shape::paint(mask_for(kind), kind.color())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            let shape = shape_for(kind);
            assert_eq!(shape.filled_count(), 4, "{:?}", kind);
            assert!(shape.filled().all(|(_, _, color)| color == kind.color()));
        }
    }

    #[test]
    fn test_catalog_dimensions() {
        assert_eq!((shape_for(PieceKind::I).rows(), shape_for(PieceKind::I).cols()), (1, 4));
        assert_eq!((shape_for(PieceKind::O).rows(), shape_for(PieceKind::O).cols()), (2, 2));
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            let shape = shape_for(kind);
            assert_eq!((shape.rows(), shape.cols()), (2, 3), "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_t() {
        // 0 1 0      1 0
        // 1 1 1  ->  1 1
        //            1 0
        let rotated = shape_for(PieceKind::T).rotated_cw();
        let expected =
            Shape::from_mask(&[&[1, 0], &[1, 1], &[1, 0]], Color::Purple).unwrap();
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_rotate_i_transposes() {
        let rotated = shape_for(PieceKind::I).rotated_cw();
        assert_eq!((rotated.rows(), rotated.cols()), (4, 1));
        assert_eq!(rotated.filled_count(), 4);
    }

    #[test]
    fn test_rotate_l() {
        // 0 0 1      1 0
        // 1 1 1  ->  1 0
        //            1 1
        let rotated = shape_for(PieceKind::L).rotated_cw();
        let expected =
            Shape::from_mask(&[&[1, 0], &[1, 0], &[1, 1]], Color::Orange).unwrap();
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_four_rotations_identity() {
        for kind in PieceKind::ALL {
            let shape = shape_for(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_from_mask_rejects_bad_input() {
        assert!(Shape::from_mask(&[], Color::Red).is_none());
        assert!(Shape::from_mask(&[&[1, 1], &[1]], Color::Red).is_none());
        assert!(Shape::from_mask(&[&[1, 1, 1, 1, 1]], Color::Red).is_none());
    }

    #[test]
    fn test_get_outside_matrix_is_empty() {
        let shape = shape_for(PieceKind::O);
        assert_eq!(shape.get(3, 3), Cell::Empty);
        assert!(shape.get(1, 1).is_occupied());
    }
}
