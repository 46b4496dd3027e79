//! Collision module - pure placement checks against the board
//!
//! A piece collides when any filled cell lands outside the side walls, at or
//! below the floor, or on an occupied cell. Cells above the top row are free,
//! so pieces may hang partially off-screen while spawning or rotating.

use crate::board::Board;
use crate::controller::Piece;
use crate::pieces::Shape;

/// Check a shape anchored at (x, y) against the board
pub fn collides_at(shape: &Shape, x: i16, y: i16, board: &Board) -> bool {
    shape
        .filled()
        .any(|(dx, dy, _)| board.is_occupied(x + dx, y + dy))
}

/// Check whether the piece overlaps the board or leaves its bounds
pub fn collides(piece: &Piece, board: &Board) -> bool {
    collides_at(&piece.shape, piece.x, piece.y, board)
}

/// Negation of [`collides`]
pub fn fits(piece: &Piece, board: &Board) -> bool {
    !collides(piece, board)
}

/// Lowest y the piece reaches by falling straight down from its position
///
/// Returns the current y if the piece cannot descend at all.
pub fn landing_y(piece: &Piece, board: &Board) -> i16 {
    let mut y = piece.y;
    while !collides_at(&piece.shape, piece.x, y + 1, board) {
        y += 1;
    }
    y
}
