//! Controller module - active piece transitions
//!
//! Pure functions that take a piece and the board and return the proposed
//! next piece plus whether the transition was legal. The session decides what
//! a rejected transition means (a blocked downward move is a landing).
//!
//! Per-piece lifecycle: spawn -> active (move / rotate / drop) -> lock.

use log::trace;

use crate::board::Board;
use crate::collision::{collides, collides_at, landing_y};
use crate::pieces::{shape_for, Shape};
use crate::types::{Color, PieceKind, KICK_OFFSETS};

/// A piece on (or above) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Column of the shape's top-left anchor
    pub x: i16,
    /// Row of the shape's top-left anchor
    pub y: i16,
}

impl Piece {
    /// Piece in spawn orientation, centered horizontally at y = 0
    pub fn at_spawn(kind: PieceKind, board_width: u8) -> Self {
        let shape = shape_for(kind);
        Self {
            kind,
            shape,
            x: (board_width / 2) as i16 - (shape.cols() / 2) as i16,
            y: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    pub fn translated(&self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy, _)| (self.x + dx, self.y + dy))
    }
}

/// Result of placing the next piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub piece: Piece,
    /// The spawn position already collides (top-out)
    pub collided: bool,
}

/// Result of a translation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moved {
    pub piece: Piece,
    pub moved: bool,
}

/// Result of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    pub piece: Piece,
    pub rotated: bool,
    /// Horizontal kick that made the rotation fit (0 when not rotated)
    pub kick: i16,
}

/// Result of locking a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lock {
    pub lines_cleared: u8,
    /// Some cell was above the visible board when the piece locked
    pub topped_out: bool,
}

/// Bring the next piece onto the board
pub fn spawn(next: Piece, board: &Board) -> Spawn {
    Spawn {
        piece: next,
        collided: collides(&next, board),
    }
}

/// Try to translate the piece by (dx, dy)
///
/// A rejected move returns the original piece. When a downward move is
/// rejected the piece has landed and the caller must lock it.
pub fn try_move(piece: &Piece, board: &Board, dx: i16, dy: i16) -> Moved {
    let proposed = piece.translated(dx, dy);
    if collides(&proposed, board) {
        Moved {
            piece: *piece,
            moved: false,
        }
    } else {
        Moved {
            piece: proposed,
            moved: true,
        }
    }
}

/// Try to rotate the piece 90° clockwise with horizontal wall kicks
///
/// Offsets `[0, +1, -1, +2, -2]` are tried in order and the first that fits
/// wins. If none fit, the original piece is returned unchanged.
pub fn try_rotate(piece: &Piece, board: &Board) -> Rotated {
    let shape = piece.shape.rotated_cw();

    for &kick in KICK_OFFSETS.iter() {
        let x = piece.x + kick;
        if !collides_at(&shape, x, piece.y, board) {
            if kick != 0 {
                trace!("rotation of {:?} kicked by {}", piece.kind, kick);
            }
            return Rotated {
                piece: Piece { shape, x, ..*piece },
                rotated: true,
                kick,
            };
        }
    }

    Rotated {
        piece: *piece,
        rotated: false,
        kick: 0,
    }
}

/// Move the piece to its lowest legal position
///
/// Returns the dropped piece and the number of rows it descended. The caller
/// must lock it immediately.
pub fn hard_drop(piece: &Piece, board: &Board) -> (Piece, u8) {
    let y = landing_y(piece, board);
    let rows = (y - piece.y).clamp(0, u8::MAX as i16) as u8;
    (Piece { y, ..*piece }, rows)
}

/// Merge the piece into the board and clear completed rows
///
/// Cells above the top are not written and flag a top-out, but the remaining
/// cells are still merged and rows still cleared.
pub fn lock(piece: &Piece, board: &mut Board) -> Lock {
    let merged = board.merge(&piece.shape, piece.x, piece.y);
    let cleared = board.clear_full_rows();
    Lock {
        lines_cleared: cleared.min(u8::MAX as usize) as u8,
        topped_out: merged.topped_out,
    }
}
