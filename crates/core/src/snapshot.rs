use serde::Serialize;

use crate::controller::Piece;
use crate::pieces::Shape;
use crate::session::SessionState;
use crate::types::{Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
    pub x: i16,
    pub y: i16,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color(),
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSnapshot {
    pub kind: PieceKind,
    pub color: Color,
    pub shape: Shape,
}

impl From<Piece> for PreviewSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color(),
            shape: value.shape,
        }
    }
}

/// Read-only view of a session for presentation layers
///
/// `board` holds locked cells only; use [`GameSnapshot::composited`] for the
/// board with the active piece drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub board: Vec<Vec<Cell>>,
    pub active: Option<PieceSnapshot>,
    pub ghost_y: Option<i16>,
    pub next: PreviewSnapshot,
    pub score: u32,
    /// Total cleared lines
    pub lines: u32,
    pub level: u32,
    pub gravity_interval_ms: u32,
    pub state: SessionState,
    pub paused: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Board rows with the active piece overlaid
    pub fn composited(&self) -> Vec<Vec<Cell>> {
        let mut rows = self.board.clone();
        if let Some(active) = &self.active {
            for (dx, dy, color) in active.shape.filled() {
                let x = active.x + dx;
                let y = active.y + dy;
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(cell) = rows
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    *cell = Cell::Occupied(color);
                }
            }
        }
        rows
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let next = Piece::at_spawn(PieceKind::I, BOARD_WIDTH);
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![vec![Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PreviewSnapshot::from(next),
            score: 0,
            lines: 0,
            level: 0,
            gravity_interval_ms: 0,
            state: SessionState::Ready,
            paused: false,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
        }
    }
}
