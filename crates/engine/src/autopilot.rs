//! Autopilot - greedy one-piece placement search
//!
//! For the active piece, every reachable rotation and column is simulated
//! with the same controller functions the session uses, locked on a scratch
//! board and scored with a linear board heuristic. The winning placement is
//! replayed as plain commands, so it lands exactly where it was evaluated.

use std::iter;

use blockfall_core::board::Board;
use blockfall_core::controller::{self, Piece};
use blockfall_core::Session;
use blockfall_types::Command;

/// Heuristic weights (x100), applied to the board after the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub lines: i32,
    pub aggregate_height: i32,
    pub holes: i32,
    pub bumpiness: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            lines: 76,
            aggregate_height: -51,
            holes: -36,
            bumpiness: -18,
        }
    }
}

/// Board features used by the heuristic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl Features {
    pub fn of(board: &Board) -> Self {
        let height = board.height() as i16;
        let mut features = Features::default();
        let mut prev_height: Option<u32> = None;

        for x in 0..board.width() as i16 {
            let mut column_height = 0u32;
            for y in 0..height {
                let filled = board.is_occupied(x, y);
                if filled && column_height == 0 {
                    column_height = (height - y) as u32;
                } else if !filled && column_height > 0 {
                    features.holes += 1;
                }
            }

            features.aggregate_height += column_height;
            if let Some(prev) = prev_height {
                features.bumpiness += prev.abs_diff(column_height);
            }
            prev_height = Some(column_height);
        }

        features
    }
}

/// A target for the active piece, relative to where it is now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rotations: u8,
    /// Columns to move; negative is left
    pub shift: i16,
    pub lines: u8,
    pub score: i32,
}

impl Placement {
    /// Commands that carry the piece to this placement and drop it
    pub fn commands(&self) -> impl Iterator<Item = Command> {
        let step = if self.shift < 0 {
            Command::MoveLeft
        } else {
            Command::MoveRight
        };
        iter::repeat(Command::RotateCw)
            .take(self.rotations as usize)
            .chain(iter::repeat(step).take(self.shift.unsigned_abs() as usize))
            .chain(iter::once(Command::HardDrop))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot {
    weights: Weights,
}

impl Autopilot {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    /// Score a board after a lock that cleared `lines`
    pub fn evaluate(&self, board: &Board, lines: u8) -> i32 {
        let f = Features::of(board);
        self.weights.lines * lines as i32
            + self.weights.aggregate_height * f.aggregate_height as i32
            + self.weights.holes * f.holes as i32
            + self.weights.bumpiness * f.bumpiness as i32
    }

    /// Best placement for the session's active piece
    ///
    /// Returns `None` when there is no active piece. Ties keep the first
    /// candidate found (fewest rotations, then smallest shift to the left).
    pub fn plan(&self, session: &Session) -> Option<Placement> {
        let mut piece = session.active()?;
        let board = session.board();
        let mut best: Option<Placement> = None;

        for rotations in 0..4u8 {
            if rotations > 0 {
                let turn = controller::try_rotate(&piece, board);
                if !turn.rotated {
                    break;
                }
                piece = turn.piece;
            }

            self.consider(&piece, board, rotations, 0, &mut best);
            for dx in [-1i16, 1] {
                let mut shifted = piece;
                let mut shift = 0i16;
                loop {
                    let step = controller::try_move(&shifted, board, dx, 0);
                    if !step.moved {
                        break;
                    }
                    shifted = step.piece;
                    shift += dx;
                    self.consider(&shifted, board, rotations, shift, &mut best);
                }
            }
        }

        best
    }

    fn consider(
        &self,
        piece: &Piece,
        board: &Board,
        rotations: u8,
        shift: i16,
        best: &mut Option<Placement>,
    ) {
        let (dropped, _) = controller::hard_drop(piece, board);
        let mut scratch = board.clone();
        let lock = controller::lock(&dropped, &mut scratch);

        let score = if lock.topped_out {
            i32::MIN
        } else {
            self.evaluate(&scratch, lock.lines_cleared)
        };

        if best.map_or(true, |b| score > b.score) {
            *best = Some(Placement {
                rotations,
                shift,
                lines: lock.lines_cleared,
                score,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_core::{GameConfig, PieceRule};
    use blockfall_types::{Cell, Color, PieceKind};

    #[test]
    fn test_features() {
        let mut board = Board::new(4, 4);
        board.set(0, 3, Cell::Occupied(Color::Red));
        board.set(1, 1, Cell::Occupied(Color::Red));
        // column 1: height 3 with two holes beneath
        let f = Features::of(&board);
        assert_eq!(f.aggregate_height, 1 + 3);
        assert_eq!(f.holes, 2);
        assert_eq!(f.bumpiness, 2 + 3);
    }

    #[test]
    fn test_commands_sequence() {
        let placement = Placement {
            rotations: 1,
            shift: -2,
            lines: 0,
            score: 0,
        };
        let commands: Vec<Command> = placement.commands().collect();
        assert_eq!(
            commands,
            vec![
                Command::RotateCw,
                Command::MoveLeft,
                Command::MoveLeft,
                Command::HardDrop
            ]
        );
    }

    #[test]
    fn test_plan_takes_the_line_clear() {
        let mut board = Board::new(10, 20);
        for x in 0..9 {
            board.set(x, 19, Cell::Occupied(Color::Blue));
        }
        let config =
            GameConfig::default().with_piece_rule(PieceRule::Sequence(vec![PieceKind::I]));
        let mut session = Session::with_board(config, 1, board).unwrap();
        session.start();

        let placement = Autopilot::default().plan(&session).unwrap();
        assert_eq!(placement.lines, 1);
        assert_eq!(placement.rotations % 2, 1, "the bar goes in upright");

        for command in placement.commands() {
            session.apply(command);
        }
        assert_eq!(session.lines(), 1);
    }

    #[test]
    fn test_no_plan_without_active_piece() {
        let session = Session::unstarted(GameConfig::default(), 1).unwrap();
        assert_eq!(Autopilot::default().plan(&session), None);
    }

    #[test]
    fn test_autopilot_clears_lines() {
        let mut session = Session::new(GameConfig::default(), 2024).unwrap();
        let pilot = Autopilot::default();

        for _ in 0..200 {
            let Some(placement) = pilot.plan(&session) else {
                break;
            };
            for command in placement.commands() {
                session.apply(command);
            }
        }
        assert!(session.lines() > 0);
    }
}
