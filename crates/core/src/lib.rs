//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and state of a falling-block game. It has no
//! timers and no I/O: every change is driven by a [`Command`](types::Command)
//! applied to a [`Session`], so the same seed and the same command stream
//! always produce the same game.
//!
//! # Module Structure
//!
//! - [`board`]: width x height grid with row clearing
//! - [`pieces`]: the seven tetromino shapes and matrix rotation
//! - [`collision`]: overlap and landing checks
//! - [`controller`]: spawn, move, rotate (with horizontal kicks), hard drop, lock
//! - [`scoring`]: classic line scores, levels and the gravity curve
//! - [`rng`]: seeded piece randomizer
//! - [`config`]: session tuning and validation
//! - [`session`]: the state machine tying it all together
//! - [`snapshot`]: read-only view for presentation layers
//!
//! # Game Rules
//!
//! - **Randomizer**: uniform draw by default, 7-bag or a fixed cycle on request
//! - **Rotation**: clockwise only, kicks of 0, +1, -1, +2, -2 columns
//! - **Locking**: immediate when a downward step is blocked (no lock delay)
//! - **Scoring**: 40 / 100 / 300 / 1200 times (level + 1)
//! - **Levels**: one per 10 lines, gravity 1000ms minus 50ms per level, floor 100ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, Session};
//! use blockfall_core::types::Command;
//!
//! let mut session = Session::new(GameConfig::default(), 12345).unwrap();
//!
//! session.apply(Command::MoveRight);
//! session.apply(Command::RotateCw);
//! let report = session.apply(Command::HardDrop);
//!
//! assert!(report.outcome.changed());
//! assert_eq!(session.board().filled_count(), 4);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod controller;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig, PieceRule, SpeedCurve};
pub use controller::Piece;
pub use pieces::{shape_for, Shape};
pub use rng::{Randomizer, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, Progression};
pub use session::{EventBuf, Outcome, Report, Session, SessionState};
pub use snapshot::{GameSnapshot, PieceSnapshot, PreviewSnapshot};
