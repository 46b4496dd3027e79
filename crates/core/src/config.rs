//! Config module - session tuning and validation
//!
//! A `GameConfig` is checked once when a session is created; a session never
//! runs on a board that cannot hold every piece or with a speed curve that
//! could reach zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pieces::MAX_SHAPE_DIM;
use crate::types::{
    PieceKind, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_SPEED_MS, LINES_PER_LEVEL, MIN_SPEED_MS,
    SPEED_DECREMENT_MS,
};

/// How the next piece is chosen
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceRule {
    /// Every kind with probability 1/7
    #[default]
    Uniform,
    /// Shuffled bag of all seven kinds, refilled when empty
    Bag7,
    /// Fixed cycle of kinds, for puzzles and reproducible tests
    Sequence(Vec<PieceKind>),
}

/// Configuration errors, reported at session creation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column (got {width}x{height})")]
    EmptyBoard { width: u8, height: u8 },

    #[error("board is {width}x{height} but every piece needs at least {needed}x{needed}")]
    BoardTooSmall { width: u8, height: u8, needed: u8 },

    #[error("lines per level must be greater than zero")]
    ZeroLinesPerLevel,

    #[error("minimum gravity interval must be greater than zero")]
    ZeroMinSpeed,

    #[error("minimum gravity interval {min_ms}ms exceeds initial interval {initial_ms}ms")]
    MinSpeedAboveInitial { min_ms: u32, initial_ms: u32 },

    #[error("piece sequence must contain at least one piece")]
    EmptySequence,

    #[error("board is {actual_width}x{actual_height} but config expects {width}x{height}")]
    BoardMismatch {
        width: u8,
        height: u8,
        actual_width: u8,
        actual_height: u8,
    },
}

/// Gravity interval parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedCurve {
    pub initial_ms: u32,
    pub decrement_ms: u32,
    pub min_ms: u32,
}

impl SpeedCurve {
    /// `max(min, initial - level * decrement)`
    pub fn interval_ms(&self, level: u32) -> u32 {
        self.initial_ms
            .saturating_sub(level.saturating_mul(self.decrement_ms))
            .max(self.min_ms)
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub initial_speed_ms: u32,
    pub speed_decrement_ms: u32,
    pub min_speed_ms: u32,
    pub lines_per_level: u32,
    /// Bonus per row of a player soft drop
    pub soft_drop_points: u32,
    /// Bonus per row of a hard drop
    pub hard_drop_points: u32,
    pub piece_rule: PieceRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            initial_speed_ms: INITIAL_SPEED_MS,
            speed_decrement_ms: SPEED_DECREMENT_MS,
            min_speed_ms: MIN_SPEED_MS,
            lines_per_level: LINES_PER_LEVEL,
            soft_drop_points: 0,
            hard_drop_points: 0,
            piece_rule: PieceRule::Uniform,
        }
    }
}

impl GameConfig {
    pub fn with_piece_rule(mut self, rule: PieceRule) -> Self {
        self.piece_rule = rule;
        self
    }

    pub fn with_size(mut self, width: u8, height: u8) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn speed_curve(&self) -> SpeedCurve {
        SpeedCurve {
            initial_ms: self.initial_speed_ms,
            decrement_ms: self.speed_decrement_ms,
            min_ms: self.min_speed_ms,
        }
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }

        let needed = MAX_SHAPE_DIM as u8;
        if self.width < needed || self.height < needed {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                needed,
            });
        }

        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }

        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::MinSpeedAboveInitial {
                min_ms: self.min_speed_ms,
                initial_ms: self.initial_speed_ms,
            });
        }

        if matches!(&self.piece_rule, PieceRule::Sequence(kinds) if kinds.is_empty()) {
            return Err(ConfigError::EmptySequence);
        }

        Ok(())
    }
}
