//! Scoring module - score, lines, level and gravity progression
//!
//! Classic rules:
//! - Line clears score 40 / 100 / 300 / 1200 for 1 / 2 / 3 / 4+ lines,
//!   times (level + 1), using the level in effect when the piece locked.
//! - Every `lines_per_level` cleared lines advance one level; the per-level
//!   counter wraps.
//! - Gravity interval is `max(min, initial - level * decrement)`.

use serde::Serialize;

use crate::config::{GameConfig, SpeedCurve};
use crate::types::LINE_SCORES;

/// Calculate line clear score
/// lines: number of lines cleared (4 or more score as 4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: u8, level: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level.saturating_add(1))
}

/// Calculate drop bonus
pub fn calculate_drop_score(rows: u8, points_per_row: u32) -> u32 {
    (rows as u32).saturating_mul(points_per_row)
}

/// What a lock contributed to the progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Award {
    pub points: u32,
    /// New level if this lock crossed a level boundary
    pub level_up: Option<u32>,
}

/// Score, line and level counters for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progression {
    score: u32,
    /// Lines cleared since the last level-up
    lines_this_level: u32,
    total_lines: u32,
    level: u32,
    gravity_interval_ms: u32,
    #[serde(skip)]
    lines_per_level: u32,
    #[serde(skip)]
    curve: SpeedCurve,
}

impl Progression {
    pub fn new(config: &GameConfig) -> Self {
        let curve = config.speed_curve();
        Self {
            score: 0,
            lines_this_level: 0,
            total_lines: 0,
            level: 0,
            gravity_interval_ms: curve.interval_ms(0),
            lines_per_level: config.lines_per_level.max(1),
            curve,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_this_level(&self) -> u32 {
        self.lines_this_level
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.gravity_interval_ms
    }

    /// Record the lines cleared by one lock
    ///
    /// Points use the level before any level-up caused by these lines.
    pub fn record_clear(&mut self, lines: u8) -> Award {
        if lines == 0 {
            return Award::default();
        }

        let points = calculate_line_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.total_lines = self.total_lines.saturating_add(lines as u32);
        self.lines_this_level = self.lines_this_level.saturating_add(lines as u32);

        let mut level_up = None;
        if self.lines_this_level >= self.lines_per_level {
            let gained = self.lines_this_level / self.lines_per_level;
            self.lines_this_level %= self.lines_per_level;
            self.level = self.level.saturating_add(gained);
            self.gravity_interval_ms = self.curve.interval_ms(self.level);
            level_up = Some(self.level);
        }

        Award { points, level_up }
    }

    /// Add a drop bonus
    pub fn record_drop(&mut self, rows: u8, points_per_row: u32) -> u32 {
        let points = calculate_drop_score(rows, points_per_row);
        self.score = self.score.saturating_add(points);
        points
    }
}
