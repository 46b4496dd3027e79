//! Shared types module - plain data structures and default tuning constants
//!
//! Everything here is pure data with no game logic, so it can be used by the
//! engine core, the gravity runner, and any presentation layer that consumes
//! snapshots and events.
//!
//! # Board Dimensions
//!
//! Default playfield:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Gravity Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_SPEED_MS` | 1000 | Gravity interval at level 0 |
//! | `SPEED_DECREMENT_MS` | 50 | Interval reduction per level |
//! | `MIN_SPEED_MS` | 100 | Interval floor |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, Color, Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.color(), Color::Purple);
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//!
//! let cell = Cell::Occupied(piece.color());
//! assert!(cell.is_occupied());
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 0 (1000ms = 1 row per second)
pub const INITIAL_SPEED_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const SPEED_DECREMENT_MS: u32 = 50;

/// Gravity interval floor
pub const MIN_SPEED_MS: u32 = 100;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Horizontal offsets tried, in order, when a rotation collides.
///
/// Offset 0 is always tried first.
pub const KICK_OFFSETS: [i16; 5] = [0, 1, -1, 2, -2];

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1). More than 4 lines scores as 4.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color tag painted into the board when this kind locks
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
            PieceKind::O => Color::Yellow,
            PieceKind::S => Color::Green,
            PieceKind::T => Color::Purple,
            PieceKind::Z => Color::Red,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Color tag of a filled cell
///
/// Once a piece locks, the board only remembers its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::Red => "red",
        }
    }

    /// Compact non-zero code (1..=7), 0 is reserved for empty
    pub fn code(&self) -> u8 {
        match self {
            Color::Cyan => 1,
            Color::Blue => 2,
            Color::Orange => 3,
            Color::Yellow => 4,
            Color::Green => 5,
            Color::Purple => 6,
            Color::Red => 7,
        }
    }
}

/// A cell on the board or inside a shape matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Occupied(_))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(*color),
        }
    }

    /// 0 for empty, otherwise the color code
    pub fn code(&self) -> u8 {
        self.color().map_or(0, |c| c.code())
    }
}

/// Commands accepted by a session
///
/// These are the only inputs the engine reacts to; the caller owns the
/// gravity timer and key bindings and translates them into commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Gravity timer fired
    Tick,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks if it cannot)
    SoftDrop,
    /// Rotate piece 90° clockwise with wall kicks
    RotateCw,
    /// Drop piece to its lowest legal position and lock it
    HardDrop,
    /// Toggle between running and paused
    PauseToggle,
    /// Start a fresh session
    Restart,
}

impl Command {
    /// Parse command from camelCase string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotatecw"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tick" => Some(Command::Tick),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotatecw" => Some(Command::RotateCw),
            "harddrop" => Some(Command::HardDrop),
            "pausetoggle" | "pause" => Some(Command::PauseToggle),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Tick => "tick",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::RotateCw => "rotateCw",
            Command::HardDrop => "hardDrop",
            Command::PauseToggle => "pauseToggle",
            Command::Restart => "restart",
        }
    }

    /// Whether this command moves or locks the active piece
    pub fn is_piece_command(&self) -> bool {
        matches!(
            self,
            Command::Tick
                | Command::MoveLeft
                | Command::MoveRight
                | Command::SoftDrop
                | Command::RotateCw
                | Command::HardDrop
        )
    }
}

/// Side-effect notifications emitted by a session
///
/// The presentation layer maps these to sounds or effects; the engine has no
/// knowledge of how they are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Active piece moved horizontally
    Moved,
    /// Active piece descended one row (gravity or soft drop)
    Dropped,
    /// Active piece rotated
    Rotated,
    /// Active piece was hard-dropped by `rows` rows
    HardDropped { rows: u8 },
    /// Active piece was merged into the board
    Locked,
    /// Rows were cleared by the last lock
    LinesCleared { count: u8 },
    /// Level advanced
    LevelUp { level: u32 },
    /// A new active piece entered the board
    Spawned { kind: PieceKind },
    /// Session ended by top-out
    GameOver,
    /// Pause state flipped
    PauseToggled { paused: bool },
    /// Session was reinitialized
    Restarted,
}
