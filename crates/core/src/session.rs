//! Session module - the game state machine
//!
//! A `Session` ties together the board, the active and next pieces, the
//! randomizer and the progression counters. It reacts to one [`Command`] at a
//! time and reports what happened as an [`Outcome`] plus the events raised.
//!
//! States: `Ready -> Running <-> Paused -> GameOver`. `Restart` is accepted
//! from any state; piece commands only act while `Running`.
//!
//! The session holds no timers. Whoever owns it calls [`Session::tick`] when
//! its gravity timer fires, using [`Session::gravity_interval_ms`] to schedule
//! the next one.

use arrayvec::ArrayVec;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::collision::landing_y;
use crate::config::{ConfigError, GameConfig};
use crate::controller::{self, Piece};
use crate::rng::Randomizer;
use crate::scoring::Progression;
use crate::snapshot::{GameSnapshot, PieceSnapshot, PreviewSnapshot};
use crate::types::{Command, GameEvent};

/// Events raised by a single command
///
/// The longest chain is a hard drop that clears lines, levels up and tops out.
pub type EventBuf = ArrayVec<GameEvent, 8>;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Ready,
    Running,
    Paused,
    GameOver,
}

/// How a command was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command changed the session
    Applied,
    /// The active piece was locked (landing, soft drop into the stack, hard drop)
    Locked,
    /// The move or rotation collided; nothing changed
    Blocked,
    /// The command is not accepted in this state; nothing changed
    Inactive(SessionState),
}

impl Outcome {
    /// Whether the session changed
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Applied | Outcome::Locked)
    }
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub outcome: Outcome,
    pub events: EventBuf,
}

/// One play session
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    next: Piece,
    randomizer: Randomizer,
    progression: Progression,
    state: SessionState,
    /// Increments on every restart
    episode_id: u32,
    /// Increments on every successful spawn
    piece_id: u32,
}

impl Session {
    /// Create a running session with its first piece spawned
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        let mut session = Self::unstarted(config, seed)?;
        session.start();
        Ok(session)
    }

    /// Create a session in the `Ready` state; call [`Session::start`] to play
    pub fn unstarted(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        let board = Board::new(config.width, config.height);
        Self::with_board(config, seed, board)
    }

    /// Create a `Ready` session on a prepared board
    pub fn with_board(config: GameConfig, seed: u32, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.width() != config.width || board.height() != config.height {
            return Err(ConfigError::BoardMismatch {
                width: config.width,
                height: config.height,
                actual_width: board.width(),
                actual_height: board.height(),
            });
        }

        let mut randomizer = Randomizer::new(config.piece_rule.clone(), seed);
        let next = Piece::at_spawn(randomizer.draw(), config.width);
        let progression = Progression::new(&config);

        Ok(Self {
            config,
            board,
            active: None,
            next,
            randomizer,
            progression,
            state: SessionState::Ready,
            episode_id: 0,
            piece_id: 0,
        })
    }

    /// Move from `Ready` to `Running` and spawn the first piece
    pub fn start(&mut self) -> Report {
        let mut events = EventBuf::new();
        let outcome = if self.state == SessionState::Ready {
            self.state = SessionState::Running;
            debug!("session {} started", self.episode_id);
            self.spawn_next(&mut events);
            Outcome::Applied
        } else {
            Outcome::Inactive(self.state)
        };
        Report { outcome, events }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    /// Total cleared lines
    pub fn lines(&self) -> u32 {
        self.progression.total_lines()
    }

    pub fn lines_this_level(&self) -> u32 {
        self.progression.lines_this_level()
    }

    /// Delay before the next gravity tick
    pub fn gravity_interval_ms(&self) -> u32 {
        self.progression.gravity_interval_ms()
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    /// Row where the active piece would land
    pub fn ghost_y(&self) -> Option<i16> {
        self.active.map(|piece| landing_y(&piece, &self.board))
    }

    pub fn tick(&mut self) -> Report {
        self.apply(Command::Tick)
    }

    pub fn move_left(&mut self) -> Report {
        self.apply(Command::MoveLeft)
    }

    pub fn move_right(&mut self) -> Report {
        self.apply(Command::MoveRight)
    }

    pub fn soft_drop(&mut self) -> Report {
        self.apply(Command::SoftDrop)
    }

    pub fn rotate_cw(&mut self) -> Report {
        self.apply(Command::RotateCw)
    }

    pub fn hard_drop(&mut self) -> Report {
        self.apply(Command::HardDrop)
    }

    pub fn pause_toggle(&mut self) -> Report {
        self.apply(Command::PauseToggle)
    }

    pub fn restart(&mut self) -> Report {
        self.apply(Command::Restart)
    }

    /// Apply a command
    pub fn apply(&mut self, command: Command) -> Report {
        let mut events = EventBuf::new();

        let outcome = match command {
            Command::Restart => self.reinitialize(&mut events),
            Command::PauseToggle => self.toggle_pause(&mut events),
            _ if self.state != SessionState::Running => Outcome::Inactive(self.state),
            Command::Tick => self.step_down(false, &mut events),
            Command::SoftDrop => self.step_down(true, &mut events),
            Command::MoveLeft => self.shift(-1, &mut events),
            Command::MoveRight => self.shift(1, &mut events),
            Command::RotateCw => self.rotate(&mut events),
            Command::HardDrop => self.drop_to_floor(&mut events),
        };

        if let Outcome::Inactive(state) = outcome {
            trace!("{} ignored in state {:?}", command.as_str(), state);
        }

        Report { outcome, events }
    }

    /// Write the current state into `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_rows(&mut out.board);
        out.width = self.board.width();
        out.height = self.board.height();
        out.active = self.active.map(PieceSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = PreviewSnapshot::from(self.next);
        out.score = self.progression.score();
        out.lines = self.progression.total_lines();
        out.level = self.progression.level();
        out.gravity_interval_ms = self.progression.gravity_interval_ms();
        out.state = self.state;
        out.paused = self.is_paused();
        out.game_over = self.is_game_over();
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the next piece to active and draw a new next piece
    fn spawn_next(&mut self, events: &mut EventBuf) {
        let spawn = controller::spawn(self.next, &self.board);
        self.next = Piece::at_spawn(self.randomizer.draw(), self.config.width);

        if spawn.collided {
            debug!("spawn of {:?} collided", spawn.piece.kind);
            self.end_game(events);
            return;
        }

        self.active = Some(spawn.piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        trace!(
            "spawned {:?} at ({}, {})",
            spawn.piece.kind,
            spawn.piece.x,
            spawn.piece.y
        );
        events.push(GameEvent::Spawned {
            kind: spawn.piece.kind,
        });
    }

    fn end_game(&mut self, events: &mut EventBuf) {
        self.active = None;
        self.state = SessionState::GameOver;
        debug!(
            "game over: score {} level {} lines {}",
            self.progression.score(),
            self.progression.level(),
            self.progression.total_lines()
        );
        events.push(GameEvent::GameOver);
    }

    /// One row down; a blocked step locks the piece
    fn step_down(&mut self, player: bool, events: &mut EventBuf) -> Outcome {
        let Some(active) = self.active else {
            return Outcome::Inactive(self.state);
        };

        let step = controller::try_move(&active, &self.board, 0, 1);
        if step.moved {
            self.active = Some(step.piece);
            if player {
                self.progression
                    .record_drop(1, self.config.soft_drop_points);
            }
            events.push(GameEvent::Dropped);
            return Outcome::Applied;
        }

        self.lock_active(events);
        Outcome::Locked
    }

    fn shift(&mut self, dx: i16, events: &mut EventBuf) -> Outcome {
        let Some(active) = self.active else {
            return Outcome::Inactive(self.state);
        };

        let step = controller::try_move(&active, &self.board, dx, 0);
        if !step.moved {
            return Outcome::Blocked;
        }
        self.active = Some(step.piece);
        events.push(GameEvent::Moved);
        Outcome::Applied
    }

    fn rotate(&mut self, events: &mut EventBuf) -> Outcome {
        let Some(active) = self.active else {
            return Outcome::Inactive(self.state);
        };

        let turn = controller::try_rotate(&active, &self.board);
        if !turn.rotated {
            return Outcome::Blocked;
        }
        self.active = Some(turn.piece);
        events.push(GameEvent::Rotated);
        Outcome::Applied
    }

    fn drop_to_floor(&mut self, events: &mut EventBuf) -> Outcome {
        let Some(active) = self.active else {
            return Outcome::Inactive(self.state);
        };

        let (dropped, rows) = controller::hard_drop(&active, &self.board);
        self.active = Some(dropped);
        self.progression
            .record_drop(rows, self.config.hard_drop_points);
        events.push(GameEvent::HardDropped { rows });

        self.lock_active(events);
        Outcome::Locked
    }

    /// Merge the active piece, score cleared rows, then spawn or end the game
    fn lock_active(&mut self, events: &mut EventBuf) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let lock = controller::lock(&piece, &mut self.board);
        events.push(GameEvent::Locked);
        trace!("locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);

        if lock.lines_cleared > 0 {
            let award = self.progression.record_clear(lock.lines_cleared);
            debug!(
                "cleared {} line(s) for {} points",
                lock.lines_cleared, award.points
            );
            events.push(GameEvent::LinesCleared {
                count: lock.lines_cleared,
            });
            if let Some(level) = award.level_up {
                debug!(
                    "level {} reached, gravity {}ms",
                    level,
                    self.progression.gravity_interval_ms()
                );
                events.push(GameEvent::LevelUp { level });
            }
        }

        if lock.topped_out {
            debug!("{:?} locked above the board", piece.kind);
            self.end_game(events);
            return;
        }

        self.spawn_next(events);
    }

    fn toggle_pause(&mut self, events: &mut EventBuf) -> Outcome {
        let paused = match self.state {
            SessionState::Running => true,
            SessionState::Paused => false,
            state => return Outcome::Inactive(state),
        };

        self.state = if paused {
            SessionState::Paused
        } else {
            SessionState::Running
        };
        debug!("paused: {}", paused);
        events.push(GameEvent::PauseToggled { paused });
        Outcome::Applied
    }

    /// Fresh board and counters; the randomizer keeps its stream
    fn reinitialize(&mut self, events: &mut EventBuf) -> Outcome {
        self.board = Board::new(self.config.width, self.config.height);
        self.active = None;
        self.next = Piece::at_spawn(self.randomizer.draw(), self.config.width);
        self.progression = Progression::new(&self.config);
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.state = SessionState::Running;

        debug!("session restarted (episode {})", self.episode_id);
        events.push(GameEvent::Restarted);
        self.spawn_next(events);
        Outcome::Applied
    }
}
