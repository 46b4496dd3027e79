//! Runner - owns a session, its gravity clock and an event sink
//!
//! The session is timer-free; the runner turns elapsed time into `Tick`
//! commands and keeps the clock in step with the session state:
//!
//! - every gravity tick re-arms with the current interval, so a level-up
//!   takes effect on the next tick
//! - a submitted command that locks a piece, a submitted `Tick` and a restart
//!   all start a full interval from now
//! - pause and game over cancel the pending tick, resume re-arms it

use log::{debug, trace};

use blockfall_core::{Outcome, Report, Session};
use blockfall_types::{Command, GameEvent};

use crate::clock::GravityClock;

/// Receives every event raised by the runner's session
pub trait EventSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Discards events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {}

/// Logs events at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: GameEvent) {
        debug!("event: {:?}", event);
    }
}

/// Collects events in order
impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event);
    }
}

pub struct Runner<S: EventSink> {
    session: Session,
    clock: GravityClock,
    sink: S,
    ticks: u64,
}

impl<S: EventSink> Runner<S> {
    /// Wrap a session; a running session gets its first tick armed
    pub fn new(session: Session, sink: S) -> Self {
        let mut runner = Self {
            session,
            clock: GravityClock::new(),
            sink,
            ticks: 0,
        };
        runner.reschedule(false);
        runner
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn clock(&self) -> &GravityClock {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Gravity ticks fired so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn into_parts(self) -> (Session, S) {
        (self.session, self.sink)
    }

    /// Start a `Ready` session
    pub fn start(&mut self) -> Outcome {
        let report = self.session.start();
        self.forward(&report);
        self.reschedule(false);
        report.outcome
    }

    /// Let `elapsed_ms` pass and fire every tick that became due, in order
    ///
    /// Returns the number of ticks fired.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.clock.advance(elapsed_ms);

        let mut fired = 0;
        while self.clock.poll_due() {
            let report = self.session.tick();
            self.ticks += 1;
            fired += 1;
            trace!(
                "gravity tick {} -> {:?} (next in {}ms)",
                self.ticks,
                report.outcome,
                self.session.gravity_interval_ms()
            );
            self.forward(&report);
            // Overshoot past this tick already belongs to the next interval
            self.reschedule(false);
        }
        fired
    }

    /// Apply a player command
    ///
    /// A newly spawned piece, a manual `Tick` and a restart each get a full
    /// gravity interval before the next tick.
    pub fn submit(&mut self, command: Command) -> Outcome {
        let report = self.session.apply(command);
        self.forward(&report);
        let restart_timer = report.outcome == Outcome::Locked
            || matches!(command, Command::Tick | Command::Restart);
        self.reschedule(restart_timer);
        report.outcome
    }

    fn forward(&mut self, report: &Report) {
        for event in &report.events {
            self.sink.emit(*event);
        }
    }

    fn reschedule(&mut self, restart_timer: bool) {
        if !self.session.is_running() {
            if self.clock.is_armed() {
                trace!("gravity cancelled ({:?})", self.session.state());
            }
            self.clock.cancel();
            return;
        }
        if restart_timer {
            self.clock.cancel();
        }
        self.clock.arm(self.session.gravity_interval_ms());
    }
}
