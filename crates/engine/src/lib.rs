//! Timing and automation around a [`Session`](blockfall_core::Session).
//!
//! The core crate never looks at a clock. This crate supplies the pieces a
//! frontend needs to run a session in real time:
//!
//! - [`GravityClock`]: a cancellable timer fed with elapsed milliseconds
//! - [`Runner`]: applies commands, fires gravity ticks and forwards events to an [`EventSink`]
//! - [`Autopilot`]: greedy placement search for headless play and demos

pub mod autopilot;
pub mod clock;
pub mod runner;

pub use autopilot::{Autopilot, Features, Placement, Weights};
pub use clock::GravityClock;
pub use runner::{EventSink, LogSink, NoopSink, Runner};
