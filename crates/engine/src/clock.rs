//! Gravity clock
//!
//! A single pending timer driven by explicit elapsed time. The owner arms it
//! with the current gravity interval, feeds it elapsed milliseconds and polls
//! for due ticks. Time past a due tick carries over, so a long frame fires
//! several ticks in a row instead of dropping them.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityClock {
    interval_ms: Option<u32>,
    elapsed_ms: u32,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the next tick `interval_ms` after the last one
    ///
    /// Re-arming a pending clock only swaps the interval; accumulated time is
    /// kept. A zero interval is treated as 1ms.
    pub fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms.max(1));
    }

    /// Drop the pending tick and any accumulated time
    pub fn cancel(&mut self) {
        self.interval_ms = None;
        self.elapsed_ms = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.interval_ms.is_some()
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    /// Time left until the pending tick, if any
    pub fn remaining_ms(&self) -> Option<u32> {
        self.interval_ms
            .map(|interval| interval.saturating_sub(self.elapsed_ms))
    }

    /// Accumulate elapsed time; ignored while disarmed
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.interval_ms.is_some() {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        }
    }

    /// Report a due tick and disarm, keeping the overshoot
    pub fn poll_due(&mut self) -> bool {
        match self.interval_ms {
            Some(interval) if self.elapsed_ms >= interval => {
                self.elapsed_ms -= interval;
                self.interval_ms = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_clock_never_fires() {
        let mut clock = GravityClock::new();
        clock.advance(10_000);
        assert!(!clock.poll_due());
        assert_eq!(clock.remaining_ms(), None);
    }

    #[test]
    fn test_fires_after_interval() {
        let mut clock = GravityClock::new();
        clock.arm(1000);
        clock.advance(999);
        assert!(!clock.poll_due());
        assert_eq!(clock.remaining_ms(), Some(1));

        clock.advance(1);
        assert!(clock.poll_due());
        assert!(!clock.is_armed());
        assert!(!clock.poll_due());
    }

    #[test]
    fn test_overshoot_carries_over() {
        let mut clock = GravityClock::new();
        clock.arm(100);
        clock.advance(250);
        assert!(clock.poll_due());
        clock.arm(100);
        assert!(clock.poll_due());
        clock.arm(100);
        assert!(!clock.poll_due());
        assert_eq!(clock.remaining_ms(), Some(50));
    }

    #[test]
    fn test_rearm_swaps_interval() {
        let mut clock = GravityClock::new();
        clock.arm(1000);
        clock.advance(960);
        clock.arm(950);
        assert!(clock.poll_due());
    }

    #[test]
    fn test_cancel_discards_time() {
        let mut clock = GravityClock::new();
        clock.arm(1000);
        clock.advance(900);
        clock.cancel();
        clock.arm(1000);
        clock.advance(200);
        assert!(!clock.poll_due());
        assert_eq!(clock.remaining_ms(), Some(800));
    }

    #[test]
    fn test_zero_interval_clamped() {
        let mut clock = GravityClock::new();
        clock.arm(0);
        assert_eq!(clock.interval_ms(), Some(1));
        assert!(!clock.poll_due());
    }
}
