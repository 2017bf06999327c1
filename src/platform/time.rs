//! Frame clocks
//!
//! A clock hands out one millisecond timestamp per display refresh. Values
//! never decrease.

use std::time::Instant;

/// Source of frame timestamps (milliseconds)
pub trait FrameClock {
    fn now(&mut self) -> f64;
}

/// Wall-clock time since the clock was created
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl FrameClock for MonotonicClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Simulated display that refreshes at a fixed rate
///
/// Each call to `now` steps one refresh forward. Used for headless runs.
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    current_ms: f64,
    interval_ms: f64,
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::from_hz(60.0)
    }
}

impl FixedRateClock {
    pub fn new(start_ms: f64, interval_ms: f64) -> Self {
        assert!(
            interval_ms.is_finite() && interval_ms >= 0.0,
            "frame interval must be finite and non-negative, got {}",
            interval_ms
        );
        Self {
            current_ms: start_ms,
            interval_ms,
        }
    }

    pub fn from_hz(hz: f64) -> Self {
        Self::new(0.0, 1000.0 / hz)
    }

    /// Timestamp of the most recent refresh, without stepping
    pub fn peek(&self) -> f64 {
        self.current_ms
    }

    /// Jump forward, e.g. to skip idle time between runs
    pub fn skip(&mut self, ms: f64) {
        self.current_ms += ms.max(0.0);
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

impl FrameClock for FixedRateClock {
    fn now(&mut self) -> f64 {
        self.current_ms += self.interval_ms;
        self.current_ms
    }
}
