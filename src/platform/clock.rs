//! Clocks and frame timing
//!
//! The simulation never reads time itself; the host measures a frame delta
//! with a [`FrameTimer`] and passes it to `tick`.

use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

/// Source of monotonic time since some fixed origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
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

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and replays
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Turns successive clock readings into clamped frame deltas
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last: Duration,
    max_dt: f32,
}

impl FrameTimer {
    /// Start timing from the clock's current reading
    pub fn start(clock: &impl Clock) -> Self {
        Self {
            last: clock.now(),
            max_dt: MAX_FRAME_DT,
        }
    }

    /// Seconds since the previous call, capped to avoid giant steps after a hitch
    pub fn next_dt(&mut self, clock: &impl Clock) -> f32 {
        let now = clock.now();
        let dt = now.saturating_sub(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_dt)
    }
}
