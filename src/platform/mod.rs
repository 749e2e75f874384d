//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (monotonic clock, frame deltas)
//! - Input events (raw key names to simulation events)

pub mod clock;
pub mod input;

pub use clock::{Clock, FrameTimer, ManualClock, MonotonicClock};
pub use input::{map_key, map_keys};
