//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only enters through the `dt` passed to [`tick`]
//! - Seeded RNG only
//! - Stable iteration order (insertion order, which doubles as match priority)
//! - No rendering, audio or platform dependencies; audio cues are queued for the host

pub mod autoplay;
pub mod entities;
pub mod performance;
pub mod pool;
pub mod state;
pub mod tick;

pub use autoplay::AutoPlayer;
pub use entities::{FallingLetter, FloatingText, Particle, PowerUp, PowerUpKind};
pub use performance::{Outcome, PerformanceTracker};
pub use pool::{EntityPool, Reaped, ScreenBounds};
pub use state::{FinishReason, ScreenShake, SessionConfig, SessionPhase, SessionState};
pub use tick::{InputEvent, TickInput, apply_powerup, points_for_combo, tick};
