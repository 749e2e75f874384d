//! Letter Drop - A falling-letter arcade typing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, adaptive difficulty, session state machine)
//! - `renderer`: Frame view handed to draw backends, HUD derivations, glyph cache
//! - `audio`: Audio cue seam (fire-and-forget)
//! - `platform`: Clock and input normalization
//! - `settings`: Data-driven configuration and difficulty presets
//! - `report`: End-of-run statistics

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod report;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioManager, CuePlayer};
pub use report::RunReport;
pub use settings::{Difficulty, Settings};

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Target frame rate; entity speeds are expressed in pixels per frame at this rate
    pub const TARGET_FPS: f32 = 60.0;
    /// Fixed simulation timestep used by headless runs
    pub const SIM_DT: f32 = 1.0 / TARGET_FPS;
    /// Largest frame delta fed to the simulation (hitches are clamped)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Danger line sits this far above the bottom edge
    pub const DANGER_LINE_OFFSET: f32 = 80.0;
    /// Power-ups are collected once they fall into this bottom strip
    pub const COLLECTION_BAND_HEIGHT: f32 = 100.0;
    /// Letters start pulsing this far above the danger line
    pub const DANGER_ZONE_HEIGHT: f32 = 100.0;
    /// Horizontal spawn margin
    pub const SPAWN_MARGIN_X: f32 = 50.0;

    /// Letters spawn slightly above the visible area
    pub const LETTER_SPAWN_Y: f32 = -20.0;
    /// Per-letter random speed factor range (pixels per frame before the multiplier)
    pub const LETTER_MIN_SPEED: f32 = 1.0;
    pub const LETTER_MAX_SPEED: f32 = 3.0;
    /// Spawn pop-in animation length (seconds)
    pub const LETTER_SPAWN_ANIM_SECS: f32 = 0.5;

    /// Particle burst size on a correct key
    pub const PARTICLE_BURST: usize = 15;
    pub const PARTICLE_LIFETIME: f32 = 1.0;
    /// Gravity in pixels per frame squared
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    pub const FLOATING_TEXT_LIFETIME: f32 = 1.5;
    /// How far a floating text rises over its lifetime
    pub const FLOATING_TEXT_RISE: f32 = 50.0;

    /// Power-up fall speed in pixels per frame (ignores the speed multiplier)
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    /// Power-up spin in degrees per frame
    pub const POWERUP_SPIN: f32 = 5.0;
    pub const POWERUP_SPAWN_INTERVAL_SECS: f32 = 15.0;
    pub const SLOW_MOTION_SECS: f32 = 5.0;
    pub const FREEZE_SECS: f32 = 3.0;
    pub const TIME_BONUS_SECS: f32 = 10.0;
    /// Letter movement scale while slow-motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;

    /// Scoring
    pub const BASE_POINTS: u64 = 10;

    /// Manual speed control
    pub const SPEED_STEP: f32 = 0.2;
    pub const MIN_SPEED_MULTIPLIER: f32 = 0.5;
    pub const MAX_MANUAL_SPEED_MULTIPLIER: f32 = 5.0;

    /// Adaptive difficulty
    pub const PERFORMANCE_WINDOW_SECS: f32 = 15.0;
    pub const MIN_ACCURACY_SAMPLES: usize = 6;
    pub const SPEED_UP_ACCURACY: f32 = 0.85;
    pub const SLOW_DOWN_ACCURACY: f32 = 0.6;
    pub const ADAPTIVE_SPEED_UP: f32 = 1.02;
    pub const ADAPTIVE_SLOW_DOWN: f32 = 0.98;
    pub const MAX_ADAPTIVE_SPEED_MULTIPLIER: f32 = 3.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 20.0;
    pub const MAX_SPAWN_INTERVAL: f32 = 120.0;

    /// Screen shake impulses
    pub const MISTYPE_TRAUMA: f32 = 0.3;
    pub const DANGER_TRAUMA: f32 = 0.5;
    pub const TRAUMA_DECAY: f32 = 2.0;
    pub const MAX_SHAKE_OFFSET: f32 = 10.0;

    /// Combo counter pop
    pub const COMBO_POP_SCALE: f32 = 1.5;
    pub const COMBO_SCALE_RATE: f32 = 5.0;

    /// Timers closer than this to zero are treated as expired
    pub const TIMER_EPSILON: f32 = 1e-4;
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Blend toward `other` channel by channel
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| lerp(a as f32, b as f32, t) as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Neon palette
pub mod palette {
    use super::Rgb;

    pub const DARK_BG: Rgb = Rgb(15, 15, 35);
    pub const DARK_BG2: Rgb = Rgb(25, 25, 50);
    pub const PURPLE: Rgb = Rgb(138, 43, 226);
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const PINK: Rgb = Rgb(255, 20, 147);
    pub const GOLD: Rgb = Rgb(255, 215, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 127);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 69, 58);
    pub const DANGER_RED: Rgb = Rgb(255, 45, 85);
}

/// Linear interpolation
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Cubic ease-out: fast start, gentle landing
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}
