//! Transient entities: falling letters, particles, floating texts, power-ups
//!
//! Speeds are in pixels per reference frame (60 Hz). A step of `dt` seconds
//! covers `dt * TARGET_FPS` reference frames.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Rgb, ease_out_cubic, palette};

/// Convert seconds to reference frames
#[inline]
pub(crate) fn frames(dt: f32) -> f32 {
    dt * TARGET_FPS
}

/// A letter falling toward the danger line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingLetter {
    /// Spawn-ordered entity ID
    pub id: u32,
    /// Uppercase A-Z
    pub ch: char,
    /// x is fixed at spawn, y only grows
    pub pos: Vec2,
    /// Pixels per reference frame
    pub speed: f32,
    /// Presentation tilt in degrees
    pub tilt: f32,
    /// Seconds spent in the pop-in animation
    pub spawn_anim: f32,
    /// Presented size scale (pop-in, then danger pulse)
    pub scale: f32,
    /// Danger pulse phase (radians)
    pub pulse: f32,
}

impl FallingLetter {
    pub fn new(id: u32, ch: char, x: f32, speed: f32, tilt: f32) -> Self {
        Self {
            id,
            ch,
            pos: Vec2::new(x, LETTER_SPAWN_Y),
            speed,
            tilt,
            spawn_anim: 0.0,
            scale: 0.0,
            pulse: 0.0,
        }
    }

    /// Advance by `dt` seconds (already slowed by slow-motion if active)
    pub fn advance(&mut self, dt: f32, frozen: bool, danger_line_y: f32) {
        if self.spawn_anim < LETTER_SPAWN_ANIM_SECS {
            self.spawn_anim = (self.spawn_anim + dt).min(LETTER_SPAWN_ANIM_SECS);
            self.scale = ease_out_cubic(self.spawn_progress());
        }

        if !frozen {
            self.pos.y += self.speed * frames(dt);
        }

        let danger = self.danger_factor(danger_line_y);
        if danger > 0.0 {
            self.pulse = (self.pulse + dt * 5.0) % TAU;
            self.scale = 1.0 + 0.2 * self.pulse.sin() * danger;
        }
    }

    /// Pop-in progress in [0, 1]
    pub fn spawn_progress(&self) -> f32 {
        (self.spawn_anim / LETTER_SPAWN_ANIM_SECS).clamp(0.0, 1.0)
    }

    /// 0 above the danger zone, rising to 1 at the danger line
    pub fn danger_factor(&self, danger_line_y: f32) -> f32 {
        let zone_top = danger_line_y - DANGER_ZONE_HEIGHT;
        if self.pos.y <= zone_top {
            0.0
        } else {
            ((self.pos.y - zone_top) / DANGER_ZONE_HEIGHT).min(1.0)
        }
    }
}

/// A spark from a correct keystroke
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    pub color: Rgb,
    /// Seconds left
    pub life: f32,
    pub size: f32,
}

impl Particle {
    pub fn advance(&mut self, dt: f32) {
        let f = frames(dt);
        self.pos += self.vel * f;
        self.vel.y += PARTICLE_GRAVITY * f;
        self.life -= dt;
    }

    /// Remaining life fraction, drives alpha and size
    pub fn fade(&self) -> f32 {
        (self.life / PARTICLE_LIFETIME).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Rising feedback text ("+12", "MISS!", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub message: String,
    pub color: Rgb,
    /// Where the text was spawned
    pub anchor: Vec2,
    /// Current (risen) position
    pub pos: Vec2,
    pub life: f32,
}

impl FloatingText {
    pub fn new(message: impl Into<String>, anchor: Vec2, color: Rgb) -> Self {
        Self {
            message: message.into(),
            color,
            anchor,
            pos: anchor,
            life: FLOATING_TEXT_LIFETIME,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.life -= dt;
        let progress = (1.0 - self.life / FLOATING_TEXT_LIFETIME).clamp(0.0, 1.0);
        self.pos.y = self.anchor.y - ease_out_cubic(progress) * FLOATING_TEXT_RISE;
    }

    pub fn fade(&self) -> f32 {
        (self.life / FLOATING_TEXT_LIFETIME).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Halves letter movement for a while
    Slow,
    /// Extends the game clock
    Time,
    /// Stops letters completely for a while
    Freeze,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Slow, PowerUpKind::Time, PowerUpKind::Freeze];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Slow => "slow",
            PowerUpKind::Time => "time",
            PowerUpKind::Freeze => "freeze",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PowerUpKind::Slow => "⏱",
            PowerUpKind::Time => "⏰",
            PowerUpKind::Freeze => "❄",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::Slow => palette::CYAN,
            PowerUpKind::Time => palette::GOLD,
            PowerUpKind::Freeze => palette::PURPLE,
        }
    }
}

/// A power-up capsule drifting toward the collection band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Pixels per reference frame
    pub speed: f32,
    /// Presentation spin in degrees
    pub angle: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, x: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, 0.0),
            speed: POWERUP_FALL_SPEED,
            angle: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        let f = frames(dt);
        self.pos.y += self.speed * f;
        self.angle = (self.angle + POWERUP_SPIN * f) % 360.0;
    }
}
