//! Entity pool: owns every transient entity and its aging/expiry rules
//!
//! Collections keep insertion order. Letters are matched oldest-first, so the
//! order of `letters` is part of the gameplay contract.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{FallingLetter, FloatingText, Particle, PowerUp, PowerUpKind};
use crate::Rgb;
use crate::consts::*;

/// Screen geometry the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl ScreenBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Letters at or below this y are lost
    pub fn danger_line_y(&self) -> f32 {
        self.height - DANGER_LINE_OFFSET
    }

    /// Power-ups below this y are collected
    pub fn collection_band_top(&self) -> f32 {
        self.height - COLLECTION_BAND_HEIGHT
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive horizontal spawn range; collapses to the center on tiny screens
    fn spawn_x_range(&self) -> (f32, f32) {
        let lo = SPAWN_MARGIN_X;
        let hi = self.width - SPAWN_MARGIN_X;
        if hi > lo {
            (lo, hi)
        } else {
            (self.width / 2.0, self.width / 2.0)
        }
    }
}

/// Entities removed by [`EntityPool::reap_expired`], classified by cause
#[derive(Debug, Default)]
pub struct Reaped {
    /// Letters that reached the danger line (misses)
    pub crossed_danger: Vec<FallingLetter>,
    /// Power-ups that fell past the bottom edge uncollected
    pub off_screen_powerups: Vec<PowerUp>,
    /// Power-ups that reached the collection band
    pub collected_powerups: Vec<PowerUp>,
    pub dead_particles: usize,
    pub dead_texts: usize,
}

impl Reaped {
    pub fn is_empty(&self) -> bool {
        self.crossed_danger.is_empty()
            && self.off_screen_powerups.is_empty()
            && self.collected_powerups.is_empty()
            && self.dead_particles == 0
            && self.dead_texts == 0
    }
}

/// All transient entities of a session
#[derive(Debug, Clone)]
pub struct EntityPool {
    bounds: ScreenBounds,
    rng: Pcg32,
    next_id: u32,
    /// Falling letters, oldest first
    pub letters: Vec<FallingLetter>,
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
    pub powerups: Vec<PowerUp>,
}

impl EntityPool {
    pub fn new(bounds: ScreenBounds, seed: u64) -> Self {
        Self {
            bounds,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            letters: Vec::new(),
            particles: Vec::new(),
            texts: Vec::new(),
            powerups: Vec::new(),
        }
    }

    pub fn bounds(&self) -> ScreenBounds {
        self.bounds
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Age every entity by `dt` seconds.
    ///
    /// Letters move at half rate while `slowed` and not at all while `frozen`.
    /// Particles, texts and power-ups always run on the real clock.
    pub fn advance(&mut self, dt: f32, slowed: bool, frozen: bool) {
        let letter_dt = if slowed { dt * SLOW_MOTION_FACTOR } else { dt };
        let danger_line_y = self.bounds.danger_line_y();

        for letter in &mut self.letters {
            letter.advance(letter_dt, frozen, danger_line_y);
        }
        for particle in &mut self.particles {
            particle.advance(dt);
        }
        for text in &mut self.texts {
            text.advance(dt);
        }
        for powerup in &mut self.powerups {
            powerup.advance(dt);
        }
    }

    /// Remove and return the oldest letter matching `ch` (case-insensitive)
    pub fn try_consume_letter(&mut self, ch: char) -> Option<FallingLetter> {
        let ch = ch.to_ascii_uppercase();
        let idx = self.letters.iter().position(|l| l.ch == ch)?;
        Some(self.letters.remove(idx))
    }

    /// Partition out everything that expired or crossed a boundary
    pub fn reap_expired(&mut self) -> Reaped {
        let danger_line_y = self.bounds.danger_line_y();
        let band_top = self.bounds.collection_band_top();
        let bottom = self.bounds.height;

        let (crossed_danger, alive): (Vec<_>, Vec<_>) = std::mem::take(&mut self.letters)
            .into_iter()
            .partition(|l| l.pos.y >= danger_line_y);
        self.letters = alive;

        let mut off_screen_powerups = Vec::new();
        let mut collected_powerups = Vec::new();
        let mut falling = Vec::with_capacity(self.powerups.len());
        for powerup in std::mem::take(&mut self.powerups) {
            if powerup.pos.y > bottom {
                off_screen_powerups.push(powerup);
            } else if powerup.pos.y > band_top {
                collected_powerups.push(powerup);
            } else {
                falling.push(powerup);
            }
        }
        self.powerups = falling;

        let particles_before = self.particles.len();
        self.particles.retain(|p| !p.is_dead());
        let texts_before = self.texts.len();
        self.texts.retain(|t| !t.is_dead());

        Reaped {
            crossed_danger,
            off_screen_powerups,
            collected_powerups,
            dead_particles: particles_before - self.particles.len(),
            dead_texts: texts_before - self.texts.len(),
        }
    }

    /// Spawn a random letter at the top; returns its ID
    pub fn spawn_letter(&mut self, speed_multiplier: f32) -> u32 {
        let ch = (b'A' + self.rng.random_range(0..26u8)) as char;
        let x = self.random_spawn_x();
        let speed = self.rng.random_range(LETTER_MIN_SPEED..=LETTER_MAX_SPEED) * speed_multiplier;
        let tilt = self.rng.random_range(-5.0..=5.0);
        self.push_letter(ch, x, speed, tilt)
    }

    /// Append a specific letter (scripted waves, tests)
    pub fn push_letter(&mut self, ch: char, x: f32, speed: f32, tilt: f32) -> u32 {
        let id = self.next_entity_id();
        self.letters
            .push(FallingLetter::new(id, ch.to_ascii_uppercase(), x, speed, tilt));
        id
    }

    /// Spawn a power-up at the top edge; returns its ID
    pub fn spawn_powerup(&mut self, kind: PowerUpKind) -> u32 {
        let id = self.next_entity_id();
        let x = self.random_spawn_x();
        self.powerups.push(PowerUp::new(id, kind, x));
        id
    }

    /// Burst of sparks flying up and out from `origin`
    pub fn spawn_particles(&mut self, origin: Vec2, count: usize, color: Rgb) {
        self.particles.reserve(count);
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-2.0..=2.0),
                self.rng.random_range(-4.0..=-1.0),
            );
            let size = self.rng.random_range(3..=6u8) as f32;
            self.particles.push(Particle {
                pos: origin,
                vel,
                color,
                life: PARTICLE_LIFETIME,
                size,
            });
        }
    }

    pub fn spawn_floating_text(&mut self, message: impl Into<String>, origin: Vec2, color: Rgb) {
        self.texts.push(FloatingText::new(message, origin, color));
    }

    /// Letter closest to the danger line
    pub fn most_urgent_letter(&self) -> Option<&FallingLetter> {
        self.letters
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }

    pub fn letter(&self, id: u32) -> Option<&FallingLetter> {
        self.letters.iter().find(|l| l.id == id)
    }

    pub fn powerup(&self, id: u32) -> Option<&PowerUp> {
        self.powerups.iter().find(|p| p.id == id)
    }

    fn random_spawn_x(&mut self) -> f32 {
        let (lo, hi) = self.bounds.spawn_x_range();
        if hi > lo {
            self.rng.random_range(lo..=hi)
        } else {
            lo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    fn pool() -> EntityPool {
        EntityPool::new(ScreenBounds::default(), 42)
    }

    #[test]
    fn test_spawn_letter_bounds() {
        let mut pool = pool();
        for _ in 0..200 {
            pool.spawn_letter(1.5);
        }
        for letter in &pool.letters {
            assert!(letter.ch.is_ascii_uppercase());
            assert!(letter.pos.x >= 50.0 && letter.pos.x <= SCREEN_WIDTH - 50.0);
            assert!(letter.speed >= 1.5 && letter.speed <= 4.5);
            assert_eq!(letter.pos.y, LETTER_SPAWN_Y);
        }
        // IDs strictly increase with insertion order
        assert!(pool.letters.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_consume_oldest_duplicate_first() {
        let mut pool = pool();
        let first = pool.push_letter('Q', 100.0, 1.0, 0.0);
        let second = pool.push_letter('Q', 300.0, 1.0, 0.0);

        let hit = pool.try_consume_letter('q').expect("letter on screen");
        assert_eq!(hit.id, first);
        assert!(pool.letter(first).is_none());
        assert!(pool.letter(second).is_some());
    }

    #[test]
    fn test_consume_no_match() {
        let mut pool = pool();
        pool.push_letter('A', 100.0, 1.0, 0.0);
        assert!(pool.try_consume_letter('B').is_none());
        assert_eq!(pool.letters.len(), 1);
        // Empty pool is a normal state
        pool.letters.clear();
        assert!(pool.try_consume_letter('A').is_none());
    }

    #[test]
    fn test_frozen_letters_do_not_move() {
        let mut pool = pool();
        pool.push_letter('A', 100.0, 2.0, 0.0);
        pool.advance(SIM_DT, false, true);
        assert_eq!(pool.letters[0].pos.y, LETTER_SPAWN_Y);
    }

    #[test]
    fn test_slowed_letters_move_half() {
        let mut pool = pool();
        pool.push_letter('A', 100.0, 2.0, 0.0);
        pool.spawn_powerup(PowerUpKind::Slow);
        pool.advance(SIM_DT, true, false);
        assert!((pool.letters[0].pos.y - (LETTER_SPAWN_Y + 1.0)).abs() < 1e-4);
        // Power-ups ignore slow-motion
        assert!((pool.powerups[0].pos.y - POWERUP_FALL_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_reap_classifies_letters_and_powerups() {
        let mut pool = pool();
        let bounds = pool.bounds();
        let safe = pool.push_letter('A', 100.0, 1.0, 0.0);
        let lost = pool.push_letter('B', 200.0, 1.0, 0.0);
        pool.letters[1].pos.y = bounds.danger_line_y();

        let falling = pool.spawn_powerup(PowerUpKind::Slow);
        let collected = pool.spawn_powerup(PowerUpKind::Time);
        let missed = pool.spawn_powerup(PowerUpKind::Freeze);
        pool.powerups[1].pos.y = bounds.collection_band_top() + 1.0;
        pool.powerups[2].pos.y = bounds.height + 1.0;

        let reaped = pool.reap_expired();
        assert_eq!(reaped.crossed_danger.len(), 1);
        assert_eq!(reaped.crossed_danger[0].id, lost);
        assert_eq!(reaped.collected_powerups[0].id, collected);
        assert_eq!(reaped.off_screen_powerups[0].id, missed);

        assert!(pool.letter(safe).is_some());
        assert!(pool.letter(lost).is_none());
        assert!(pool.powerup(falling).is_some());
        assert!(pool.powerup(collected).is_none());
        assert!(pool.powerup(missed).is_none());
    }

    #[test]
    fn test_reap_dead_particles_and_texts() {
        let mut pool = pool();
        pool.spawn_particles(Vec2::new(100.0, 100.0), PARTICLE_BURST, palette::CYAN);
        pool.spawn_floating_text("+11", Vec2::new(100.0, 100.0), palette::GOLD);
        assert_eq!(pool.particles.len(), PARTICLE_BURST);

        pool.advance(0.5, false, false);
        assert!(pool.reap_expired().is_empty());

        pool.advance(0.6, false, false);
        let reaped = pool.reap_expired();
        assert_eq!(reaped.dead_particles, PARTICLE_BURST);
        assert_eq!(reaped.dead_texts, 0);
        assert!(pool.particles.is_empty());

        pool.advance(0.5, false, false);
        assert_eq!(pool.reap_expired().dead_texts, 1);
        assert!(pool.texts.is_empty());
    }

    #[test]
    fn test_particle_burst_shape() {
        let mut pool = pool();
        pool.spawn_particles(Vec2::ZERO, 50, palette::CYAN);
        for p in &pool.particles {
            assert!(p.vel.x >= -2.0 && p.vel.x <= 2.0);
            assert!(p.vel.y >= -4.0 && p.vel.y <= -1.0);
            assert!(p.size >= 3.0 && p.size <= 6.0);
        }
    }

    #[test]
    fn test_same_seed_same_letters() {
        let mut a = pool();
        let mut b = pool();
        for _ in 0..20 {
            a.spawn_letter(1.0);
            b.spawn_letter(1.0);
        }
        let chars_a: String = a.letters.iter().map(|l| l.ch).collect();
        let chars_b: String = b.letters.iter().map(|l| l.ch).collect();
        assert_eq!(chars_a, chars_b);
    }
}
