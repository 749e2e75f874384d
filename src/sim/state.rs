//! Session state and core simulation types
//!
//! Everything the per-frame update mutates lives here. Nothing outside
//! [`super::tick`] should write to these fields during a run.

use std::collections::HashMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::performance::PerformanceTracker;
use super::pool::{EntityPool, ScreenBounds};
use crate::audio::AudioCue;
use crate::consts::*;

/// PCG stream for session-level randomness (power-up kinds, shake)
const SESSION_RNG_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Letters are falling
    Playing,
    /// Run ended (terminal)
    Finished,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishReason {
    TimeUp,
    Quit,
}

/// Starting parameters for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub bounds: ScreenBounds,
    /// Global letter speed multiplier
    pub speed_multiplier: f32,
    /// Frames between letter spawns
    pub spawn_interval: f32,
    /// Game length in seconds
    pub duration: f32,
    /// RNG seed (same seed + same inputs = same run)
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bounds: ScreenBounds::default(),
            speed_multiplier: 1.0,
            spawn_interval: 60.0,
            duration: 60.0,
            seed: 0,
        }
    }
}

/// Camera shake driven by accumulated trauma
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenShake {
    /// 0-1, decays over time
    pub trauma: f32,
    /// Current draw offset in pixels
    pub offset: Vec2,
}

impl ScreenShake {
    pub fn add_trauma(&mut self, amount: f32) {
        self.trauma = (self.trauma + amount).min(1.0);
    }

    /// Decay trauma and roll a new offset
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.trauma > 0.0 {
            self.trauma = (self.trauma - dt * TRAUMA_DECAY).max(0.0);
            let amount = self.trauma * self.trauma * MAX_SHAKE_OFFSET;
            if amount > 0.0 {
                self.offset = Vec2::new(
                    rng.random_range(-amount..=amount),
                    rng.random_range(-amount..=amount),
                );
                return;
            }
        }
        self.offset = Vec2::ZERO;
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub finish_reason: Option<FinishReason>,
    pub bounds: ScreenBounds,

    /// Total score
    pub score: u64,
    /// Consecutive hits, reset by any miss
    pub combo: u32,
    pub max_combo: u32,
    pub correct: u32,
    /// Mistyped keys plus letters lost past the danger line
    pub mistakes: u32,
    /// Wrong key presses per letter
    pub mistyped: HashMap<char, u32>,
    /// Letters lost past the danger line per letter
    pub missed: HashMap<char, u32>,

    /// Simulated seconds since start
    pub elapsed: f32,
    /// Game length in seconds (time power-ups extend it)
    pub duration: f32,
    /// Simulation frame counter
    pub frame: u64,

    pub slow_motion_remaining: f32,
    pub freeze_remaining: f32,

    pub speed_multiplier: f32,
    /// Frames between letter spawns
    pub spawn_interval: f32,
    /// Frames since the last letter spawn
    pub spawn_counter: u32,
    /// Seconds since the last power-up spawn, carried past the interval
    ///
    /// Kept in f64: summing 900 f32 frame steps can land short of 15.0.
    pub powerup_timer: f64,

    /// Combo counter pop (cosmetic)
    pub combo_scale: f32,
    /// Screen shake (cosmetic)
    pub shake: ScreenShake,

    pub pool: EntityPool,
    pub performance: PerformanceTracker,

    pub(crate) rng: Pcg32,
    /// Cues requested since the last drain
    cues: Vec<AudioCue>,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        log::info!(
            "Session start: speed {:.1}x, spawn every {:.0} frames, {:.0}s, seed {}",
            config.speed_multiplier,
            config.spawn_interval,
            config.duration,
            config.seed
        );
        Self {
            phase: SessionPhase::Playing,
            finish_reason: None,
            bounds: config.bounds,
            score: 0,
            combo: 0,
            max_combo: 0,
            correct: 0,
            mistakes: 0,
            mistyped: HashMap::new(),
            missed: HashMap::new(),
            elapsed: 0.0,
            duration: config.duration.max(0.0),
            frame: 0,
            slow_motion_remaining: 0.0,
            freeze_remaining: 0.0,
            speed_multiplier: config
                .speed_multiplier
                .clamp(MIN_SPEED_MULTIPLIER, MAX_MANUAL_SPEED_MULTIPLIER),
            spawn_interval: config
                .spawn_interval
                .clamp(MIN_SPAWN_INTERVAL, MAX_SPAWN_INTERVAL),
            spawn_counter: 0,
            powerup_timer: 0.0,
            combo_scale: 1.0,
            shake: ScreenShake::default(),
            pool: EntityPool::new(config.bounds, config.seed),
            performance: PerformanceTracker::new(),
            rng: Pcg32::new(config.seed, SESSION_RNG_STREAM),
            cues: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// End the run; idempotent
    pub fn finish(&mut self, reason: FinishReason) {
        if self.is_finished() {
            return;
        }
        self.phase = SessionPhase::Finished;
        self.finish_reason = Some(reason);
        self.queue_cue(AudioCue::GameOver);
        log::info!(
            "Session finished ({:?}) after {:.1}s: score {}, {} correct, {} mistakes, max combo {}",
            reason,
            self.elapsed,
            self.score,
            self.correct,
            self.mistakes,
            self.max_combo
        );
    }

    /// Whole seconds left on the clock, as shown on the HUD
    pub fn time_left(&self) -> i64 {
        (self.duration - self.elapsed.floor()).max(0.0) as i64
    }

    /// Remaining fraction of the run (1 at start, 0 at the end)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (1.0 - self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_motion_remaining > 0.0
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_remaining > 0.0
    }

    pub(crate) fn queue_cue(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }

    /// Take the cues requested since the last call
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    /// Cues waiting to be drained
    pub fn pending_cues(&self) -> &[AudioCue] {
        &self.cues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = SessionState::new(SessionConfig::default());
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.time_left(), 60);
        assert_eq!(state.progress(), 1.0);
        assert!(state.pool.letters.is_empty());
        assert!(state.pending_cues().is_empty());
    }

    #[test]
    fn test_config_is_clamped() {
        let state = SessionState::new(SessionConfig {
            speed_multiplier: 9.0,
            spawn_interval: 5.0,
            duration: -1.0,
            ..Default::default()
        });
        assert_eq!(state.speed_multiplier, MAX_MANUAL_SPEED_MULTIPLIER);
        assert_eq!(state.spawn_interval, MIN_SPAWN_INTERVAL);
        assert_eq!(state.duration, 0.0);
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut state = SessionState::new(SessionConfig::default());
        state.finish(FinishReason::Quit);
        state.finish(FinishReason::TimeUp);
        assert_eq!(state.finish_reason, Some(FinishReason::Quit));
        assert_eq!(state.drain_cues(), vec![AudioCue::GameOver]);
        assert!(state.drain_cues().is_empty());
    }

    #[test]
    fn test_screen_shake_decays_to_rest() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut shake = ScreenShake::default();
        shake.add_trauma(0.7);
        shake.add_trauma(0.7);
        assert_eq!(shake.trauma, 1.0);

        shake.update(0.1, &mut rng);
        let limit = 0.8 * 0.8 * MAX_SHAKE_OFFSET;
        assert!(shake.offset.x.abs() <= limit && shake.offset.y.abs() <= limit);

        for _ in 0..10 {
            shake.update(0.1, &mut rng);
        }
        assert_eq!(shake.trauma, 0.0);
        assert_eq!(shake.offset, Vec2::ZERO);
    }
}
