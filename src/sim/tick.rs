//! Per-frame simulation step
//!
//! The order of the stages below decides which effects land within a single
//! frame: timers, then input, then difficulty and spawning, then movement and
//! reaping, then cosmetics.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entities::PowerUpKind;
use super::performance::Outcome;
use super::pool::Reaped;
use super::state::{FinishReason, SessionState};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::{lerp, palette};

/// A discrete input event for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key-down for A-Z
    Letter(char),
    /// Manual speed +0.2
    SpeedUp,
    /// Manual speed -0.2
    SpeedDown,
    /// End the run now
    Quit,
}

/// Input for a single tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Convenience for typing a run of letters in one frame
    pub fn typed(text: &str) -> Self {
        Self::new(text.chars().map(InputEvent::Letter))
    }

    pub fn quit() -> Self {
        Self::new([InputEvent::Quit])
    }
}

/// Advance the session by one frame of `dt` seconds
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) {
    if state.is_finished() {
        return;
    }
    // NaN and negative deltas collapse to zero
    let dt = dt.max(0.0);

    state.elapsed += dt;
    state.frame += 1;
    let now = state.elapsed;

    if state.elapsed >= state.duration {
        state.finish(FinishReason::TimeUp);
        return;
    }

    // Effects active at the start of the frame apply for the whole frame
    let slowed = state.is_slowed();
    let frozen = state.is_frozen();
    state.slow_motion_remaining = count_down(state.slow_motion_remaining, dt);
    state.freeze_remaining = count_down(state.freeze_remaining, dt);

    // Arrival order; anything after a quit is dropped with the rest of the frame
    for event in &input.events {
        match *event {
            InputEvent::Letter(ch) => handle_letter_key(state, ch, now),
            InputEvent::SpeedUp => adjust_speed(state, SPEED_STEP),
            InputEvent::SpeedDown => adjust_speed(state, -SPEED_STEP),
            InputEvent::Quit => {
                state.finish(FinishReason::Quit);
                return;
            }
        }
    }

    adapt_difficulty(state, now);
    spawn_letters(state);
    spawn_powerups(state, dt);

    state.pool.advance(dt, slowed, frozen);
    let reaped = state.pool.reap_expired();
    resolve_reaped(state, reaped);

    update_cosmetics(state, dt);
}

/// Decrement a countdown, snapping float residue to zero
fn count_down(remaining: f32, dt: f32) -> f32 {
    let left = (remaining - dt).max(0.0);
    if left < TIMER_EPSILON { 0.0 } else { left }
}

/// Points for a hit that brought the combo to `combo`
///
/// Integer form of `floor(10 * (1 + combo * 0.1))`.
pub fn points_for_combo(combo: u32) -> u64 {
    BASE_POINTS + combo as u64
}

fn handle_letter_key(state: &mut SessionState, ch: char, now: f32) {
    if !ch.is_ascii_alphabetic() {
        return;
    }
    let ch = ch.to_ascii_uppercase();

    match state.pool.try_consume_letter(ch) {
        Some(letter) => {
            state.correct += 1;
            state.combo += 1;
            state.max_combo = state.max_combo.max(state.combo);
            let points = points_for_combo(state.combo);
            state.score += points;
            state.combo_scale = COMBO_POP_SCALE;

            state
                .pool
                .spawn_floating_text(format!("+{points}"), letter.pos, palette::GOLD);
            state
                .pool
                .spawn_particles(letter.pos, PARTICLE_BURST, palette::CYAN);
            state.performance.record(Outcome::Correct, now);
            state.queue_cue(AudioCue::Correct);
            log::debug!("Hit '{}' (+{}), combo {}", ch, points, state.combo);
        }
        None => {
            state.mistakes += 1;
            *state.mistyped.entry(ch).or_insert(0) += 1;
            state.performance.record(Outcome::Mistake, now);
            break_combo(state);
            state.shake.add_trauma(MISTYPE_TRAUMA);
            let center = state.bounds.center();
            state
                .pool
                .spawn_floating_text("MISS!", center, palette::DANGER_RED);
            state.queue_cue(AudioCue::Miss);
            log::debug!("Mistyped '{}'", ch);
        }
    }
}

fn break_combo(state: &mut SessionState) {
    if state.combo >= 10 {
        log::debug!("Combo of {} broken", state.combo);
    }
    state.combo = 0;
}

/// Manual speed control via arrow keys
fn adjust_speed(state: &mut SessionState, delta: f32) {
    state.speed_multiplier = (state.speed_multiplier + delta)
        .clamp(MIN_SPEED_MULTIPLIER, MAX_MANUAL_SPEED_MULTIPLIER);
    let center = state.bounds.center();
    if delta > 0.0 {
        state
            .pool
            .spawn_floating_text("SPEED UP >>", center, palette::CYAN);
        state.queue_cue(AudioCue::SpeedUp);
    } else {
        state
            .pool
            .spawn_floating_text("<< SLOW DOWN", center, palette::GREEN);
        state.queue_cue(AudioCue::SpeedDown);
    }
    log::debug!("Manual speed -> {:.1}x", state.speed_multiplier);
}

/// Speed as shown on the HUD (one decimal)
///
/// Rounds like the HUD's `{:.1}` label, so a cue plays exactly when the label
/// changes. Truncating would fire on 1.09 -> 1.11, where the label stays at 1.1.
fn displayed_tenths(speed: f32) -> i32 {
    (speed * 10.0).round() as i32
}

/// Nudge speed and spawn cadence toward the player's rolling accuracy
fn adapt_difficulty(state: &mut SessionState, now: f32) {
    state.performance.prune(now);
    let Some(accuracy) = state.performance.accuracy() else {
        return;
    };

    let old = state.speed_multiplier;
    if accuracy > SPEED_UP_ACCURACY {
        let new = (old * ADAPTIVE_SPEED_UP).min(MAX_ADAPTIVE_SPEED_MULTIPLIER);
        if displayed_tenths(new) > displayed_tenths(old) {
            state.queue_cue(AudioCue::SpeedUp);
            log::info!("Speed up -> {:.1}x (accuracy {:.0}%)", new, accuracy * 100.0);
        }
        state.speed_multiplier = new;
        state.spawn_interval = (state.spawn_interval * ADAPTIVE_SLOW_DOWN).max(MIN_SPAWN_INTERVAL);
    } else if accuracy < SLOW_DOWN_ACCURACY {
        let new = (old * ADAPTIVE_SLOW_DOWN).max(MIN_SPEED_MULTIPLIER);
        if displayed_tenths(new) < displayed_tenths(old) {
            state.queue_cue(AudioCue::SpeedDown);
            log::info!("Slow down -> {:.1}x (accuracy {:.0}%)", new, accuracy * 100.0);
        }
        state.speed_multiplier = new;
        state.spawn_interval = (state.spawn_interval * ADAPTIVE_SPEED_UP).min(MAX_SPAWN_INTERVAL);
    }
}

/// Frame-counted letter cadence
fn spawn_letters(state: &mut SessionState) {
    state.spawn_counter += 1;
    if state.spawn_counter as f32 >= state.spawn_interval {
        state.pool.spawn_letter(state.speed_multiplier);
        state.spawn_counter = 0;
    }
}

fn spawn_powerups(state: &mut SessionState, dt: f32) {
    let interval = POWERUP_SPAWN_INTERVAL_SECS as f64;
    state.powerup_timer += dt as f64;
    if state.powerup_timer >= interval - TIMER_EPSILON as f64 {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        state.pool.spawn_powerup(kind);
        state.powerup_timer = (state.powerup_timer - interval).max(0.0);
        log::debug!("Power-up spawned: {}", kind.as_str());
    }
}

/// React to letters lost and power-ups collected this frame
fn resolve_reaped(state: &mut SessionState, reaped: Reaped) {
    for letter in &reaped.crossed_danger {
        state.mistakes += 1;
        *state.missed.entry(letter.ch).or_insert(0) += 1;
        break_combo(state);
        state.shake.add_trauma(DANGER_TRAUMA);
        state.queue_cue(AudioCue::Miss);
        log::debug!("Letter '{}' crossed the danger line", letter.ch);
    }

    for powerup in &reaped.collected_powerups {
        apply_powerup(state, powerup.kind);
        let anchor = Vec2::new(state.bounds.width / 2.0, state.bounds.height - 150.0);
        state.pool.spawn_floating_text(
            format!("{} Power-Up!", powerup.kind.symbol()),
            anchor,
            powerup.kind.color(),
        );
        state.queue_cue(AudioCue::PowerUp);
    }

    if !reaped.off_screen_powerups.is_empty() {
        log::debug!("{} power-up(s) fell off screen", reaped.off_screen_powerups.len());
    }
}

/// Apply a collected power-up's effect
pub fn apply_powerup(state: &mut SessionState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Slow => state.slow_motion_remaining = SLOW_MOTION_SECS,
        PowerUpKind::Time => state.duration += TIME_BONUS_SECS,
        PowerUpKind::Freeze => state.freeze_remaining = FREEZE_SECS,
    }
    log::info!("Power-up collected: {}", kind.as_str());
}

fn update_cosmetics(state: &mut SessionState, dt: f32) {
    if state.combo_scale > 1.0 {
        let t = (dt * COMBO_SCALE_RATE).min(1.0);
        state.combo_scale = lerp(state.combo_scale, 1.0, t);
    }
    state.shake.update(dt, &mut state.rng);
}
