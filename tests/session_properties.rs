//! Property tests for the session update over random input streams

use letter_drop::RunReport;
use letter_drop::consts::{
    MAX_ADAPTIVE_SPEED_MULTIPLIER, MAX_MANUAL_SPEED_MULTIPLIER, MIN_SPEED_MULTIPLIER, SIM_DT,
};
use letter_drop::sim::{
    AutoPlayer, FinishReason, InputEvent, SessionConfig, SessionState, TickInput, tick,
};
use proptest::prelude::*;

fn event() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        8 => (b'A'..=b'Z').prop_map(|b| InputEvent::Letter(b as char)),
        1 => Just(InputEvent::SpeedUp),
        1 => Just(InputEvent::SpeedDown),
    ]
}

fn frames() -> impl Strategy<Value = Vec<(Vec<InputEvent>, f32)>> {
    prop::collection::vec((prop::collection::vec(event(), 0..3), 0.0f32..0.1), 1..400)
}

fn letter_frames() -> impl Strategy<Value = Vec<(Vec<InputEvent>, f32)>> {
    let letter = (b'A'..=b'Z').prop_map(|b| InputEvent::Letter(b as char));
    prop::collection::vec((prop::collection::vec(letter, 0..3), 0.0f32..0.1), 1..400)
}

fn session(seed: u64) -> SessionState {
    SessionState::new(SessionConfig {
        seed,
        ..Default::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_counters_stay_consistent(seed in any::<u64>(), frames in frames()) {
        let mut state = session(seed);
        for (events, dt) in frames {
            let score_before = state.score;
            tick(&mut state, &TickInput::new(events), dt);

            prop_assert!(state.score >= score_before);
            prop_assert!(state.max_combo >= state.combo);
            prop_assert!(state.combo <= state.correct);
            prop_assert!(state.speed_multiplier >= MIN_SPEED_MULTIPLIER);
            prop_assert!(state.speed_multiplier <= MAX_MANUAL_SPEED_MULTIPLIER);
            prop_assert!(state.slow_motion_remaining >= 0.0);
            prop_assert!(state.freeze_remaining >= 0.0);
        }
    }

    #[test]
    fn test_adaptive_speed_stays_in_band(seed in any::<u64>(), frames in letter_frames()) {
        let mut state = session(seed);
        for (events, dt) in frames {
            tick(&mut state, &TickInput::new(events), dt);
            prop_assert!(state.speed_multiplier >= MIN_SPEED_MULTIPLIER);
            prop_assert!(state.speed_multiplier <= MAX_ADAPTIVE_SPEED_MULTIPLIER);
        }
    }

    #[test]
    fn test_reaped_entities_are_gone(seed in any::<u64>(), frames in frames()) {
        let mut state = session(seed);
        let danger_line_y = state.bounds.danger_line_y();
        let band_top = state.bounds.collection_band_top();
        for (events, dt) in frames {
            tick(&mut state, &TickInput::new(events), dt);
            if state.is_finished() {
                break;
            }
            let pool = &state.pool;
            prop_assert!(pool.letters.iter().all(|l| l.pos.y < danger_line_y));
            prop_assert!(pool.powerups.iter().all(|p| p.pos.y <= band_top));
            prop_assert!(pool.particles.iter().all(|p| !p.is_dead()));
            prop_assert!(pool.texts.iter().all(|t| !t.is_dead()));
            // Ids are unique and increase in insertion order
            prop_assert!(pool.letters.windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}

fn autoplay_run(seed: u64) -> SessionState {
    let mut state = session(seed);
    let mut player = AutoPlayer::new(seed, 0.8, 15);
    // 60s plus room for a few time bonuses
    for _ in 0..(60 * 200) {
        if state.is_finished() {
            break;
        }
        let input = player.next_input(&state);
        tick(&mut state, &input, SIM_DT);
    }
    state
}

#[test]
fn test_autoplay_session_runs_to_time_up() {
    let state = autoplay_run(42);
    assert!(state.is_finished());
    assert_eq!(state.finish_reason, Some(FinishReason::TimeUp));
    assert!(state.correct > 0);
    assert!(state.score > 0);
    assert!(state.elapsed >= state.duration);
}

#[test]
fn test_same_seed_same_report() {
    let a = RunReport::from_session(&autoplay_run(7));
    let b = RunReport::from_session(&autoplay_run(7));
    assert_eq!(a, b);
}
