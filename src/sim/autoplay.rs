//! Demo player for attract mode and headless runs
//!
//! Chases the letter closest to the danger line, with a reaction delay and a
//! configurable hit rate so adaptive difficulty has something to react to.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::SessionState;
use super::tick::{InputEvent, TickInput};

/// Seeded stand-in for a human typist
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: Pcg32,
    /// Probability of pressing the right key
    accuracy: f32,
    /// Frames between keystrokes
    reaction_frames: u32,
    cooldown: u32,
}

impl AutoPlayer {
    /// `accuracy` is clamped to [0, 1]; NaN counts as 0
    pub fn new(seed: u64, accuracy: f32, reaction_frames: u32) -> Self {
        let accuracy = if accuracy.is_nan() {
            0.0
        } else {
            accuracy.clamp(0.0, 1.0)
        };
        Self {
            rng: Pcg32::seed_from_u64(seed),
            accuracy,
            reaction_frames,
            cooldown: reaction_frames,
        }
    }

    /// Decide this frame's input
    pub fn next_input(&mut self, state: &SessionState) -> TickInput {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return TickInput::default();
        }
        let Some(target) = state.pool.most_urgent_letter() else {
            return TickInput::default();
        };
        self.cooldown = self.reaction_frames;

        let key = if self.rng.random_bool(self.accuracy as f64) {
            target.ch
        } else {
            self.wrong_key(state).unwrap_or(target.ch)
        };
        TickInput::new([InputEvent::Letter(key)])
    }

    /// A letter that is not on screen, so pressing it is a guaranteed mistype
    fn wrong_key(&mut self, state: &SessionState) -> Option<char> {
        let absent: Vec<char> = ('A'..='Z')
            .filter(|c| state.pool.letters.iter().all(|l| l.ch != *c))
            .collect();
        if absent.is_empty() {
            return None;
        }
        Some(absent[self.rng.random_range(0..absent.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::SessionConfig;
    use crate::sim::tick::tick;

    #[test]
    fn test_perfect_player_never_mistypes() {
        let mut state = SessionState::new(SessionConfig {
            seed: 5,
            duration: 20.0,
            ..Default::default()
        });
        let mut player = AutoPlayer::new(9, 1.0, 10);
        while !state.is_finished() {
            let input = player.next_input(&state);
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.correct > 0);
        assert!(state.mistyped.is_empty());
    }

    #[test]
    fn test_hopeless_player_only_mistypes() {
        let mut state = SessionState::new(SessionConfig {
            seed: 5,
            duration: 10.0,
            ..Default::default()
        });
        let mut player = AutoPlayer::new(9, 0.0, 10);
        while !state.is_finished() {
            let input = player.next_input(&state);
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.correct, 0);
        assert!(!state.mistyped.is_empty());
        assert_eq!(state.max_combo, 0);
    }

    #[test]
    fn test_out_of_range_accuracy_is_tamed() {
        let mut state = SessionState::new(SessionConfig::default());
        state.pool.push_letter('K', 100.0, 0.0, 0.0);
        for accuracy in [f32::NAN, f32::INFINITY, -3.0] {
            let mut player = AutoPlayer::new(4, accuracy, 0);
            // Would panic inside random_bool if the rate escaped [0, 1]
            assert_eq!(player.next_input(&state).events.len(), 1);
        }
        let mut sure = AutoPlayer::new(4, f32::INFINITY, 0);
        assert_eq!(
            sure.next_input(&state).events,
            vec![InputEvent::Letter('K')]
        );
    }

    #[test]
    fn test_idle_without_letters() {
        let state = SessionState::new(SessionConfig::default());
        let mut player = AutoPlayer::new(1, 1.0, 0);
        assert!(player.next_input(&state).events.is_empty());
    }
}
