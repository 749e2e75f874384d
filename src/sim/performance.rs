//! Rolling accuracy window for adaptive difficulty

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_ACCURACY_SAMPLES, PERFORMANCE_WINDOW_SECS};

/// Result of a single keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Mistake,
}

/// Keystroke outcomes from the last 15 simulated seconds, oldest first
#[derive(Debug, Clone, Default)]
pub struct PerformanceTracker {
    window: VecDeque<(f32, Outcome)>,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome, timestamp: f32) {
        self.window.push_back((timestamp, outcome));
    }

    /// Drop samples aged 15 seconds or more
    pub fn prune(&mut self, now: f32) {
        // Timestamps are pushed in order, so expired samples sit at the front
        while let Some(&(t, _)) = self.window.front() {
            if now - t >= PERFORMANCE_WINDOW_SECS {
                self.window.pop_front();
            } else {
                break;
            }
        }
    }

    /// Fraction correct, or `None` while the window is too thin to judge
    pub fn accuracy(&self) -> Option<f32> {
        if self.window.len() < MIN_ACCURACY_SAMPLES {
            return None;
        }
        let correct = self
            .window
            .iter()
            .filter(|(_, o)| *o == Outcome::Correct)
            .count();
        Some(correct as f32 / self.window.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
