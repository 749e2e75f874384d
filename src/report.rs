//! End-of-run statistics
//!
//! Built once the session finishes; shown as the results screen or dumped as JSON.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::ease_out_cubic;
use crate::renderer::hud::format_thousands;
use crate::sim::{FinishReason, SessionState};

/// How long the results screen takes to count the score up
pub const SCORE_REVEAL_SECS: f32 = 2.0;

/// A letter and how often it went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterCount {
    pub letter: char,
    pub count: u32,
}

/// Results of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub score: u64,
    pub correct: u32,
    pub mistakes: u32,
    pub max_combo: u32,
    /// Fraction of keystrokes and letters handled correctly, if there were any
    pub accuracy: Option<f32>,
    pub most_mistyped: Option<LetterCount>,
    pub most_missed: Option<LetterCount>,
    /// Simulated seconds played
    pub elapsed: f32,
    /// Final game length including time bonuses
    pub duration: f32,
    pub finish_reason: Option<FinishReason>,
}

impl RunReport {
    pub fn from_session(state: &SessionState) -> Self {
        let attempts = state.correct + state.mistakes;
        Self {
            score: state.score,
            correct: state.correct,
            mistakes: state.mistakes,
            max_combo: state.max_combo,
            accuracy: (attempts > 0).then(|| state.correct as f32 / attempts as f32),
            most_mistyped: most_frequent(&state.mistyped),
            most_missed: most_frequent(&state.missed),
            elapsed: state.elapsed,
            duration: state.duration,
            finish_reason: state.finish_reason,
        }
    }
}

/// Highest count wins; ties go to the earlier letter
fn most_frequent(counts: &HashMap<char, u32>) -> Option<LetterCount> {
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .min_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)))
        .map(|(letter, count)| LetterCount {
            letter: *letter,
            count: *count,
        })
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GAME OVER")?;
        writeln!(f, "Score: {}", format_thousands(self.score))?;
        writeln!(f, "Correct: {}", self.correct)?;
        writeln!(f, "Mistakes: {}", self.mistakes)?;
        write!(f, "Max Combo: {}x", self.max_combo)?;
        if let Some(accuracy) = self.accuracy {
            write!(f, "\nAccuracy: {:.0}%", accuracy * 100.0)?;
        }
        if let Some(m) = self.most_mistyped {
            write!(f, "\nMost typed mistake: '{}' ({}x)", m.letter, m.count)?;
        }
        if let Some(m) = self.most_missed {
            write!(f, "\nMost missed letter: '{}' ({}x)", m.letter, m.count)?;
        }
        Ok(())
    }
}

/// Animated score count-up on the results screen
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreReveal {
    elapsed: f32,
}

impl ScoreReveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(SCORE_REVEAL_SECS);
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= SCORE_REVEAL_SECS
    }

    /// Score to show right now
    pub fn displayed(&self, total: u64) -> u64 {
        if self.is_done() {
            return total;
        }
        let t = ease_out_cubic(self.elapsed / SCORE_REVEAL_SECS);
        (total as f64 * t as f64) as u64
    }
}
