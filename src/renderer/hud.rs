//! HUD numbers and the presentation rules derived from them
//!
//! Pure functions of session state. Backends decide how to draw, these decide what.

use serde::Serialize;

use crate::sim::{FallingLetter, SessionState};
use crate::{Rgb, palette};

/// HUD numbers for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub correct: u32,
    pub mistakes: u32,
    pub combo: u32,
    /// Combo counter pop scale
    pub combo_scale: f32,
    pub speed_multiplier: f32,
    /// Whole seconds left
    pub time_left: i64,
    /// Remaining fraction of the run
    pub progress: f32,
    pub slow_motion_remaining: f32,
    pub freeze_remaining: f32,
    pub finished: bool,
}

impl Hud {
    pub fn from_session(state: &SessionState) -> Self {
        Self {
            score: state.score,
            correct: state.correct,
            mistakes: state.mistakes,
            combo: state.combo,
            combo_scale: state.combo_scale,
            speed_multiplier: state.speed_multiplier,
            time_left: state.time_left(),
            progress: state.progress(),
            slow_motion_remaining: state.slow_motion_remaining,
            freeze_remaining: state.freeze_remaining,
            finished: state.is_finished(),
        }
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", format_thousands(self.score))
    }

    pub fn tally_label(&self) -> String {
        format!("✓ {}  ✗ {}", self.correct, self.mistakes)
    }

    pub fn speed_label(&self) -> String {
        format!("Speed: {:.1}x", self.speed_multiplier)
    }

    pub fn clock_label(&self) -> String {
        format_clock(self.time_left)
    }

    /// "12x COMBO!" while a combo is running
    pub fn combo_label(&self) -> Option<String> {
        (self.combo > 0).then(|| format!("{}x COMBO!", self.combo))
    }

    pub fn combo_color(&self) -> Rgb {
        if self.combo < 10 {
            palette::CYAN
        } else {
            palette::PINK
        }
    }

    /// Timer bar gradient (start, end) for the remaining fraction
    pub fn progress_gradient(&self) -> (Rgb, Rgb) {
        if self.progress > 0.5 {
            (palette::GREEN, palette::CYAN)
        } else if self.progress > 0.25 {
            (palette::GOLD, palette::GREEN)
        } else {
            (palette::DANGER_RED, palette::GOLD)
        }
    }

    /// Active power-up indicator lines, with their colors
    pub fn powerup_indicators(&self) -> Vec<(String, Rgb)> {
        let mut lines = Vec::new();
        if self.slow_motion_remaining > 0.0 {
            lines.push((
                format!("⏱ Slow: {}s", self.slow_motion_remaining as u32),
                palette::CYAN,
            ));
        }
        if self.freeze_remaining > 0.0 {
            lines.push((
                format!("❄ Freeze: {}s", self.freeze_remaining as u32),
                palette::PURPLE,
            ));
        }
        lines
    }
}

/// Seconds as MM:SS
pub fn format_clock(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// 1234567 -> "1,234,567"
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Letters turn from white to red as they approach the danger line
pub fn letter_color(letter: &FallingLetter, danger_line_y: f32) -> Rgb {
    let danger = letter.danger_factor(danger_line_y);
    if danger > 0.0 {
        palette::WHITE.lerp(palette::RED, danger)
    } else {
        palette::WHITE
    }
}

/// Fade fraction to 8-bit alpha
pub fn alpha(fade: f32) -> u8 {
    (255.0 * fade.clamp(0.0, 1.0)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SessionConfig;

    fn hud() -> Hud {
        Hud::from_session(&SessionState::new(SessionConfig::default()))
    }

    #[test]
    fn test_labels() {
        let mut hud = hud();
        hud.score = 1_234_567;
        hud.speed_multiplier = 1.26;
        assert_eq!(hud.score_label(), "Score: 1,234,567");
        assert_eq!(hud.speed_label(), "Speed: 1.3x");
        assert_eq!(hud.clock_label(), "01:00");
        assert_eq!(hud.combo_label(), None);

        hud.combo = 12;
        assert_eq!(hud.combo_label().as_deref(), Some("12x COMBO!"));
        assert_eq!(hud.combo_color(), palette::PINK);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(12345), "12,345");
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(70), "01:10");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(-3), "00:00");
    }

    #[test]
    fn test_progress_gradient_bands() {
        let mut hud = hud();
        hud.progress = 0.9;
        assert_eq!(hud.progress_gradient().0, palette::GREEN);
        hud.progress = 0.3;
        assert_eq!(hud.progress_gradient().0, palette::GOLD);
        hud.progress = 0.1;
        assert_eq!(hud.progress_gradient().0, palette::DANGER_RED);
    }

    #[test]
    fn test_powerup_indicators() {
        let mut hud = hud();
        assert!(hud.powerup_indicators().is_empty());
        hud.slow_motion_remaining = 4.5;
        hud.freeze_remaining = 2.2;
        let lines: Vec<_> = hud.powerup_indicators().into_iter().map(|(s, _)| s).collect();
        assert_eq!(lines, ["⏱ Slow: 4s", "❄ Freeze: 2s"]);
    }

    #[test]
    fn test_letter_color_reddens_near_line() {
        let mut letter = FallingLetter::new(1, 'A', 100.0, 1.0, 0.0);
        letter.pos.y = 100.0;
        assert_eq!(letter_color(&letter, 520.0), palette::WHITE);
        letter.pos.y = 520.0;
        assert_eq!(letter_color(&letter, 520.0), palette::RED);
    }

    #[test]
    fn test_alpha() {
        assert_eq!(alpha(1.0), 255);
        assert_eq!(alpha(0.0), 0);
        assert_eq!(alpha(-1.0), 0);
    }
}
