//! Game settings and difficulty presets
//!
//! Loaded from an optional JSON file; anything missing takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{ScreenBounds, SessionConfig};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting letter speed multiplier
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.3,
        }
    }

    /// Starting frames between letter spawns
    pub fn spawn_interval(&self) -> f32 {
        match self {
            Difficulty::Easy => 80.0,
            Difficulty::Medium => 60.0,
            Difficulty::Hard => 45.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Game length in seconds
    pub duration_secs: f32,
    /// Fixed seed for reproducible runs (random when absent)
    pub seed: Option<u64>,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Visual Effects ===
    /// Screen shake on mistakes
    pub screen_shake: bool,
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            duration_secs: 60.0,
            seed: None,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            screen_shake: true,
            reduced_motion: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Create settings for a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    pub fn bounds(&self) -> ScreenBounds {
        ScreenBounds::new(self.screen_width, self.screen_height)
    }

    /// Starting parameters for a run with the given seed
    pub fn session_config(&self, seed: u64) -> SessionConfig {
        SessionConfig {
            bounds: self.bounds(),
            speed_multiplier: self.difficulty.speed_multiplier(),
            spawn_interval: self.difficulty.spawn_interval(),
            duration: self.duration_secs,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_presets() {
        let easy = Settings::from_difficulty(Difficulty::Easy).session_config(1);
        assert_eq!(easy.speed_multiplier, 0.7);
        assert_eq!(easy.spawn_interval, 80.0);
        assert_eq!(easy.duration, 60.0);

        let hard = Settings::from_difficulty(Difficulty::Hard).session_config(1);
        assert_eq!(hard.speed_multiplier, 1.3);
        assert_eq!(hard.spawn_interval, 45.0);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"difficulty": "easy", "seed": 7}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Easy);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.screen_width, SCREEN_WIDTH);
        assert!(settings.screen_shake);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::from_difficulty(Difficulty::Hard);
        settings.muted = true;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{"difficulty": "brutal"}"#).is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/letter-drop.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_danger_line_from_screen_height() {
        let mut settings = Settings::default();
        settings.screen_height = 720.0;
        assert_eq!(settings.bounds().danger_line_y(), 640.0);
    }
}
