//! Audio cue seam
//!
//! The simulation only names cues. Whatever actually makes noise sits behind
//! [`CuePlayer`] and is fire-and-forget: nothing flows back into the game.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    /// Letter typed correctly
    Correct,
    /// Wrong key, or a letter crossed the danger line
    Miss,
    /// Speed went up (manual or adaptive)
    SpeedUp,
    /// Speed went down (manual or adaptive)
    SpeedDown,
    /// Power-up collected
    PowerUp,
    /// Run over
    GameOver,
}

impl AudioCue {
    pub const ALL: [AudioCue; 6] = [
        AudioCue::Correct,
        AudioCue::Miss,
        AudioCue::SpeedUp,
        AudioCue::SpeedDown,
        AudioCue::PowerUp,
        AudioCue::GameOver,
    ];

    /// Stable cue name, also the sample file stem
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::Correct => "correct",
            AudioCue::Miss => "miss",
            AudioCue::SpeedUp => "speed_up",
            AudioCue::SpeedDown => "speed_down",
            AudioCue::PowerUp => "powerup",
            AudioCue::GameOver => "game_over",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can play a cue
pub trait CuePlayer {
    fn play(&mut self, cue: AudioCue);

    fn play_all(&mut self, cues: impl IntoIterator<Item = AudioCue>)
    where
        Self: Sized,
    {
        for cue in cues {
            self.play(cue);
        }
    }
}

/// Where a cue's sound comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueSource {
    /// Pre-recorded sample on disk
    Sample(PathBuf),
    /// Generated on the fly by the backend
    Synth,
}

/// Sample file extensions tried in order
const SAMPLE_EXTENSIONS: [&str; 3] = ["wav", "ogg", "mp3"];

/// Audio manager for the game
///
/// Applies volume and mute, resolves optional samples and keeps a tally of
/// what was played. Missing samples fall back to synthesized sound.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    sources: HashMap<AudioCue, CueSource>,
    played: HashMap<AudioCue, u32>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            sources: AudioCue::ALL.iter().map(|c| (*c, CueSource::Synth)).collect(),
            played: HashMap::new(),
        }
    }

    /// Look for `<cue name>.{wav,ogg,mp3}` in `dir`, synthesizing the rest
    pub fn with_sample_dir(mut self, dir: &Path) -> Self {
        for cue in AudioCue::ALL {
            let found = SAMPLE_EXTENSIONS
                .iter()
                .map(|ext| dir.join(format!("{}.{}", cue.name(), ext)))
                .find(|path| path.is_file());
            let source = match found {
                Some(path) => {
                    log::debug!("Cue {} uses sample {}", cue, path.display());
                    CueSource::Sample(path)
                }
                None => CueSource::Synth,
            };
            self.sources.insert(cue, source);
        }
        self
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn source(&self, cue: AudioCue) -> &CueSource {
        self.sources.get(&cue).unwrap_or(&CueSource::Synth)
    }

    /// How many times `cue` actually played
    pub fn times_played(&self, cue: AudioCue) -> u32 {
        self.played.get(&cue).copied().unwrap_or(0)
    }

    pub fn total_played(&self) -> u32 {
        self.played.values().sum()
    }
}

impl CuePlayer for AudioManager {
    fn play(&mut self, cue: AudioCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        match self.source(cue) {
            CueSource::Sample(path) => {
                log::debug!("Cue {} ({}) at {:.2}", cue, path.display(), vol)
            }
            CueSource::Synth => log::debug!("Cue {} (synth) at {:.2}", cue, vol),
        }
        *self.played.entry(cue).or_insert(0) += 1;
    }
}
