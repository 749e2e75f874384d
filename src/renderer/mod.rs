//! Rendering seam
//!
//! The simulation hands a read-only [`FrameView`] to whatever draws it. Draw
//! backends only consume; nothing they do feeds back into the game.

pub mod glyph_cache;
pub mod headless;
pub mod hud;

pub use glyph_cache::GlyphCache;
pub use headless::HeadlessRenderer;
pub use hud::Hud;

use glam::Vec2;

use crate::sim::{FallingLetter, FloatingText, Particle, PowerUp, ScreenBounds, SessionState};

/// Anything that can draw a frame
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

/// Everything needed to draw one frame, borrowed from the session
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub bounds: ScreenBounds,
    pub danger_line_y: f32,
    pub letters: &'a [FallingLetter],
    pub particles: &'a [Particle],
    pub texts: &'a [FloatingText],
    pub powerups: &'a [PowerUp],
    pub hud: Hud,
    /// Whole-playfield offset from screen shake
    pub shake_offset: Vec2,
}

impl<'a> FrameView<'a> {
    /// Snapshot the session for drawing
    pub fn capture(state: &'a SessionState, shake_enabled: bool) -> Self {
        Self {
            bounds: state.bounds,
            danger_line_y: state.bounds.danger_line_y(),
            letters: &state.pool.letters,
            particles: &state.pool.particles,
            texts: &state.pool.texts,
            powerups: &state.pool.powerups,
            hud: Hud::from_session(state),
            shake_offset: if shake_enabled {
                state.shake.offset
            } else {
                Vec2::ZERO
            },
        }
    }

    pub fn entity_count(&self) -> usize {
        self.letters.len() + self.particles.len() + self.texts.len() + self.powerups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SessionConfig;

    #[test]
    fn test_capture_borrows_session_entities() {
        let mut state = SessionState::new(SessionConfig::default());
        state.pool.push_letter('A', 100.0, 1.0, 0.0);
        state.shake.offset = Vec2::new(3.0, -2.0);

        let frame = FrameView::capture(&state, true);
        assert_eq!(frame.letters.len(), 1);
        assert_eq!(frame.entity_count(), 1);
        assert_eq!(frame.danger_line_y, 520.0);
        assert_eq!(frame.shake_offset, Vec2::new(3.0, -2.0));

        let still = FrameView::capture(&state, false);
        assert_eq!(still.shake_offset, Vec2::ZERO);
    }
}
