//! Headless renderer for terminals, CI and demos
//!
//! Lays each frame out into sprites like a drawing backend would, then logs the
//! HUD periodically instead of rasterizing anything.

use glam::Vec2;

use super::glyph_cache::{GlyphCache, letter_glyph_size};
use super::hud::{alpha, letter_color};
use super::{FrameView, Renderer};
use crate::{Rgb, palette};

const TEXT_GLYPH_SIZE: u32 = 24;
const POWERUP_GLYPH_SIZE: u32 = 32;

/// Approximate text metrics for a glyph size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub size: u32,
    /// Advance width of an uppercase glyph
    pub advance: f32,
    pub line_height: f32,
}

impl TextMetrics {
    fn for_size(size: u32) -> Self {
        let size_f = size as f32;
        Self {
            size,
            advance: size_f * 0.72,
            line_height: size_f * 1.15,
        }
    }
}

/// One laid-out draw call
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub glyph: String,
    /// Draw position after screen shake
    pub pos: Vec2,
    pub size: u32,
    pub color: Rgb,
    pub alpha: u8,
}

/// Renderer that logs instead of drawing
#[derive(Debug)]
pub struct HeadlessRenderer {
    /// Log the HUD every this many frames (0 = never)
    log_every: u64,
    frames: u64,
    peak_entities: usize,
    peak_letters: usize,
    glyphs: GlyphCache<TextMetrics>,
    sprites: Vec<Sprite>,
    danger_letters: usize,
    timer_bar: (Rgb, Rgb),
}

impl HeadlessRenderer {
    pub fn new(log_every: u64) -> Self {
        Self {
            log_every,
            frames: 0,
            peak_entities: 0,
            peak_letters: 0,
            glyphs: GlyphCache::new(),
            sprites: Vec::new(),
            danger_letters: 0,
            timer_bar: (palette::GREEN, palette::CYAN),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most entities seen in a single frame
    pub fn peak_entities(&self) -> usize {
        self.peak_entities
    }

    /// Most letters on screen at once
    pub fn peak_letters(&self) -> usize {
        self.peak_letters
    }

    /// Distinct glyph sizes built so far
    pub fn glyph_sizes(&self) -> usize {
        self.glyphs.len()
    }

    /// Draw list of the last frame
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Timer bar gradient of the last frame
    pub fn timer_bar(&self) -> (Rgb, Rgb) {
        self.timer_bar
    }

    /// Letters of the last frame tinted toward red
    pub fn danger_letters(&self) -> usize {
        self.danger_letters
    }

    fn layout(&mut self, frame: &FrameView<'_>) {
        let offset = frame.shake_offset;
        self.sprites.clear();
        self.danger_letters = 0;

        for letter in frame.letters {
            let size = letter_glyph_size(letter.scale);
            let metrics = *self.glyphs.get_or_insert_with(size, TextMetrics::for_size);
            let half = Vec2::new(metrics.advance, metrics.line_height) / 2.0;
            let color = letter_color(letter, frame.danger_line_y);
            if color != palette::WHITE {
                self.danger_letters += 1;
            }
            self.sprites.push(Sprite {
                glyph: letter.ch.to_string(),
                pos: letter.pos - half + offset,
                size,
                color,
                alpha: 255,
            });
        }
        for particle in frame.particles {
            let fade = particle.fade();
            self.sprites.push(Sprite {
                glyph: "•".to_string(),
                pos: particle.pos + offset,
                size: (particle.size * fade).round() as u32,
                color: particle.color,
                alpha: alpha(fade),
            });
        }
        for text in frame.texts {
            self.sprites.push(Sprite {
                glyph: text.message.clone(),
                pos: text.pos + offset,
                size: TEXT_GLYPH_SIZE,
                color: text.color,
                alpha: alpha(text.fade()),
            });
        }
        for powerup in frame.powerups {
            self.sprites.push(Sprite {
                glyph: powerup.kind.symbol().to_string(),
                pos: powerup.pos + offset,
                size: POWERUP_GLYPH_SIZE,
                color: powerup.kind.color(),
                alpha: 255,
            });
        }
        self.timer_bar = frame.hud.progress_gradient();
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, frame: &FrameView<'_>) {
        self.frames += 1;
        self.peak_entities = self.peak_entities.max(frame.entity_count());
        self.peak_letters = self.peak_letters.max(frame.letters.len());
        self.layout(frame);

        if self.log_every > 0 && self.frames % self.log_every == 0 {
            let hud = &frame.hud;
            log::info!(
                "[{}] {} | {} | {} | letters {} ({} in danger){}",
                hud.clock_label(),
                hud.score_label(),
                hud.tally_label(),
                hud.speed_label(),
                frame.letters.len(),
                self.danger_letters(),
                hud.combo_label()
                    .map(|c| format!(" | {c}"))
                    .unwrap_or_default()
            );
            for (line, _) in hud.powerup_indicators() {
                log::info!("    {}", line);
            }
            log::debug!("Timer bar {:?}, {} sprites", self.timer_bar, self.sprites.len());
        }
    }
}
