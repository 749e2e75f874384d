//! Glyph cache keyed by pixel size
//!
//! Letters scale every frame (pop-in, danger pulse). Building a font face per
//! frame is expensive, so faces are built once per integer size and reused.

use std::collections::HashMap;

/// Base letter glyph size in pixels
pub const LETTER_GLYPH_SIZE: f32 = 36.0;

/// Integer pixel size for a letter drawn at `scale`
pub fn letter_glyph_size(scale: f32) -> u32 {
    (LETTER_GLYPH_SIZE * scale).round().max(1.0) as u32
}

/// Cache of backend glyph data, one entry per pixel size
#[derive(Debug, Clone)]
pub struct GlyphCache<G> {
    entries: HashMap<u32, G>,
    misses: u64,
}

impl<G> Default for GlyphCache<G> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            misses: 0,
        }
    }
}

impl<G> GlyphCache<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `size`, building it with `load` on first use
    pub fn get_or_insert_with(&mut self, size: u32, load: impl FnOnce(u32) -> G) -> &G {
        let misses = &mut self.misses;
        self.entries.entry(size).or_insert_with(|| {
            *misses += 1;
            log::trace!("Glyph cache miss for size {}", size);
            load(size)
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times a loader had to run
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
