use std::collections::HashMap;

use rand::Rng;

use crate::theme::{Rgb, ThemeMode};

/// Characters the rain draws from.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()";

/// A pre-rendered glyph: the encoded symbol plus the color resolved for the
/// theme it was built under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub symbol: &'static str,
    pub color: Rgb,
}

/// Glyphs for every character of [`ALPHABET`], keyed by character.
///
/// Built once per theme. A theme change means building a new cache; entries
/// are never recolored in place.
#[derive(Debug, Clone)]
pub struct GlyphCache {
    theme: ThemeMode,
    chars: Vec<char>,
    glyphs: HashMap<char, Glyph>,
}

impl GlyphCache {
    pub fn build(theme: ThemeMode) -> Self {
        let color = theme.palette().foreground;
        let mut chars = Vec::with_capacity(ALPHABET.len());
        let mut glyphs = HashMap::with_capacity(ALPHABET.len());

        for (idx, ch) in ALPHABET.char_indices() {
            let symbol = &ALPHABET[idx..idx + ch.len_utf8()];
            chars.push(ch);
            glyphs.insert(ch, Glyph { ch, symbol, color });
        }

        Self {
            theme,
            chars,
            glyphs,
        }
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.chars.iter().filter_map(|ch| self.glyphs.get(ch))
    }

    /// Pick a character uniformly from the alphabet and return its glyph.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&Glyph> {
        if self.chars.is_empty() {
            return None;
        }
        let ch = self.chars[rng.random_range(0..self.chars.len())];
        self.glyphs.get(&ch)
    }
}
