//! Palette configuration for sprites and the banner.
//!
//! Colors follow the X11 "light"/"pale" families so sprites stay readable on
//! dark terminals. Every style is dim + bold, matching the washed-out look of
//! the default glyphs.

use crate::rng::SpawnRng;
use crate::types::{CellStyle, Rgb};

pub const LIGHT_BLUE: Rgb = Rgb::new(173, 216, 230);
pub const LIGHT_SKY_BLUE: Rgb = Rgb::new(135, 206, 250);
pub const LIGHT_STEEL_BLUE: Rgb = Rgb::new(176, 196, 222);
pub const LIGHT_CYAN: Rgb = Rgb::new(224, 255, 255);
pub const LIGHT_YELLOW: Rgb = Rgb::new(255, 255, 224);
pub const LIGHT_GREEN: Rgb = Rgb::new(144, 238, 144);
pub const LIGHT_CORAL: Rgb = Rgb::new(240, 128, 128);
pub const PALE_VIOLET_RED: Rgb = Rgb::new(219, 112, 147);

const FISH_COLORS: [Rgb; 17] = [
    Rgb::new(218, 112, 214), // orchid
    Rgb::new(238, 232, 170), // pale goldenrod
    Rgb::new(152, 251, 152), // pale green
    Rgb::new(175, 238, 238), // pale turquoise
    PALE_VIOLET_RED,
    Rgb::new(255, 239, 213), // papaya whip
    Rgb::new(255, 218, 185), // peach puff
    LIGHT_CORAL,
    Rgb::new(250, 250, 210), // light goldenrod yellow
    Rgb::new(211, 211, 211), // light gray
    LIGHT_GREEN,
    Rgb::new(255, 182, 193), // light pink
    Rgb::new(255, 160, 122), // light salmon
    Rgb::new(119, 136, 153), // light slate gray
    LIGHT_YELLOW,
    Rgb::new(32, 178, 170), // light sea green
    Rgb::new(50, 205, 50),  // lime green
];

const BUBBLE_COLORS: [Rgb; 4] = [LIGHT_CYAN, LIGHT_BLUE, LIGHT_SKY_BLUE, LIGHT_STEEL_BLUE];

/// Color class of a sprite glyph in glyph-color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphClass {
    /// Fins, tails and outlines
    Structural,
    /// Eyes and body markings
    Accent,
    /// Scales and small marks
    Punctuation,
    Plain,
}

impl GlyphClass {
    pub fn of(ch: char) -> Self {
        match ch {
            '\\' | '/' | '#' | '~' | '-' | '_' | '<' | '(' | ')' => GlyphClass::Structural,
            'C' | '@' | 'o' => GlyphClass::Accent,
            ',' | '"' | '\'' | ';' | ':' | '=' => GlyphClass::Punctuation,
            _ => GlyphClass::Plain,
        }
    }
}

/// Styles handed to layers and the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteConfig {
    /// Per-layer fish styles (also used for the banner)
    pub fish: Vec<CellStyle>,
    pub bubbles: Vec<CellStyle>,
    /// Warm picks for structural glyphs
    pub structural: Vec<CellStyle>,
    pub accent: CellStyle,
    pub punctuation: CellStyle,
    /// Glyphs without a class
    pub base: CellStyle,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let base = CellStyle::muted();
        let bubbles: Vec<CellStyle> = BUBBLE_COLORS.iter().map(|c| base.with_fg(*c)).collect();
        let fish = FISH_COLORS
            .iter()
            .map(|c| base.with_fg(*c))
            .chain(bubbles.iter().copied())
            .collect();
        Self {
            fish,
            bubbles,
            structural: vec![
                base.with_fg(LIGHT_YELLOW),
                base.with_fg(LIGHT_GREEN),
                base.with_fg(LIGHT_BLUE),
            ],
            accent: base.with_fg(PALE_VIOLET_RED),
            punctuation: base.with_fg(LIGHT_CORAL),
            base,
        }
    }
}

impl PaletteConfig {
    /// Style for `ch` in glyph-color mode.
    pub fn glyph_style(&self, ch: char, rng: &mut SpawnRng) -> CellStyle {
        match GlyphClass::of(ch) {
            GlyphClass::Structural => rng.pick(&self.structural, self.base),
            GlyphClass::Accent => self.accent,
            GlyphClass::Punctuation => self.punctuation,
            GlyphClass::Plain => self.base,
        }
    }

    pub fn random_fish(&self, rng: &mut SpawnRng) -> CellStyle {
        rng.pick(&self.fish, self.base)
    }

    pub fn random_bubble(&self, rng: &mut SpawnRng) -> CellStyle {
        rng.pick(&self.bubbles, self.base)
    }
}
