//! Color palettes and keyword-driven selection.
//!
//! Five fixed palettes exist. Selection walks the keyword groups in
//! priority order and returns the first palette whose group intersects
//! the token set; the warm default palette is the fallback, so selection
//! is total over every possible token set.

use crate::prompt::{contains_any, TokenSet};
use image::Rgb;

/// A named scheme of six colors used by every drawing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub bg_top: Rgb<u8>,
    pub bg_bottom: Rgb<u8>,
    pub primary: Rgb<u8>,
    pub secondary: Rgb<u8>,
    pub accent: Rgb<u8>,
    pub ground: Rgb<u8>,
}

pub const NIGHT: Palette = Palette {
    name: "night",
    bg_top: Rgb([9, 14, 44]),
    bg_bottom: Rgb([40, 28, 76]),
    primary: Rgb([24, 26, 60]),
    secondary: Rgb([226, 229, 255]),
    accent: Rgb([255, 214, 140]),
    ground: Rgb([18, 16, 42]),
};

pub const OCEAN: Palette = Palette {
    name: "ocean",
    bg_top: Rgb([120, 190, 224]),
    bg_bottom: Rgb([12, 74, 120]),
    primary: Rgb([16, 90, 140]),
    secondary: Rgb([240, 248, 252]),
    accent: Rgb([255, 196, 110]),
    ground: Rgb([10, 60, 100]),
};

pub const FOREST: Palette = Palette {
    name: "forest",
    bg_top: Rgb([196, 222, 190]),
    bg_bottom: Rgb([64, 110, 72]),
    primary: Rgb([40, 84, 52]),
    secondary: Rgb([110, 160, 96]),
    accent: Rgb([232, 214, 140]),
    ground: Rgb([34, 62, 40]),
};

pub const URBAN: Palette = Palette {
    name: "urban",
    bg_top: Rgb([46, 42, 66]),
    bg_bottom: Rgb([140, 96, 120]),
    primary: Rgb([30, 30, 44]),
    secondary: Rgb([210, 200, 220]),
    accent: Rgb([255, 120, 180]),
    ground: Rgb([24, 22, 34]),
};

pub const DEFAULT: Palette = Palette {
    name: "default",
    bg_top: Rgb([248, 214, 164]),
    bg_bottom: Rgb([196, 110, 84]),
    primary: Rgb([150, 80, 70]),
    secondary: Rgb([255, 240, 220]),
    accent: Rgb([120, 60, 90]),
    ground: Rgb([96, 52, 56]),
};

pub const NIGHT_WORDS: &[&str] = &["night", "moon", "dark", "stars", "galaxy"];
pub const OCEAN_WORDS: &[&str] = &["ocean", "sea", "water", "beach", "coast"];
pub const FOREST_WORDS: &[&str] = &["forest", "nature", "botanical", "tree", "leaf", "green"];
pub const URBAN_WORDS: &[&str] = &["city", "urban", "street", "building", "neon"];

/// Pick the palette for a token set. First matching group wins.
pub fn select(tokens: &TokenSet) -> &'static Palette {
    if contains_any(tokens, NIGHT_WORDS) {
        &NIGHT
    } else if contains_any(tokens, OCEAN_WORDS) {
        &OCEAN
    } else if contains_any(tokens, FOREST_WORDS) {
        &FOREST
    } else if contains_any(tokens, URBAN_WORDS) {
        &URBAN
    } else {
        &DEFAULT
    }
}

/// Blend a color toward white by `amount` in [0, 1].
pub fn lighten(color: Rgb<u8>, amount: f64) -> Rgb<u8> {
    let t = amount.clamp(0.0, 1.0);
    let mix = |c: u8| (c as f64 + (255.0 - c as f64) * t).round() as u8;
    Rgb([mix(color.0[0]), mix(color.0[1]), mix(color.0[2])])
}

/// Add per-channel offsets, saturating at 255.
pub fn shift(color: Rgb<u8>, dr: u8, dg: u8, db: u8) -> Rgb<u8> {
    Rgb([
        color.0[0].saturating_add(dr),
        color.0[1].saturating_add(dg),
        color.0[2].saturating_add(db),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::tokenize;

    #[test]
    fn empty_tokens_fall_back_to_default() {
        assert_eq!(select(&tokenize("")).name, "default");
    }

    #[test]
    fn unmatched_tokens_fall_back_to_default() {
        assert_eq!(select(&tokenize("a portrait of a cat")).name, "default");
    }

    #[test]
    fn each_group_selects_its_palette() {
        assert_eq!(select(&tokenize("galaxy swirl")).name, "night");
        assert_eq!(select(&tokenize("rocky coast")).name, "ocean");
        assert_eq!(select(&tokenize("botanical study")).name, "forest");
        assert_eq!(select(&tokenize("neon signs")).name, "urban");
    }

    #[test]
    fn night_beats_ocean_on_priority() {
        let tokens = tokenize("moon over the sea");
        assert_eq!(select(&tokens).name, "night");
    }

    #[test]
    fn ocean_beats_forest_and_urban() {
        assert_eq!(select(&tokenize("beach by the forest city")).name, "ocean");
    }

    #[test]
    fn lighten_endpoints() {
        let c = Rgb([100, 50, 0]);
        assert_eq!(lighten(c, 0.0), c);
        assert_eq!(lighten(c, 1.0), Rgb([255, 255, 255]));
    }

    #[test]
    fn shift_saturates() {
        assert_eq!(shift(Rgb([250, 10, 200]), 10, 10, 60), Rgb([255, 20, 255]));
    }
}
