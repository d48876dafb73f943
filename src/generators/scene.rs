//! Layered scene generator - the core renderer.
//!
//! A render is a fixed pipeline over a single seeded RNG stream: gradient
//! sky, celestial disc, particle field, one mid-ground motif, one
//! foreground accent, then a slight blur. Layer order and the number of
//! draws each branch takes from the RNG are part of the contract; changing
//! either reshuffles every layer drawn after it.

use crate::canvas::Canvas;
use crate::generators::Generator;
use crate::palette::{self, Palette};
use crate::prompt::{self, contains_any, TokenSet};
use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Edge length the layout constants below are expressed against.
/// Other canvas sizes scale proportionally.
const REFERENCE_SIZE: f64 = 1024.0;

const BLUR_SIGMA: f32 = 0.5;

// Keyword groups for the motif and accent chains. Deliberately separate
// from the palette groups: each chain is evaluated on its own, so
// "city street at night" keeps a night palette under an urban skyline.
const URBAN_WORDS: &[&str] = &["city", "urban", "building", "street", "neon"];
const MARINE_WORDS: &[&str] = &["ocean", "sea", "water", "beach", "coast"];
const TREE_WORDS: &[&str] = &["forest", "nature", "botanical", "tree", "leaf", "green"];
const GEOMETRIC_WORDS: &[&str] = &["abstract", "geometric", "minimalist"];

// Atmosphere branches.
const MOON_WORDS: &[&str] = &["night", "moon", "dark"];
const DENSE_PARTICLE_WORDS: &[&str] = &["night", "moon", "stars"];

/// Mid-ground motif. Exactly one is drawn per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motif {
    Urban,
    Marine,
    Terrain,
}

impl Motif {
    /// Priority selection: urban first, then marine, terrain as fallback.
    pub fn for_tokens(tokens: &TokenSet) -> Self {
        if contains_any(tokens, URBAN_WORDS) {
            Motif::Urban
        } else if contains_any(tokens, MARINE_WORDS) {
            Motif::Marine
        } else {
            Motif::Terrain
        }
    }
}

/// Foreground accent overlay. Exactly one is drawn per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Trees,
    Geometric,
    Strokes,
}

impl Accent {
    /// Priority selection: trees first, then geometric, strokes as fallback.
    pub fn for_tokens(tokens: &TokenSet) -> Self {
        if contains_any(tokens, TREE_WORDS) {
            Accent::Trees
        } else if contains_any(tokens, GEOMETRIC_WORDS) {
            Accent::Geometric
        } else {
            Accent::Strokes
        }
    }
}

fn moonlike(tokens: &TokenSet) -> bool {
    contains_any(tokens, MOON_WORDS)
}

/// Resolved before the particle loop so each branch consumes a fixed
/// number of RNG draws.
fn particle_count(tokens: &TokenSet) -> usize {
    if contains_any(tokens, DENSE_PARTICLE_WORDS) {
        120
    } else {
        60
    }
}

pub struct SceneGenerator {
    pub width: u32,
    pub height: u32,
}

impl Default for SceneGenerator {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

impl SceneGenerator {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn scale_x(&self) -> f64 {
        self.width as f64 / REFERENCE_SIZE
    }

    fn scale_y(&self) -> f64 {
        self.height as f64 / REFERENCE_SIZE
    }

    /// Celestial disc plus a translucent particle field.
    ///
    /// Draw order is fixed: disc cx, disc cy, disc radius, then
    /// x/y/radius/alpha per particle.
    fn draw_atmosphere(
        &self,
        canvas: &mut Canvas,
        palette: &Palette,
        tokens: &TokenSet,
        rng: &mut StdRng,
    ) {
        let (sx, sy) = (self.scale_x(), self.scale_y());

        let cx = rng.gen_range(120.0..=860.0) * sx;
        let (cy, radius, color) = if moonlike(tokens) {
            // Moon: smaller disc, higher in the sky.
            let cy = rng.gen_range(90.0..=250.0) * sy;
            let radius = rng.gen_range(55.0..=90.0) * sx;
            (cy, radius, palette.secondary)
        } else {
            // Sun: larger disc, lower.
            let cy = rng.gen_range(120.0..=340.0) * sy;
            let radius = rng.gen_range(80.0..=150.0) * sx;
            (cy, radius, palette.accent)
        };
        canvas.fill_circle(cx, cy, radius, color, 255);

        let count = particle_count(tokens);
        let band = self.height as f64 * 0.55;
        for _ in 0..count {
            let x = rng.gen_range(0.0..self.width as f64);
            let y = rng.gen_range(0.0..band);
            let r = rng.gen_range(1.0..=3.0) * sx;
            let alpha: u8 = rng.gen_range(100..=220);
            canvas.fill_circle(x, y, r, palette.secondary, alpha);
        }
    }

    /// Urban motif: buildings left to right across the full width, each
    /// with a sparse grid of lit windows.
    fn draw_skyline(&self, canvas: &mut Canvas, palette: &Palette, rng: &mut StdRng) {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        let width = self.width as f64;
        let height = self.height as f64;

        let mut x = 0.0;
        while x < width {
            let bw = rng.gen_range(60.0..=150.0) * sx;
            let bh = rng.gen_range(220.0..=520.0) * sy;
            let top = height - bh;
            canvas.fill_rect(
                x as i64,
                top as i64,
                (x + bw) as i64,
                height as i64,
                palette.primary,
                255,
            );

            let (win_w, win_h) = (8.0 * sx, 12.0 * sy);
            let (step_x, step_y) = (20.0 * sx, 26.0 * sy);
            let mut wy = top + 14.0 * sy;
            while wy + win_h < height - 8.0 * sy {
                let mut wx = x + 8.0 * sx;
                while wx + win_w < x + bw - 8.0 * sx {
                    if rng.gen_bool(0.35) {
                        canvas.fill_rect(
                            wx as i64,
                            wy as i64,
                            (wx + win_w) as i64,
                            (wy + win_h) as i64,
                            palette.accent,
                            235,
                        );
                    }
                    wx += step_x;
                }
                wy += step_y;
            }

            x += bw + rng.gen_range(6.0..=24.0) * sx;
        }
    }

    /// Marine motif: 7 jittered horizontal bands, color drifting per band.
    fn draw_sea_bands(&self, canvas: &mut Canvas, palette: &Palette, rng: &mut StdRng) {
        let sy = self.scale_y();
        let width = self.width as f64;
        let height = self.height as f64;

        let bands = 7u8;
        let top = height * 0.52;
        let step = (height - top) / bands as f64;
        for i in 0..bands {
            let y0 = top + i as f64 * step;
            let mut points: Vec<(f64, f64)> = Vec::with_capacity(11);
            for k in 0..=8 {
                let px = width * k as f64 / 8.0;
                let jitter = rng.gen_range(-14.0..=14.0) * sy;
                points.push((px, y0 + jitter));
            }
            points.push((width, height));
            points.push((0.0, height));
            let color = palette::shift(palette.ground, 0, 5 * i, 9 * i);
            canvas.fill_polygon(&points, color, 255);
        }
    }

    /// Terrain motif: 4 overlapping triangles, taller and lighter with
    /// each layer.
    fn draw_mountains(&self, canvas: &mut Canvas, palette: &Palette, rng: &mut StdRng) {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        let height = self.height as f64;

        for i in 0..4u32 {
            let peak_x = rng.gen_range(120.0..=904.0) * sx;
            let peak_h = (300.0 + 80.0 * i as f64 + rng.gen_range(0.0..=120.0)) * sy;
            let spread = rng.gen_range(280.0..=480.0) * sx;
            let triangle = [
                (peak_x - spread, height),
                (peak_x, height - peak_h),
                (peak_x + spread, height),
            ];
            let color = palette::lighten(palette.ground, i as f64 * 0.12);
            canvas.fill_polygon(&triangle, color, 255);
        }
    }

    /// Tree accents: 18 trunk+crown pairs along the canvas base.
    fn draw_trees(&self, canvas: &mut Canvas, palette: &Palette, rng: &mut StdRng) {
        let (sx, sy) = (self.scale_x(), self.scale_y());
        let height = self.height as f64;

        for _ in 0..18 {
            let x = rng.gen_range(24.0..=1000.0) * sx;
            let trunk_h = rng.gen_range(46.0..=96.0) * sy;
            let crown_r = rng.gen_range(20.0..=38.0) * sx;
            let base = height - rng.gen_range(0.0..=30.0) * sy;
            let trunk_w = 6.0 * sx;
            canvas.fill_rect(
                (x - trunk_w / 2.0) as i64,
                (base - trunk_h) as i64,
                (x + trunk_w / 2.0) as i64,
                base as i64,
                palette.ground,
                255,
            );
            canvas.fill_ellipse(
                x,
                base - trunk_h,
                crown_r,
                crown_r * 1.15,
                palette.secondary,
                235,
            );
        }
    }

    /// Geometric accents: 36 translucent ellipses or rectangles.
    fn draw_geometry(&self, canvas: &mut Canvas, palette: &Palette, rng: &mut StdRng) {
        let (sx, sy) = (self.scale_x(), self.scale_y());

        for _ in 0..36 {
            let x = rng.gen_range(0.0..=1024.0) * sx;
            let y = rng.gen_range(0.0..=1024.0) * sy;
            let w = rng.gen_range(40.0..=180.0) * sx;
            let h = rng.gen_range(40.0..=180.0) * sy;
            let alpha: u8 = rng.gen_range(50..=140);
            if rng.gen_bool(0.5) {
                canvas.fill_ellipse(x, y, w / 2.0, h / 2.0, palette.accent, alpha);
            } else {
                canvas.fill_rect(
                    (x - w / 2.0) as i64,
                    (y - h / 2.0) as i64,
                    (x + w / 2.0) as i64,
                    (y + h / 2.0) as i64,
                    palette.accent,
                    alpha,
                );
            }
        }
    }

    /// Generic accents: 30 short diagonal strokes.
    fn draw_strokes(&self, canvas: &mut Canvas, palette: &Palette, rng: &mut StdRng) {
        let (sx, sy) = (self.scale_x(), self.scale_y());

        for _ in 0..30 {
            let x = rng.gen_range(0.0..=1024.0) * sx;
            let y = rng.gen_range(200.0..=1000.0) * sy;
            let len = rng.gen_range(36.0..=130.0) * sx;
            let slope = rng.gen_range(-0.9..=0.9);
            let width = rng.gen_range(2.0..=5.0) * sx;
            let alpha: u8 = rng.gen_range(70..=170);
            canvas.stroke(x, y, x + len, y + len * slope, width, palette.accent, alpha);
        }
    }
}

impl Generator for SceneGenerator {
    fn name(&self) -> &'static str {
        "scene"
    }

    fn render(&self, prompt_text: &str) -> RgbImage {
        let seed = prompt::derive_seed(prompt_text);
        let tokens = prompt::tokenize(prompt_text);
        let palette = palette::select(&tokens);
        let mut rng = StdRng::seed_from_u64(seed as u64);

        let motif = Motif::for_tokens(&tokens);
        let accent = Accent::for_tokens(&tokens);
        debug!(
            seed,
            palette = palette.name,
            ?motif,
            ?accent,
            "rendering scene"
        );

        let mut canvas = Canvas::new(self.width, self.height);
        canvas.vertical_gradient(palette.bg_top, palette.bg_bottom);
        self.draw_atmosphere(&mut canvas, palette, &tokens, &mut rng);

        match motif {
            Motif::Urban => self.draw_skyline(&mut canvas, palette, &mut rng),
            Motif::Marine => self.draw_sea_bands(&mut canvas, palette, &mut rng),
            Motif::Terrain => self.draw_mountains(&mut canvas, palette, &mut rng),
        }

        match accent {
            Accent::Trees => self.draw_trees(&mut canvas, palette, &mut rng),
            Accent::Geometric => self.draw_geometry(&mut canvas, palette, &mut rng),
            Accent::Strokes => self.draw_strokes(&mut canvas, palette, &mut rng),
        }

        canvas.finish(BLUR_SIGMA)
    }
}
