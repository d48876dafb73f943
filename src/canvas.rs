//! Raster canvas - a mutable RGB buffer with alpha-blended primitives.
//!
//! The canvas is write-only during a render: layers paint over whatever
//! is already there and nothing reads pixels back until final encoding.
//! Shape colors carry an explicit alpha (0-255) that is blended against
//! the opaque background at draw time.

use image::{imageops, Rgb, RgbImage};

pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Fill with a vertical linear gradient from `top` (row 0) to
    /// `bottom` (last row). A one-row canvas gets the `top` color.
    pub fn vertical_gradient(&mut self, top: Rgb<u8>, bottom: Rgb<u8>) {
        let height = self.pixels.height();
        let width = self.pixels.width();
        for y in 0..height {
            let t = if height > 1 {
                y as f64 / (height - 1) as f64
            } else {
                0.0
            };
            let row = Rgb([
                lerp_channel(top.0[0], bottom.0[0], t),
                lerp_channel(top.0[1], bottom.0[1], t),
                lerp_channel(top.0[2], bottom.0[2], t),
            ]);
            for x in 0..width {
                self.pixels.put_pixel(x, y, row);
            }
        }
    }

    /// Blend `color` at `alpha` over the pixel at (x, y). Out-of-bounds
    /// coordinates are ignored so shapes may overhang the edges.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: u8) {
        if x < 0 || y < 0 || x >= self.pixels.width() as i64 || y >= self.pixels.height() as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if alpha == 255 {
            self.pixels.put_pixel(x, y, color);
            return;
        }
        let t = alpha as f64 / 255.0;
        let dst = *self.pixels.get_pixel(x, y);
        let blended = Rgb([
            lerp_channel(dst.0[0], color.0[0], t),
            lerp_channel(dst.0[1], color.0[1], t),
            lerp_channel(dst.0[2], color.0[2], t),
        ]);
        self.pixels.put_pixel(x, y, blended);
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>, alpha: u8) {
        self.fill_ellipse(cx, cy, radius, radius, color, alpha);
    }

    pub fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgb<u8>, alpha: u8) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let x0 = (cx - rx).floor() as i64;
        let x1 = (cx + rx).ceil() as i64;
        let y0 = (cy - ry).floor() as i64;
        let y1 = (cy + ry).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f64 + 0.5 - cx) / rx;
                let dy = (y as f64 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Fill the axis-aligned rectangle [x0, x1) x [y0, y1).
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>, alpha: u8) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color, alpha);
            }
        }
    }

    /// Scanline fill of a simple polygon (even-odd rule).
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: Rgb<u8>, alpha: u8) {
        if points.len() < 3 {
            return;
        }
        let y_min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let y_max = points
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max);
        let y0 = y_min.floor().max(0.0) as i64;
        let y1 = y_max.ceil().min(self.pixels.height() as f64) as i64;

        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in y0..y1 {
            let scan = y as f64 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= scan && by > scan) || (by <= scan && ay > scan) {
                    crossings.push(ax + (scan - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for pair in crossings.chunks_exact(2) {
                let start = pair[0].round() as i64;
                let end = pair[1].round() as i64;
                for x in start..end {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Draw a line segment as stamped discs, giving it `width` thickness.
    pub fn stroke(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        width: f64,
        color: Rgb<u8>,
        alpha: u8,
    ) {
        let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        let steps = (length / (width / 2.0).max(1.0)).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.fill_circle(x, y, width / 2.0, color, alpha);
        }
    }

    /// Soften layer edges with a Gaussian blur and hand back the pixels.
    pub fn finish(self, blur_sigma: f32) -> RgbImage {
        if blur_sigma > 0.0 {
            imageops::blur(&self.pixels, blur_sigma)
        } else {
            self.pixels
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.pixels.get_pixel(x, y)
    }
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 * (1.0 - t) + b as f64 * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_hits_exact_colors_at_both_ends() {
        let top = Rgb([10, 20, 30]);
        let bottom = Rgb([200, 150, 100]);
        let mut canvas = Canvas::new(16, 64);
        canvas.vertical_gradient(top, bottom);
        assert_eq!(canvas.pixel(0, 0), top);
        assert_eq!(canvas.pixel(15, 63), bottom);
    }

    #[test]
    fn gradient_on_one_row_canvas_uses_top_color() {
        let top = Rgb([1, 2, 3]);
        let mut canvas = Canvas::new(4, 1);
        canvas.vertical_gradient(top, Rgb([255, 255, 255]));
        assert_eq!(canvas.pixel(3, 0), top);
    }

    #[test]
    fn opaque_blend_replaces_pixel() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blend_pixel(2, 2, Rgb([9, 9, 9]), 255);
        assert_eq!(canvas.pixel(2, 2), Rgb([9, 9, 9]));
    }

    #[test]
    fn half_alpha_blend_mixes_channels() {
        let mut canvas = Canvas::new(2, 2);
        canvas.vertical_gradient(Rgb([0, 0, 0]), Rgb([0, 0, 0]));
        canvas.blend_pixel(0, 0, Rgb([200, 100, 50]), 128);
        let px = canvas.pixel(0, 0);
        assert!((px.0[0] as i32 - 100).abs() <= 1);
        assert!((px.0[1] as i32 - 50).abs() <= 1);
        assert!((px.0[2] as i32 - 25).abs() <= 1);
    }

    #[test]
    fn out_of_bounds_draws_are_ignored() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blend_pixel(-1, 0, Rgb([9, 9, 9]), 255);
        canvas.blend_pixel(0, 4, Rgb([9, 9, 9]), 255);
        canvas.fill_circle(-10.0, -10.0, 5.0, Rgb([9, 9, 9]), 255);
        assert_eq!(canvas.pixel(0, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn polygon_fill_covers_interior_not_exterior() {
        let mut canvas = Canvas::new(20, 20);
        let square = [(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0)];
        canvas.fill_polygon(&square, Rgb([255, 0, 0]), 255);
        assert_eq!(canvas.pixel(10, 10), Rgb([255, 0, 0]));
        assert_eq!(canvas.pixel(2, 2), Rgb([0, 0, 0]));
    }
}
