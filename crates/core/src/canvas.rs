//! RGB raster that sketches draw their strokes onto.
//!
//! Pixels are stored row-major as 8-bit RGB triples. Stroke geometry stays in
//! floating point until a segment is rasterized here.

use glam::DVec2;

use crate::color::Srgb;
use crate::error::FlowError;

/// Fixed-size RGB raster with a background color.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl Canvas {
    /// Creates a canvas filled with `background`.
    ///
    /// Returns `FlowError::InvalidDimensions` if width or height is zero,
    /// or if `width * height` would overflow `usize`.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(FlowError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![background.to_rgb8(); len],
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Strokes the segment `a`-`b` with the given color and width.
    ///
    /// A pixel is painted when its integer coordinate lies within
    /// `stroke_width / 2` of the closest point of the segment, which rounds
    /// the ends and lets consecutive segments join without gaps. Pixels off
    /// the canvas are clipped and segments with non-finite endpoints are
    /// ignored.
    pub fn draw_segment(&mut self, a: DVec2, b: DVec2, color: [u8; 3], stroke_width: u32) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let half = f64::from(stroke_width.max(1)) / 2.0;
        let lo = a.min(b) - half;
        let hi = a.max(b) + half;
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        if hi.x < 0.0 || hi.y < 0.0 || lo.x > max_x || lo.y > max_y {
            return;
        }
        let x0 = lo.x.ceil().max(0.0) as usize;
        let y0 = lo.y.ceil().max(0.0) as usize;
        let x1 = hi.x.floor().min(max_x) as usize;
        let y1 = hi.y.floor().min(max_y) as usize;

        let dir = b - a;
        let len_sq = dir.length_squared();
        let half_sq = half * half;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = DVec2::new(x as f64, y as f64);
                let t = if len_sq == 0.0 {
                    0.0
                } else {
                    ((p - a).dot(dir) / len_sq).clamp(0.0, 1.0)
                };
                if p.distance_squared(a + dir * t) <= half_sq {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }

    /// Strokes every consecutive pair of `points`.
    pub fn draw_polyline(&mut self, points: &[DVec2], color: [u8; 3], stroke_width: u32) {
        for pair in points.windows(2) {
            self.draw_segment(pair[0], pair[1], color, stroke_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [255, 0, 0];
    const BLACK: [u8; 3] = [0, 0, 0];

    fn black(width: usize, height: usize) -> Canvas {
        Canvas::new(width, height, Srgb::BLACK).unwrap()
    }

    fn painted(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&p| p != BLACK).count()
    }

    #[test]
    fn new_fills_background() {
        let bg = Srgb::from_hex("#102030").unwrap();
        let canvas = Canvas::new(4, 3, bg).unwrap();
        assert_eq!(canvas.pixels().len(), 12);
        assert!(canvas.pixels().iter().all(|&p| p == [0x10, 0x20, 0x30]));
    }

    #[test]
    fn new_rejects_bad_dimensions() {
        for (w, h) in [(0, 5), (5, 0)] {
            assert!(matches!(
                Canvas::new(w, h, Srgb::BLACK),
                Err(FlowError::InvalidDimensions)
            ));
        }
        assert!(matches!(
            Canvas::new(usize::MAX, 2, Srgb::BLACK),
            Err(FlowError::InvalidDimensions)
        ));
    }

    #[test]
    fn pixel_outside_is_none() {
        let canvas = black(3, 2);
        assert_eq!(canvas.pixel(3, 0), None);
        assert_eq!(canvas.pixel(0, 2), None);
        assert_eq!(canvas.pixel(2, 1), Some(BLACK));
    }

    #[test]
    fn horizontal_hairline_covers_its_span() {
        let mut canvas = black(10, 5);
        canvas.draw_segment(DVec2::new(2.0, 2.0), DVec2::new(7.0, 2.0), RED, 1);
        for x in 2..=7 {
            assert_eq!(canvas.pixel(x, 2), Some(RED), "x = {x}");
        }
        assert_eq!(canvas.pixel(1, 2), Some(BLACK));
        assert_eq!(canvas.pixel(8, 2), Some(BLACK));
        assert_eq!(painted(&canvas), 6);
    }

    #[test]
    fn diagonal_hairline_has_no_gaps() {
        let mut canvas = black(10, 10);
        canvas.draw_segment(DVec2::new(0.0, 0.0), DVec2::new(9.0, 9.0), RED, 1);
        for i in 0..10 {
            assert_eq!(canvas.pixel(i, i), Some(RED), "diagonal pixel {i}");
        }
    }

    #[test]
    fn wide_stroke_paints_a_band() {
        let mut canvas = black(20, 20);
        canvas.draw_segment(DVec2::new(5.0, 10.0), DVec2::new(15.0, 10.0), RED, 4);
        for y in 8..=12 {
            assert_eq!(canvas.pixel(10, y), Some(RED), "y = {y}");
        }
        assert_eq!(canvas.pixel(10, 7), Some(BLACK));
        assert_eq!(canvas.pixel(10, 13), Some(BLACK));
        // Round ends reach half the stroke width past each endpoint.
        assert_eq!(canvas.pixel(3, 10), Some(RED));
        assert_eq!(canvas.pixel(2, 10), Some(BLACK));
        assert_eq!(canvas.pixel(17, 10), Some(RED));
        assert_eq!(canvas.pixel(18, 10), Some(BLACK));
    }

    #[test]
    fn zero_length_segment_paints_a_disc() {
        let mut canvas = black(9, 9);
        canvas.draw_segment(DVec2::new(4.0, 4.0), DVec2::new(4.0, 4.0), RED, 4);
        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(6, 4), Some(RED));
        assert_eq!(canvas.pixel(6, 6), Some(BLACK));
    }

    #[test]
    fn segments_are_clipped_to_the_canvas() {
        let mut canvas = black(5, 5);
        canvas.draw_segment(DVec2::new(-10.0, 2.0), DVec2::new(50.0, 2.0), RED, 1);
        assert_eq!(painted(&canvas), 5);
        canvas.draw_segment(DVec2::new(-10.0, -10.0), DVec2::new(-5.0, -3.0), RED, 3);
        assert_eq!(painted(&canvas), 5);
    }

    #[test]
    fn non_finite_segment_is_ignored() {
        let mut canvas = black(5, 5);
        canvas.draw_segment(DVec2::new(f64::NAN, 1.0), DVec2::new(3.0, 3.0), RED, 2);
        canvas.draw_segment(DVec2::new(1.0, 1.0), DVec2::new(f64::INFINITY, 3.0), RED, 2);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn polyline_joins_segments() {
        let mut canvas = black(10, 10);
        let points = [DVec2::new(1.0, 1.0), DVec2::new(8.0, 1.0), DVec2::new(8.0, 8.0)];
        canvas.draw_polyline(&points, RED, 1);
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(8, 1), Some(RED));
        assert_eq!(canvas.pixel(8, 8), Some(RED));
        assert_eq!(painted(&canvas), 8 + 7);
    }

    #[test]
    fn polyline_with_one_point_draws_nothing() {
        let mut canvas = black(4, 4);
        canvas.draw_polyline(&[DVec2::new(1.0, 1.0)], RED, 3);
        assert_eq!(painted(&canvas), 0);
    }
}
