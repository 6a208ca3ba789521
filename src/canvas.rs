// The drawing surface: an RGBA pixel grid that accumulates strokes.
// Visual: whatever lives in here is exactly what the window shows (over white)
// and exactly what gets written to PNG.

use image::{Rgba, RgbaImage};

use crate::gamma::GammaLut;
use crate::pen::Thickness;
use crate::types::{FrameBuffer, Point, Rgb};

pub const DEFAULT_WIDTH: u32 = 900;
pub const DEFAULT_HEIGHT: u32 = 700;

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Canvas {
    /// A fully opaque white grid of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, PAPER) }
    }

    /// Adopt an existing image as the canvas (dimensions are kept as-is).
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The current pixels, for repaint and for encoding.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Full copy of the pixel grid (an undo snapshot).
    pub fn snapshot(&self) -> RgbaImage {
        self.image.clone()
    }

    /// Install a snapshot as the canvas content.
    pub fn restore(&mut self, snapshot: RgbaImage) {
        self.image = snapshot;
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Fill everything with opaque white.
    /// Visual: the window goes blank.
    pub fn clear(&mut self) {
        for px in self.image.pixels_mut() {
            *px = PAPER;
        }
    }

    /// Rasterize an antialiased line from `p1` to `p2` with round caps.
    /// Each pixel's coverage is how far its center sits inside the capsule
    /// of radius `thickness / 2` around the segment, so `p1 == p2` stamps a dot.
    /// Pixels outside the grid are skipped.
    pub fn draw_segment(&mut self, p1: Point, p2: Point, color: Rgb, thickness: Thickness) {
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        if w == 0 || h == 0 {
            return;
        }

        let radius = thickness.get() as f32 / 2.0;
        let reach = radius + 1.0;

        // Scan only the segment's bounding box, clipped to the grid.
        let min_x = ((p1.x.min(p2.x) - reach).floor() as i64).max(0);
        let max_x = ((p1.x.max(p2.x) + reach).ceil() as i64).min(w - 1);
        let min_y = ((p1.y.min(p2.y) - reach).floor() as i64).max(0);
        let max_y = ((p1.y.max(p2.y) + reach).ceil() as i64).min(h - 1);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let lut = GammaLut::shared();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let d = distance_to_segment(Point::new(x as f32, y as f32), p1, p2);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let px = self.image.get_pixel_mut(x as u32, y as u32);
                blend(px, color, coverage, lut);
            }
        }
    }

    /// Paint the canvas into a window frame at the top-left, over white paper.
    /// Window pixels the canvas doesn't reach stay white; canvas pixels past the
    /// window edge are cut off.
    pub fn compose_into(&self, frame: &mut FrameBuffer) {
        let lut = GammaLut::shared();
        for p in frame.pixels.iter_mut() {
            *p = Rgb::WHITE.to_u32();
        }

        let cols = frame.width.min(self.image.width() as usize);
        let rows = frame.height.min(self.image.height() as usize);
        for y in 0..rows {
            for x in 0..cols {
                let Rgba([r, g, b, a]) = *self.image.get_pixel(x as u32, y as u32);
                let out = if a == 255 {
                    Rgb::new(r, g, b)
                } else {
                    let alpha = a as f32 / 255.0;
                    Rgb::new(lut.mix(255, r, alpha), lut.mix(255, g, alpha), lut.mix(255, b, alpha))
                };
                frame.pixels[y * frame.width + x] = out.to_u32();
            }
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Source-over one opaque color at partial coverage onto a straight-alpha pixel.
/// Channels are weighted by the destination's alpha in linear light, so
/// translucent paper keeps the pen's hue at the edges.
#[inline]
fn blend(px: &mut Rgba<u8>, color: Rgb, coverage: f32, lut: &GammaLut) {
    if coverage >= 1.0 {
        *px = color.to_rgba();
        return;
    }
    let Rgba([r, g, b, a]) = *px;
    let dst_a = a as f32 / 255.0;
    let out_a = coverage + dst_a * (1.0 - coverage);
    if out_a <= 0.0 {
        return;
    }
    let dst_w = dst_a * (1.0 - coverage);
    let channel = |dst: u8, src: u8| {
        let l = (lut.srgb_u8_to_linear(src) * coverage + lut.srgb_u8_to_linear(dst) * dst_w) / out_a;
        lut.linear_to_srgb_u8(l)
    };
    *px = Rgba([
        channel(r, color.r),
        channel(g, color.g),
        channel(b, color.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]);
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let (apx, apy) = (p.x - a.x, p.y - a.y);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 { ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0) } else { 0.0 };
    let (dx, dy) = (apx - abx * t, apy - aby * t);
    (dx * dx + dy * dy).sqrt()
}
