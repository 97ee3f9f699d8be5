//! Software RGBA8 surface
//!
//! Pixels are covered when their center lies inside a shape. Drawing uses
//! straight-alpha source-over; a surface cleared to transparent black therefore
//! ends up holding premultiplied color, which is what the additive composite adds.

use std::ops::Range;

use glam::Vec2;

use super::canvas::Canvas;
use super::color::{from_rgba8, to_rgba8, with_alpha};
use super::font::{self, GLYPH_SCALE};
use super::sprites::Sprite;
use crate::Rect;

/// RGBA8 pixel buffer for software rendering
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
    translation: Vec2,
}

impl PixelBuffer {
    /// Transparent black surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; (width * height) as usize],
            translation: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read a pixel (bounds checked)
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Tightly packed RGBA8 rows, top first
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let in_bounds = x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height;
        in_bounds.then(|| (y as u32 * self.width + x as u32) as usize)
    }

    /// Pixel indices whose centers fall in `[lo, hi)`, clipped to `0..limit`
    fn span(lo: f32, hi: f32, limit: u32) -> Range<i32> {
        let start = (lo - 0.5).ceil().max(0.0) as i32;
        let end = (hi - 0.5).ceil().min(limit as f32) as i32;
        start..end.max(start)
    }

    /// Source-over blend of a straight-alpha color
    fn blend(&mut self, x: i32, y: i32, color: [f32; 4]) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let a = color[3].clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let dst = from_rgba8(self.pixels[i]);
        let out = [
            color[0] * a + dst[0] * (1.0 - a),
            color[1] * a + dst[1] * (1.0 - a),
            color[2] * a + dst[2] * (1.0 - a),
            a + dst[3] * (1.0 - a),
        ];
        self.pixels[i] = to_rgba8(out);
    }

    /// Separable box blur over all four channels
    fn blurred(&self, radius: u32) -> Vec<[f32; 4]> {
        let src: Vec<[f32; 4]> = self.pixels.iter().map(|&p| from_rgba8(p)).collect();
        if radius == 0 {
            return src;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        let horizontal = box_pass(&src, w, h, radius as usize, 1, w);
        box_pass(&horizontal, h, w, radius as usize, w, 1)
    }
}

/// One blur pass along lines of `len` samples `stride` apart; `lines` lines
/// start `line_stride` apart
fn box_pass(
    src: &[[f32; 4]],
    len: usize,
    lines: usize,
    radius: usize,
    stride: usize,
    line_stride: usize,
) -> Vec<[f32; 4]> {
    let mut out = vec![[0.0; 4]; src.len()];
    for line in 0..lines {
        let base = line * line_stride;
        for i in 0..len {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(len - 1);
            let mut sum = [0.0_f32; 4];
            for j in lo..=hi {
                let px = src[base + j * stride];
                for c in 0..4 {
                    sum[c] += px[c];
                }
            }
            let n = (hi - lo + 1) as f32;
            out[base + i * stride] = sum.map(|s| s / n);
        }
    }
    out
}

impl Canvas for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_translation(&mut self, offset: Vec2) {
        self.translation = offset;
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.pixels.fill(to_rgba8(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]) {
        let rect = rect.translate(self.translation);
        for y in Self::span(rect.top(), rect.bottom(), self.height) {
            for x in Self::span(rect.left(), rect.right(), self.width) {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, glow_radius: f32, color: [f32; 4]) {
        let center = center + self.translation;
        let outer = glow_radius.max(radius);
        let halo = (outer - radius).max(f32::EPSILON);
        for y in Self::span(center.y - outer, center.y + outer, self.height) {
            for x in Self::span(center.x - outer, center.x + outer, self.width) {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = if d <= radius {
                    1.0
                } else if d < outer {
                    // Halo falls off linearly from a dim inner ring
                    0.4 * (1.0 - (d - radius) / halo)
                } else {
                    continue;
                };
                self.blend(x, y, with_alpha(color, coverage));
            }
        }
    }

    fn draw_sprite(&mut self, sprite: &Sprite, rect: Rect, alpha: f32) {
        let rect = rect.translate(self.translation);
        if rect.size.x <= 0.0 || rect.size.y <= 0.0 {
            return;
        }
        let scale = Vec2::new(
            sprite.width() as f32 / rect.size.x,
            sprite.height() as f32 / rect.size.y,
        );
        for y in Self::span(rect.top(), rect.bottom(), self.height) {
            let v = ((y as f32 + 0.5 - rect.top()) * scale.y) as u32;
            for x in Self::span(rect.left(), rect.right(), self.width) {
                let u = ((x as f32 + 0.5 - rect.left()) * scale.x) as u32;
                let texel = from_rgba8(sprite.texel(u, v));
                self.blend(x, y, with_alpha(texel, alpha));
            }
        }
    }

    fn draw_text(&mut self, text: &str, origin: Vec2, color: [f32; 4]) {
        let origin = origin + self.translation;
        let scale = GLYPH_SCALE as f32;
        for (col, row) in font::lit_pixels(text) {
            let cell = Rect::new(
                origin.x + col as f32 * scale,
                origin.y + row as f32 * scale,
                scale,
                scale,
            );
            for y in Self::span(cell.top(), cell.bottom(), self.height) {
                for x in Self::span(cell.left(), cell.right(), self.width) {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn composite_additive(&mut self, layer: &Self, blur_px: u32, strength: f32) {
        let glow = layer.blurred(blur_px);
        let dx = self.translation.x.round() as i32;
        let dy = self.translation.y.round() as i32;
        for y in 0..layer.height as i32 {
            for x in 0..layer.width as i32 {
                let src = glow[(y as u32 * layer.width + x as u32) as usize];
                if src[3] <= 0.0 {
                    continue;
                }
                let Some(i) = self.index(x + dx, y + dy) else {
                    continue;
                };
                let dst = from_rgba8(self.pixels[i]);
                self.pixels[i] = to_rgba8([
                    dst[0] + src[0] * strength,
                    dst[1] + src[1] * strength,
                    dst[2] + src[2] * strength,
                    dst[3].max(src[3] * strength),
                ]);
            }
        }
    }
}
