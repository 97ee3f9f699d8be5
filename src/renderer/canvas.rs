//! Drawing surface abstraction
//!
//! The compositor only talks to `Canvas`, so the frame order can be checked
//! against a recording implementation while `PixelBuffer` does the real work.

use glam::Vec2;

use super::sprites::Sprite;
use crate::Rect;

/// How to fill an entity's bounds: a decoded sprite or a solid stand-in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint<'a> {
    Sprite { sprite: &'a Sprite, alpha: f32 },
    Solid([f32; 4]),
}

impl<'a> Paint<'a> {
    /// Use the sprite when it is ready, the fallback color otherwise
    pub fn sprite_or(sprite: Option<&'a Sprite>, alpha: f32, fallback: [f32; 4]) -> Self {
        match sprite {
            Some(sprite) => Paint::Sprite { sprite, alpha },
            None => Paint::Solid(fallback),
        }
    }
}

/// A 2D surface with source-over drawing and one additive composite
pub trait Canvas {
    /// Surface size in pixels
    fn size(&self) -> (u32, u32);

    /// Offset applied to every subsequent draw except `clear`
    fn set_translation(&mut self, offset: Vec2);

    /// Overwrite every pixel, ignoring the translation
    fn clear(&mut self, color: [f32; 4]);

    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]);

    /// Solid disc of `radius` with a soft halo fading out to `glow_radius`
    fn fill_glow(&mut self, center: Vec2, radius: f32, glow_radius: f32, color: [f32; 4]);

    /// Stretch `sprite` over `rect`, scaling its opacity by `alpha`
    fn draw_sprite(&mut self, sprite: &Sprite, rect: Rect, alpha: f32);

    /// HUD text with its top-left corner at `origin`
    fn draw_text(&mut self, text: &str, origin: Vec2, color: [f32; 4]);

    /// Blur `layer` and add it onto this surface at the current translation
    fn composite_additive(&mut self, layer: &Self, blur_px: u32, strength: f32);

    fn paint(&mut self, rect: Rect, paint: Paint<'_>) {
        match paint {
            Paint::Sprite { sprite, alpha } => self.draw_sprite(sprite, rect, alpha),
            Paint::Solid(color) => self.fill_rect(rect, color),
        }
    }
}
