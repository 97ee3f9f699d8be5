//! Palette and color helpers
//!
//! Colors are straight (non-premultiplied) RGBA in `0.0..=1.0`.

/// Build a color from 8-bit channels and a float alpha
pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

/// Same color with alpha multiplied by `alpha`
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Quantize to RGBA8
pub fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Expand RGBA8 to float channels
pub fn from_rgba8(px: [u8; 4]) -> [f32; 4] {
    px.map(|c| c as f32 / 255.0)
}

pub mod colors {
    use super::rgba;

    pub const BACKGROUND: [f32; 4] = rgba(0x0D, 0x0D, 0x0D, 1.0);
    pub const GRID_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SCANLINE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
    pub const HUD_TEXT: [f32; 4] = rgba(0xFF, 0xB5, 0x00, 1.0);

    /// Solid stand-ins for entities without a decoded sprite
    pub const ALIEN_FALLBACK: [f32; 4] = rgba(0x00, 0xFF, 0xB0, 1.0);
    pub const ALIEN_BLOOM_FALLBACK: [f32; 4] = rgba(120, 255, 120, 0.8);
    pub const SHIP_FALLBACK: [f32; 4] = rgba(0xFF, 0xB3, 0x00, 1.0);
    pub const BULLET_FALLBACK: [f32; 4] = rgba(0xCF, 0xE8, 0xFF, 1.0);
    /// Bullet highlight drawn on the bloom layer only
    pub const BULLET_BLOOM: [f32; 4] = rgba(255, 0, 0, 0.9);

    /// Opacity of sprites on the bloom layer
    pub const ALIEN_BLOOM_ALPHA: f32 = 0.9;
    pub const SHIP_BLOOM_ALPHA: f32 = 0.8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_conversion() {
        assert_eq!(to_rgba8(colors::BACKGROUND), [0x0D, 0x0D, 0x0D, 0xFF]);
        assert_eq!(to_rgba8([2.0, -1.0, 0.5, 1.0]), [255, 0, 128, 255]);
        assert_eq!(from_rgba8([255, 0, 0, 255]), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_fallbacks_are_distinct() {
        let fallbacks = [
            colors::ALIEN_FALLBACK,
            colors::SHIP_FALLBACK,
            colors::BULLET_FALLBACK,
        ];
        for (i, a) in fallbacks.iter().enumerate() {
            for b in &fallbacks[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
