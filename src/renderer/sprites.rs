//! Sprite images and the asset boundary
//!
//! Decoding is someone else's job. The renderer only asks a `SpriteSource`
//! whether an RGBA image is ready for an entity kind, and falls back to a
//! solid rectangle when it is not.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Visual entity types that can carry a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Ship,
    Alien,
    Bullet,
}

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Sprite {
    /// Wrap tightly packed RGBA8 bytes
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(Error::SpriteSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: bytemuck::cast_slice(data).to_vec(),
        })
    }

    /// Build from ASCII art: `#` is `color`, anything else transparent.
    /// Rows shorter than the widest are padded.
    pub fn from_mask(rows: &[&str], color: [u8; 4]) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0).max(1) as u32;
        let height = rows.len().max(1) as u32;
        let mut pixels = vec![[0; 4]; (width * height) as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.bytes().enumerate() {
                if ch == b'#' {
                    pixels[y * width as usize + x] = color;
                }
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at integer coordinates, clamped to the image
    pub fn texel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Anything that can hand out decoded sprites
pub trait SpriteSource {
    /// The sprite for `kind`, or `None` while it is missing or not yet decoded
    fn sprite(&self, kind: SpriteKind) -> Option<&Sprite>;
}

/// Source that never has anything ready; everything renders as fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSprites;

impl SpriteSource for NoSprites {
    fn sprite(&self, _kind: SpriteKind) -> Option<&Sprite> {
        None
    }
}

/// Sprites registered by the host as they become available
#[derive(Debug, Clone, Default)]
pub struct SpriteBank {
    sprites: HashMap<SpriteKind, Sprite>,
}

impl SpriteBank {
    pub fn insert(&mut self, kind: SpriteKind, sprite: Sprite) {
        log::debug!("Sprite ready: {:?} ({}x{})", kind, sprite.width, sprite.height);
        self.sprites.insert(kind, sprite);
    }

    pub fn is_ready(&self, kind: SpriteKind) -> bool {
        self.sprites.contains_key(&kind)
    }

    /// Pixel-art set drawn in code, for hosts without image assets
    pub fn builtin() -> Self {
        let mut bank = Self::default();
        bank.insert(
            SpriteKind::Alien,
            Sprite::from_mask(
                &[
                    "..#.....#..",
                    "...#...#...",
                    "..#######..",
                    ".##.###.##.",
                    "###########",
                    "#.#######.#",
                    "#.#.....#.#",
                    "...##.##...",
                ],
                [0x00, 0xFF, 0xB0, 0xFF],
            ),
        );
        bank.insert(
            SpriteKind::Ship,
            Sprite::from_mask(
                &[
                    ".....#.....",
                    "....###....",
                    "....###....",
                    ".#########.",
                    "###########",
                    "###########",
                ],
                [0xFF, 0xB3, 0x00, 0xFF],
            ),
        );
        bank.insert(
            SpriteKind::Bullet,
            Sprite::from_mask(&["#"], [0xCF, 0xE8, 0xFF, 0xFF]),
        );
        bank
    }
}

impl SpriteSource for SpriteBank {
    fn sprite(&self, kind: SpriteKind) -> Option<&Sprite> {
        self.sprites.get(&kind)
    }
}
