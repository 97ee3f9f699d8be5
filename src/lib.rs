//! Neon Invaders - a single-screen arcade shooter with a neon CRT look
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, alien wave, bullets, collisions, effects)
//! - `renderer`: Layered software compositor (bloom, scanlines) and WebGPU presenter
//! - `game`: Host-agnostic frame driver tying clock, input, simulation and rendering
//! - `settings`: Visual/audio configuration

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use game::{Game, HudSnapshot};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Speeds are expressed in pixels per 60 Hz frame and scaled by the frame delta.
pub mod consts {
    /// Board geometry: 17x17 tiles of 32 units
    pub const TILE_SIZE: f32 = 32.0;
    pub const COLUMNS: u32 = 17;
    pub const ROWS: u32 = 17;
    pub const BOARD_WIDTH: f32 = TILE_SIZE * COLUMNS as f32;
    pub const BOARD_HEIGHT: f32 = TILE_SIZE * ROWS as f32;

    /// Milliseconds per baseline frame (60 updates per second)
    pub const FRAME_MS: f64 = 16.6667;
    /// Largest delta a single frame may advance (in baseline frames)
    pub const MAX_FRAME_DELTA: f32 = 4.0;

    /// Ship defaults - two tiles wide, parked one row above the bottom
    pub const SHIP_WIDTH: f32 = TILE_SIZE * 2.0;
    pub const SHIP_HEIGHT: f32 = TILE_SIZE;
    pub const SHIP_START_X: f32 = ((COLUMNS / 2) - 1) as f32 * TILE_SIZE;
    pub const SHIP_START_Y: f32 = (ROWS - 2) as f32 * TILE_SIZE;
    pub const SHIP_SPEED: f32 = 6.0;

    /// Alien wave defaults
    pub const ALIEN_WIDTH: f32 = TILE_SIZE * 2.0;
    pub const ALIEN_HEIGHT: f32 = TILE_SIZE;
    pub const ALIEN_START_COLUMNS: u32 = 3;
    pub const ALIEN_START_ROWS: u32 = 2;
    pub const ALIEN_MAX_COLUMNS: u32 = COLUMNS / 2 - 2;
    pub const ALIEN_MAX_ROWS: u32 = ROWS - 4;
    pub const ALIEN_START_SPEED: f32 = 1.0;
    pub const ALIEN_SPEED_STEP: f32 = 0.4;
    /// Top-left corner of a freshly spawned grid
    pub const WAVE_ORIGIN_X: f32 = TILE_SIZE;
    pub const WAVE_ORIGIN_Y: f32 = TILE_SIZE;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = TILE_SIZE / 8.0;
    pub const BULLET_HEIGHT: f32 = TILE_SIZE / 2.0;
    pub const BULLET_SPEED: f32 = -8.0;
    /// Gap between the ship's top edge and a new bullet
    pub const BULLET_SPAWN_LIFT: f32 = 4.0;
    pub const MAX_BULLETS: usize = 7;

    /// Scoring
    pub const HIT_SCORE: u64 = 100;
    pub const LEVEL_BONUS_PER_ALIEN: u64 = 50;

    /// Particles
    pub const PARTICLES_PER_BURST: usize = 18;
    pub const PARTICLE_DECAY: f32 = 0.92;
    pub const PARTICLE_MIN_ALPHA: f32 = 0.03;
    pub const HIT_COLOR: [f32; 4] = [120.0 / 255.0, 1.0, 120.0 / 255.0, 1.0];

    /// Screen shake pulses (frames, intensity)
    pub const HIT_SHAKE: (u32, f32) = (8, 8.0);
    pub const LEVEL_UP_SHAKE: (u32, f32) = (10, 6.0);
    pub const SHAKE_DECAY: f32 = 0.85;
    pub const SHAKE_FLOOR: f32 = 0.05;
}

/// Axis-aligned rectangle in board coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict AABB overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Grow the rectangle by `by` on every side
    pub fn inflate(&self, by: f32) -> Rect {
        Rect {
            pos: self.pos - Vec2::splat(by),
            size: self.size + Vec2::splat(by * 2.0),
        }
    }

    pub fn translate(&self, offset: Vec2) -> Rect {
        Rect {
            pos: self.pos + offset,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_geometry_is_consistent() {
        assert_eq!(consts::BOARD_WIDTH, 544.0);
        assert_eq!(consts::BOARD_HEIGHT, 544.0);
        assert_eq!(consts::ALIEN_MAX_COLUMNS, 6);
        assert_eq!(consts::ALIEN_MAX_ROWS, 13);
        assert_eq!(consts::SHIP_START_X, 224.0);
        assert_eq!(consts::SHIP_START_Y, 480.0);
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares only the right edge
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));

        let overlapping = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn test_rect_inflate() {
        let r = Rect::new(4.0, 4.0, 2.0, 6.0).inflate(1.0);
        assert_eq!(r, Rect::new(3.0, 3.0, 4.0, 8.0));
        assert_eq!(r.center(), Vec2::new(5.0, 7.0));
    }
}
