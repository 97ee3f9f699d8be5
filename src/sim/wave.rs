//! Alien wave
//!
//! A rectangular grid of aliens sharing one horizontal velocity. The whole
//! wave bounces off the board edges and drops one row per bounce.

use glam::Vec2;

use crate::Rect;
use crate::consts::*;

/// A single alien. Dead aliens stay in storage until the next grid spawn but are inert.
#[derive(Debug, Clone, PartialEq)]
pub struct Alien {
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Outcome of one wave step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveStep {
    /// The wave hit an edge this frame: direction flipped and every live alien dropped a row
    pub flipped: bool,
}

/// The grid of aliens and its shared motion state
#[derive(Debug, Clone)]
pub struct AlienWave {
    pub aliens: Vec<Alien>,
    pub columns: u32,
    pub rows: u32,
    /// Shared horizontal velocity (pixels per frame, sign is direction)
    pub velocity_x: f32,
    alive_count: usize,
}

impl Default for AlienWave {
    fn default() -> Self {
        let mut wave = Self {
            aliens: Vec::new(),
            columns: ALIEN_START_COLUMNS,
            rows: ALIEN_START_ROWS,
            velocity_x: ALIEN_START_SPEED,
            alive_count: 0,
        };
        wave.spawn_grid();
        wave
    }
}

impl AlienWave {
    /// Replace the grid with a fresh, fully alive one at the starting offsets
    pub fn spawn_grid(&mut self) {
        self.aliens.clear();
        for c in 0..self.columns {
            for r in 0..self.rows {
                self.aliens.push(Alien {
                    pos: Vec2::new(
                        WAVE_ORIGIN_X + c as f32 * ALIEN_WIDTH,
                        WAVE_ORIGIN_Y + r as f32 * ALIEN_HEIGHT,
                    ),
                    size: Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT),
                    alive: true,
                });
            }
        }
        self.alive_count = self.aliens.len();
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    pub fn is_cleared(&self) -> bool {
        self.alive_count == 0
    }

    /// Live aliens in storage order
    pub fn live(&self) -> impl Iterator<Item = &Alien> {
        self.aliens.iter().filter(|a| a.alive)
    }

    /// Advance every live alien horizontally; bounce and descend on edge contact.
    ///
    /// An edge only counts when the wave is heading toward it, so a wave that
    /// just bounced cannot bounce again before it has moved away.
    pub fn step(&mut self, delta: f32, board_width: f32) -> WaveStep {
        let dx = self.velocity_x * delta;
        let heading_right = self.velocity_x > 0.0;

        let mut touched = false;
        for alien in self.aliens.iter_mut().filter(|a| a.alive) {
            alien.pos.x += dx;
            if heading_right {
                touched |= alien.pos.x + alien.size.x >= board_width;
            } else {
                touched |= alien.pos.x <= 0.0;
            }
        }

        if !touched {
            return WaveStep::default();
        }

        // Single wave-wide response, however many aliens touched
        self.velocity_x = -self.velocity_x;
        for alien in self.aliens.iter_mut().filter(|a| a.alive) {
            alien.pos.y += ALIEN_HEIGHT;
        }
        log::debug!("Wave bounced, now moving {}", if heading_right { "left" } else { "right" });

        WaveStep { flipped: true }
    }

    /// Mark an alien dead. Returns its center if it was alive.
    pub fn kill(&mut self, index: usize) -> Option<Vec2> {
        let alien = self.aliens.get_mut(index)?;
        if !alien.alive {
            return None;
        }
        alien.alive = false;
        self.alive_count -= 1;
        Some(alien.rect().center())
    }

    /// Whether any live alien's bottom edge has reached `y`
    pub fn reached_row(&self, y: f32) -> bool {
        self.live().any(|a| a.rect().bottom() >= y)
    }

    /// Grow and speed up for the next level, then respawn the grid
    pub fn advance_level(&mut self) {
        self.columns = (self.columns + 1).min(ALIEN_MAX_COLUMNS);
        self.rows = (self.rows + 1).min(ALIEN_MAX_ROWS);
        self.velocity_x += ALIEN_SPEED_STEP.copysign(self.velocity_x);
        self.spawn_grid();
    }
}
