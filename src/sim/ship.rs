//! Player ship
//!
//! Horizontal-only movement along the bottom of the board.

use glam::Vec2;

use super::input::TickInput;
use crate::Rect;
use crate::consts::*;

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SHIP_START_X, SHIP_START_Y),
            size: Vec2::new(SHIP_WIDTH, SHIP_HEIGHT),
        }
    }
}

impl Ship {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Move by the held intents and clamp into the board.
    ///
    /// Left and right held together cancel out.
    pub fn update(&mut self, delta: f32, input: &TickInput) {
        if input.left {
            self.pos.x -= SHIP_SPEED * delta;
        }
        if input.right {
            self.pos.x += SHIP_SPEED * delta;
        }
        self.pos.x = self.pos.x.clamp(0.0, BOARD_WIDTH - self.size.x);
    }

    /// Where a new bullet leaves the ship: horizontally centered, just above the top edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y - BULLET_SPAWN_LIFT)
    }
}
