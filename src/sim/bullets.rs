//! Player bullets

use glam::Vec2;

use crate::Rect;
use crate::consts::*;

/// A projectile in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// All bullets currently in flight, oldest first
#[derive(Debug, Clone, Default)]
pub struct BulletSystem {
    pub bullets: Vec<Bullet>,
}

impl BulletSystem {
    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    /// Spawn a bullet centered on `muzzle`. Returns false (and does nothing)
    /// when `MAX_BULLETS` are already in flight.
    pub fn fire(&mut self, muzzle: Vec2) -> bool {
        if self.bullets.len() >= MAX_BULLETS {
            log::debug!("Fire rejected: {} bullets in flight", self.bullets.len());
            return false;
        }
        self.bullets.push(Bullet {
            pos: Vec2::new(muzzle.x - BULLET_WIDTH * 0.5, muzzle.y),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel_y: BULLET_SPEED,
        });
        true
    }

    /// Integrate vertically and drop bullets that left the top of the board
    pub fn update(&mut self, delta: f32) {
        for bullet in &mut self.bullets {
            bullet.pos.y += bullet.vel_y * delta;
        }
        self.bullets.retain(|b| b.rect().bottom() >= 0.0);
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }
}
