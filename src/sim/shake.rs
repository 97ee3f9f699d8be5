//! Screen shake
//!
//! A decaying random offset applied to the render transform.

use glam::Vec2;
use rand::Rng;

use crate::consts::{SHAKE_DECAY, SHAKE_FLOOR};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenShake {
    /// Frames left in the current pulse
    pub duration: u32,
    pub intensity: f32,
}

impl ScreenShake {
    /// Start a pulse, overwriting whatever is running
    pub fn pulse(&mut self, duration: u32, intensity: f32) {
        self.duration = duration;
        self.intensity = intensity.max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.duration > 0 && self.intensity > 0.0
    }

    /// Age the pulse by one frame
    pub fn update(&mut self) {
        if self.duration == 0 {
            return;
        }
        self.duration -= 1;
        self.intensity *= SHAKE_DECAY;
        if self.intensity < SHAKE_FLOOR || self.duration == 0 {
            self.duration = 0;
            self.intensity = 0.0;
        }
    }

    /// Fresh random offset for this render; zero when idle
    pub fn current_offset<R: Rng>(&self, rng: &mut R) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let dx = (rng.random::<f32>() - 0.5) * self.intensity;
        let dy = (rng.random::<f32>() - 0.5) * self.intensity * 0.6;
        Vec2::new(dx, dy)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
