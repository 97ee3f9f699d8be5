//! Game settings and preferences
//!
//! Read-only at runtime: hosts hand a JSON document in, nothing is written back.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Screen shake on hits and level-ups
    pub screen_shake: bool,
    /// Bloom composite of ship, aliens and bullets
    pub bloom: bool,
    /// Bloom blur radius in pixels
    pub bloom_blur_px: u32,
    /// Bloom additive strength multiplier
    pub bloom_strength: f32,
    /// CRT scanline overlay
    pub scanlines: bool,
    pub scanline_alpha: f32,
    /// Distance between scanlines in pixels
    pub scanline_step: u32,
    /// Opacity of the background grid lines
    pub grid_alpha: f32,
    /// Draw explosion particles
    pub particles: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            bloom: true,
            bloom_blur_px: 4,
            bloom_strength: 1.0,
            scanlines: true,
            scanline_alpha: 0.06,
            scanline_step: 2,
            grid_alpha: 0.05,
            particles: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.bloom_strength = self.bloom_strength.max(0.0);
        self.scanline_alpha = self.scanline_alpha.clamp(0.0, 1.0);
        self.scanline_step = self.scanline_step.max(1);
        self.grid_alpha = self.grid_alpha.clamp(0.0, 1.0);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Whether the bloom composite contributes anything
    pub fn effective_bloom(&self) -> bool {
        self.bloom && self.bloom_blur_px > 0 && self.bloom_strength > 0.0
    }

    /// Effective sound effect gain
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
