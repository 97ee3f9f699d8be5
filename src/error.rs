//! Error types for the fallible edges of the game
//!
//! The simulation itself is total; only configuration parsing, sprite
//! construction and GPU presentation can fail.

use thiserror::Error;

/// The main error type for neon-invaders operations
#[derive(Error, Debug)]
pub enum Error {
    /// Settings JSON could not be parsed
    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Sprite pixel data does not match its declared dimensions
    #[error("Sprite data is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    SpriteSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// No GPU device could be created for presentation
    #[error("Device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The presentation surface rejected a frame
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;
