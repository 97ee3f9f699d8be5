//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Delta-scaled updates driven by the caller, no wall clock reads
//! - Seeded RNG only
//! - Stable iteration order (insertion order for bullets and particles,
//!   storage order for aliens)
//! - No rendering or platform dependencies

pub mod bullets;
pub mod clock;
pub mod collision;
pub mod input;
pub mod particles;
pub mod scoring;
pub mod shake;
pub mod ship;
pub mod state;
pub mod tick;
pub mod wave;

pub use bullets::{Bullet, BulletSystem};
pub use clock::Clock;
pub use collision::{HitResolved, detect_hits, resolve_collisions};
pub use input::{InputState, Intent, KeyBindings, TickInput};
pub use particles::{Particle, ParticleSystem};
pub use scoring::Scoreboard;
pub use shake::ScreenShake;
pub use ship::Ship;
pub use state::{AudioCue, GameEvent, GamePhase, GameState};
pub use tick::{autopilot_input, tick};
pub use wave::{Alien, AlienWave, WaveStep};
