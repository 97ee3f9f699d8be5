//! Session state and core simulation types
//!
//! Everything one running session owns lives in `GameState`; restarting is
//! replacing it with a freshly constructed one.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullets::BulletSystem;
use super::particles::ParticleSystem;
use super::scoring::Scoreboard;
use super::shake::ScreenShake;
use super::ship::Ship;
use super::wave::AlienWave;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// The wave reached the ship; frozen until restart
    GameOver,
}

/// Sound cues the audio collaborator is asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Hit,
    GameOver,
}

/// Things that happened during a tick, in order, for hosts to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    AlienDestroyed { center: Vec2 },
    Audio(AudioCue),
    LevelUp { level: u32, bonus: u64 },
    GameOver { final_score: u64 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Simulation frames processed
    pub frame: u64,
    pub ship: Ship,
    pub wave: AlienWave,
    pub bullets: BulletSystem,
    pub particles: ParticleSystem,
    pub shake: ScreenShake,
    pub scoreboard: Scoreboard,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Running,
            frame: 0,
            ship: Ship::default(),
            wave: AlienWave::default(),
            bullets: BulletSystem::default(),
            particles: ParticleSystem::default(),
            shake: ScreenShake::default(),
            scoreboard: Scoreboard::default(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Throw the session away and start over
    pub fn restart(&mut self, seed: u64) {
        *self = Self::new(seed);
        log::info!("Session restarted with seed {}", seed);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score
    }

    pub fn level(&self) -> u32 {
        self.scoreboard.level
    }

    /// Fire from the ship's current position. False when rate limited.
    pub fn fire(&mut self) -> bool {
        self.bullets.fire(self.ship.muzzle())
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
