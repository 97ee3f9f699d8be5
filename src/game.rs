//! Host-agnostic frame driver
//!
//! Ties the clock, keyboard intake, simulation and compositor together so a
//! host only has to forward key codes and animation timestamps, then read back
//! the frame, the HUD numbers and the events.

use serde::Serialize;

use crate::renderer::{PixelBuffer, Renderer, SpriteSource};
use crate::settings::Settings;
use crate::sim::{Clock, GameEvent, GameState, InputState, KeyBindings, TickInput, tick};

/// What the UI layer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub level: u32,
    pub game_over: bool,
    /// Set once the session has ended
    pub final_score: Option<u64>,
}

/// One play session plus everything needed to drive it from a host
pub struct Game {
    state: GameState,
    clock: Clock,
    input: InputState,
    renderer: Renderer,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::with_bindings(seed, settings, KeyBindings::default())
    }

    pub fn with_bindings(seed: u64, settings: Settings, bindings: KeyBindings) -> Self {
        log::info!("New session with seed {}", seed);
        Self {
            state: GameState::new(seed),
            clock: Clock::new(),
            input: InputState::new(bindings),
            renderer: Renderer::new(settings, seed),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn key_down(&mut self, code: &str) {
        self.input.key_down(code);
        if self.state.is_game_over() {
            self.input.discard_fire();
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    /// Handle one animation tick at `timestamp_ms`.
    ///
    /// Returns true when a new frame was composited. Once the session is over
    /// nothing advances and the last frame stays as it was.
    pub fn frame(&mut self, timestamp_ms: f64, sprites: &dyn SpriteSource) -> bool {
        let delta = self.clock.sample(timestamp_ms);
        let input = self.input.tick_input();
        self.advance(&input, delta, sprites)
    }

    /// Update and render with an explicit input and delta, bypassing the
    /// clock and keyboard (headless runs, tests)
    pub fn advance(&mut self, input: &TickInput, delta: f32, sprites: &dyn SpriteSource) -> bool {
        if self.state.is_game_over() {
            return false;
        }
        tick(&mut self.state, input, delta);
        self.renderer.render(&self.state, sprites);
        true
    }

    /// Last composited frame
    pub fn frame_buffer(&self) -> &PixelBuffer {
        self.renderer.frame()
    }

    /// Fresh session; held keys and the clock start over too
    pub fn restart(&mut self, seed: u64) {
        self.state.restart(seed);
        self.clock.reset();
        self.input.clear();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn hud(&self) -> HudSnapshot {
        let game_over = self.state.is_game_over();
        HudSnapshot {
            score: self.state.score(),
            level: self.state.level(),
            game_over,
            final_score: game_over.then(|| self.state.score()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::NoSprites;
    use crate::sim::{AudioCue, GamePhase};

    fn land_wave(game: &mut Game) {
        for alien in &mut game.state.wave.aliens {
            alien.pos.y = SHIP_START_Y;
        }
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut game = Game::new(1, Settings::default());
        game.key_down("ArrowRight");
        assert!(game.frame(1000.0, &NoSprites));
        assert_eq!(game.state().ship.pos.x, SHIP_START_X);

        assert!(game.frame(1000.0 + FRAME_MS, &NoSprites));
        assert!((game.state().ship.pos.x - (SHIP_START_X + SHIP_SPEED)).abs() < 1e-3);
    }

    #[test]
    fn test_fire_key_queues_one_shot_per_press() {
        let mut game = Game::new(1, Settings::default());
        game.key_down("Space");
        game.key_down("Space"); // auto-repeat
        game.frame(0.0, &NoSprites);
        assert_eq!(game.state().bullets.len(), 2);
        game.frame(FRAME_MS, &NoSprites);
        assert_eq!(game.state().bullets.len(), 2);
    }

    #[test]
    fn test_game_over_freezes_session() {
        let mut game = Game::new(2, Settings::default());
        land_wave(&mut game);
        assert!(game.frame(0.0, &NoSprites));
        assert_eq!(game.state().phase, GamePhase::GameOver);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Audio(AudioCue::GameOver)));

        let frozen = game.frame_buffer().as_bytes().to_vec();
        game.key_down("ArrowLeft");
        game.key_down("Space");
        assert!(!game.frame(FRAME_MS, &NoSprites));
        assert_eq!(game.frame_buffer().as_bytes(), frozen.as_slice());
        assert!(game.state().bullets.is_empty());

        let hud = game.hud();
        assert!(hud.game_over);
        assert_eq!(hud.final_score, Some(0));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = Game::new(3, Settings::default());
        game.key_down("Space");
        game.frame(0.0, &NoSprites);
        game.state.scoreboard.award_hit();
        land_wave(&mut game);
        game.frame(FRAME_MS, &NoSprites);
        assert!(game.state().is_game_over());

        game.restart(4);
        let hud = game.hud();
        assert_eq!(
            hud,
            HudSnapshot {
                score: 0,
                level: 1,
                game_over: false,
                final_score: None
            }
        );
        assert!(game.state().bullets.is_empty());
        assert!(game.state().particles.is_empty());
        assert_eq!(game.state().wave.columns, ALIEN_START_COLUMNS);
        assert_eq!(game.state().wave.rows, ALIEN_START_ROWS);
        assert_eq!(game.state().wave.velocity_x, ALIEN_START_SPEED);

        // Keys held before the restart do not leak into the new session
        game.frame(10_000.0, &NoSprites);
        assert!(game.state().bullets.is_empty());
    }

    #[test]
    fn test_hud_serializes() {
        let game = Game::new(5, Settings::default());
        let json = serde_json::to_string(&game.hud()).unwrap();
        assert_eq!(
            json,
            r#"{"score":0,"level":1,"game_over":false,"final_score":null}"#
        );
    }
}
