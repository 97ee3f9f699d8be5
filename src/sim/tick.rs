//! Per-frame simulation update
//!
//! Advances the session by one delta-scaled frame in a fixed order:
//! ship, fire, wave, bullets, collisions, level-up, particles, shake, game over.

use super::collision::resolve_collisions;
use super::input::TickInput;
use super::state::{AudioCue, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game state by one frame. `delta` is in baseline 60 Hz frames.
pub fn tick(state: &mut GameState, input: &TickInput, delta: f32) {
    // Nothing moves once the wave has landed
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.frame += 1;

    state.ship.update(delta, input);
    for _ in 0..input.fire {
        state.fire();
    }

    state.wave.step(delta, BOARD_WIDTH);
    state.bullets.update(delta);

    resolve_collisions(state);
    if state.wave.is_cleared() {
        level_up(state);
    }

    state.particles.update();
    state.shake.update();

    if state.wave.reached_row(state.ship.pos.y) {
        game_over(state);
    }
}

/// Wave cleared: bank the bonus and spawn a bigger, faster grid
fn level_up(state: &mut GameState) {
    let bonus = state
        .scoreboard
        .level_up(state.wave.columns, state.wave.rows);
    state.bullets.clear();
    state.wave.advance_level();

    let (duration, intensity) = LEVEL_UP_SHAKE;
    state.shake.pulse(duration, intensity);

    let level = state.scoreboard.level;
    state.emit(GameEvent::LevelUp { level, bonus });
    log::info!(
        "Level {} reached (bonus {}, grid {}x{}, speed {:.1})",
        level,
        bonus,
        state.wave.columns,
        state.wave.rows,
        state.wave.velocity_x.abs()
    );
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let final_score = state.scoreboard.score;
    state.emit(GameEvent::Audio(AudioCue::GameOver));
    state.emit(GameEvent::GameOver { final_score });
    log::info!(
        "Game over at level {} with score {}",
        state.scoreboard.level,
        final_score
    );
}

/// Simple demo player: chase the lowest live alien and fire when lined up
pub fn autopilot_input(state: &GameState) -> TickInput {
    let ship_x = state.ship.rect().center().x;
    let target = state
        .wave
        .live()
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|a| a.rect().center().x);

    let Some(target_x) = target else {
        return TickInput::default();
    };

    let offset = target_x - ship_x;
    let aligned = offset.abs() < ALIEN_WIDTH * 0.25;
    TickInput {
        left: offset < -SHIP_SPEED,
        right: offset > SHIP_SPEED,
        fire: u32::from(aligned && state.bullets.len() < MAX_BULLETS),
    }
}
