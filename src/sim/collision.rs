//! Bullet versus alien collision resolution
//!
//! Detection is a pure pass over the frame's positions. Each hit becomes a
//! `HitResolved` value whose effects are applied by an ordered list of handlers.

use glam::Vec2;

use super::bullets::Bullet;
use super::state::{AudioCue, GameEvent, GameState};
use super::wave::AlienWave;
use crate::consts::{HIT_COLOR, HIT_SHAKE};

/// One bullet destroying one alien
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResolved {
    /// Index into the bullet list at resolution time
    pub bullet: usize,
    /// Index into the wave's alien storage
    pub alien: usize,
    /// Center of the destroyed alien
    pub center: Vec2,
}

/// Match bullets against live aliens, killing at most one alien per bullet.
///
/// Bullets are visited oldest first and aliens in storage order; the first
/// overlapping live alien wins. Aliens are killed as they are found so a
/// later bullet cannot hit the same alien in the same pass.
pub fn detect_hits(bullets: &[Bullet], wave: &mut AlienWave) -> Vec<HitResolved> {
    let mut hits = Vec::new();
    for (bullet_idx, bullet) in bullets.iter().enumerate() {
        let rect = bullet.rect();
        let Some(alien_idx) = wave
            .aliens
            .iter()
            .position(|a| a.alive && a.rect().overlaps(&rect))
        else {
            continue;
        };
        if let Some(center) = wave.kill(alien_idx) {
            hits.push(HitResolved {
                bullet: bullet_idx,
                alien: alien_idx,
                center,
            });
        }
    }
    hits
}

type HitEffect = fn(&mut GameState, &HitResolved);

/// Effects of a hit, applied in this order for every hit
const HIT_EFFECTS: [HitEffect; 5] = [
    record_kill,
    award_score,
    spawn_burst,
    pulse_shake,
    request_hit_cue,
];

fn record_kill(state: &mut GameState, hit: &HitResolved) {
    state.emit(GameEvent::AlienDestroyed { center: hit.center });
}

fn award_score(state: &mut GameState, _hit: &HitResolved) {
    state.scoreboard.award_hit();
}

fn spawn_burst(state: &mut GameState, hit: &HitResolved) {
    state.particles.spawn(hit.center, HIT_COLOR, &mut state.rng);
}

fn pulse_shake(state: &mut GameState, _hit: &HitResolved) {
    let (duration, intensity) = HIT_SHAKE;
    state.shake.pulse(duration, intensity);
}

fn request_hit_cue(state: &mut GameState, _hit: &HitResolved) {
    state.emit(GameEvent::Audio(AudioCue::Hit));
}

/// Run the full resolution pass for this frame. Returns the number of hits.
pub fn resolve_collisions(state: &mut GameState) -> usize {
    let hits = detect_hits(&state.bullets.bullets, &mut state.wave);
    if hits.is_empty() {
        return 0;
    }

    for hit in &hits {
        for effect in HIT_EFFECTS {
            effect(state, hit);
        }
    }

    // Spent bullets go last
    let mut index = 0;
    state.bullets.bullets.retain(|_| {
        let keep = !hits.iter().any(|h| h.bullet == index);
        index += 1;
        keep
    });

    hits.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::GameEvent;

    /// Put a bullet squarely inside the given alien
    fn aim_at(state: &mut GameState, alien: usize) {
        let center = state.wave.aliens[alien].rect().center();
        state.bullets.fire(Vec2::new(center.x, center.y - BULLET_HEIGHT / 2.0));
    }

    #[test]
    fn test_hit_resolves_all_effects() {
        let mut state = GameState::new(11);
        aim_at(&mut state, 0);
        let center = state.wave.aliens[0].rect().center();

        assert_eq!(resolve_collisions(&mut state), 1);
        assert!(!state.wave.aliens[0].alive);
        assert_eq!(state.wave.alive_count(), 5);
        assert_eq!(state.score(), HIT_SCORE);
        assert!(state.bullets.is_empty());
        assert_eq!(state.particles.len(), PARTICLES_PER_BURST);
        assert!(state.particles.particles.iter().all(|p| p.pos == center));
        assert_eq!(state.shake.duration, 8);
        assert_eq!(state.shake.intensity, 8.0);
        assert_eq!(
            state.events,
            vec![
                GameEvent::AlienDestroyed { center },
                GameEvent::Audio(AudioCue::Hit),
            ]
        );
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let mut state = GameState::new(11);
        // Top-left alien of the grid: nothing above it or to its left
        let alien = state.wave.aliens[0].rect();
        // Bottom edge resting on the alien's top edge
        state.bullets.bullets.push(Bullet {
            pos: Vec2::new(alien.center().x, alien.top() - BULLET_HEIGHT),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel_y: BULLET_SPEED,
        });
        // Right edge resting on the alien's left edge
        state.bullets.bullets.push(Bullet {
            pos: Vec2::new(alien.left() - BULLET_WIDTH, alien.top()),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel_y: BULLET_SPEED,
        });
        assert_eq!(resolve_collisions(&mut state), 0);
        assert_eq!(state.wave.alive_count(), 6);
        assert_eq!(state.bullets.len(), 2);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_one_alien_per_bullet() {
        let mut state = GameState::new(11);
        // Straddle the boundary between two vertically stacked aliens
        let upper = state.wave.aliens[0].rect();
        state.bullets.bullets.push(Bullet {
            pos: Vec2::new(upper.center().x, upper.bottom() - BULLET_HEIGHT / 2.0),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            vel_y: BULLET_SPEED,
        });
        assert_eq!(resolve_collisions(&mut state), 1);
        assert!(!state.wave.aliens[0].alive);
        assert!(state.wave.aliens[1].alive);
    }

    #[test]
    fn test_two_bullets_one_alien() {
        let mut state = GameState::new(11);
        aim_at(&mut state, 0);
        aim_at(&mut state, 0);
        assert_eq!(resolve_collisions(&mut state), 1);
        // The second bullet found no live target and keeps flying
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score(), HIT_SCORE);
    }

    #[test]
    fn test_dead_aliens_are_inert() {
        let mut state = GameState::new(11);
        state.wave.kill(0);
        aim_at(&mut state, 0);
        assert_eq!(resolve_collisions(&mut state), 0);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_removes_only_spent_bullets() {
        let mut state = GameState::new(11);
        state.bullets.fire(Vec2::new(500.0, 300.0)); // misses everything
        aim_at(&mut state, 2);
        state.bullets.fire(Vec2::new(520.0, 300.0));
        assert_eq!(resolve_collisions(&mut state), 1);
        let xs: Vec<f32> = state.bullets.bullets.iter().map(|b| b.rect().center().x).collect();
        assert_eq!(xs, vec![500.0, 520.0]);
    }

    #[test]
    fn test_detection_is_deterministic() {
        let mut a = GameState::new(1);
        let mut b = GameState::new(2);
        aim_at(&mut a, 3);
        aim_at(&mut b, 3);
        let hits_a = detect_hits(&a.bullets.bullets, &mut a.wave);
        let hits_b = detect_hits(&b.bullets.bullets, &mut b.wave);
        assert_eq!(hits_a, hits_b);
    }
}
