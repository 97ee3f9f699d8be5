//! Explosion particles
//!
//! Purely visual: particles never affect gameplay, but they are spawned from
//! the session RNG so a seeded run stays reproducible.

use glam::Vec2;
use rand::Rng;

use crate::consts::{PARTICLES_PER_BURST, PARTICLE_DECAY, PARTICLE_MIN_ALPHA};

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alpha: f32,
    pub size: f32,
    /// Per-update multiplier for alpha and size
    pub decay: f32,
    pub color: [f32; 4],
}

/// Live particles in insertion order (oldest first)
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Burst of `PARTICLES_PER_BURST` particles flying out of `center`
    pub fn spawn<R: Rng>(&mut self, center: Vec2, color: [f32; 4], rng: &mut R) {
        self.particles.reserve(PARTICLES_PER_BURST);
        for _ in 0..PARTICLES_PER_BURST {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(2.0..5.0);
            self.particles.push(Particle {
                pos: center,
                vel: Vec2::from_angle(angle) * speed,
                alpha: 1.0,
                size: rng.random_range(1.2..3.2),
                decay: PARTICLE_DECAY,
                color,
            });
        }
    }

    /// Integrate, fade, shrink, and cull faded particles
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.alpha *= p.decay;
            p.size *= p.decay;
        }
        self.particles.retain(|p| p.alpha >= PARTICLE_MIN_ALPHA);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

    #[test]
    fn test_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut system = ParticleSystem::default();
        let center = Vec2::new(50.0, 60.0);
        system.spawn(center, GREEN, &mut rng);

        assert_eq!(system.len(), PARTICLES_PER_BURST);
        for p in &system.particles {
            assert_eq!(p.pos, center);
            assert_eq!(p.alpha, 1.0);
            assert_eq!(p.color, GREEN);
            let speed = p.vel.length();
            assert!((2.0 - 1e-4..5.0 + 1e-4).contains(&speed), "speed {speed}");
            assert!((1.2..3.2).contains(&p.size));
        }
    }

    #[test]
    fn test_alpha_decays_until_culled() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::default();
        system.spawn(Vec2::ZERO, GREEN, &mut rng);

        let mut alpha = 1.0_f32;
        let mut updates = 0;
        while !system.is_empty() {
            system.update();
            updates += 1;
            alpha *= PARTICLE_DECAY;
            for p in &system.particles {
                assert!((p.alpha - alpha).abs() < 1e-5);
                assert!(p.alpha >= PARTICLE_MIN_ALPHA);
            }
        }
        // 0.92^42 ≈ 0.030, 0.92^43 ≈ 0.0277
        assert_eq!(updates, 43);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::default();
        system.spawn(Vec2::new(1.0, 1.0), GREEN, &mut rng);
        for _ in 0..10 {
            system.update();
        }
        system.spawn(Vec2::new(2.0, 2.0), GREEN, &mut rng);
        system.update();

        // Older burst dies first and stays at the front until then
        assert_eq!(system.len(), PARTICLES_PER_BURST * 2);
        assert!(system.particles[0].alpha < system.particles[PARTICLES_PER_BURST].alpha);
    }

    #[test]
    fn test_same_seed_same_burst() {
        let mut a = ParticleSystem::default();
        let mut b = ParticleSystem::default();
        a.spawn(Vec2::ZERO, GREEN, &mut Pcg32::seed_from_u64(42));
        b.spawn(Vec2::ZERO, GREEN, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.particles, b.particles);
    }
}
