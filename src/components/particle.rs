//! Impact particles.
//!
//! Particles are spawned in bursts when a strike lands and fade out linearly.
//! They never interact with anything; the owning session integrates them and
//! compacts the list once per tick.

use fastrand::Rng;

use crate::components::tint::Tint;

/// Life lost per tick. A particle lives 50 ticks.
pub const PARTICLE_DECAY: f32 = 0.02;
/// Maximum absolute spawn speed on each axis.
pub const PARTICLE_SPREAD: f32 = 5.0;
/// Draw radius in pixels.
pub const PARTICLE_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Starts at 1.0; doubles as the draw alpha.
    pub life: f32,
    pub color: Tint,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= PARTICLE_DECAY;
    }
}

/// Append `count` particles at `(x, y)` with velocities uniform in
/// `(-PARTICLE_SPREAD, PARTICLE_SPREAD)`.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Rng,
    x: f32,
    y: f32,
    count: usize,
    color: Tint,
) {
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle {
            x,
            y,
            vx: (rng.f32() - 0.5) * 2.0 * PARTICLE_SPREAD,
            vy: (rng.f32() - 0.5) * 2.0 * PARTICLE_SPREAD,
            life: 1.0,
            color,
        });
    }
}

/// Advance every particle one tick, then drop the dead ones.
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.update();
    }
    particles.retain(Particle::is_alive);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_burst_count_and_spread() {
        let mut rng = Rng::with_seed(7);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, 10.0, 20.0, 25, Tint::WHITE);
        assert_eq!(particles.len(), 25);
        for p in &particles {
            assert_eq!((p.x, p.y), (10.0, 20.0));
            assert!(p.vx.abs() <= PARTICLE_SPREAD);
            assert!(p.vy.abs() <= PARTICLE_SPREAD);
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_particles_expire_after_fifty_ticks() {
        let mut rng = Rng::with_seed(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, 0.0, 0.0, 12, Tint::WHITE);
        for _ in 0..45 {
            update_particles(&mut particles);
        }
        assert_eq!(particles.len(), 12);
        for _ in 0..10 {
            update_particles(&mut particles);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_particle_moves_by_velocity() {
        let mut p = Particle {
            x: 0.0,
            y: 0.0,
            vx: 1.5,
            vy: -2.0,
            life: 1.0,
            color: Tint::WHITE,
        };
        p.update();
        assert_eq!((p.x, p.y), (1.5, -2.0));
        assert!((p.life - 0.98).abs() < 1e-6);
    }
}
