//! Spray particle pool
//!
//! A fixed-capacity pool of short-lived visual particles. Emission recycles
//! the first inactive slot and silently saturates when the pool is full;
//! advancing integrates motion with a sinusoidal lateral drift, detects
//! wound-plane impacts, and fades particles out past their lifetime or when
//! the spray is released. Impacts are reported as events for the
//! presentation layer; the pool never calls into rendering code.

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::Material;
use crate::consts::{
    DRIFT_AMP_PER_LEVEL, DRIFT_FREQ, PARTICLE_ALPHA_DECAY, PARTICLE_ALPHA_FLOOR, PARTICLE_BASE_SPEED,
    PARTICLE_MAX_AGE, PARTICLE_SPEED_PER_LEVEL, POOL_CAPACITY, TARGET_JITTER_PER_LEVEL,
    WOUND_PLANE_Y,
};

/// One pool slot
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub alpha: f32,
    pub size: f32,
    pub age: f32,
    /// Phase offset for the lateral drift oscillation
    pub phase: f32,
    pub active: bool,
}

impl Particle {
    const INACTIVE: Particle = Particle {
        pos: Vec3::ZERO,
        vel: Vec3::ZERO,
        alpha: 0.0,
        size: 0.0,
        age: 0.0,
        phase: 0.0,
        active: false,
    };
}

/// A wound-plane impact, consumed by the presentation layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Impact {
    /// World (x, z) on the wound plane
    pub pos: Vec2,
    pub material: Material,
}

/// Point-rendering snapshot of one active particle
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub pos: Vec3,
    pub alpha: f32,
    pub size: f32,
}

/// Fixed-capacity particle pool
#[derive(Debug, Clone)]
pub struct ParticlePool {
    slots: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            slots: vec![Particle::INACTIVE; POOL_CAPACITY],
        }
    }

    /// Activate up to `count` particles aimed from `origin` toward a point
    /// near `(target_x, target_z)` on the wound plane.
    ///
    /// Pool exhaustion is expected under sustained spraying: excess requests
    /// are dropped silently.
    pub fn emit(
        &mut self,
        origin: Vec3,
        target_x: f32,
        target_z: f32,
        count: u32,
        intensity: u8,
        rng: &mut Pcg32,
    ) {
        let speed = PARTICLE_BASE_SPEED + PARTICLE_SPEED_PER_LEVEL * (intensity - 1) as f32;
        let scatter = TARGET_JITTER_PER_LEVEL * intensity as f32;

        let mut emitted = 0;
        for slot in self.slots.iter_mut() {
            if emitted >= count {
                break;
            }
            if slot.active {
                continue;
            }

            let pos = origin
                + Vec3::new(
                    rng.random_range(-0.01..0.01),
                    rng.random_range(-0.01..0.01),
                    rng.random_range(-0.01..0.01),
                );
            let target = Vec3::new(
                target_x + rng.random_range(-scatter..scatter),
                WOUND_PLANE_Y,
                target_z + rng.random_range(-scatter..scatter),
            );
            let dir = (target - pos).normalize_or_zero();

            *slot = Particle {
                pos,
                vel: dir * speed,
                alpha: rng.random_range(0.7..1.0),
                size: rng.random_range(0.015..0.03),
                age: 0.0,
                phase: rng.random_range(0.0..std::f32::consts::TAU),
                active: true,
            };
            emitted += 1;
        }
    }

    /// Advance all active particles by `dt`.
    ///
    /// Impacts against the wound plane are appended to `impacts` and the
    /// particle recycled. When `spraying` is false every active particle
    /// fades out instead of flying indefinitely.
    pub fn advance(
        &mut self,
        dt: f32,
        spraying: bool,
        intensity: u8,
        material: Material,
        impacts: &mut Vec<Impact>,
    ) {
        let drift_amp = DRIFT_AMP_PER_LEVEL * intensity as f32;
        let decay = (-PARTICLE_ALPHA_DECAY * dt).exp();

        for slot in self.slots.iter_mut() {
            if !slot.active {
                continue;
            }

            slot.age += dt;

            // Lateral drift on the two horizontal components
            let osc = slot.age * DRIFT_FREQ + slot.phase;
            slot.vel.x += osc.sin() * drift_amp * dt;
            slot.vel.z += osc.cos() * drift_amp * dt;

            slot.pos += slot.vel * dt;

            if slot.pos.y <= WOUND_PLANE_Y && slot.vel.y < 0.0 {
                impacts.push(Impact {
                    pos: Vec2::new(slot.pos.x, slot.pos.z),
                    material,
                });
                slot.active = false;
                continue;
            }

            if !spraying || slot.age > PARTICLE_MAX_AGE {
                slot.alpha *= decay;
                if slot.alpha < PARTICLE_ALPHA_FLOOR {
                    slot.active = false;
                }
            }
        }
    }

    /// Deactivate every slot without touching capacity
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.active = false;
        }
    }

    /// Number of live particles
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    /// Fixed capacity of the pool
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Point-in-time copy of the active particles for rendering
    pub fn snapshot(&self) -> Vec<ParticleSnapshot> {
        self.slots
            .iter()
            .filter(|p| p.active)
            .map(|p| ParticleSnapshot {
                pos: p.pos,
                alpha: p.alpha,
                size: p.size,
            })
            .collect()
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NOZZLE_HEIGHT;
    use rand::SeedableRng;

    fn nozzle() -> Vec3 {
        Vec3::new(0.0, NOZZLE_HEIGHT, 0.6)
    }

    #[test]
    fn test_emit_activates_requested_count() {
        let mut pool = ParticlePool::new();
        let mut rng = Pcg32::seed_from_u64(1);
        pool.emit(nozzle(), 0.0, 0.0, 5, 3, &mut rng);
        assert_eq!(pool.active_count(), 5);
    }

    #[test]
    fn test_emit_saturates_at_capacity() {
        let mut pool = ParticlePool::new();
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..10 {
            pool.emit(nozzle(), 0.0, 0.0, POOL_CAPACITY as u32, 5, &mut rng);
        }
        assert_eq!(pool.active_count(), POOL_CAPACITY);
        assert_eq!(pool.capacity(), POOL_CAPACITY);
    }

    #[test]
    fn test_particles_fly_toward_plane() {
        let mut pool = ParticlePool::new();
        let mut rng = Pcg32::seed_from_u64(3);
        pool.emit(nozzle(), 0.0, 0.0, 8, 3, &mut rng);
        for snap in pool.snapshot() {
            assert!(snap.pos.y > WOUND_PLANE_Y);
        }
        // Every particle launched downward
        for slot in pool.slots.iter().filter(|p| p.active) {
            assert!(slot.vel.y < 0.0);
        }
    }

    #[test]
    fn test_impacts_reported_and_slots_recycled() {
        let mut pool = ParticlePool::new();
        let mut rng = Pcg32::seed_from_u64(4);
        pool.emit(nozzle(), 0.0, 0.0, 16, 3, &mut rng);

        let mut impacts = Vec::new();
        for _ in 0..600 {
            pool.advance(1.0 / 60.0, true, 3, Material::Sealant, &mut impacts);
        }
        assert!(!impacts.is_empty(), "no particle reached the plane");
        assert_eq!(pool.active_count(), 0, "all particles should be recycled");

        // Impacts land in the neighborhood of the aim point
        for impact in &impacts {
            assert!(impact.pos.length() < 1.0, "impact far off target: {:?}", impact.pos);
            assert_eq!(impact.material, Material::Sealant);
        }

        // Recycled slots are reusable
        pool.emit(nozzle(), 0.0, 0.0, 4, 3, &mut rng);
        assert_eq!(pool.active_count(), 4);
    }

    #[test]
    fn test_release_fades_particles_out() {
        let mut pool = ParticlePool::new();
        let mut rng = Pcg32::seed_from_u64(5);
        // Aim far to the side so nothing impacts during the short fade window
        pool.emit(nozzle(), 5.0, 0.0, 8, 1, &mut rng);

        let mut impacts = Vec::new();
        for _ in 0..120 {
            pool.advance(1.0 / 60.0, false, 1, Material::Gel, &mut impacts);
        }
        assert_eq!(pool.active_count(), 0, "released particles never faded");
    }

    #[test]
    fn test_clear_deactivates_without_shrinking() {
        let mut pool = ParticlePool::new();
        let mut rng = Pcg32::seed_from_u64(6);
        pool.emit(nozzle(), 0.0, 0.0, 32, 3, &mut rng);
        pool.clear();
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.capacity(), POOL_CAPACITY);
    }

    #[test]
    fn test_active_count_never_exceeds_capacity() {
        let mut pool = ParticlePool::new();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut impacts = Vec::new();
        for _ in 0..200 {
            pool.emit(nozzle(), 0.0, 0.0, 64, 5, &mut rng);
            pool.advance(1.0 / 60.0, true, 5, Material::Foam, &mut impacts);
            assert!(pool.active_count() <= POOL_CAPACITY);
        }
    }
}
