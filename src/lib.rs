//! Spraypatch - a wound-coating spray simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (wound generation, coverage model, particles, session FSM)
//! - `settings`: Presentation/quality preferences for the embedding shell

pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Simulation tuning constants
pub mod consts {
    /// Fallback fixed timestep used by the demo harness (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum delta-time per tick; larger frame gaps are clamped to this
    pub const MAX_TICK_DT: f32 = 0.05;

    /// Grid side length for both the wound mask and the coverage grid
    pub const GRID_SIZE: usize = 128;
    /// World-space diameter of the square viewport the grid spans
    pub const WORLD_DIAMETER: f32 = 2.2;
    /// Grid cells per world unit
    pub const CELLS_PER_WORLD: f32 = GRID_SIZE as f32 / WORLD_DIAMETER;

    /// Every wound cell must lie inside this centered circular bound (grid units)
    pub const MASK_BOUND_RADIUS: f32 = GRID_SIZE as f32 * 0.44;
    /// Minimum live cells for a generated mask; below this the attempt is discarded
    pub const MIN_WOUND_CELLS: usize = 50;
    /// Generation attempts before falling back to the deterministic disc
    pub const MAX_GENERATION_RETRIES: u32 = 32;
    /// Radius of the fallback disc shape (grid units)
    pub const FALLBACK_DISC_RADIUS: f32 = GRID_SIZE as f32 * 0.25;

    /// Deposit rate scaler; time-to-completion tuning knob
    pub const BASE_DEPOSIT_RATE: f32 = 0.9;
    /// Gaussian falloff sigma as a fraction of the spray radius
    pub const FALLOFF_SIGMA_FRAC: f32 = 0.85;
    /// Per-cell deposit jitter range (uneven spray density)
    pub const JITTER_MIN: f32 = 0.8;
    pub const JITTER_MAX: f32 = 1.2;

    /// Spray footprint in world units at intensity 1
    pub const SPRAY_BASE_RADIUS: f32 = 0.14;
    /// Footprint growth per intensity level above 1
    pub const SPRAY_RADIUS_PER_LEVEL: f32 = 0.02;

    /// Intensity level bounds
    pub const INTENSITY_MIN: u8 = 1;
    pub const INTENSITY_MAX: u8 = 5;
    pub const INTENSITY_DEFAULT: u8 = 3;

    /// Aggregate coverage percentage that completes the session
    pub const WIN_THRESHOLD_PCT: f32 = 99.0;

    /// Wound plane height (world Y); particles impact when crossing it downward
    pub const WOUND_PLANE_Y: f32 = 0.0;
    /// Emission origin height above the wound plane
    pub const NOZZLE_HEIGHT: f32 = 1.4;

    /// Fixed particle pool capacity
    pub const POOL_CAPACITY: usize = 256;
    /// Particles activated per tick while spraying, before the intensity bonus
    pub const EMIT_PER_TICK_BASE: u32 = 2;
    /// Particle lifetime before alpha decay begins (seconds)
    pub const PARTICLE_MAX_AGE: f32 = 1.2;
    /// Alpha below which a decaying particle is recycled
    pub const PARTICLE_ALPHA_FLOOR: f32 = 0.02;
    /// Exponential alpha decay rate (per second)
    pub const PARTICLE_ALPHA_DECAY: f32 = 6.0;
    /// Particle launch speed at intensity 1 (world units / s)
    pub const PARTICLE_BASE_SPEED: f32 = 2.6;
    /// Launch speed gain per intensity level above 1
    pub const PARTICLE_SPEED_PER_LEVEL: f32 = 0.35;
    /// Plane-target scatter per intensity level (world units)
    pub const TARGET_JITTER_PER_LEVEL: f32 = 0.018;
    /// Lateral drift oscillation frequency (rad/s)
    pub const DRIFT_FREQ: f32 = 9.0;
    /// Lateral drift acceleration per intensity level
    pub const DRIFT_AMP_PER_LEVEL: f32 = 0.18;
}

/// Map a world coordinate to a fractional grid coordinate
#[inline]
pub fn world_to_grid(w: f32) -> f32 {
    (w / consts::WORLD_DIAMETER + 0.5) * consts::GRID_SIZE as f32
}

/// Map a grid coordinate (fractional cell units) back to world space
#[inline]
pub fn grid_to_world(g: f32) -> f32 {
    (g / consts::GRID_SIZE as f32 - 0.5) * consts::WORLD_DIAMETER
}

/// Flat index for a (column, row) cell pair
#[inline]
pub fn cell_index(gx: usize, gy: usize) -> usize {
    gy * consts::GRID_SIZE + gx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_grid_round_trip() {
        let center = world_to_grid(0.0);
        assert!((center - consts::GRID_SIZE as f32 / 2.0).abs() < 1e-4);

        let w = grid_to_world(world_to_grid(0.37));
        assert!((w - 0.37).abs() < 1e-4);
    }

    #[test]
    fn test_viewport_edges_map_to_grid_edges() {
        let half = consts::WORLD_DIAMETER / 2.0;
        assert!(world_to_grid(-half).abs() < 1e-4);
        assert!((world_to_grid(half) - consts::GRID_SIZE as f32).abs() < 1e-3);
    }
}
