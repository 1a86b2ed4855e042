//! Session state and core simulation types
//!
//! `SessionState` owns exactly one wound mask, coverage grid, and particle
//! pool at a time, and is advanced only by `tick` on a single thread. All
//! randomness flows through the seeded session RNG, so a seed plus an input
//! script reproduces a session exactly.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::coverage::CoverageGrid;
use super::mask::WoundMask;
use super::particles::{Impact, ParticlePool, ParticleSnapshot};
use crate::consts::{
    INTENSITY_DEFAULT, INTENSITY_MAX, INTENSITY_MIN, NOZZLE_HEIGHT, SPRAY_BASE_RADIUS,
    SPRAY_RADIUS_PER_LEVEL,
};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the explicit start action; input has no effect
    Intro,
    /// Active session; aim/spray input drives the simulation
    Playing,
    /// Coverage threshold reached; timer and spray are frozen
    Won,
}

/// Selectable coating material. Cosmetic: carried on impact events so the
/// presentation layer can color paint splats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Sealant,
    Gel,
    Foam,
}

impl Material {
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Sealant => "Sealant",
            Material::Gel => "Gel",
            Material::Foam => "Foam",
        }
    }
}

/// Last-writer-wins aim snapshot, consumed once per tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AimState {
    /// World-space target on the wound plane
    pub x: f32,
    pub z: f32,
    /// True only while the aim ray intersects the wound plane
    pub valid: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: SessionPhase,
    /// Seconds accrued while in `Playing`; frozen on win
    pub elapsed: f32,
    /// Total wound-plane impacts this session
    pub impact_count: u64,
    /// Spray intensity level, `INTENSITY_MIN..=INTENSITY_MAX`
    pub intensity: u8,
    pub material: Material,
    pub aim: AimState,
    pub spraying: bool,
    /// Cached aggregate, equal to `coverage.recalc(&mask)` at all times
    pub coverage_pct: f32,
    pub mask: WoundMask,
    pub coverage: CoverageGrid,
    pub pool: ParticlePool,
    /// Impact events from the most recent tick, for the presentation layer
    pub impacts: Vec<Impact>,
}

impl SessionState {
    /// Create a fresh session in `Intro` with a newly generated wound
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mask = WoundMask::generate(&mut rng);
        log::info!(
            "session created: seed {seed}, wound has {} cells",
            mask.live_cells()
        );

        Self {
            seed,
            rng,
            phase: SessionPhase::Intro,
            elapsed: 0.0,
            impact_count: 0,
            intensity: INTENSITY_DEFAULT,
            material: Material::default(),
            aim: AimState::default(),
            spraying: false,
            coverage_pct: 0.0,
            mask,
            coverage: CoverageGrid::new(),
            pool: ParticlePool::new(),
            impacts: Vec::new(),
        }
    }

    /// Begin the session. Only valid from `Intro`; no-op otherwise.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::Intro {
            self.phase = SessionPhase::Playing;
            log::info!("session started");
        }
    }

    /// Abandon the current wound and return to `Intro` with a fresh one.
    ///
    /// Regeneration replaces the mask and zeroes the coverage grid and the
    /// particle pool activity; pool capacity is untouched. `start` must be
    /// called again to resume play.
    pub fn reset(&mut self) {
        self.mask = WoundMask::generate(&mut self.rng);
        self.coverage.reset();
        self.pool.clear();
        self.impacts.clear();
        self.coverage_pct = 0.0;
        self.elapsed = 0.0;
        self.impact_count = 0;
        self.spraying = false;
        self.phase = SessionPhase::Intro;
        log::info!("session reset: new wound has {} cells", self.mask.live_cells());
    }

    /// Update the aim snapshot (from pointer/touch ray intersection)
    pub fn set_aim(&mut self, x: f32, z: f32, valid: bool) {
        self.aim = AimState { x, z, valid };
    }

    /// Press or release the spray trigger. Ignored outside `Playing`.
    pub fn set_spraying(&mut self, spraying: bool) {
        if self.phase == SessionPhase::Playing {
            self.spraying = spraying;
        }
    }

    /// Select spray intensity, clamped to the valid range
    pub fn set_intensity(&mut self, level: u8) {
        self.intensity = level.clamp(INTENSITY_MIN, INTENSITY_MAX);
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// World-space spray footprint radius for the current intensity
    pub fn spray_radius(&self) -> f32 {
        SPRAY_BASE_RADIUS + SPRAY_RADIUS_PER_LEVEL * (self.intensity - 1) as f32
    }

    /// Emission origin: the nozzle hovers above the aim point, pulled back
    /// toward the viewer so particles arrive at a slight angle
    pub fn nozzle_origin(&self) -> Vec3 {
        Vec3::new(self.aim.x, NOZZLE_HEIGHT, self.aim.z + 0.35)
    }

    /// Point-in-time particle copies for rendering
    pub fn particle_snapshot(&self) -> Vec<ParticleSnapshot> {
        self.pool.snapshot()
    }
}
