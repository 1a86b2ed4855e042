//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-tick advancement with clamped delta time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod coverage;
pub mod mask;
pub mod particles;
pub mod shape;
pub mod state;
pub mod tick;

pub use coverage::CoverageGrid;
pub use mask::WoundMask;
pub use particles::{Impact, Particle, ParticlePool, ParticleSnapshot};
pub use shape::ShapeField;
pub use state::{AimState, Material, SessionPhase, SessionState};
pub use tick::tick;
