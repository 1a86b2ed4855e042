//! Coverage accumulation
//!
//! The coverage grid holds one saturation scalar per cell, co-indexed with
//! the wound mask. Deposits convert a world-space aim point plus spray
//! radius into a Gaussian-weighted update of the cells under the footprint;
//! the aggregate percentage is recomputed by full scan only after a deposit
//! batch actually changed something.

use rand::Rng;
use rand_pcg::Pcg32;

use super::mask::WoundMask;
use crate::consts::{
    BASE_DEPOSIT_RATE, CELLS_PER_WORLD, FALLOFF_SIGMA_FRAC, GRID_SIZE, JITTER_MAX, JITTER_MIN,
};
use crate::{cell_index, world_to_grid};

/// Gaussian falloff weight for a squared distance from the aim center
#[inline]
pub(crate) fn gauss_weight(dist_sq: f32, sigma: f32) -> f32 {
    (-dist_sq / (2.0 * sigma * sigma)).exp()
}

/// Per-cell saturation field in [0, 1]
#[derive(Debug, Clone)]
pub struct CoverageGrid {
    values: Vec<f32>,
}

impl CoverageGrid {
    pub fn new() -> Self {
        Self {
            values: vec![0.0; GRID_SIZE * GRID_SIZE],
        }
    }

    /// Zero every cell (regeneration)
    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }

    /// Coverage at a cell; out-of-range reads as zero
    #[inline]
    pub fn value(&self, gx: usize, gy: usize) -> f32 {
        if gx >= GRID_SIZE || gy >= GRID_SIZE {
            return 0.0;
        }
        self.values[cell_index(gx, gy)]
    }

    /// Full saturation field, row-major, for display upload
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Deposit spray around a world-space aim point.
    ///
    /// Returns whether any cell changed, so the caller can skip the aggregate
    /// rescan and display refresh on no-op ticks. Cells outside the mask, out
    /// of bounds, or already saturated are skipped; saturated cells draw no
    /// jitter, so the terminal grid state is deterministic.
    pub fn deposit(
        &mut self,
        mask: &WoundMask,
        aim_x: f32,
        aim_z: f32,
        world_radius: f32,
        intensity: u8,
        dt: f32,
        rng: &mut Pcg32,
    ) -> bool {
        if dt <= 0.0 || world_radius <= 0.0 {
            return false;
        }

        let cx = world_to_grid(aim_x);
        let cy = world_to_grid(aim_z);
        let gr = world_radius * CELLS_PER_WORLD;
        let sigma = FALLOFF_SIGMA_FRAC * gr;
        let base = intensity as f32 * BASE_DEPOSIT_RATE * dt;

        let reach = gr.ceil() as i32;
        let gx0 = cx.floor() as i32;
        let gy0 = cy.floor() as i32;

        let mut changed = false;
        for oy in -reach..=reach {
            for ox in -reach..=reach {
                let gx = gx0 + ox;
                let gy = gy0 + oy;
                if gx < 0 || gy < 0 || gx >= GRID_SIZE as i32 || gy >= GRID_SIZE as i32 {
                    continue;
                }
                let (gx, gy) = (gx as usize, gy as usize);

                let dx = gx as f32 - cx;
                let dy = gy as f32 - cy;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq > gr * gr {
                    continue;
                }
                if !mask.is_wound(gx, gy) {
                    continue;
                }

                let idx = cell_index(gx, gy);
                if self.values[idx] >= 1.0 {
                    continue;
                }

                let jitter = rng.random_range(JITTER_MIN..JITTER_MAX);
                let amount = base * gauss_weight(dist_sq, sigma) * jitter;
                let next = (self.values[idx] + amount).min(1.0);
                if next > self.values[idx] {
                    self.values[idx] = next;
                    changed = true;
                }
            }
        }

        changed
    }

    /// Recompute aggregate coverage as a percentage of wound-cell saturation.
    ///
    /// O(N^2) full scan; call only after a deposit batch reported a change.
    pub fn recalc(&self, mask: &WoundMask) -> f32 {
        if mask.live_cells() == 0 {
            return 0.0;
        }
        let mut sum = 0.0;
        for gy in 0..GRID_SIZE {
            for gx in 0..GRID_SIZE {
                if mask.is_wound(gx, gy) {
                    sum += self.values[cell_index(gx, gy)];
                }
            }
        }
        100.0 * sum / mask.live_cells() as f32
    }
}

impl Default for CoverageGrid {
    fn default() -> Self {
        Self::new()
    }
}
