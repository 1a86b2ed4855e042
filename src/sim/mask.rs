//! Wound mask generation
//!
//! A mask is a fixed-resolution boolean grid marking treatable tissue. It is
//! built once per session (or regeneration) by sampling a randomized shape
//! field inside the circular viewport bound, and never mutated afterwards.

use rand_pcg::Pcg32;

use super::shape::ShapeField;
use crate::cell_index;
use crate::consts::{
    FALLBACK_DISC_RADIUS, GRID_SIZE, MASK_BOUND_RADIUS, MAX_GENERATION_RETRIES, MIN_WOUND_CELLS,
};

/// Immutable boolean grid of woundable cells
#[derive(Debug, Clone)]
pub struct WoundMask {
    cells: Vec<bool>,
    live_cells: usize,
}

impl WoundMask {
    /// Generate a mask from a fresh random shape field.
    ///
    /// Attempts below the live-cell floor are discarded and redrawn; past the
    /// retry cap a deterministic centered disc is used so generation always
    /// terminates.
    pub fn generate(rng: &mut Pcg32) -> Self {
        for attempt in 0..MAX_GENERATION_RETRIES {
            let field = ShapeField::random(rng);
            let mask = Self::sample(&field);
            if mask.live_cells >= MIN_WOUND_CELLS {
                log::debug!(
                    "wound mask generated: {} live cells (attempt {})",
                    mask.live_cells,
                    attempt + 1
                );
                return mask;
            }
            log::debug!(
                "degenerate wound mask ({} cells), retrying (attempt {})",
                mask.live_cells,
                attempt + 1
            );
        }

        log::warn!(
            "wound generation exceeded {MAX_GENERATION_RETRIES} attempts, using fallback disc"
        );
        Self::fallback_disc()
    }

    /// Sample a shape field over the full grid, clipped to the circular bound
    fn sample(field: &ShapeField) -> Self {
        let center = GRID_SIZE as f32 / 2.0;
        let bound_sq = MASK_BOUND_RADIUS * MASK_BOUND_RADIUS;

        let mut cells = vec![false; GRID_SIZE * GRID_SIZE];
        let mut live_cells = 0;
        for gy in 0..GRID_SIZE {
            for gx in 0..GRID_SIZE {
                let dx = gx as f32 - center;
                let dy = gy as f32 - center;
                if dx * dx + dy * dy > bound_sq {
                    continue;
                }
                if field.contains(gx as f32, gy as f32) {
                    cells[cell_index(gx, gy)] = true;
                    live_cells += 1;
                }
            }
        }

        Self { cells, live_cells }
    }

    /// Deterministic centered disc, used when random generation keeps failing
    pub fn fallback_disc() -> Self {
        let center = GRID_SIZE as f32 / 2.0;
        let r_sq = FALLBACK_DISC_RADIUS * FALLBACK_DISC_RADIUS;

        let mut cells = vec![false; GRID_SIZE * GRID_SIZE];
        let mut live_cells = 0;
        for gy in 0..GRID_SIZE {
            for gx in 0..GRID_SIZE {
                let dx = gx as f32 - center;
                let dy = gy as f32 - center;
                if dx * dx + dy * dy <= r_sq {
                    cells[cell_index(gx, gy)] = true;
                    live_cells += 1;
                }
            }
        }

        Self { cells, live_cells }
    }

    /// Whether the cell at (gx, gy) is wound tissue. Out-of-range is false.
    #[inline]
    pub fn is_wound(&self, gx: usize, gy: usize) -> bool {
        if gx >= GRID_SIZE || gy >= GRID_SIZE {
            return false;
        }
        self.cells[cell_index(gx, gy)]
    }

    /// Number of wound cells in the mask
    #[inline]
    pub fn live_cells(&self) -> usize {
        self.live_cells
    }
}
