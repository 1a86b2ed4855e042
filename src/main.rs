//! Spraypatch entry point
//!
//! Headless demo harness: runs a scripted session against a freshly
//! generated wound, aiming at the least-covered cell until the coverage
//! threshold is reached, then prints a summary. Usage:
//!
//! ```text
//! spraypatch [seed] [intensity 1-5] [--json]
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use spraypatch::consts::{GRID_SIZE, SIM_DT};
use spraypatch::grid_to_world;
use spraypatch::sim::{SessionPhase, SessionState, tick};

/// Hard stop for the demo loop (simulated seconds)
const MAX_DEMO_SECS: f32 = 300.0;

#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    intensity: u8,
    material: &'static str,
    wound_cells: usize,
    ticks: u64,
    elapsed_secs: f32,
    coverage_pct: f32,
    impacts: u64,
    won: bool,
}

/// World coordinates of the least-covered wound cell
fn least_covered(state: &SessionState) -> (f32, f32) {
    let mut best = (GRID_SIZE / 2, GRID_SIZE / 2);
    let mut best_v = f32::INFINITY;
    for gy in 0..GRID_SIZE {
        for gx in 0..GRID_SIZE {
            if state.mask.is_wound(gx, gy) && state.coverage.value(gx, gy) < best_v {
                best_v = state.coverage.value(gx, gy);
                best = (gx, gy);
            }
        }
    }
    (grid_to_world(best.0 as f32), grid_to_world(best.1 as f32))
}

fn main() {
    env_logger::init();

    let mut seed = None;
    let mut intensity = None;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else if seed.is_none() {
            seed = arg.parse::<u64>().ok();
        } else if intensity.is_none() {
            intensity = arg.parse::<u8>().ok();
        }
    }
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut state = SessionState::new(seed);
    if let Some(level) = intensity {
        state.set_intensity(level);
    }
    state.start();
    log::info!(
        "demo session: seed {seed}, intensity {}, material {}",
        state.intensity,
        state.material.as_str()
    );

    let mut ticks: u64 = 0;
    let max_ticks = (MAX_DEMO_SECS / SIM_DT) as u64;
    while state.phase == SessionPhase::Playing && ticks < max_ticks {
        // Re-aim at the emptiest spot a few times per second
        if ticks % 6 == 0 {
            let (x, z) = least_covered(&state);
            state.set_aim(x, z, true);
        }
        state.set_spraying(true);
        tick(&mut state, SIM_DT);
        ticks += 1;

        if ticks % 60 == 0 {
            log::info!(
                "t={:.0}s coverage {:.1}% particles {} impacts {}",
                state.elapsed,
                state.coverage_pct,
                state.pool.active_count(),
                state.impact_count
            );
        }
    }

    let summary = SessionSummary {
        seed,
        intensity: state.intensity,
        material: state.material.as_str(),
        wound_cells: state.mask.live_cells(),
        ticks,
        elapsed_secs: state.elapsed,
        coverage_pct: state.coverage_pct,
        impacts: state.impact_count,
        won: state.phase == SessionPhase::Won,
    };

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{out}"),
            Err(err) => log::error!("summary serialization failed: {err}"),
        }
    } else if summary.won {
        println!(
            "Wound coated! {:.1}% in {:.1}s ({} impacts, {} wound cells, seed {})",
            summary.coverage_pct, summary.elapsed_secs, summary.impacts, summary.wound_cells, seed
        );
    } else {
        println!(
            "Demo stopped at {:.1}% after {:.1}s (seed {})",
            summary.coverage_pct, summary.elapsed_secs, seed
        );
    }
}
