//! Frame-driven session tick
//!
//! One `tick` per display refresh. Delta time is clamped to bound worst-case
//! work after long pauses (tab backgrounding). The aim state is read once as
//! a last-writer-wins snapshot; deposits, the aggregate rescan, the win
//! check, and the particle update all complete synchronously within the
//! tick.

use super::state::{SessionPhase, SessionState};
use crate::consts::{EMIT_PER_TICK_BASE, MAX_TICK_DT, WIN_THRESHOLD_PCT};

/// Advance the session by one frame
pub fn tick(state: &mut SessionState, dt: f32) {
    let dt = dt.clamp(0.0, MAX_TICK_DT);

    // Impact events are only kept for one tick; presentation reads them
    // between ticks.
    state.impacts.clear();

    if state.phase == SessionPhase::Playing {
        state.elapsed += dt;

        if state.spraying && state.aim.valid && dt > 0.0 {
            let radius = state.spray_radius();
            let changed = state.coverage.deposit(
                &state.mask,
                state.aim.x,
                state.aim.z,
                radius,
                state.intensity,
                dt,
                &mut state.rng,
            );
            if changed {
                state.coverage_pct = state.coverage.recalc(&state.mask);
            }

            let origin = state.nozzle_origin();
            let count = EMIT_PER_TICK_BASE + state.intensity as u32;
            state
                .pool
                .emit(origin, state.aim.x, state.aim.z, count, state.intensity, &mut state.rng);

            if state.coverage_pct >= WIN_THRESHOLD_PCT {
                state.spraying = false;
                state.phase = SessionPhase::Won;
                log::info!(
                    "wound coated: {:.1}% in {:.1}s, {} impacts",
                    state.coverage_pct,
                    state.elapsed,
                    state.impact_count
                );
            }
        }
    }

    // Particles advance in every phase so released spray fades out naturally
    state.pool.advance(
        dt,
        state.spraying,
        state.intensity,
        state.material,
        &mut state.impacts,
    );
    if state.phase == SessionPhase::Playing {
        state.impact_count += state.impacts.len() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_SIZE, SIM_DT};
    use crate::grid_to_world;

    /// World coordinates of some wound cell in the session's mask
    fn aim_inside_wound(state: &SessionState) -> (f32, f32) {
        for gy in 0..GRID_SIZE {
            for gx in 0..GRID_SIZE {
                if state.mask.is_wound(gx, gy) {
                    return (grid_to_world(gx as f32), grid_to_world(gy as f32));
                }
            }
        }
        unreachable!("mask has no wound cells");
    }

    /// World coordinates of the least-covered wound cell
    fn least_covered(state: &SessionState) -> (f32, f32) {
        let mut best = (0, 0);
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

    /// Spray along the coverage gaps until the session is won
    fn drive_to_win(state: &mut SessionState) -> u32 {
        state.set_intensity(5);
        let mut ticks = 0u32;
        while state.phase != SessionPhase::Won {
            if ticks % 5 == 0 {
                let (x, z) = least_covered(state);
                state.set_aim(x, z, true);
            }
            state.set_spraying(true);
            tick(state, SIM_DT);
            ticks += 1;
            assert!(ticks < 120_000, "session never completed");
        }
        ticks
    }

    #[test]
    fn test_intro_ignores_input() {
        let mut state = SessionState::new(100);
        let (x, z) = aim_inside_wound(&state);
        state.set_aim(x, z, true);
        state.set_spraying(true);

        for _ in 0..10 {
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.phase, SessionPhase::Intro);
        assert_eq!(state.coverage_pct, 0.0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.pool.active_count(), 0);
    }

    #[test]
    fn test_start_begins_timer() {
        let mut state = SessionState::new(101);
        state.start();
        for _ in 0..10 {
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.phase, SessionPhase::Playing);
        assert!((state.elapsed - 10.0 * SIM_DT).abs() < 1e-4);
    }

    #[test]
    fn test_spraying_builds_coverage_and_particles() {
        let mut state = SessionState::new(102);
        state.start();
        let (x, z) = aim_inside_wound(&state);
        state.set_aim(x, z, true);
        state.set_spraying(true);

        for _ in 0..30 {
            tick(&mut state, SIM_DT);
        }
        assert!(state.coverage_pct > 0.0);
        assert!(state.pool.active_count() > 0);
        // Cached aggregate never drifts from the grid it summarizes
        let fresh = state.coverage.recalc(&state.mask);
        assert!((state.coverage_pct - fresh).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_aim_deposits_nothing() {
        let mut state = SessionState::new(103);
        state.start();
        state.set_aim(0.0, 0.0, false);
        state.set_spraying(true);

        for _ in 0..30 {
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.coverage_pct, 0.0);
        assert_eq!(state.pool.active_count(), 0);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = SessionState::new(104);
        state.start();
        tick(&mut state, 10.0);
        assert!((state.elapsed - crate::consts::MAX_TICK_DT).abs() < 1e-6);
    }

    #[test]
    fn test_impacts_accrue_while_playing() {
        let mut state = SessionState::new(105);
        state.start();
        let (x, z) = aim_inside_wound(&state);
        state.set_aim(x, z, true);
        state.set_spraying(true);

        for _ in 0..240 {
            tick(&mut state, SIM_DT);
        }
        assert!(state.impact_count > 0, "no impacts after 4s of spraying");
    }

    #[test]
    fn test_win_freezes_session() {
        let mut state = SessionState::new(106);
        state.start();
        drive_to_win(&mut state);

        assert_eq!(state.phase, SessionPhase::Won);
        assert!(state.coverage_pct >= WIN_THRESHOLD_PCT);
        assert!(!state.spraying);

        let elapsed = state.elapsed;
        let impacts = state.impact_count;
        let values = state.coverage.values().to_vec();

        // Spray input after the win must mutate nothing
        state.set_spraying(true);
        let (x, z) = aim_inside_wound(&state);
        state.set_aim(x, z, true);
        for _ in 0..60 {
            tick(&mut state, SIM_DT);
        }
        assert_eq!(state.phase, SessionPhase::Won);
        assert_eq!(state.elapsed, elapsed);
        assert_eq!(state.impact_count, impacts);
        assert_eq!(state.coverage.values(), values.as_slice());
    }

    #[test]
    fn test_reset_after_win_requires_start() {
        let mut state = SessionState::new(107);
        state.start();
        drive_to_win(&mut state);

        state.reset();
        assert_eq!(state.phase, SessionPhase::Intro);
        assert_eq!(state.coverage_pct, 0.0);
        assert_eq!(state.pool.active_count(), 0);

        // Still inert until start is called again
        state.set_spraying(true);
        tick(&mut state, SIM_DT);
        assert_eq!(state.coverage_pct, 0.0);

        state.start();
        assert_eq!(state.phase, SessionPhase::Playing);
    }

    #[test]
    fn test_same_seed_same_script_is_deterministic() {
        let mut a = SessionState::new(4242);
        let mut b = SessionState::new(4242);

        for state in [&mut a, &mut b] {
            state.start();
            let (x, z) = aim_inside_wound(state);
            state.set_aim(x, z, true);
            state.set_spraying(true);
            for _ in 0..120 {
                tick(state, SIM_DT);
            }
        }

        assert_eq!(a.coverage_pct, b.coverage_pct);
        assert_eq!(a.impact_count, b.impact_count);
        assert_eq!(a.coverage.values(), b.coverage.values());
        assert_eq!(a.pool.active_count(), b.pool.active_count());
    }
}
