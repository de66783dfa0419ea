//! Frame-driven simulation system
//!
//! Manages the per-frame update including:
//! - Delta time calculation from the wall clock
//! - One simulation tick (motion, then one reaction pass)
//! - Debug logging of reaction activity

use std::time::Instant;
use combustion_sim::{PassReport, Simulation, DEFAULT_MAX_DT};

/// Drives a [`Simulation`] from the redraw loop
///
/// The first frame after creation or [`Self::restart_clock`] has a zero delta,
/// so time spent before the simulation was visible never reaches it.
pub struct SimulationSystem {
    last_frame: Option<Instant>,
    max_dt: f32,
    log_passes: bool,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(max_dt: f32, log_passes: bool) -> Self {
        let max_dt = if max_dt.is_finite() && max_dt > 0.0 {
            max_dt
        } else {
            DEFAULT_MAX_DT
        };
        Self {
            last_frame: None,
            max_dt,
            log_passes,
        }
    }

    /// Time since the previous frame at `now`, clamped to `[0, max_dt]`
    pub fn frame_delta(&mut self, now: Instant) -> f32 {
        let dt = match self.last_frame {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous frame, e.g. after a reset
    pub fn restart_clock(&mut self) {
        self.last_frame = None;
    }

    /// Run one frame of the simulation
    ///
    /// Returns the pass report, or `None` while paused. The clock keeps running
    /// during a pause so resuming does not produce a large step.
    pub fn update(&mut self, simulation: &mut Simulation) -> Option<PassReport> {
        let dt = self.frame_delta(Instant::now());
        let report = simulation.tick(dt)?;

        if self.log_passes && !report.is_quiet() {
            log::debug!(
                "Pass {} at {:.2}s: {} encounters, {} accepted, {} converted, {} cooled down ({})",
                simulation.passes(),
                simulation.elapsed(),
                report.encounters,
                report.accepted,
                report.conversions,
                report.decayed,
                simulation.tally()
            );
        }

        Some(report)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DT, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combustion_math::PlayField;
    use combustion_sim::SimulationParams;
    use std::time::Duration;

    #[test]
    fn test_first_frame_is_zero() {
        let mut system = SimulationSystem::default();
        assert_eq!(system.frame_delta(Instant::now()), 0.0);
    }

    #[test]
    fn test_delta_time_capped() {
        let mut system = SimulationSystem::default();
        let start = Instant::now();
        system.frame_delta(start);

        // Simulate a 100ms stall (window drag, focus change)
        let dt = system.frame_delta(start + Duration::from_millis(100));
        assert_eq!(dt, DEFAULT_MAX_DT);
    }

    #[test]
    fn test_short_frames_pass_through() {
        let mut system = SimulationSystem::default();
        let start = Instant::now();
        system.frame_delta(start);

        let dt = system.frame_delta(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_restart_clock() {
        let mut system = SimulationSystem::default();
        let start = Instant::now();
        system.frame_delta(start);
        system.restart_clock();

        assert_eq!(system.frame_delta(start + Duration::from_millis(20)), 0.0);
    }

    #[test]
    fn test_invalid_max_dt_falls_back() {
        let system = SimulationSystem::new(f32::NAN, false);
        assert_eq!(system.max_dt, DEFAULT_MAX_DT);
        let system = SimulationSystem::new(-1.0, false);
        assert_eq!(system.max_dt, DEFAULT_MAX_DT);
    }

    #[test]
    fn test_update_respects_pause() {
        let mut simulation = Simulation::seeded(PlayField::default(), 3);
        simulation.reset(SimulationParams::default());
        let mut system = SimulationSystem::new(DEFAULT_MAX_DT, true);

        assert!(system.update(&mut simulation).is_some());
        simulation.toggle_pause();
        assert!(system.update(&mut simulation).is_none());
        assert_eq!(simulation.passes(), 1);
    }
}
