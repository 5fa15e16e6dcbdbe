//! Game simulation system
//!
//! Manages the game loop simulation including:
//! - Frame time capping
//! - Fixed-step session updates
//! - Event collection for the presenter

use moneymaze_core::{GameEvent, GameSession};
use moneymaze_input::MovementController;

/// Result of a simulation update
pub struct SimulationResult {
    /// Number of fixed steps the session advanced
    pub steps: u32,
    /// Events raised during those steps
    pub events: Vec<GameEvent>,
}

/// Drives a [`GameSession`] at a fixed timestep
///
/// Frame time is accumulated and consumed in whole steps, so the session always sees the
/// same `dt` regardless of how irregular the frames are.
pub struct SimulationSystem {
    fixed_dt: f32,
    max_frame_time: f32,
    accumulator: f32,
    total_steps: u64,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(fixed_dt: f32, max_frame_time: f32) -> Self {
        Self {
            fixed_dt,
            max_frame_time,
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Run one frame worth of simulation
    ///
    /// # Arguments
    /// * `session` - Session to advance
    /// * `controller` - Input controller for movement/look
    /// * `frame_time` - Wall time since the previous frame
    pub fn update(
        &mut self,
        session: &mut GameSession,
        controller: &mut MovementController,
        frame_time: f32,
    ) -> SimulationResult {
        // Cap frame time to prevent spiral of death after a stall
        let frame_time = if frame_time > self.max_frame_time {
            log::debug!("Frame time {:.3}s capped to {:.3}s", frame_time, self.max_frame_time);
            self.max_frame_time
        } else {
            frame_time.max(0.0)
        };

        let mut steps = 0;
        if self.fixed_dt > 0.0 {
            self.accumulator += frame_time;
            while self.accumulator >= self.fixed_dt {
                session.update(self.fixed_dt, controller);
                self.accumulator -= self.fixed_dt;
                steps += 1;
            }
        } else {
            session.update(frame_time, controller);
            steps = 1;
        }
        self.total_steps += u64::from(steps);

        SimulationResult {
            steps,
            events: session.drain_events(),
        }
    }

    /// Fixed steps taken since creation
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(1.0 / 60.0, 0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneymaze_core::{Level, SessionConfig};

    fn session() -> GameSession {
        let level = Level::new("open field").with_player_spawn(0.0, 1.2, 0.0);
        GameSession::new(&level, SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_one_frame_one_step() {
        let mut sim = SimulationSystem::default();
        let mut session = session();
        let mut controller = MovementController::new();

        for _ in 0..10 {
            let result = sim.update(&mut session, &mut controller, sim.fixed_dt());
            assert_eq!(result.steps, 1);
        }
        assert_eq!(sim.total_steps(), 10);
    }

    #[test]
    fn test_long_frame_runs_several_steps() {
        let mut sim = SimulationSystem::new(1.0 / 60.0, 0.25);
        let mut session = session();
        let mut controller = MovementController::new();

        let result = sim.update(&mut session, &mut controller, 3.5 / 60.0);
        assert_eq!(result.steps, 3);

        // The leftover half step carries into the next frame
        let result = sim.update(&mut session, &mut controller, 1.0 / 60.0);
        assert_eq!(result.steps, 1);
        let result = sim.update(&mut session, &mut controller, 0.75 / 60.0);
        assert_eq!(result.steps, 1);
    }

    #[test]
    fn test_frame_time_capped() {
        let mut sim = SimulationSystem::new(1.0 / 60.0, 0.255);
        let mut session = session();
        let mut controller = MovementController::new();

        let result = sim.update(&mut session, &mut controller, 10.0);
        assert_eq!(result.steps, 15);
    }

    #[test]
    fn test_events_drained() {
        let mut sim = SimulationSystem::default();
        let mut session = session();
        let mut controller = MovementController::new();

        session.engage();
        let result = sim.update(&mut session, &mut controller, 0.0);
        assert_eq!(result.steps, 0);
        assert_eq!(result.events, vec![GameEvent::PointerEngaged]);
    }
}
