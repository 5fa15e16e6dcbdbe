//! Player physics for first-person maze walking
//!
//! Provides the player body, one-frame stepping through either movement model, and head-bob.

use crate::movement::{integrate_capsule, propose_direct, MovementConfig, MovementModel};
use crate::obstacle::ObstacleKey;
use crate::shapes::Capsule;
use crate::world::ObstacleSet;
use moneymaze_math::Vec3;

/// Default spawn position
pub const DEFAULT_SPAWN: Vec3 = Vec3::new(1.5, 1.2, 1.5);

/// Eye height above the player position when standing still
pub const DEFAULT_EYE_HEIGHT: f32 = 1.25;

/// Head-bob phase advance per second while walking
pub const BOB_RATE: f32 = 7.6;

/// Head-bob amplitude
pub const BOB_AMPLITUDE: f32 = 0.07;

/// Intent length below which the player counts as standing still
const MOVING_THRESHOLD: f32 = 0.01;

/// What happened during one movement step
#[derive(Clone, Debug, Default)]
pub struct StepOutcome {
    /// Displacement actually applied to the position
    pub displacement: Vec3,
    /// Whether an obstacle cancelled (part of) the move
    pub blocked: bool,
    /// Obstacles responsible for the block
    pub blockers: Vec<ObstacleKey>,
}

/// Player body state
///
/// Owned by the game session and mutated once per frame. The position is the player's
/// feet for the capsule model; velocity is only used by the capsule model.
#[derive(Clone, Debug)]
pub struct PlayerBody {
    /// Current position
    pub position: Vec3,
    /// Current velocity (capsule model only)
    pub velocity: Vec3,
    /// Collision volume
    pub capsule: Capsule,
}

impl PlayerBody {
    /// Create a new player at the given position
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            capsule: Capsule::default(),
        }
    }

    /// Set a custom collision capsule
    pub fn with_capsule(mut self, capsule: Capsule) -> Self {
        self.capsule = capsule;
        self
    }

    /// Simulate one frame of walking
    ///
    /// `intent` is the world-space walking direction (unit length or zero).
    ///
    /// Capsule model: the velocity keeps its value when the move is cancelled, so pushing
    /// against a wall keeps the player pinned until the input is released and the velocity
    /// decays.
    pub fn step(
        &mut self,
        intent: Vec3,
        dt: f32,
        config: &MovementConfig,
        obstacles: &ObstacleSet,
    ) -> StepOutcome {
        match config.model {
            MovementModel::Capsule => self.step_capsule(intent, dt, config, obstacles),
            MovementModel::Direct => self.step_direct(intent, dt, config, obstacles),
        }
    }

    fn step_capsule(
        &mut self,
        intent: Vec3,
        dt: f32,
        config: &MovementConfig,
        obstacles: &ObstacleSet,
    ) -> StepOutcome {
        let movement = integrate_capsule(&mut self.velocity, intent, dt, config);
        let resolution = obstacles.resolve_capsule_move(self.position, movement, &self.capsule, config.blocking);

        self.position += resolution.movement;

        if resolution.is_blocked() {
            log::trace!(
                "Capsule move {:?} cancelled by {} obstacle(s)",
                movement,
                resolution.contacts.len()
            );
        }

        StepOutcome {
            displacement: resolution.movement,
            blocked: resolution.is_blocked(),
            blockers: resolution.contacts.into_iter().map(|(key, _)| key).collect(),
        }
    }

    fn step_direct(
        &mut self,
        intent: Vec3,
        dt: f32,
        config: &MovementConfig,
        obstacles: &ObstacleSet,
    ) -> StepOutcome {
        if intent.length_squared() == 0.0 {
            return StepOutcome::default();
        }

        let proposed = propose_direct(self.position, intent, config.direct_speed, dt);
        match obstacles.blocking_point(proposed, config.test_radius, config.blocking) {
            Some(blocker) => {
                log::trace!("Direct move to {:?} rejected", proposed);
                StepOutcome {
                    displacement: Vec3::ZERO,
                    blocked: true,
                    blockers: vec![blocker],
                }
            }
            None => {
                let displacement = proposed - self.position;
                self.position = proposed;
                StepOutcome {
                    displacement,
                    blocked: false,
                    blockers: Vec::new(),
                }
            }
        }
    }

    /// Stop all motion
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
    }
}

/// Walking head-bob for the first-person camera
#[derive(Clone, Debug)]
pub struct HeadBob {
    phase: f32,
    /// Eye height when standing still
    pub base_height: f32,
    /// Phase advance per second
    pub rate: f32,
    /// Vertical amplitude
    pub amplitude: f32,
}

impl Default for HeadBob {
    fn default() -> Self {
        Self {
            phase: 0.0,
            base_height: DEFAULT_EYE_HEIGHT,
            rate: BOB_RATE,
            amplitude: BOB_AMPLITUDE,
        }
    }
}

impl HeadBob {
    /// Builder: set the resting eye height
    pub fn with_base_height(mut self, base_height: f32) -> Self {
        self.base_height = base_height;
        self
    }

    /// Advance the bob and return the eye height above the player position
    pub fn update(&mut self, intent: Vec3, dt: f32) -> f32 {
        if intent.length() > MOVING_THRESHOLD {
            self.phase += dt * self.rate;
            self.base_height + self.phase.sin() * self.amplitude
        } else {
            self.phase = 0.0;
            self.base_height
        }
    }

    /// Current bob phase
    pub fn phase(&self) -> f32 {
        self.phase
    }
}
