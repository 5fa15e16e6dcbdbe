//! Movement integrators
//!
//! Two walking models exist and a session picks exactly one:
//!
//! - [`MovementModel::Capsule`]: velocity with acceleration and damping, resolved against the
//!   obstacle set by cancelling horizontal motion on any contact.
//! - [`MovementModel::Direct`]: immediate-response walk at constant speed; a frame whose
//!   proposed position lands inside a shrunk obstacle box is discarded entirely.

use crate::collision::CollisionLayer;
use crate::shapes::Capsule;
use moneymaze_math::Vec3;
use serde::{Deserialize, Serialize};

/// Acceleration of the capsule model (units per second squared)
pub const DEFAULT_CAPSULE_SPEED: f32 = 4.1;

/// Velocity multiplier applied each frame by the capsule model
pub const DEFAULT_DAMPING: f32 = 0.82;

/// Walking speed of the direct model (units per second)
pub const DEFAULT_DIRECT_SPEED: f32 = 3.0;

/// Point-test radius of the direct model
pub const DEFAULT_TEST_RADIUS: f32 = 0.5;

/// Frame rate at which time-normalized damping matches per-frame damping
pub const DAMPING_REFERENCE_RATE: f32 = 60.0;

/// Which walking model drives the player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementModel {
    /// Velocity + damping, horizontal motion cancelled on contact
    #[default]
    Capsule,
    /// Constant speed, whole frame rejected on contact
    Direct,
}

/// How the capsule model's damping relates to frame time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DampingMode {
    /// Multiply by the damping factor once per frame regardless of dt.
    /// Stopping distance therefore depends on frame rate.
    #[default]
    PerFrame,
    /// Raise the damping factor to `dt * 60`, so decay per second is frame-rate independent
    /// and a 60 Hz frame behaves exactly like `PerFrame`.
    TimeNormalized,
}

impl DampingMode {
    /// Velocity multiplier for a frame of length `dt`
    pub fn factor(self, damping: f32, dt: f32) -> f32 {
        match self {
            DampingMode::PerFrame => damping,
            DampingMode::TimeNormalized => damping.powf(dt * DAMPING_REFERENCE_RATE),
        }
    }
}

/// Configuration for player movement
#[derive(Clone, Debug)]
pub struct MovementConfig {
    /// Walking model
    pub model: MovementModel,
    /// Capsule model acceleration
    pub speed: f32,
    /// Capsule model damping factor
    pub damping: f32,
    /// Capsule model damping mode
    pub damping_mode: DampingMode,
    /// Direct model walking speed
    pub direct_speed: f32,
    /// Direct model point-test radius
    pub test_radius: f32,
    /// Player collision volume (capsule model)
    pub capsule: Capsule,
    /// Layers that stop the player
    pub blocking: CollisionLayer,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            model: MovementModel::Capsule,
            speed: DEFAULT_CAPSULE_SPEED,
            damping: DEFAULT_DAMPING,
            damping_mode: DampingMode::PerFrame,
            direct_speed: DEFAULT_DIRECT_SPEED,
            test_radius: DEFAULT_TEST_RADIUS,
            capsule: Capsule::default(),
            blocking: CollisionLayer::SOLID,
        }
    }
}

impl MovementConfig {
    /// Default config using the given model
    pub fn with_model(model: MovementModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }
}

/// One semi-implicit Euler step of the capsule model
///
/// ```text
/// v.xz += d.xz * speed * dt
/// v    *= damping
/// move  = v * dt
/// ```
///
/// Updates `velocity` in place and returns the proposed move for this frame.
pub fn integrate_capsule(velocity: &mut Vec3, intent: Vec3, dt: f32, config: &MovementConfig) -> Vec3 {
    velocity.x += intent.x * config.speed * dt;
    velocity.z += intent.z * config.speed * dt;
    *velocity *= config.damping_mode.factor(config.damping, dt);
    *velocity * dt
}

/// Proposed absolute position of the direct model
pub fn propose_direct(position: Vec3, direction: Vec3, speed: f32, dt: f32) -> Vec3 {
    position + direction.normalized() * (speed * dt)
}
