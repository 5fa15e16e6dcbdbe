//! First-person camera orientation

use crate::movement_controller::CameraControl;
use moneymaze_math::{horizontal_axes, look_direction, Vec3};

/// Default pitch limit in degrees
pub const DEFAULT_PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Yaw/pitch orientation of the player's camera
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Yaw in radians (0 looks down -Z, positive turns right)
    pub yaw: f32,
    /// Pitch in radians (positive looks up)
    pub pitch: f32,
    /// Maximum absolute pitch in radians
    pub pitch_limit: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(DEFAULT_PITCH_LIMIT_DEGREES)
    }
}

impl CameraPose {
    /// Level camera looking down -Z
    pub fn new(pitch_limit_degrees: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: pitch_limit_degrees.to_radians(),
        }
    }

    /// Current view direction
    pub fn forward(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    /// Map a local walking intent (forward = -Z, right = +X) into world space
    ///
    /// Uses the yaw-only forward/right axes, so pitch never affects walking. The result is
    /// normalized (or zero).
    pub fn to_world(&self, intent: Vec3) -> Vec3 {
        let (forward, right) = horizontal_axes(self.forward());
        (forward * -intent.z + right * intent.x).normalized()
    }
}

impl CameraControl for CameraPose {
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-self.pitch_limit, self.pitch_limit);
    }
}
