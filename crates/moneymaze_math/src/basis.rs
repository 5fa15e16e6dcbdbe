//! Yaw/pitch camera basis
//!
//! The camera looks down -Z at yaw = 0. Positive yaw turns right (clockwise seen from above),
//! positive pitch looks up.

use crate::Vec3;

/// View direction for the given yaw and pitch (radians)
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

/// Horizontal forward and right axes for a view direction
///
/// Y is flattened and the result re-normalized, so looking up or down never changes walking
/// speed. Returns `(forward, right)`; a straight up/down view yields zero axes.
pub fn horizontal_axes(look: Vec3) -> (Vec3, Vec3) {
    let forward = look.horizontal().normalized();
    let right = forward.cross(Vec3::Y).normalized();
    (forward, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_default_look_is_negative_z() {
        assert!(approx(look_direction(0.0, 0.0), -Vec3::Z));
    }

    #[test]
    fn test_yaw_turns_right() {
        assert!(approx(look_direction(FRAC_PI_2, 0.0), Vec3::X));
    }

    #[test]
    fn test_right_axis_at_rest() {
        let (forward, right) = horizontal_axes(look_direction(0.0, 0.0));
        assert!(approx(forward, -Vec3::Z));
        assert!(approx(right, Vec3::X));
    }

    #[test]
    fn test_pitch_flattened() {
        let (forward, _) = horizontal_axes(look_direction(0.3, 1.2));
        assert!(forward.y.abs() < EPSILON);
        assert!((forward.length() - 1.0).abs() < EPSILON);
    }
}
