//! Movement controller for first-person maze walking
//!
//! Controls:
//! - W/S or Up/Down: forward/backward
//! - A/D or Left/Right: strafe
//! - Mouse motion: look (yaw/pitch)

use moneymaze_math::Vec3;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Default mouse sensitivity (radians per pixel)
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.002;

/// Held-key and pending-mouse state for the player
pub struct MovementController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,

    // Mouse state
    pending_yaw: f32,
    pending_pitch: f32,

    // Configuration
    pub mouse_sensitivity: f32,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,

            pending_yaw: 0.0,
            pending_pitch: 0.0,

            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is a movement key. Repeated presses are idempotent.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => { self.forward = pressed; true }
            KeyCode::KeyS | KeyCode::ArrowDown => { self.backward = pressed; true }
            KeyCode::KeyA | KeyCode::ArrowLeft => { self.left = pressed; true }
            KeyCode::KeyD | KeyCode::ArrowRight => { self.right = pressed; true }
            _ => false,
        }
    }

    /// Process mouse movement
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_yaw += delta_x as f32;
        self.pending_pitch += delta_y as f32;
    }

    /// Walking intent in the camera's local frame
    ///
    /// Forward is -Z, right is +X, Y is always zero. The vector is normalized, so diagonal
    /// walking is no faster than straight walking.
    pub fn intent(&self) -> Vec3 {
        let mut direction = Vec3::ZERO;
        if self.forward {
            direction.z -= 1.0;
        }
        if self.backward {
            direction.z += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        direction.normalized()
    }

    /// Apply accumulated mouse motion to a camera and reset it
    ///
    /// Mouse right turns right; mouse down looks down.
    pub fn apply_look<C: CameraControl>(&mut self, camera: &mut C) {
        if self.pending_yaw != 0.0 || self.pending_pitch != 0.0 {
            camera.rotate(
                self.pending_yaw * self.mouse_sensitivity,
                -self.pending_pitch * self.mouse_sensitivity,
            );
        }
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
    }

    /// Discard pending mouse motion without applying it
    pub fn discard_look(&mut self) {
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
    }

    /// Check if any movement keys are held
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release every held key (e.g. when the pointer lock is lost)
    pub fn release_all(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.00001;

    #[derive(Default)]
    struct RecordingCamera {
        yaw: f32,
        pitch: f32,
        calls: usize,
    }

    impl CameraControl for RecordingCamera {
        fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
            self.calls += 1;
        }
    }

    fn press(controller: &mut MovementController, keys: &[KeyCode]) {
        for &key in keys {
            controller.process_keyboard(key, ElementState::Pressed);
        }
    }

    #[test]
    fn test_no_keys_zero_intent() {
        let controller = MovementController::new();
        assert_eq!(controller.intent(), Vec3::ZERO);
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_forward_is_negative_z() {
        let mut controller = MovementController::new();
        press(&mut controller, &[KeyCode::KeyW]);
        assert_eq!(controller.intent(), -Vec3::Z);
    }

    #[test]
    fn test_diagonals_are_unit_length() {
        let diagonals = [
            [KeyCode::KeyW, KeyCode::KeyD],
            [KeyCode::KeyW, KeyCode::KeyA],
            [KeyCode::KeyS, KeyCode::KeyD],
            [KeyCode::KeyS, KeyCode::KeyA],
        ];
        for keys in diagonals {
            let mut controller = MovementController::new();
            press(&mut controller, &keys);
            let intent = controller.intent();
            assert!((intent.length() - 1.0).abs() < EPSILON, "{:?} gave {:?}", keys, intent);
            assert_eq!(intent.y, 0.0);
        }
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut controller = MovementController::new();
        press(&mut controller, &[KeyCode::KeyW, KeyCode::KeyS]);
        assert_eq!(controller.intent(), Vec3::ZERO);
        assert!(controller.is_moving());
    }

    #[test]
    fn test_release_and_repeat() {
        let mut controller = MovementController::new();
        press(&mut controller, &[KeyCode::KeyD, KeyCode::KeyD]);
        assert_eq!(controller.intent(), Vec3::X);

        controller.process_keyboard(KeyCode::KeyD, ElementState::Released);
        assert_eq!(controller.intent(), Vec3::ZERO);
    }

    #[test]
    fn test_arrow_aliases() {
        let mut controller = MovementController::new();
        press(&mut controller, &[KeyCode::ArrowLeft]);
        assert_eq!(controller.intent(), -Vec3::X);
    }

    #[test]
    fn test_non_movement_key_ignored() {
        let mut controller = MovementController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyE, ElementState::Pressed));
        assert!(!controller.process_keyboard(KeyCode::Escape, ElementState::Pressed));
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_release_all() {
        let mut controller = MovementController::new();
        press(&mut controller, &[KeyCode::KeyW, KeyCode::KeyA]);
        controller.release_all();
        assert!(!controller.is_moving());
    }

    #[test]
    fn test_apply_look_consumes_motion() {
        let mut controller = MovementController::new().with_mouse_sensitivity(0.01);
        let mut camera = RecordingCamera::default();

        controller.process_mouse_motion(10.0, 5.0);
        controller.apply_look(&mut camera);
        assert!((camera.yaw - 0.1).abs() < EPSILON);
        assert!((camera.pitch + 0.05).abs() < EPSILON);

        // Nothing pending: no further rotation
        controller.apply_look(&mut camera);
        assert_eq!(camera.calls, 1);
    }

    #[test]
    fn test_discard_look() {
        let mut controller = MovementController::new();
        let mut camera = RecordingCamera::default();
        controller.process_mouse_motion(50.0, 0.0);
        controller.discard_look();
        controller.apply_look(&mut camera);
        assert_eq!(camera.calls, 0);
    }
}
