//! Maze Input Handling
//!
//! This crate turns held movement keys and mouse motion into a walking intent and a
//! first-person camera orientation.

mod camera_pose;
mod movement_controller;

pub use camera_pose::{CameraPose, DEFAULT_PITCH_LIMIT_DEGREES};
pub use movement_controller::{CameraControl, MovementController, DEFAULT_MOUSE_SENSITIVITY};
