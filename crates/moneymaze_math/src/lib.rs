//! Maze Mathematics Library
//!
//! This crate provides the vector and camera-basis types shared by the Money Maze crates.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components (Y up)
//! - [`look_direction`] / [`horizontal_axes`] - yaw/pitch camera basis

mod vec3;
pub mod basis;

pub use vec3::Vec3;
pub use basis::{horizontal_axes, look_direction};
