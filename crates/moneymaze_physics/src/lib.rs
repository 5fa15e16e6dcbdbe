//! Maze physics for Money Maze
//!
//! This crate provides player movement against static maze geometry, including:
//! - Collision shapes (axis-aligned boxes, the player capsule)
//! - Box overlap and shrunk-box point tests, filtered by collision layer
//! - The obstacle set (walls and closed doors) with generational keys
//! - Two walking models: damped capsule movement and direct camera movement
//! - Head-bob for the first-person eye height

pub mod collision;
pub mod movement;
pub mod obstacle;
pub mod player;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use collision::{aabb_vs_aabb, point_in_shrunk_aabb, CollisionLayer, Contact};
pub use movement::{DampingMode, MovementConfig, MovementModel};
pub use obstacle::{Obstacle, ObstacleKey};
pub use player::{HeadBob, PlayerBody, StepOutcome, DEFAULT_EYE_HEIGHT, DEFAULT_SPAWN};
pub use shapes::{Aabb, Capsule};
pub use world::{CapsuleResolution, ObstacleSet};
