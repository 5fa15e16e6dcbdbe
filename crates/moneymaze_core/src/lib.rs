//! Core game state for Money Maze
//!
//! This crate ties player movement to the maze's gameplay:
//!
//! - [`Level`] - Serializable maze layout (walls, checkpoints, exit)
//! - [`Checkpoint`] - Proximity-armed decision point
//! - [`Door`] - Obstacle that opens or flashes in response to a choice
//! - [`Score`] - Running score under a [`ScorePolicy`]
//! - [`Timers`] - Deferred actions in simulated time
//! - [`GameSession`] - One play-through, reporting [`GameEvent`]s

mod checkpoint;
mod door;
mod events;
mod level;
mod score;
mod session;
mod timers;

pub use checkpoint::{Checkpoint, CheckpointState, ProximityConfig, CHECKPOINT_HEIGHT};
pub use door::{Door, DoorState, DoorTiming};
pub use events::{CheckpointId, Choice, DoorId, EventQueue, GameEvent};
pub use level::{BoxTemplate, CheckpointTemplate, Level, LevelError, WallSegment};
pub use score::{Score, ScorePolicy, ScoreRules};
pub use session::{GameSession, SessionConfig, SessionError, SessionPhase, DEFAULT_FEEDBACK_DELAY};
pub use timers::{TimedAction, Timers};

// Re-export commonly used types for convenience
pub use moneymaze_math::Vec3;
pub use moneymaze_physics::{DampingMode, MovementConfig, MovementModel};
