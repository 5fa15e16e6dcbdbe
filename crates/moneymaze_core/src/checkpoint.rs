//! Checkpoints
//!
//! A checkpoint arms when the player walks close, opens a decision on interact, and is
//! resolved for good by the first choice. Hysteresis between the arm and disarm radii keeps
//! the prompt from flickering at the boundary.

use crate::events::{Choice, DoorId};
use moneymaze_math::Vec3;
use serde::{Deserialize, Serialize};

/// Height at which checkpoint distance is measured
pub const CHECKPOINT_HEIGHT: f32 = 1.2;

/// Proximity radii for checkpoints and the exit
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Distance below which a checkpoint arms
    pub arm_radius: f32,
    /// Distance above which an armed checkpoint disarms
    pub disarm_radius: f32,
    /// Distance below which the exit is reached
    pub exit_radius: f32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            arm_radius: 1.25,
            disarm_radius: 1.4,
            exit_radius: 1.1,
        }
    }
}

/// Lifecycle of a checkpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointState {
    Inactive,
    /// Player in range; waiting for interact or a choice
    Armed,
    /// Decision open; movement frozen
    Choosing,
    /// Answered; never arms again
    Resolved(Choice),
}

/// A checkpoint in a running session
#[derive(Clone, Debug)]
pub struct Checkpoint {
    position: Vec3,
    question: String,
    door: Option<DoorId>,
    state: CheckpointState,
}

impl Checkpoint {
    /// Create an inactive checkpoint at floor position (x, z)
    pub fn new(x: f32, z: f32, question: impl Into<String>, door: Option<DoorId>) -> Self {
        Self {
            position: Vec3::new(x, CHECKPOINT_HEIGHT, z),
            question: question.into(),
            door,
            state: CheckpointState::Inactive,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn door(&self) -> Option<DoorId> {
        self.door
    }

    pub fn state(&self) -> CheckpointState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, CheckpointState::Resolved(_))
    }

    /// Distance from a player position to the trigger point
    pub fn distance_to(&self, player: Vec3) -> f32 {
        self.position.distance(player)
    }

    /// Inactive → Armed
    pub fn arm(&mut self) -> bool {
        if self.state == CheckpointState::Inactive {
            self.state = CheckpointState::Armed;
            true
        } else {
            false
        }
    }

    /// Armed → Inactive
    pub fn disarm(&mut self) -> bool {
        if self.state == CheckpointState::Armed {
            self.state = CheckpointState::Inactive;
            true
        } else {
            false
        }
    }

    /// Armed → Choosing
    pub fn begin_choice(&mut self) -> bool {
        if self.state == CheckpointState::Armed {
            self.state = CheckpointState::Choosing;
            true
        } else {
            false
        }
    }

    /// Armed or Choosing → Resolved
    pub fn resolve(&mut self, choice: Choice) -> bool {
        match self.state {
            CheckpointState::Armed | CheckpointState::Choosing => {
                self.state = CheckpointState::Resolved(choice);
                true
            }
            CheckpointState::Inactive | CheckpointState::Resolved(_) => false,
        }
    }
}
