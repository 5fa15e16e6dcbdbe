//! Game events
//!
//! Everything a presentation layer needs to react to (HUD prompts, door animation, sounds)
//! is reported as a plain-data [`GameEvent`]. The session queues events during a frame and
//! the caller drains them afterwards.

use serde::{Deserialize, Serialize};

/// A handle to a checkpoint in the session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckpointId(pub(crate) usize);

impl CheckpointId {
    /// Get the raw index of this handle
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A handle to a door in the session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoorId(pub(crate) usize);

impl DoorId {
    /// Get the raw index of this handle
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// The player's answer at a checkpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    Good,
    Bad,
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::Good => write!(f, "good"),
            Choice::Bad => write!(f, "bad"),
        }
    }
}

/// Something that happened during a session update or command
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Mouse-look and movement were engaged
    PointerEngaged,
    /// Mouse-look and movement were released
    PointerReleased,
    Paused,
    Resumed,
    /// The player is close enough to interact with a checkpoint
    CheckpointArmed { checkpoint: CheckpointId, question: String },
    /// The player walked away from an armed checkpoint
    CheckpointDisarmed { checkpoint: CheckpointId },
    /// The player asked to answer; movement is frozen until a choice is made
    DecisionRequested { checkpoint: CheckpointId, question: String },
    ChoiceMade { checkpoint: CheckpointId, choice: Choice },
    /// Score changed by `delta` (after clamping) to `score`
    ScoreChanged { delta: i32, score: i32 },
    /// A door started sliding open; it stops blocking after the open delay
    DoorOpening { door: DoorId },
    /// A door no longer blocks movement
    DoorRemoved { door: DoorId },
    /// A door refused to open and is flashing
    DoorBlocked { door: DoorId },
    /// A blocked door finished flashing
    DoorFlashEnded { door: DoorId },
    /// Feedback for a resolved checkpoint should be hidden
    FeedbackCleared { checkpoint: CheckpointId },
    /// The player reached the exit gate; the session is complete
    ExitReached { score: i32 },
}

/// FIFO queue of pending events
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        log::debug!("Event: {:?}", event);
        self.events.push(event);
    }

    /// Take every queued event in the order it was raised
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
