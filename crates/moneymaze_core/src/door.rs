//! Checkpoint doors
//!
//! A door starts closed and blocking. A good choice opens it: it slides up for a while and
//! stops blocking after the open delay. A bad choice makes it flash and stay closed.

use moneymaze_physics::{ObstacleKey, ObstacleSet};
use serde::{Deserialize, Serialize};

/// Door timing and animation parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorTiming {
    /// Seconds between a good choice and the door no longer blocking
    pub open_delay: f32,
    /// Seconds the lift animation takes
    pub lift_duration: f32,
    /// How far the door rises
    pub lift_height: f32,
    /// Seconds a blocked door flashes
    pub flash_duration: f32,
}

impl Default for DoorTiming {
    fn default() -> Self {
        Self {
            open_delay: 0.85,
            lift_duration: 0.9,
            lift_height: 3.3,
            flash_duration: 0.42,
        }
    }
}

/// Lifecycle of a door
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DoorState {
    /// Blocking, at rest
    Closed,
    /// Sliding up; still blocking until removed
    Opening { elapsed: f32 },
    /// Blocking and flashing after a refused choice
    Flashing,
    /// No longer blocking
    Removed { elapsed: f32 },
}

/// A door backed by an obstacle in the session's obstacle set
#[derive(Clone, Debug)]
pub struct Door {
    obstacle: ObstacleKey,
    state: DoorState,
}

impl Door {
    pub fn new(obstacle: ObstacleKey) -> Self {
        Self {
            obstacle,
            state: DoorState::Closed,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn obstacle(&self) -> ObstacleKey {
        self.obstacle
    }

    /// Whether the door still blocks movement
    pub fn is_blocking(&self) -> bool {
        !matches!(self.state, DoorState::Removed { .. })
    }

    /// Start opening. Returns false if the door is already opening or gone.
    pub fn open(&mut self) -> bool {
        match self.state {
            DoorState::Closed | DoorState::Flashing => {
                self.state = DoorState::Opening { elapsed: 0.0 };
                true
            }
            DoorState::Opening { .. } | DoorState::Removed { .. } => false,
        }
    }

    /// Start flashing. Only a closed door can flash.
    pub fn block(&mut self) -> bool {
        if self.state == DoorState::Closed {
            self.state = DoorState::Flashing;
            true
        } else {
            false
        }
    }

    /// Stop flashing. Returns false if the door was not flashing.
    pub fn end_flash(&mut self) -> bool {
        if self.state == DoorState::Flashing {
            self.state = DoorState::Closed;
            true
        } else {
            false
        }
    }

    /// Remove the obstacle of an opening door
    ///
    /// Succeeds once; the obstacle set no longer contains the door afterwards.
    pub fn remove(&mut self, obstacles: &mut ObstacleSet) -> bool {
        let DoorState::Opening { elapsed } = self.state else {
            return false;
        };
        if obstacles.remove(self.obstacle).is_none() {
            log::warn!("Door obstacle {:?} was already gone", self.obstacle);
        }
        self.state = DoorState::Removed { elapsed };
        true
    }

    /// Advance the lift animation
    pub fn advance(&mut self, dt: f32) {
        match &mut self.state {
            DoorState::Opening { elapsed } | DoorState::Removed { elapsed } => *elapsed += dt,
            DoorState::Closed | DoorState::Flashing => {}
        }
    }

    /// Current lift above the closed position, eased in quadratically
    pub fn lift(&self, timing: &DoorTiming) -> f32 {
        match self.state {
            DoorState::Opening { elapsed } | DoorState::Removed { elapsed } => {
                let t = if timing.lift_duration > 0.0 {
                    (elapsed / timing.lift_duration).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                timing.lift_height * t * t
            }
            DoorState::Closed | DoorState::Flashing => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneymaze_math::Vec3;
    use moneymaze_physics::{Aabb, Obstacle};

    fn door_in(set: &mut ObstacleSet) -> Door {
        let key = set.insert(Obstacle::door(Aabb::from_center_size(
            Vec3::new(0.0, 0.9, -0.75),
            Vec3::new(1.0, 1.8, 0.18),
        )));
        Door::new(key)
    }

    #[test]
    fn test_open_then_remove() {
        let mut set = ObstacleSet::new();
        let mut door = door_in(&mut set);

        assert!(door.open());
        assert!(door.is_blocking());
        assert!(set.contains(door.obstacle()));

        assert!(door.remove(&mut set));
        assert!(!door.is_blocking());
        assert!(!set.contains(door.obstacle()));

        // Second removal is a no-op
        assert!(!door.remove(&mut set));
        assert!(!door.open());
    }

    #[test]
    fn test_remove_requires_opening() {
        let mut set = ObstacleSet::new();
        let mut door = door_in(&mut set);
        assert!(!door.remove(&mut set));
        assert!(set.contains(door.obstacle()));
    }

    #[test]
    fn test_flash_cycle() {
        let mut set = ObstacleSet::new();
        let mut door = door_in(&mut set);

        assert!(door.block());
        assert_eq!(door.state(), DoorState::Flashing);
        assert!(!door.block());
        assert!(door.end_flash());
        assert_eq!(door.state(), DoorState::Closed);
        assert!(!door.end_flash());
    }

    #[test]
    fn test_lift_eases_in() {
        let mut set = ObstacleSet::new();
        let mut door = door_in(&mut set);
        let timing = DoorTiming::default();

        assert_eq!(door.lift(&timing), 0.0);
        door.open();
        door.advance(timing.lift_duration / 2.0);
        assert!((door.lift(&timing) - timing.lift_height * 0.25).abs() < 0.0001);

        door.remove(&mut set);
        door.advance(10.0);
        assert_eq!(door.lift(&timing), timing.lift_height);
    }

    #[test]
    fn test_closed_door_does_not_animate() {
        let mut set = ObstacleSet::new();
        let mut door = door_in(&mut set);
        door.advance(1.0);
        assert_eq!(door.state(), DoorState::Closed);
    }
}
