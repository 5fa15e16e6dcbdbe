//! Deferred actions
//!
//! Door removal, flash recovery, and feedback hiding all happen a fixed time after a choice.
//! They are queued here and fired by the session update, never by wall-clock threads.

use crate::events::{CheckpointId, DoorId};

/// An action to run once its delay has elapsed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedAction {
    /// Remove a door's obstacle
    RemoveDoor(DoorId),
    /// Return a flashing door to closed
    EndFlash(DoorId),
    /// Hide a checkpoint's feedback
    ClearFeedback(CheckpointId),
}

#[derive(Clone, Debug)]
struct Pending {
    due: f64,
    sequence: u64,
    action: TimedAction,
}

/// Session clock with a queue of scheduled actions
#[derive(Clone, Debug, Default)]
pub struct Timers {
    now: f64,
    next_sequence: u64,
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds of session time elapsed
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule an action `delay` seconds from now
    pub fn schedule(&mut self, delay: f32, action: TimedAction) {
        let due = self.now + f64::from(delay.max(0.0));
        self.pending.push(Pending {
            due,
            sequence: self.next_sequence,
            action,
        });
        self.next_sequence += 1;
    }

    /// Advance the clock and return every action that became due
    ///
    /// Actions come back ordered by due time, then by scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<TimedAction> {
        // Round away float noise so a delay of exactly N frames fires on frame N
        self.now += f64::from(dt.max(0.0));
        let now = self.now + 1e-9;

        let (mut due, pending): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = pending;

        due.sort_by(|a, b| {
            a.due
                .partial_cmp(&b.due)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.sequence.cmp(&b.sequence))
        });
        due.into_iter().map(|p| p.action).collect()
    }

    /// Number of actions still waiting
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a specific action is still waiting
    pub fn is_pending(&self, action: TimedAction) -> bool {
        self.pending.iter().any(|p| p.action == action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = Timers::new();
        timers.schedule(0.85, TimedAction::RemoveDoor(DoorId(0)));

        assert!(timers.advance(0.84).is_empty());
        assert!(timers.is_pending(TimedAction::RemoveDoor(DoorId(0))));
        assert_eq!(timers.advance(0.02), vec![TimedAction::RemoveDoor(DoorId(0))]);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_fires_once() {
        let mut timers = Timers::new();
        timers.schedule(0.1, TimedAction::EndFlash(DoorId(2)));
        assert_eq!(timers.advance(1.0).len(), 1);
        assert!(timers.advance(1.0).is_empty());
    }

    #[test]
    fn test_ordering_by_due_then_sequence() {
        let mut timers = Timers::new();
        timers.schedule(1.2, TimedAction::ClearFeedback(CheckpointId(0)));
        timers.schedule(0.85, TimedAction::RemoveDoor(DoorId(0)));
        timers.schedule(0.85, TimedAction::RemoveDoor(DoorId(1)));

        assert_eq!(
            timers.advance(2.0),
            vec![
                TimedAction::RemoveDoor(DoorId(0)),
                TimedAction::RemoveDoor(DoorId(1)),
                TimedAction::ClearFeedback(CheckpointId(0)),
            ]
        );
    }

    #[test]
    fn test_frame_count_delay_is_exact() {
        let mut timers = Timers::new();
        timers.schedule(0.85, TimedAction::RemoveDoor(DoorId(0)));

        let dt = 1.0 / 60.0;
        for _ in 0..50 {
            assert!(timers.advance(dt).is_empty());
        }
        // Frame 51 reaches 0.85
        assert_eq!(timers.advance(dt).len(), 1);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut timers = Timers::new();
        timers.advance(-5.0);
        assert_eq!(timers.now(), 0.0);
    }
}
