//! Scripted player for headless runs
//!
//! The autopilot produces the same raw input a person would: a click to engage, held
//! movement keys, key presses at checkpoints, and mouse motion to turn. It walks forward,
//! answers every checkpoint it arms, and turns right whenever it has been stuck against a
//! wall for a while.

use moneymaze_core::{CheckpointState, Choice, DoorState, GameEvent, GameSession, SessionPhase};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// One raw input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedInput {
    Key(KeyCode, ElementState),
    Mouse(MouseButton, ElementState),
    MouseMotion(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Not engaged yet
    Start,
    /// Holding forward
    Walking,
    /// Released forward to let velocity die down before turning
    Settling { frames_left: u32 },
}

/// Frames of continuous blocking before the autopilot turns
const STALL_FRAMES: u32 = 30;

/// Frames to wait with no input before turning
const SETTLE_FRAMES: u32 = 60;

/// Reacts to session state with raw input
pub struct Autopilot {
    stage: Stage,
    choice: Choice,
    mouse_sensitivity: f32,
    stalled_frames: u32,
    turns: u32,
}

impl Autopilot {
    pub fn new(choice: Choice, mouse_sensitivity: f32) -> Self {
        Self {
            stage: Stage::Start,
            choice,
            mouse_sensitivity,
            stalled_frames: 0,
            turns: 0,
        }
    }

    /// Number of quarter turns taken so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Decide the input for the next frame
    ///
    /// `events` are the events raised by the previous frame.
    pub fn plan(&mut self, session: &GameSession, events: &[GameEvent]) -> Vec<ScriptedInput> {
        let mut inputs = Vec::new();
        if session.phase() != SessionPhase::Running {
            return inputs;
        }

        if self.stage == Stage::Start || !session.is_engaged() {
            inputs.push(ScriptedInput::Mouse(MouseButton::Left, ElementState::Pressed));
            inputs.push(ScriptedInput::Mouse(MouseButton::Left, ElementState::Released));
            inputs.push(ScriptedInput::Key(KeyCode::KeyW, ElementState::Pressed));
            self.stage = Stage::Walking;
            return inputs;
        }

        for event in events {
            match event {
                GameEvent::CheckpointArmed { .. } => tap(&mut inputs, KeyCode::KeyE),
                GameEvent::DecisionRequested { .. } => {
                    let key = match self.choice {
                        Choice::Good => KeyCode::Digit1,
                        Choice::Bad => KeyCode::Digit2,
                    };
                    tap(&mut inputs, key);
                }
                _ => {}
            }
        }

        match self.stage {
            Stage::Start => {}
            Stage::Walking => {
                if self.waiting_on_gameplay(session) || !session.last_step().blocked {
                    self.stalled_frames = 0;
                } else {
                    self.stalled_frames += 1;
                }
                if self.stalled_frames >= STALL_FRAMES {
                    log::debug!("Stuck at {:?}, turning", session.player().position);
                    inputs.push(ScriptedInput::Key(KeyCode::KeyW, ElementState::Released));
                    self.stage = Stage::Settling {
                        frames_left: SETTLE_FRAMES,
                    };
                    self.stalled_frames = 0;
                }
            }
            Stage::Settling { frames_left } => {
                if frames_left > 0 {
                    self.stage = Stage::Settling {
                        frames_left: frames_left - 1,
                    };
                } else {
                    let quarter_turn = std::f64::consts::FRAC_PI_2 / f64::from(self.mouse_sensitivity);
                    inputs.push(ScriptedInput::MouseMotion(quarter_turn, 0.0));
                    inputs.push(ScriptedInput::Key(KeyCode::KeyW, ElementState::Pressed));
                    self.turns += 1;
                    self.stage = Stage::Walking;
                }
            }
        }

        inputs
    }

    /// A checkpoint or door is about to change, so being blocked is expected
    fn waiting_on_gameplay(&self, session: &GameSession) -> bool {
        let armed = session.current_checkpoint().map_or(false, |id| {
            session
                .checkpoint(id)
                .map(|cp| matches!(cp.state(), CheckpointState::Armed | CheckpointState::Choosing))
                .unwrap_or(false)
        });
        let opening = session
            .doors()
            .iter()
            .any(|door| matches!(door.state(), DoorState::Opening { .. }));
        armed || opening
    }
}

fn tap(inputs: &mut Vec<ScriptedInput>, key: KeyCode) {
    inputs.push(ScriptedInput::Key(key, ElementState::Pressed));
    inputs.push(ScriptedInput::Key(key, ElementState::Released));
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneymaze_core::{CheckpointId, Level, SessionConfig};
    use moneymaze_input::MovementController;

    fn session() -> GameSession {
        GameSession::new(&Level::spiral(), SessionConfig::default()).unwrap()
    }

    #[test]
    fn test_first_frame_engages_and_walks() {
        let mut pilot = Autopilot::new(Choice::Good, 0.002);
        let inputs = pilot.plan(&session(), &[]);
        assert_eq!(
            inputs,
            vec![
                ScriptedInput::Mouse(MouseButton::Left, ElementState::Pressed),
                ScriptedInput::Mouse(MouseButton::Left, ElementState::Released),
                ScriptedInput::Key(KeyCode::KeyW, ElementState::Pressed),
            ]
        );
    }

    #[test]
    fn test_answers_decisions() {
        let mut session = session();
        session.engage();
        let mut pilot = Autopilot::new(Choice::Bad, 0.002);
        pilot.plan(&session, &[]);

        let events = [GameEvent::DecisionRequested {
            checkpoint: session_checkpoint(&mut session),
            question: "?".to_string(),
        }];
        let inputs = pilot.plan(&session, &events);
        assert!(inputs.contains(&ScriptedInput::Key(KeyCode::Digit2, ElementState::Pressed)));
    }

    /// Arm the first spiral checkpoint to get a valid id
    fn session_checkpoint(session: &mut GameSession) -> CheckpointId {
        let spot = session.checkpoints()[0].position();
        session.teleport(spot);
        session.update(1.0 / 60.0, &mut MovementController::new());
        session.current_checkpoint().expect("checkpoint arms at its own position")
    }

    #[test]
    fn test_idle_when_paused() {
        let mut session = session();
        session.pause();
        let mut pilot = Autopilot::new(Choice::Good, 0.002);
        assert!(pilot.plan(&session, &[]).is_empty());
    }
}
