//! Presentation of session events
//!
//! The session reports state changes as plain [`GameEvent`]s. A presenter turns them into
//! whatever the front end shows; [`LogPresenter`] keeps a text HUD and writes it to the log.

use moneymaze_core::{Choice, GameEvent};

/// Receives session events in the order they were raised
pub trait EventSink {
    fn present(&mut self, event: &GameEvent);
}

/// What a heads-up display would currently show
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudState {
    pub score: i32,
    /// Score bar fill in percent
    pub score_bar: f32,
    /// Interaction prompt near an armed checkpoint
    pub prompt: Option<String>,
    /// Open decision question
    pub decision: Option<String>,
    /// Feedback after a choice
    pub feedback: Option<String>,
    pub paused: bool,
    /// Results screen text once the exit is reached
    pub results: Option<String>,
}

/// Presenter that keeps a [`HudState`] and logs every change
pub struct LogPresenter {
    hud: HudState,
    progress_max: i32,
}

impl LogPresenter {
    pub fn new(initial_score: i32, progress_max: i32) -> Self {
        let mut presenter = Self {
            hud: HudState::default(),
            progress_max,
        };
        presenter.set_score(initial_score);
        presenter
    }

    pub fn hud(&self) -> &HudState {
        &self.hud
    }

    fn set_score(&mut self, score: i32) {
        self.hud.score = score;
        self.hud.score_bar = if self.progress_max > 0 {
            (score as f32 / self.progress_max as f32 * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };
    }
}

impl EventSink for LogPresenter {
    fn present(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PointerEngaged => log::info!("Pointer engaged - Escape to pause"),
            GameEvent::PointerReleased => log::info!("Pointer released - click to engage"),
            GameEvent::Paused => {
                self.hud.paused = true;
                log::info!("Paused");
            }
            GameEvent::Resumed => {
                self.hud.paused = false;
                log::info!("Resumed");
            }
            GameEvent::CheckpointArmed { question, .. } => {
                let prompt = format!("Press E: {}", question);
                log::info!("{}", prompt);
                self.hud.prompt = Some(prompt);
            }
            GameEvent::CheckpointDisarmed { .. } => {
                self.hud.prompt = None;
            }
            GameEvent::DecisionRequested { question, .. } => {
                log::info!("Decision: {} [1] good / [2] bad", question);
                self.hud.prompt = None;
                self.hud.decision = Some(question.clone());
            }
            GameEvent::ChoiceMade { choice, .. } => {
                let text = match choice {
                    Choice::Good => "✓ Good choice!",
                    Choice::Bad => "✗ Not optimal",
                };
                log::info!("{}", text);
                self.hud.prompt = None;
                self.hud.feedback = Some(text.to_string());
            }
            GameEvent::ScoreChanged { delta, score } => {
                self.set_score(*score);
                log::info!("Score {:+} -> {} ({:.0}%)", delta, score, self.hud.score_bar);
            }
            GameEvent::DoorOpening { door } => log::debug!("Door {} sliding open", door.index()),
            GameEvent::DoorRemoved { door } => log::debug!("Door {} open", door.index()),
            GameEvent::DoorBlocked { door } => log::debug!("Door {} flashing", door.index()),
            GameEvent::DoorFlashEnded { door } => log::debug!("Door {} closed", door.index()),
            GameEvent::FeedbackCleared { .. } => {
                self.hud.feedback = None;
                self.hud.decision = None;
            }
            GameEvent::ExitReached { score } => {
                let results = format!("Final Score: {}", score);
                log::info!("{}", results);
                self.hud.results = Some(results);
            }
        }
    }
}
