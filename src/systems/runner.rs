//! Game runner
//!
//! Owns a session together with its input controller, simulation clock, and presenter,
//! and routes raw input through the [`InputMapper`] the way a windowed front end does.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use moneymaze_core::{GameEvent, GameSession, Level, SessionError, SessionPhase};
use moneymaze_input::MovementController;

use crate::config::AppConfig;
use crate::input::{GameAction, InputMapper};
use crate::systems::{Autopilot, EventSink, LogPresenter, ScriptedInput, SimulationSystem};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exit reached with this score
    Completed { score: i32, frames: u32 },
    /// Frame budget ran out first
    OutOfFrames,
}

/// A session plus everything needed to feed it input
pub struct GameRunner {
    config: AppConfig,
    level: Level,
    session: GameSession,
    controller: MovementController,
    simulation: SimulationSystem,
    presenter: LogPresenter,
}

impl GameRunner {
    pub fn new(config: AppConfig, level: Level) -> Result<Self, SessionError> {
        let session = GameSession::new(&level, config.to_session_config())?;
        let controller =
            MovementController::new().with_mouse_sensitivity(config.input.mouse_sensitivity);
        let simulation =
            SimulationSystem::new(config.session.fixed_timestep, config.session.max_frame_time);
        let presenter = LogPresenter::new(session.score().value(), config.score.progress_max);

        Ok(Self {
            config,
            level,
            session,
            controller,
            simulation,
            presenter,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn presenter(&self) -> &LogPresenter {
        &self.presenter
    }

    /// Route one raw input event
    pub fn handle_input(&mut self, input: ScriptedInput) {
        match input {
            ScriptedInput::Key(key, state) => self.handle_key(key, state),
            ScriptedInput::Mouse(button, state) => self.handle_mouse_button(button, state),
            ScriptedInput::MouseMotion(dx, dy) => self.controller.process_mouse_motion(dx, dy),
        }
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        let paused = self.session.phase() == SessionPhase::Paused;
        if let Some(action) = InputMapper::map_keyboard(key, state, paused) {
            self.apply(action);
        }
        // Pass to controller for movement keys
        self.controller.process_keyboard(key, state);
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if let Some(action) =
            InputMapper::map_mouse_button(button, state, self.session.is_engaged())
        {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::Engage => self.session.engage(),
            GameAction::Pause => {
                // Pausing also releases the pointer
                self.session.pause();
                self.session.disengage();
                self.controller.release_all();
            }
            GameAction::Resume => {
                self.session.resume();
            }
            GameAction::Interact => {
                self.session.interact();
            }
            GameAction::Choose(choice) => {
                self.session.choose(choice);
            }
            GameAction::Restart => self.restart(),
        }
    }

    fn restart(&mut self) {
        match GameSession::new(&self.level, self.config.to_session_config()) {
            Ok(session) => {
                log::info!("Restarting '{}'", self.level.name);
                self.presenter =
                    LogPresenter::new(session.score().value(), self.config.score.progress_max);
                self.session = session;
                self.controller.release_all();
            }
            Err(e) => log::error!("Failed to restart: {}", e),
        }
    }

    /// Advance one frame and present its events
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let frame_time = self.config.session.fixed_timestep;
        let result = self.simulation.update(&mut self.session, &mut self.controller, frame_time);
        for event in &result.events {
            self.presenter.present(event);
        }
        result.events
    }

    /// Play with the autopilot until the exit or the frame budget
    pub fn run_autopilot(&mut self) -> RunOutcome {
        let mut autopilot = Autopilot::new(
            self.config.session.auto_choice,
            self.config.input.mouse_sensitivity,
        );
        let log_interval = self.config.debug.position_log_interval;
        let mut events: Vec<GameEvent> = Vec::new();

        for frame in 0..self.config.session.max_frames {
            for input in autopilot.plan(&self.session, &events) {
                self.handle_input(input);
            }
            events = self.frame();

            if log_interval > 0 && frame % log_interval == 0 {
                log::debug!(
                    "Frame {}: position {:?}, eye {:?}",
                    frame,
                    self.session.player().position,
                    self.session.eye_position()
                );
            }

            if self.session.phase() == SessionPhase::Completed {
                log::info!(
                    "Completed '{}' in {:.1}s ({} turns)",
                    self.session.level_name(),
                    self.session.elapsed(),
                    autopilot.turns()
                );
                return RunOutcome::Completed {
                    score: self.session.score().value(),
                    frames: frame + 1,
                };
            }
        }

        log::warn!(
            "Frame budget of {} exhausted at {:?}",
            self.config.session.max_frames,
            self.session.player().position
        );
        RunOutcome::OutOfFrames
    }
}
