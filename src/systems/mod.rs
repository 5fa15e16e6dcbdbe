//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod autopilot;
mod presenter;
mod runner;
mod simulation;

pub use autopilot::{Autopilot, ScriptedInput};
pub use presenter::{EventSink, HudState, LogPresenter};
pub use runner::{GameRunner, RunOutcome};
pub use simulation::{SimulationResult, SimulationSystem};
