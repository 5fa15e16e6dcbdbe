//! Money Maze - headless runner
//!
//! Loads the configured level, then plays it with the autopilot at a fixed frame rate,
//! routing its input through the same mapper and controller a windowed front end would use.

use moneymaze::config::AppConfig;
use moneymaze::systems::{GameRunner, RunOutcome};

fn main() {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // Initialize logging; RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Money Maze");

    let level = match config.session.load_level() {
        Ok(level) => level,
        Err(e) => {
            log::error!("Failed to load level '{}': {}", config.session.level, e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded level '{}' with {} walls, {} blocks, {} checkpoints",
        level.name,
        level.walls.len(),
        level.blocks.len(),
        level.checkpoints.len()
    );

    let mut runner = match GameRunner::new(config, level) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("Failed to start session: {}", e);
            std::process::exit(1);
        }
    };

    match runner.run_autopilot() {
        RunOutcome::Completed { score, frames } => {
            log::info!("Final score: {} after {} frames", score, frames);
        }
        RunOutcome::OutOfFrames => std::process::exit(2),
    }
}
