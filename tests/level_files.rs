//! Integration tests for shipped level files
//!
//! Each level under `levels/` must load, validate, and be completable by the autopilot.

use moneymaze::config::AppConfig;
use moneymaze::systems::{GameRunner, RunOutcome};
use moneymaze_core::Level;

#[test]
fn test_vault_loads() {
    let level = Level::load("levels/vault.ron").unwrap();
    assert_eq!(level.name, "vault");
    assert_eq!(level.walls.len(), 4);
    assert_eq!(level.checkpoints.len(), 2);
    assert!(level.exit_gate().is_some());
}

#[test]
fn test_vault_through_config() {
    let mut config = AppConfig::default();
    config.session.level = "levels/vault.ron".to_string();
    let level = config.session.load_level().unwrap();
    assert_eq!(level.name, "vault");
}

#[test]
fn test_autopilot_clears_vault() {
    let level = Level::load("levels/vault.ron").unwrap();
    let mut runner = GameRunner::new(AppConfig::default(), level).unwrap();

    match runner.run_autopilot() {
        RunOutcome::Completed { score, .. } => {
            assert_eq!(score, 1750);
            assert_eq!(runner.presenter().hud().results.as_deref(), Some("Final Score: 1750"));
        }
        RunOutcome::OutOfFrames => panic!(
            "autopilot stuck at {:?}",
            runner.session().player().position
        ),
    }
}
