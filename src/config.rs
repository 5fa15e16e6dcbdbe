//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`MM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use moneymaze_core::{
    DoorTiming, Level, LevelError, ProximityConfig, ScoreRules, DEFAULT_FEEDBACK_DELAY,
};
use moneymaze_physics::{Capsule, CollisionLayer, DampingMode, MovementModel};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Player body and camera configuration
    #[serde(default)]
    pub player: PlayerConfig,
    /// Movement model configuration
    #[serde(default)]
    pub movement: MovementConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Checkpoint and exit configuration
    #[serde(default)]
    pub checkpoints: CheckpointConfig,
    /// Door timing configuration
    #[serde(default)]
    pub doors: DoorTiming,
    /// Score configuration
    #[serde(default)]
    pub score: ScoreRules,
    /// Session runner configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`MM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // MM_MOVEMENT__MODEL=direct -> movement.model = "direct"
        figment = figment.merge(Env::prefixed("MM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Build the core session configuration from every section
    pub fn to_session_config(&self) -> moneymaze_core::SessionConfig {
        moneymaze_core::SessionConfig {
            movement: self.movement.to_movement_config(&self.player),
            proximity: self.checkpoints.proximity,
            doors: self.doors,
            score: self.score,
            feedback_delay: self.checkpoints.feedback_delay,
            eye_height: self.player.eye_height,
            pitch_limit_degrees: self.player.pitch_limit,
        }
    }
}

/// Player body and camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Capsule radius (capsule model)
    pub capsule_radius: f32,
    /// Capsule height above the feet (capsule model)
    pub capsule_height: f32,
    /// Resting eye height above the player position
    pub eye_height: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            capsule_radius: 0.34,
            capsule_height: 1.45,
            eye_height: 1.25,
            pitch_limit: 89.0,
        }
    }
}

/// Movement model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking model: "capsule" or "direct"
    pub model: MovementModel,
    /// Capsule model acceleration
    pub speed: f32,
    /// Capsule model velocity damping
    pub damping: f32,
    /// "per_frame" or "time_normalized"
    pub damping_mode: DampingMode,
    /// Direct model speed (units per second)
    pub direct_speed: f32,
    /// Direct model obstacle shrink radius
    pub test_radius: f32,
    /// Whether closed doors stop the player
    pub doors_block: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            model: MovementModel::Capsule,
            speed: 4.1,
            damping: 0.82,
            damping_mode: DampingMode::PerFrame,
            direct_speed: 3.0,
            test_radius: 0.5,
            doors_block: true,
        }
    }
}

impl MovementConfig {
    /// Convert to the physics movement configuration
    pub fn to_movement_config(&self, player: &PlayerConfig) -> moneymaze_physics::MovementConfig {
        let blocking = if self.doors_block {
            CollisionLayer::SOLID
        } else {
            CollisionLayer::WALL
        };
        moneymaze_physics::MovementConfig {
            model: self.model,
            speed: self.speed,
            damping: self.damping,
            damping_mode: self.damping_mode,
            direct_speed: self.direct_speed,
            test_radius: self.test_radius,
            capsule: Capsule::new(player.capsule_radius, player.capsule_height),
            blocking,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Mouse sensitivity (radians per pixel)
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
        }
    }
}

/// Checkpoint and exit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Arm, disarm, and exit radii
    #[serde(flatten)]
    pub proximity: ProximityConfig,
    /// Seconds before choice feedback is cleared
    pub feedback_delay: f32,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            proximity: ProximityConfig::default(),
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
        }
    }
}

/// Session runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Built-in level name ("spiral", "courtyard") or path to a RON level file
    pub level: String,
    /// Fixed simulation step in seconds
    pub fixed_timestep: f32,
    /// Longest frame the clock will simulate at once
    pub max_frame_time: f32,
    /// Frames to run before giving up
    pub max_frames: u32,
    /// Answer for automatic decisions: "good" or "bad"
    pub auto_choice: moneymaze_core::Choice,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: "spiral".to_string(),
            fixed_timestep: 1.0 / 60.0,
            max_frame_time: 0.25,
            max_frames: 6000,
            auto_choice: moneymaze_core::Choice::Good,
        }
    }
}

impl SessionConfig {
    /// Resolve the configured level, preferring built-in names over files
    pub fn load_level(&self) -> Result<Level, LevelError> {
        match Level::builtin(&self.level) {
            Some(level) => Ok(level),
            None => Level::load(&self.level),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the player position every this many frames (0 = never)
    pub position_log_interval: u32,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            position_log_interval: 0,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use moneymaze_core::ScorePolicy;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.movement.model, MovementModel::Capsule);
        assert_eq!(config.score.initial, 750);
        assert_eq!(config.session.level, "spiral");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("damping_mode = \"per_frame\""));
        assert!(toml.contains("policy = \"clamped_at_zero\""));
        assert!(toml.contains("[doors]"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [movement]
            model = "direct"

            [score]
            policy = "unclamped"
            "#,
        )
        .unwrap();
        assert_eq!(config.movement.model, MovementModel::Direct);
        assert_eq!(config.movement.direct_speed, 3.0);
        assert_eq!(config.score.policy, ScorePolicy::Unclamped);
        assert_eq!(config.score.bad_delta, -200);
    }

    #[test]
    fn test_sections_are_core_types() {
        let config: AppConfig = toml::from_str(
            r#"
            [checkpoints]
            arm_radius = 2.0
            feedback_delay = 0.5

            [doors]
            flash_duration = 1.0
            "#,
        )
        .unwrap();
        let session = config.to_session_config();
        assert_eq!(session.proximity.arm_radius, 2.0);
        assert_eq!(session.proximity.disarm_radius, ProximityConfig::default().disarm_radius);
        assert_eq!(session.feedback_delay, 0.5);
        assert_eq!(session.doors.flash_duration, 1.0);
        assert_eq!(session.doors.open_delay, DoorTiming::default().open_delay);
        assert_eq!(session.score, ScoreRules::default());
    }

    #[test]
    fn test_session_config_conversion() {
        let mut config = AppConfig::default();
        config.player.capsule_radius = 0.4;
        config.movement.doors_block = false;
        config.doors.open_delay = 0.5;

        let session = config.to_session_config();
        assert_eq!(session.movement.capsule.radius, 0.4);
        assert_eq!(session.movement.blocking, CollisionLayer::WALL);
        assert_eq!(session.doors.open_delay, 0.5);
        assert_eq!(session.feedback_delay, DEFAULT_FEEDBACK_DELAY);
        assert_eq!(session.proximity.arm_radius, 1.25);
    }

    #[test]
    fn test_load_builtin_level() {
        let session = SessionConfig::default();
        assert_eq!(session.load_level().unwrap().name, "Spiral");
    }

    #[test]
    fn test_load_missing_level_file() {
        let session = SessionConfig {
            level: "levels/missing.ron".to_string(),
            ..SessionConfig::default()
        };
        assert!(matches!(session.load_level(), Err(LevelError::Io(_))));
    }
}
