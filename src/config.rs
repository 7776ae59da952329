use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// Body dimensions (metres)
pub const PLAYER_WIDTH: f32 = 0.6;
pub const STEP_OVER_HEIGHT: f32 = 0.3; // can step over obstacles this tall
pub const GROUND_SNAP_MARGIN: f32 = 0.05; // extra distance for ground detection tolerance
pub const PATH_HIT_MARGIN: f32 = 0.05;

// Fixed movement constants
pub const STICK_VELOCITY: f32 = -2.0;
pub const DASH_END_SPEED_FRACTION: f32 = 0.2;
pub const MOVE_DEADZONE: f32 = 0.1;
pub const PITCH_LIMIT: f32 = 90.0;

// Session
pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the local player. Every field has a default, so a JSON file
/// only needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    // Movement
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,

    // Vertical
    pub jump_height: f32,
    /// Negative; units per second squared.
    pub gravity: f32,
    pub max_jumps: u32,
    /// Vertical velocity written by a crouch-slam. Negative.
    pub slam_velocity: f32,

    // Look
    pub sensitivity: f32,

    // Dash
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,

    // Tilt (degrees, per second)
    pub tilt_amount: f32,
    pub tilt_speed: f32,

    // Head-bob
    pub walk_bob_amount: f32,
    pub sprint_bob_amount: f32,
    pub crouch_bob_amount: f32,
    pub bob_frequency: f32,

    // Landing bounce
    pub landing_dip: f32,
    pub landing_recovery: f32,

    // Field of view (degrees)
    pub base_fov: f32,
    pub dash_fov: f32,
    pub fov_ease_speed: f32,

    // Stance
    pub standing_height: f32,
    pub crouch_height: f32,
    pub standing_eye_height: f32,
    pub crouch_eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            sprint_speed: 10.0,
            crouch_speed: 3.0,

            jump_height: 1.5,
            gravity: -9.81,
            max_jumps: 2,
            slam_velocity: -20.0,

            sensitivity: 0.1,

            dash_speed: 25.0,
            dash_duration: 0.25,
            dash_cooldown: 1.0,

            tilt_amount: 3.0,
            tilt_speed: 10.0,

            walk_bob_amount: 0.05,
            sprint_bob_amount: 0.1,
            crouch_bob_amount: 0.02,
            bob_frequency: 10.0,

            landing_dip: 0.12,
            landing_recovery: 0.25,

            base_fov: 60.0,
            dash_fov: 75.0,
            fov_ease_speed: 8.0,

            standing_height: 2.0,
            crouch_height: 1.0,
            standing_eye_height: 1.6,
            crouch_eye_height: 0.8,
        }
    }
}

impl PlayerConfig {
    /// Rejects values that would make the jump impulse or dash interpolation
    /// meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jump_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "jump_height must be positive, got {}",
                self.jump_height
            )));
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity must be negative, got {}",
                self.gravity
            )));
        }
        if self.max_jumps == 0 {
            return Err(ConfigError::Invalid("max_jumps must be at least 1".into()));
        }
        if self.dash_duration <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "dash_duration must be positive, got {}",
                self.dash_duration
            )));
        }
        if self.slam_velocity >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "slam_velocity must be negative, got {}",
                self.slam_velocity
            )));
        }
        if self.crouch_eye_height > self.standing_eye_height {
            return Err(ConfigError::Invalid(format!(
                "crouch_eye_height {} exceeds standing_eye_height {}",
                self.crouch_eye_height, self.standing_eye_height
            )));
        }
        if self.crouch_height > self.standing_height {
            return Err(ConfigError::Invalid(format!(
                "crouch_height {} exceeds standing_height {}",
                self.crouch_height, self.standing_height
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PursuerConfig {
    pub chase_speed: f32,
    pub stop_distance: f32,
}

impl Default for PursuerConfig {
    fn default() -> Self {
        Self {
            chase_speed: 8.0,
            stop_distance: 1.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScareConfig {
    pub scare_distance: f32,
    pub fade_duration: f32,
}

impl Default for ScareConfig {
    fn default() -> Self {
        Self {
            scare_distance: 2.5,
            fade_duration: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlickerConfig {
    pub min_intensity: f32,
    pub max_intensity: f32,
    pub max_interval: f32,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            min_intensity: 0.5,
            max_intensity: 1.5,
            max_interval: 0.05,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub pursuer: PursuerConfig,
    pub scare: ScareConfig,
    pub flicker: FlickerConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.player.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PlayerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = GameConfig::from_json_str(
            r#"{ "player": { "walk_speed": 5.0, "gravity": -15.0 }, "scare": { "fade_duration": 1.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.player.walk_speed, 5.0);
        assert_eq!(config.player.gravity, -15.0);
        assert_eq!(config.player.sprint_speed, 10.0);
        assert_eq!(config.scare.fade_duration, 1.0);
        assert_eq!(config.scare.scare_distance, 2.5);
    }

    #[test]
    fn test_positive_gravity_rejected() {
        let err = GameConfig::from_json_str(r#"{ "player": { "gravity": 9.81 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_jumps_rejected() {
        let config = PlayerConfig {
            max_jumps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upward_slam_rejected() {
        let err = GameConfig::from_json_str(r#"{ "player": { "slam_velocity": 20.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_crouch_eye_above_standing_eye_rejected() {
        let config = PlayerConfig {
            crouch_eye_height: 1.8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
