//! Match rules and tuning
//!
//! Loaded from JSON by the host and handed to the simulation constructor.
//! Missing fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SettingsError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Rule parameters for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    pub grid_width: i32,
    pub grid_height: i32,

    // === Snake ===
    pub starting_lives: u8,
    pub max_lives: u8,
    /// Cells per second at length 1
    pub snake_base_speed: f32,
    pub snake_max_speed: f32,
    /// Speed added for every full tier of segments
    pub snake_speed_step: f32,
    pub segments_per_speed_step: usize,

    // === Hawk ===
    pub hawk_max_health: u32,
    pub fireball_speed: f32,
    pub normal_apple_damage: u32,
    pub golden_apple_damage: u32,
    pub poison_apple_heal: u32,
    pub fireball_heal_per_segment: u32,
    /// Whole seconds a golden/poison apple stays on the grid
    pub timed_apple_lifetime: u32,
    pub max_spawn_attempts: u32,

    // === Schedule ===
    pub day_length: u32,
    pub fireball_window_start: u32,
    pub fireball_window_period: u32,
    pub day_fireball_window: u32,
    pub night_fireball_window: u32,
    pub poison_window_start: u32,
    pub poison_window_period: u32,
    pub poison_window: u32,
    pub golden_start: u32,
    pub golden_period: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,

            starting_lives: STARTING_LIVES,
            max_lives: MAX_LIVES,
            snake_base_speed: SNAKE_BASE_SPEED,
            snake_max_speed: SNAKE_MAX_SPEED,
            snake_speed_step: SNAKE_SPEED_STEP,
            segments_per_speed_step: SEGMENTS_PER_SPEED_STEP,

            hawk_max_health: HAWK_MAX_HEALTH,
            fireball_speed: FIREBALL_SPEED,
            normal_apple_damage: NORMAL_APPLE_DAMAGE,
            golden_apple_damage: GOLDEN_APPLE_DAMAGE,
            poison_apple_heal: POISON_APPLE_HEAL,
            fireball_heal_per_segment: FIREBALL_HEAL_PER_SEGMENT,
            timed_apple_lifetime: TIMED_APPLE_LIFETIME,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,

            day_length: DAY_LENGTH,
            fireball_window_start: FIREBALL_WINDOW_START,
            fireball_window_period: FIREBALL_WINDOW_PERIOD,
            day_fireball_window: DAY_FIREBALL_WINDOW,
            night_fireball_window: NIGHT_FIREBALL_WINDOW,
            poison_window_start: POISON_WINDOW_START,
            poison_window_period: POISON_WINDOW_PERIOD,
            poison_window: POISON_WINDOW,
            golden_start: GOLDEN_START,
            golden_period: GOLDEN_PERIOD,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document (missing keys use defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every parameter the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.grid_width <= 0 {
            return Err(SettingsError::invalid("grid_width", "must be positive"));
        }
        if self.grid_height <= 0 {
            return Err(SettingsError::invalid("grid_height", "must be positive"));
        }
        if self.max_lives == 0 {
            return Err(SettingsError::invalid("max_lives", "must be at least 1"));
        }
        if self.starting_lives == 0 || self.starting_lives > self.max_lives {
            return Err(SettingsError::invalid(
                "starting_lives",
                format!("must be in 1..={}", self.max_lives),
            ));
        }
        if !(self.snake_base_speed > 0.0) {
            return Err(SettingsError::invalid("snake_base_speed", "must be positive"));
        }
        if !(self.snake_max_speed >= self.snake_base_speed) {
            return Err(SettingsError::invalid(
                "snake_max_speed",
                "must not be below snake_base_speed",
            ));
        }
        if !(self.snake_speed_step >= 0.0) {
            return Err(SettingsError::invalid("snake_speed_step", "must not be negative"));
        }
        if self.segments_per_speed_step == 0 {
            return Err(SettingsError::invalid("segments_per_speed_step", "must be at least 1"));
        }
        if self.hawk_max_health == 0 {
            return Err(SettingsError::invalid("hawk_max_health", "must be positive"));
        }
        if !(self.fireball_speed > 0.0) {
            return Err(SettingsError::invalid("fireball_speed", "must be positive"));
        }
        if self.timed_apple_lifetime == 0 {
            return Err(SettingsError::invalid("timed_apple_lifetime", "must be positive"));
        }

        let periods = [
            ("day_length", self.day_length),
            ("fireball_window_period", self.fireball_window_period),
            ("poison_window_period", self.poison_window_period),
            ("golden_period", self.golden_period),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(SettingsError::invalid(field, "must be positive"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid_width, 18);
        assert_eq!(settings.hawk_max_health, 3000);
        assert_eq!(settings.day_length, 60);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "grid_width": 24, "day_length": 30 }"#).unwrap();
        assert_eq!(settings.grid_width, 24);
        assert_eq!(settings.grid_height, GRID_HEIGHT);
        assert_eq!(settings.day_length, 30);
        assert_eq!(settings.golden_apple_damage, GOLDEN_APPLE_DAMAGE);
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.poison_apple_heal = 35;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Settings::from_json(r#"{ "grid_width": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "grid_width", .. }));

        let err = Settings::from_json(r#"{ "starting_lives": 4 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "starting_lives", .. }));

        let err = Settings::from_json(r#"{ "snake_max_speed": 1.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "snake_max_speed", .. }));

        let err = Settings::from_json(r#"{ "golden_period": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "golden_period", .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Settings::from_json("{ grid_width: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here/snake_soul.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
