//! Game settings
//!
//! All constants are fixed once the session is constructed. Settings can be
//! loaded from a JSON file; missing fields fall back to the defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Obstacle;

/// What happens to the score when the snake dies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// Death starts a fresh run at zero
    #[default]
    ResetOnDeath,
    /// Score carries over into the next run
    Preserve,
}

impl ScorePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScorePolicy::ResetOnDeath => "reset_on_death",
            ScorePolicy::Preserve => "preserve",
        }
    }
}

/// Errors raised while loading or validating settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Fixed obstacle rectangles
    pub obstacles: Vec<Obstacle>,

    // === Snake ===
    /// Diameter of a body segment
    pub segment_size: f32,
    /// Degrees per tick
    pub max_turn_rate: f32,
    /// Units per tick
    pub speed: f32,
    /// Trail entries between body segments; capacity growth per apple
    pub spacing: usize,

    // === Input ===
    /// Snake rotations per dial rotation
    pub sensitivity: f32,

    // === Collisions ===
    /// Head radius shrink for obstacle and self hits
    pub clearance: f32,
    /// Trail entries nearest the head that never count as self hits
    pub self_collision_buffer: usize,
    pub score_policy: ScorePolicy,

    // === Loop ===
    pub tick_rate: u32,
    /// Seed for apple placement
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            obstacles: default_obstacles(),

            segment_size: SEGMENT_SIZE,
            max_turn_rate: MAX_TURN_RATE,
            speed: SNAKE_SPEED,
            spacing: SPACING,

            sensitivity: SENSITIVITY,

            clearance: COLLISION_CLEARANCE,
            self_collision_buffer: SPACING,
            score_policy: ScorePolicy::ResetOnDeath,

            tick_rate: TICK_RATE,
            seed: 0x5eed,
        }
    }
}

/// The stock obstacle layout
fn default_obstacles() -> Vec<Obstacle> {
    [
        (300.0, 300.0),
        (600.0, 400.0),
        (800.0, 200.0),
        (200.0, 100.0),
        (400.0, 500.0),
        (700.0, 600.0),
        (500.0, 250.0),
        (100.0, 650.0),
        (900.0, 350.0),
        (850.0, 500.0),
    ]
    .into_iter()
    .map(|(x, y)| Obstacle::new(x, y, 30.0, 30.0))
    .collect()
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Radius of a segment's collision circle
    #[inline]
    pub fn segment_radius(&self) -> f32 {
        self.segment_size / 2.0
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: &str| Err(SettingsError::Invalid(msg.to_string()));

        if !(self.segment_size.is_finite() && self.segment_size > 0.0) {
            return invalid("segment_size must be positive");
        }
        if !(self.arena_width > self.segment_size && self.arena_height > self.segment_size) {
            return invalid("arena must be larger than one segment");
        }
        if self.spacing == 0 {
            return invalid("spacing must be at least 1");
        }
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return invalid("sensitivity must be positive");
        }
        if !(self.max_turn_rate.is_finite() && self.max_turn_rate >= 0.0) {
            return invalid("max_turn_rate must be non-negative");
        }
        if !self.speed.is_finite() {
            return invalid("speed must be finite");
        }
        if !(0.0..=self.segment_radius()).contains(&self.clearance) {
            return invalid("clearance must lie between 0 and the segment radius");
        }
        if self.tick_rate == 0 {
            return invalid("tick_rate must be at least 1");
        }
        if let Some(o) = self.obstacles.iter().find(|o| !o.is_valid()) {
            return Err(SettingsError::Invalid(format!("bad obstacle {o:?}")));
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
        assert_eq!(settings.obstacles.len(), 10);
        assert_eq!(settings.segment_radius(), 15.0);
        assert_eq!(settings.self_collision_buffer, settings.spacing);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "speed": 4.5, "score_policy": "preserve" }"#).unwrap();
        assert_eq!(settings.speed, 4.5);
        assert_eq!(settings.score_policy, ScorePolicy::Preserve);
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert_eq!(settings.obstacles.len(), 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings = Settings {
            spacing: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let settings = Settings {
            clearance: 20.0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            obstacles: vec![Obstacle::new(0.0, 0.0, -1.0, 5.0)],
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
