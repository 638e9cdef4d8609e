//! Game settings and tunables
//!
//! The playfield comes from the host display; everything else has a sensible
//! default. Settings load from JSON so a host (or the headless runner) can
//! override them without recompiling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Problems loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("playfield {width}x{height} is too small for the player paddle")]
    PlayfieldTooSmall { width: f32, height: f32 },
    #[error("tilt sensitivity must be positive and finite, got {0}")]
    InvalidSensitivity(f32),
    #[error("fire cooldown must be non-negative and finite, got {0}")]
    InvalidCooldown(f32),
    #[error("starting lives must be at least 1")]
    NoLives,
}

/// Device-independent playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    /// A typical phone portrait viewport
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

impl Playfield {
    /// Top edge of the player paddle (the defense line)
    #[inline]
    pub fn player_top(&self) -> f32 {
        self.height - PLAYER_BOTTOM_PADDING - PLAYER_H
    }

    /// Largest valid player offset
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        (self.width - PLAYER_W).max(0.0)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: Playfield,
    /// Lives at session start and after restart
    pub starting_lives: u32,
    /// Player pixels moved per unit of tilt signal per sample
    pub tilt_sensitivity: f32,
    /// Minimum seconds between accepted fire commands
    pub fire_cooldown: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            starting_lives: DEFAULT_STARTING_LIVES,
            tilt_sensitivity: DEFAULT_TILT_SENSITIVITY,
            fire_cooldown: DEFAULT_FIRE_COOLDOWN,
        }
    }
}

impl Settings {
    /// Default settings for a specific playfield
    pub fn with_playfield(width: f32, height: f32) -> Self {
        Self {
            playfield: Playfield { width, height },
            ..Self::default()
        }
    }

    /// Check that the settings describe a playable game
    pub fn validate(&self) -> Result<(), SettingsError> {
        let Playfield { width, height } = self.playfield;
        let min_height = PLAYER_H + PLAYER_BOTTOM_PADDING;
        if !(width.is_finite() && height.is_finite()) || width < PLAYER_W || height < min_height {
            return Err(SettingsError::PlayfieldTooSmall { width, height });
        }
        if !self.tilt_sensitivity.is_finite() || self.tilt_sensitivity <= 0.0 {
            return Err(SettingsError::InvalidSensitivity(self.tilt_sensitivity));
        }
        if !self.fire_cooldown.is_finite() || self.fire_cooldown < 0.0 {
            return Err(SettingsError::InvalidCooldown(self.fire_cooldown));
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::NoLives);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.starting_lives, 3);
        assert_eq!(settings.fire_cooldown, 0.05);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            starting_lives: 7,
            ..Settings::with_playfield(400.0, 800.0)
        };
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "starting_lives": 10 }"#).unwrap();
        assert_eq!(settings.starting_lives, 10);
        assert_eq!(settings.playfield, Playfield::default());
        assert_eq!(settings.tilt_sensitivity, DEFAULT_TILT_SENSITIVITY);
    }

    #[test]
    fn test_rejects_tiny_playfield() {
        let err = Settings::from_json(r#"{ "playfield": { "width": 30.0, "height": 600.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::PlayfieldTooSmall { .. }));
    }

    #[test]
    fn test_rejects_bad_values() {
        let settings = Settings {
            tilt_sensitivity: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidSensitivity(_))
        ));

        let settings = Settings {
            fire_cooldown: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidCooldown(_))
        ));

        let settings = Settings {
            starting_lives: 0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SettingsError::NoLives)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_player_line() {
        let field = Playfield {
            width: 400.0,
            height: 800.0,
        };
        assert_eq!(field.player_top(), 730.0);
        assert_eq!(field.player_max_x(), 350.0);
    }
}
