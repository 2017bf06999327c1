//! Game tuning constants
//!
//! Physics and presentation constants only. Every field defaults to the
//! built-in value in [`crate::consts`], so a JSON file only needs the keys it
//! wants to change. The difficulty ramp (spawn intervals, speed increase) is
//! fixed and read straight from `consts`; unknown keys are rejected.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot integrate
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {}", e),
            TuningError::Parse(e) => write!(f, "failed to parse tuning file: {}", e),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // === Ground ===
    pub ground_width: f32,
    pub ground_speed: f32,

    // === Obstacles ===
    pub cactus_speed: f32,

    // === Runner ===
    pub jump_speed: f32,
    pub gravity: f32,
    pub frame_time: f32,

    // === Scoring / presentation ===
    pub score_rate: f32,
    pub lose_cooldown_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground_width: GROUND_WIDTH,
            ground_speed: GROUND_SPEED,

            cactus_speed: CACTUS_SPEED,

            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
            frame_time: FRAME_TIME,

            score_rate: SCORE_RATE,
            lose_cooldown_ms: LOSE_COOLDOWN_MS,
        }
    }
}

impl Tuning {
    /// Parse a JSON document, filling missing keys from the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the motion integration has no defined behavior for
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("ground_width", self.ground_width),
            ("ground_speed", self.ground_speed),
            ("cactus_speed", self.cactus_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("frame_time", self.frame_time),
            ("score_rate", self.score_rate),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite and positive",
                });
            }
        }

        if !self.lose_cooldown_ms.is_finite() || self.lose_cooldown_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "lose_cooldown_ms",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.002 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.002);
        assert_eq!(tuning.jump_speed, JUMP_SPEED);
        assert_eq!(tuning.ground_speed, GROUND_SPEED);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning {
            score_rate: 0.02,
            ..Default::default()
        };
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_zero_frame_time_rejected() {
        let err = Tuning::from_json(r#"{ "frame_time": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "frame_time",
                ..
            }
        ));
    }

    #[test]
    fn test_difficulty_keys_not_configurable() {
        for json in [
            r#"{ "cactus_interval_min": 100 }"#,
            r#"{ "cactus_interval_max": 100 }"#,
            r#"{ "speed_scale_increase": 0.1 }"#,
        ] {
            assert!(
                matches!(Tuning::from_json(json), Err(TuningError::Parse(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_negative_gravity_rejected() {
        let tuning = Tuning {
            gravity: -1.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ gravity"),
            Err(TuningError::Parse(_))
        ));
    }
}
