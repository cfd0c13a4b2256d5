//! Simulation settings
//!
//! Every tolerance the simulation relies on is a named, overridable value.
//! Loaded from a JSON file; missing fields fall back to the defaults in `consts`.

use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// How the simplify pass decides two universes are the same branch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergePolicy {
    /// Also require positions and velocities to agree
    pub compare_continuous: bool,
    pub position_tolerance: f64,
    pub velocity_tolerance: f64,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            compare_continuous: false,
            position_tolerance: MERGE_TOLERANCE,
            velocity_tolerance: MERGE_TOLERANCE,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Objects tracked by every universe
    pub object_count: usize,
    /// Universes with |amplitude|² at or below this are pruned
    pub prune_threshold: f64,
    /// Pointer hover/grab radius (world units)
    pub interaction_radius: f64,
    /// Branch equivalence rules
    pub merge: MergePolicy,

    // === Frame clock ===
    pub min_frame_time: f64,
    pub max_frame_time: f64,

    /// Visible world extent, lower-left at the origin
    pub world_size: DVec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            object_count: DEFAULT_OBJECT_COUNT,
            prune_threshold: PRUNE_THRESHOLD,
            interaction_radius: INTERACTION_RADIUS,
            merge: MergePolicy::default(),

            min_frame_time: MIN_FRAME_TIME,
            max_frame_time: MAX_FRAME_TIME,

            world_size: DVec2::new(WORLD_WIDTH, WORLD_HEIGHT),
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (min, max) = (self.min_frame_time, self.max_frame_time);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(SettingsError::Invalid(format!(
                "frame time bounds [{min}, {max}] must be finite, positive and ordered"
            )));
        }
        if !(self.prune_threshold.is_finite() && self.prune_threshold >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "prune_threshold {} must be finite and non-negative",
                self.prune_threshold
            )));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Read settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        match Self::try_load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Clamp a raw frame delta to the configured bounds
    pub fn clamp_dt(&self, raw: f64) -> f64 {
        crate::clamp_dt(raw, self.min_frame_time, self.max_frame_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.object_count, 2);
        assert_eq!(s.prune_threshold, 1e-6);
        assert_eq!(s.interaction_radius, 0.5);
        assert!(!s.merge.compare_continuous);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "object_count": 3, "merge": { "compare_continuous": true } }"#;
        let s = Settings::from_json(json).unwrap();
        assert_eq!(s.object_count, 3);
        assert!(s.merge.compare_continuous);
        assert_eq!(s.merge.position_tolerance, MERGE_TOLERANCE);
        assert_eq!(s.prune_threshold, PRUNE_THRESHOLD);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let s = Settings::load("/definitely/not/here/settings.json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_inverted_frame_bounds_rejected() {
        let json = r#"{ "min_frame_time": 0.2, "max_frame_time": 0.1 }"#;
        assert!(matches!(
            Settings::from_json(json),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "min_frame_time": 0.0 }"#),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let path = std::env::temp_dir().join("superposition_inverted_bounds.json");
        std::fs::write(&path, r#"{ "min_frame_time": 0.2, "max_frame_time": 0.1 }"#).unwrap();
        let s = Settings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(s, Settings::default());
        assert_eq!(s.clamp_dt(1.0 / 60.0), 1.0 / 60.0);
    }

    #[test]
    fn test_clamp_dt_inverted_bounds_does_not_panic() {
        let s = Settings {
            min_frame_time: 0.2,
            max_frame_time: 0.1,
            ..Default::default()
        };
        assert_eq!(s.clamp_dt(1.0 / 60.0), 0.1);
        assert_eq!(crate::clamp_dt(0.5, 0.2, 0.1), 0.1);
    }

    #[test]
    fn test_clamp_dt() {
        let s = Settings::default();
        assert_eq!(s.clamp_dt(5.0), MAX_FRAME_TIME);
        assert_eq!(s.clamp_dt(0.0), MIN_FRAME_TIME);
        assert_eq!(s.clamp_dt(0.016), 0.016);
        assert_eq!(s.clamp_dt(f64::NAN), MIN_FRAME_TIME);
    }
}
