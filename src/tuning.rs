//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to the stock values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical timestep applied per frame (seconds)
    pub fixed_dt: f32,
    /// Scroll speed of both world layers (units/s)
    pub scroll_speed: f32,

    // === Hero ===
    /// Upward velocity cap (no floor)
    pub max_rise_speed: f32,
    pub flap_impulse: f32,
    pub flap_angular_impulse: f32,
    pub dive_angular_impulse_rate: f32,
    pub dive_assist_delay: f32,
    pub min_rotation_deg: f32,
    pub max_rotation_deg: f32,
    pub death_rotation_deg: f32,
    pub min_angular_vel: f32,
    pub max_angular_vel: f32,

    // === Obstacles ===
    pub spawn_interval: f32,
    pub spawn_x: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    pub obstacle_removal_x: f32,

    // === Host physics ===
    pub gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            scroll_speed: SCROLL_SPEED,

            max_rise_speed: MAX_RISE_SPEED,
            flap_impulse: FLAP_IMPULSE,
            flap_angular_impulse: FLAP_ANGULAR_IMPULSE,
            dive_angular_impulse_rate: DIVE_ANGULAR_IMPULSE_RATE,
            dive_assist_delay: DIVE_ASSIST_DELAY,
            min_rotation_deg: MIN_ROTATION_DEG,
            max_rotation_deg: MAX_ROTATION_DEG,
            death_rotation_deg: DEATH_ROTATION_DEG,
            min_angular_vel: MIN_ANGULAR_VEL,
            max_angular_vel: MAX_ANGULAR_VEL,

            spawn_interval: SPAWN_INTERVAL,
            spawn_x: SPAWN_X,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,
            obstacle_removal_x: OBSTACLE_REMOVAL_X,

            gravity: GRAVITY,
        }
    }
}

impl Tuning {
    /// Lower rotation bound in radians
    #[inline]
    pub fn min_rotation(&self) -> f32 {
        self.min_rotation_deg.to_radians()
    }

    /// Upper rotation bound in radians
    #[inline]
    pub fn max_rotation(&self) -> f32 {
        self.max_rotation_deg.to_radians()
    }

    /// Death pose rotation in radians
    #[inline]
    pub fn death_rotation(&self) -> f32 {
        self.death_rotation_deg.to_radians()
    }

    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fixed_dt > 0.0) {
            return Err(invalid("fixed_dt", format!("must be positive, got {}", self.fixed_dt)));
        }
        if !(self.spawn_interval > 0.0) {
            return Err(invalid(
                "spawn_interval",
                format!("must be positive, got {}", self.spawn_interval),
            ));
        }
        if !(self.scroll_speed >= 0.0) {
            return Err(invalid(
                "scroll_speed",
                format!("must not be negative, got {}", self.scroll_speed),
            ));
        }
        ordered("min_rotation_deg", self.min_rotation_deg, self.max_rotation_deg)?;
        ordered("min_angular_vel", self.min_angular_vel, self.max_angular_vel)?;
        ordered("spawn_y_min", self.spawn_y_min, self.spawn_y_max)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(invalid(field, format!("{min} exceeds upper bound {max}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.fixed_dt, 1.0 / 60.0);
        assert_eq!(tuning.spawn_interval, 1.5);
        assert!((tuning.death_rotation() + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 150.0 }"#).unwrap();
        assert_eq!(tuning.scroll_speed, 150.0);
        assert_eq!(tuning.spawn_x, SPAWN_X);
        assert_eq!(tuning.max_rise_speed, MAX_RISE_SPEED);
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut tuning = Tuning::default();
        tuning.spawn_interval = 2.0;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_inverted_spawn_band() {
        let err = Tuning::from_json(r#"{ "spawn_y_min": 500.0, "spawn_y_max": 100.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "spawn_y_min", .. }));
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let err = Tuning::from_json(r#"{ "fixed_dt": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "fixed_dt", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ scroll_speed: }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = Tuning::load("/nonexistent/bunny-tuning.json").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/bunny-tuning.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
