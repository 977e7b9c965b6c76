//! TOML-based dashboard settings: asset paths, setpoints, dead-band, input limits.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::impact::{STATUS_DEAD_BAND_MW, Setpoints};

/// Top-level dashboard configuration parsed from TOML.
///
/// Every section is optional; missing values fall back to the standard
/// 22.22/24.44 °C comparison with the bundled assets.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Locations of the serialized model and scaler.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Baseline and load-shed setpoints.
    #[serde(default)]
    pub setpoints: Setpoints,
    /// Status classification parameters.
    #[serde(default)]
    pub classification: ClassificationConfig,
    /// Allowed ranges and defaults for user inputs.
    #[serde(default)]
    pub inputs: InputLimits,
}

/// Locations of the serialized model and scaler.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/optimizer_model.json"),
            scaler_path: PathBuf::from("assets/feature_scaler.json"),
        }
    }
}

/// Status classification parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationConfig {
    /// Half-width of the STABLE band around zero (MW).
    pub dead_band_mw: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            dead_band_mw: STATUS_DEAD_BAND_MW,
        }
    }
}

/// Allowed ranges, step sizes, and defaults for the two user inputs.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputLimits {
    pub outdoor_min_c: f64,
    pub outdoor_max_c: f64,
    pub outdoor_step_c: f64,
    pub outdoor_default_c: f64,
    pub unit_count_min: u32,
    pub unit_count_max: u32,
    pub unit_count_step: u32,
    pub unit_count_default: u32,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            outdoor_min_c: 20.0,
            outdoor_max_c: 46.0,
            outdoor_step_c: 0.5,
            outdoor_default_c: 35.0,
            unit_count_min: 1,
            unit_count_max: 1_000_000,
            unit_count_step: 100,
            unit_count_default: 1000,
        }
    }
}

impl InputLimits {
    /// Rejects an outdoor temperature outside the configured range.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NonFinite`] or [`InputError::OutOfRange`].
    pub fn check_outdoor(&self, value: f64) -> Result<f64, InputError> {
        if !value.is_finite() {
            return Err(InputError::NonFinite {
                field: "outdoor_temperature",
            });
        }
        if value < self.outdoor_min_c || value > self.outdoor_max_c {
            return Err(InputError::OutOfRange {
                field: "outdoor_temperature",
                value,
                min: self.outdoor_min_c,
                max: self.outdoor_max_c,
            });
        }
        Ok(value)
    }

    /// Rejects a unit count outside the configured range.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnitCount`] for zero, [`InputError::OutOfRange`]
    /// otherwise.
    pub fn check_unit_count(&self, value: u32) -> Result<u32, InputError> {
        if value == 0 {
            return Err(InputError::UnitCount);
        }
        if value < self.unit_count_min || value > self.unit_count_max {
            return Err(InputError::OutOfRange {
                field: "unit_count",
                value: f64::from(value),
                min: f64::from(self.unit_count_min),
                max: f64::from(self.unit_count_max),
            });
        }
        Ok(value)
    }

    pub fn clamp_outdoor(&self, value: f64) -> f64 {
        value.max(self.outdoor_min_c).min(self.outdoor_max_c)
    }

    pub fn clamp_unit_count(&self, value: u32) -> u32 {
        value.max(self.unit_count_min.max(1)).min(self.unit_count_max)
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"setpoints.baseline_c"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl DashboardConfig {
    /// Parses settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let sp = &self.setpoints;
        if !sp.baseline_c.is_finite() {
            errors.push(ConfigError::new("setpoints.baseline_c", "must be finite"));
        }
        if !sp.load_shed_c.is_finite() {
            errors.push(ConfigError::new("setpoints.load_shed_c", "must be finite"));
        }
        if sp.baseline_c == sp.load_shed_c {
            errors.push(ConfigError::new(
                "setpoints.load_shed_c",
                "must differ from setpoints.baseline_c",
            ));
        }

        let band = self.classification.dead_band_mw;
        if !band.is_finite() || band < 0.0 {
            errors.push(ConfigError::new(
                "classification.dead_band_mw",
                "must be finite and >= 0",
            ));
        }

        let inp = &self.inputs;
        if !(inp.outdoor_min_c.is_finite() && inp.outdoor_max_c.is_finite())
            || inp.outdoor_min_c >= inp.outdoor_max_c
        {
            errors.push(ConfigError::new(
                "inputs.outdoor_min_c",
                "must be finite and < inputs.outdoor_max_c",
            ));
        }
        if !inp.outdoor_step_c.is_finite() || inp.outdoor_step_c <= 0.0 {
            errors.push(ConfigError::new("inputs.outdoor_step_c", "must be > 0"));
        }
        if !(inp.outdoor_min_c..=inp.outdoor_max_c).contains(&inp.outdoor_default_c) {
            errors.push(ConfigError::new(
                "inputs.outdoor_default_c",
                "must lie within [outdoor_min_c, outdoor_max_c]",
            ));
        }
        if inp.unit_count_min == 0 {
            errors.push(ConfigError::new("inputs.unit_count_min", "must be >= 1"));
        }
        if inp.unit_count_min > inp.unit_count_max {
            errors.push(ConfigError::new(
                "inputs.unit_count_min",
                "must be <= inputs.unit_count_max",
            ));
        }
        if inp.unit_count_step == 0 {
            errors.push(ConfigError::new("inputs.unit_count_step", "must be > 0"));
        }
        if !(inp.unit_count_min..=inp.unit_count_max).contains(&inp.unit_count_default) {
            errors.push(ConfigError::new(
                "inputs.unit_count_default",
                "must lie within [unit_count_min, unit_count_max]",
            ));
        }

        errors
    }
}
