//! Prediction service: per-unit power draw for one outdoor/indoor pair.

use std::path::Path;

use crate::error::{AssetLoadError, InferenceError};
use crate::model::{RegressionModel, Regressor, StandardScaler, load_model, load_scaler};

/// Width of the feature row: outdoor temperature, indoor setpoint, delta.
pub const FEATURE_COUNT: usize = 3;

/// Builds the raw feature row `[outdoor, indoor, outdoor - indoor]`.
pub fn feature_row(outdoor_temperature: f64, indoor_setpoint: f64) -> [f64; FEATURE_COUNT] {
    [
        outdoor_temperature,
        indoor_setpoint,
        outdoor_temperature - indoor_setpoint,
    ]
}

/// Immutable handle over a fitted scaler and model.
///
/// Built once at startup and shared by reference (or `Arc`) with every
/// evaluation. Nothing in it is mutated after construction.
#[derive(Debug, Clone)]
pub struct PredictionService<M = RegressionModel> {
    scaler: StandardScaler,
    model: M,
}

impl PredictionService<RegressionModel> {
    /// Loads both assets from disk.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetLoadError`] if either file cannot be read, parsed, or
    /// validated. Callers should treat this as fatal.
    pub fn load(model_path: &Path, scaler_path: &Path) -> Result<Self, AssetLoadError> {
        let scaler = load_scaler(scaler_path)?;
        let model = load_model(model_path)?;
        Ok(Self::new(scaler, model))
    }
}

impl<M: Regressor> PredictionService<M> {
    pub fn new(scaler: StandardScaler, model: M) -> Self {
        Self { scaler, model }
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Predicted per-unit power draw in watts.
    ///
    /// # Errors
    ///
    /// Returns an [`InferenceError`] if the scaler or model was fitted on a
    /// different feature width, or the model output is not finite.
    pub fn predict(
        &self,
        outdoor_temperature: f64,
        indoor_setpoint: f64,
    ) -> Result<f64, InferenceError> {
        self.predict_features(&feature_row(outdoor_temperature, indoor_setpoint))
    }

    /// Scales and evaluates an already assembled feature row.
    ///
    /// # Errors
    ///
    /// See [`Self::predict`].
    pub fn predict_features(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != FEATURE_COUNT {
            return Err(InferenceError::FeatureCount {
                stage: "feature row",
                expected: FEATURE_COUNT,
                actual: features.len(),
            });
        }
        let scaled = self.scaler.transform(features)?;
        let watts = self.model.predict_row(&scaled)?;
        if !watts.is_finite() {
            return Err(InferenceError::NonFiniteOutput(watts));
        }
        Ok(watts)
    }
}
