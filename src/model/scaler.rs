//! Per-feature mean/variance standardization.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// A pre-fitted standard scaler: `z[i] = (x[i] - mean[i]) / scale[i]`.
///
/// Fitted out of band; this crate only applies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StandardScaler {
    /// Column names recorded at fit time (informational only).
    #[serde(default)]
    pub feature_names: Vec<String>,
    /// Per-feature mean.
    pub mean: Vec<f64>,
    /// Per-feature standard deviation.
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Builds a scaler from raw mean and scale vectors.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            feature_names: Vec::new(),
            mean,
            scale,
        }
    }

    /// A pass-through scaler (zero mean, unit scale) for `n` features.
    pub fn identity(n: usize) -> Self {
        Self::new(vec![0.0; n], vec![1.0; n])
    }

    /// Number of features the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Checks internal consistency. Returns a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.mean.is_empty() {
            return Err("mean must not be empty".to_string());
        }
        if self.mean.len() != self.scale.len() {
            return Err(format!(
                "mean has {} entries but scale has {}",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.mean.len() {
            return Err(format!(
                "feature_names has {} entries but mean has {}",
                self.feature_names.len(),
                self.mean.len()
            ));
        }
        if let Some(i) = self.mean.iter().position(|m| !m.is_finite()) {
            return Err(format!("mean[{i}] is not finite"));
        }
        if let Some(i) = self
            .scale
            .iter()
            .position(|s| !s.is_finite() || *s == 0.0)
        {
            return Err(format!("scale[{i}] must be finite and non-zero"));
        }
        Ok(())
    }

    /// Standardizes a single feature row.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::FeatureCount`] if `features` does not have
    /// exactly [`Self::n_features`] entries.
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.n_features() {
            return Err(InferenceError::FeatureCount {
                stage: "scaler",
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}
