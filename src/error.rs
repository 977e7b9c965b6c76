//! Error taxonomy for asset loading, inference, and impact computation.

use std::path::PathBuf;

use thiserror::Error;

/// The serialized model or scaler could not be loaded.
///
/// Fatal at startup: the prediction service cannot operate without both assets.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// The asset file could not be read.
    #[error("cannot read {asset} asset \"{}\": {source}", .path.display())]
    Io {
        asset: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The asset file is not valid JSON for its schema.
    #[error("cannot parse {asset} asset \"{}\": {source}", .path.display())]
    Parse {
        asset: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The asset parsed but its contents are unusable.
    #[error("invalid {asset} asset: {message}")]
    Invalid {
        asset: &'static str,
        message: String,
    },
}

/// A model evaluation was attempted with a malformed feature vector, or the
/// model produced an unusable output.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InferenceError {
    #[error("{stage} expects {expected} features, got {actual}")]
    FeatureCount {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("model produced a non-finite prediction ({0})")]
    NonFiniteOutput(f64),
    #[error("malformed model: {0}")]
    MalformedModel(String),
}

/// Rejected user input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("unit_count must be >= 1")]
    UnitCount,
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("invalid range: {0}")]
    Range(String),
}

/// Failure of a single grid-impact evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ImpactError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    /// The baseline prediction is exactly zero, so the flex-down percentage
    /// has no defined value.
    #[error("baseline predicted power is zero; flex-down percentage is undefined")]
    DivisionByZero,
}
