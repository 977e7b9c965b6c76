//! One-shot loading of the model and scaler assets from JSON files.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use super::regressor::{RegressionModel, Regressor};
use super::scaler::StandardScaler;
use crate::error::AssetLoadError;

fn read_json<T: DeserializeOwned>(asset: &'static str, path: &Path) -> Result<T, AssetLoadError> {
    let content = fs::read_to_string(path).map_err(|source| AssetLoadError::Io {
        asset,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| AssetLoadError::Parse {
        asset,
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates a standard scaler.
///
/// # Errors
///
/// Returns an [`AssetLoadError`] if the file is missing, malformed, or its
/// contents are inconsistent.
pub fn load_scaler(path: &Path) -> Result<StandardScaler, AssetLoadError> {
    let scaler: StandardScaler = read_json("scaler", path)?;
    scaler
        .validate()
        .map_err(|message| AssetLoadError::Invalid {
            asset: "scaler",
            message,
        })?;
    info!(
        path = %path.display(),
        n_features = scaler.n_features(),
        "loaded feature scaler"
    );
    Ok(scaler)
}

/// Loads and validates a regression model.
///
/// # Errors
///
/// Returns an [`AssetLoadError`] if the file is missing, malformed, or the
/// model structure is invalid.
pub fn load_model(path: &Path) -> Result<RegressionModel, AssetLoadError> {
    let model: RegressionModel = read_json("model", path)?;
    model
        .validate()
        .map_err(|message| AssetLoadError::Invalid {
            asset: "model",
            message,
        })?;
    info!(
        path = %path.display(),
        kind = model.kind(),
        n_features = model.n_features(),
        "loaded regression model"
    );
    Ok(model)
}
