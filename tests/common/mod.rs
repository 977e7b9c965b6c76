//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use cooling_flex::model::{LinearModel, RegressionModel, StandardScaler};
use cooling_flex::predict::PredictionService;

/// Path relative to the crate root.
pub fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Fresh scratch path under the system temp dir, unique per process and name.
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cooling-flex-it-{}-{name}", std::process::id()))
}

/// The linear model and scaler shipped in `assets/`.
pub fn bundled_service() -> PredictionService {
    PredictionService::load(
        &manifest_path("assets/optimizer_model.json"),
        &manifest_path("assets/feature_scaler.json"),
    )
    .expect("bundled assets should load")
}

/// Tree ensemble that predicts 3000 W / 2850 W below 42 °C outdoor and
/// 4100 W / 4150 W above it.
pub fn saturation_service() -> PredictionService {
    PredictionService::load(
        &manifest_path("assets/saturation_model.json"),
        &manifest_path("assets/feature_scaler.json"),
    )
    .expect("saturation assets should load")
}

/// Identity scaler; per-unit watts = intercept + 10 * outdoor - 67.5 * indoor.
pub fn linear_service(intercept: f64) -> PredictionService {
    let model = RegressionModel::Linear(LinearModel::new(vec![10.0, -67.5, 0.0], intercept));
    PredictionService::new(StandardScaler::identity(3), model)
}

/// Intercept that makes the baseline prediction at `outdoor` exactly zero.
pub fn zero_baseline_intercept(outdoor: f64) -> f64 {
    -(10.0 * outdoor - 67.5 * 22.22)
}
