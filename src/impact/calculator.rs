//! Grid impact calculator: two predictions, aggregate metrics, classification.

use tracing::debug;

use super::classify::{STATUS_DEAD_BAND_MW, classify};
use super::types::{ImpactReport, PredictionResult, ScenarioInput, Setpoints, W_PER_MW};
use crate::error::{ImpactError, InputError};
use crate::model::{RegressionModel, Regressor};
use crate::predict::PredictionService;

/// Upper bound on the number of temperatures a single sweep may evaluate.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Compares the baseline and load-shed setpoints for a fleet of units.
///
/// Borrows the prediction service; holds no other state.
#[derive(Debug)]
pub struct GridImpactCalculator<'a, M = RegressionModel> {
    service: &'a PredictionService<M>,
    setpoints: Setpoints,
    dead_band_mw: f64,
}

impl<'a, M: Regressor> GridImpactCalculator<'a, M> {
    pub fn new(service: &'a PredictionService<M>, setpoints: Setpoints, dead_band_mw: f64) -> Self {
        Self {
            service,
            setpoints,
            dead_band_mw,
        }
    }

    /// Calculator using the standard 22.22/24.44 °C setpoints and ±0.005 MW band.
    pub fn with_defaults(service: &'a PredictionService<M>) -> Self {
        Self::new(service, Setpoints::default(), STATUS_DEAD_BAND_MW)
    }

    pub fn setpoints(&self) -> Setpoints {
        self.setpoints
    }

    pub fn dead_band_mw(&self) -> f64 {
        self.dead_band_mw
    }

    fn evaluate(&self, scenario: ScenarioInput) -> Result<PredictionResult, ImpactError> {
        let predicted_power_watts = self
            .service
            .predict(scenario.outdoor_temperature(), scenario.indoor_setpoint())?;
        Ok(PredictionResult {
            scenario,
            predicted_power_watts,
        })
    }

    /// Builds the impact report for one outdoor temperature and fleet size.
    ///
    /// # Errors
    ///
    /// - [`ImpactError::Input`] for a zero unit count or non-finite temperature
    /// - [`ImpactError::Inference`] if the model cannot be evaluated
    /// - [`ImpactError::DivisionByZero`] if the baseline prediction is exactly 0 W
    pub fn compute(
        &self,
        outdoor_temperature: f64,
        unit_count: u32,
    ) -> Result<ImpactReport, ImpactError> {
        let baseline = self.evaluate(ScenarioInput::new(
            outdoor_temperature,
            self.setpoints.baseline_c,
            unit_count,
        )?)?;
        let load_shed = self.evaluate(ScenarioInput::new(
            outdoor_temperature,
            self.setpoints.load_shed_c,
            unit_count,
        )?)?;

        let delta_w = load_shed.predicted_power_watts - baseline.predicted_power_watts;
        let impact_mw = delta_w * f64::from(unit_count) / W_PER_MW;
        if baseline.predicted_power_watts == 0.0 {
            return Err(ImpactError::DivisionByZero);
        }
        let flex_down_pct = 100.0 * delta_w / baseline.predicted_power_watts;
        let status = classify(impact_mw, self.dead_band_mw);

        debug!(
            outdoor_c = outdoor_temperature,
            unit_count,
            baseline_w = baseline.predicted_power_watts,
            load_shed_w = load_shed.predicted_power_watts,
            impact_mw,
            %status,
            "computed grid impact"
        );

        Ok(ImpactReport {
            baseline,
            load_shed,
            unit_count,
            impact_mw,
            flex_down_pct,
            status,
        })
    }

    /// Evaluates [`Self::compute`] at `from, from + step, ...` up to and
    /// including `to`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Range`] for an empty, reversed, or oversized
    /// range; otherwise the first error raised by `compute`.
    pub fn sweep(
        &self,
        from: f64,
        to: f64,
        step: f64,
        unit_count: u32,
    ) -> Result<Vec<ImpactReport>, ImpactError> {
        let points = sweep_points(from, to, step)?;
        points
            .into_iter()
            .map(|t| self.compute(t, unit_count))
            .collect()
    }
}

/// Outdoor temperatures visited by a sweep. Index-based, so no drift
/// accumulates over long ranges.
pub fn sweep_points(from: f64, to: f64, step: f64) -> Result<Vec<f64>, InputError> {
    if !(from.is_finite() && to.is_finite() && step.is_finite()) {
        return Err(InputError::Range("bounds and step must be finite".to_string()));
    }
    if step <= 0.0 {
        return Err(InputError::Range(format!("step must be > 0, got {step}")));
    }
    if from > to {
        return Err(InputError::Range(format!(
            "from ({from}) must be <= to ({to})"
        )));
    }
    let intervals = ((to - from) / step + 1e-9).floor();
    if intervals >= MAX_SWEEP_POINTS as f64 {
        return Err(InputError::Range(format!(
            "sweep would evaluate more than {MAX_SWEEP_POINTS} points"
        )));
    }
    let count = intervals as usize + 1;
    Ok((0..count).map(|i| from + i as f64 * step).collect())
}
