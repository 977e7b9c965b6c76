//! Grid impact of moving a cooling fleet from the baseline to the load-shed
//! setpoint.

/// Prediction pair to impact report.
pub mod calculator;
pub mod classify;
pub mod types;

pub use calculator::{GridImpactCalculator, sweep_points};
pub use classify::{Advisory, STATUS_DEAD_BAND_MW, classify};
pub use types::{
    BASELINE_SETPOINT_C, ImpactReport, ImpactStatus, LOAD_SHED_SETPOINT_C, PredictionResult,
    ScenarioInput, ScenarioRow, Setpoints,
};
