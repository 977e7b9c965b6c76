//! Scenario inputs, prediction results, and the grid impact report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Standard-comfort indoor setpoint (°C).
pub const BASELINE_SETPOINT_C: f64 = 22.22;
/// Elevated indoor setpoint used during a grid-relief event (°C).
pub const LOAD_SHED_SETPOINT_C: f64 = 24.44;

/// Watts per megawatt.
pub const W_PER_MW: f64 = 1_000_000.0;
/// Watts per kilowatt.
pub const W_PER_KW: f64 = 1_000.0;

/// The two thermostat setpoints compared on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Setpoints {
    /// Reference comfort setpoint (°C).
    pub baseline_c: f64,
    /// Relaxed grid-relief setpoint (°C).
    pub load_shed_c: f64,
}

impl Default for Setpoints {
    fn default() -> Self {
        Self {
            baseline_c: BASELINE_SETPOINT_C,
            load_shed_c: LOAD_SHED_SETPOINT_C,
        }
    }
}

/// One evaluation input. Fields are private so `unit_count >= 1` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioInput {
    outdoor_temperature: f64,
    indoor_setpoint: f64,
    unit_count: u32,
}

impl ScenarioInput {
    /// Validates and builds a scenario.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::UnitCount`] when `unit_count` is zero and
    /// [`InputError::NonFinite`] when a temperature is NaN or infinite.
    pub fn new(
        outdoor_temperature: f64,
        indoor_setpoint: f64,
        unit_count: u32,
    ) -> Result<Self, InputError> {
        if !outdoor_temperature.is_finite() {
            return Err(InputError::NonFinite {
                field: "outdoor_temperature",
            });
        }
        if !indoor_setpoint.is_finite() {
            return Err(InputError::NonFinite {
                field: "indoor_setpoint",
            });
        }
        if unit_count == 0 {
            return Err(InputError::UnitCount);
        }
        Ok(Self {
            outdoor_temperature,
            indoor_setpoint,
            unit_count,
        })
    }

    pub fn outdoor_temperature(&self) -> f64 {
        self.outdoor_temperature
    }

    pub fn indoor_setpoint(&self) -> f64 {
        self.indoor_setpoint
    }

    pub fn unit_count(&self) -> u32 {
        self.unit_count
    }

    /// `outdoor_temperature - indoor_setpoint`.
    pub fn delta_t(&self) -> f64 {
        self.outdoor_temperature - self.indoor_setpoint
    }
}

/// Output of a single model invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub scenario: ScenarioInput,
    /// Predicted draw of one unit (W).
    pub predicted_power_watts: f64,
}

impl PredictionResult {
    /// Fleet-wide draw for this scenario (kW).
    pub fn aggregate_kw(&self) -> f64 {
        self.predicted_power_watts * f64::from(self.scenario.unit_count()) / W_PER_KW
    }
}

/// Direction of the load-shed change relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactStatus {
    /// The reference scenario itself.
    Baseline,
    /// Raising the setpoint increased aggregate draw (saturation).
    Increased,
    /// Raising the setpoint decreased aggregate draw (demand relief).
    Reduced,
    /// Change is inside the dead-band.
    Stable,
}

impl ImpactStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Baseline => "BASELINE",
            Self::Increased => "INCREASED",
            Self::Reduced => "REDUCED",
            Self::Stable => "STABLE",
        }
    }
}

impl fmt::Display for ImpactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One row of the two-row comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioRow {
    pub name: &'static str,
    pub setpoint_c: f64,
    pub power_w: f64,
    pub impact_mw: f64,
    pub status: ImpactStatus,
}

/// Result of comparing the baseline and load-shed setpoints for a fleet.
///
/// Built once per refresh and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactReport {
    pub baseline: PredictionResult,
    pub load_shed: PredictionResult,
    pub unit_count: u32,
    /// Aggregate change in draw when moving to the load-shed setpoint (MW).
    pub impact_mw: f64,
    /// Per-unit change relative to the baseline (%).
    pub flex_down_pct: f64,
    /// Classification of the load-shed change. Never [`ImpactStatus::Baseline`].
    pub status: ImpactStatus,
}

impl ImpactReport {
    pub fn outdoor_temperature(&self) -> f64 {
        self.baseline.scenario.outdoor_temperature()
    }

    /// Per-unit difference `load_shed - baseline` (W).
    pub fn delta_watts(&self) -> f64 {
        self.load_shed.predicted_power_watts - self.baseline.predicted_power_watts
    }

    /// Table rows: the baseline reference first, then the load-shed scenario.
    pub fn rows(&self) -> [ScenarioRow; 2] {
        [
            ScenarioRow {
                name: "1. BASELINE",
                setpoint_c: self.baseline.scenario.indoor_setpoint(),
                power_w: self.baseline.predicted_power_watts,
                impact_mw: 0.0,
                status: ImpactStatus::Baseline,
            },
            ScenarioRow {
                name: "2. LOAD-SHED",
                setpoint_c: self.load_shed.scenario.indoor_setpoint(),
                power_w: self.load_shed.predicted_power_watts,
                impact_mw: self.impact_mw,
                status: self.status,
            },
        ]
    }
}
