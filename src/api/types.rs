//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::InputLimits;
use crate::impact::{Advisory, ImpactReport, ImpactStatus, PredictionResult, Setpoints};
use crate::report::{advisory_analysis, advisory_note};

/// Query parameters for `GET /impact`. Missing values use the configured defaults.
#[derive(Debug, Deserialize)]
pub struct ImpactQuery {
    pub outdoor_temperature: Option<f64>,
    pub unit_count: Option<u32>,
}

/// Query parameters for `GET /sweep`. Missing values span the full input range.
#[derive(Debug, Deserialize)]
pub struct SweepQuery {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub step: Option<f64>,
    pub unit_count: Option<u32>,
}

/// One side of the baseline/load-shed comparison.
#[derive(Debug, Serialize)]
pub struct ScenarioRecord {
    pub setpoint_c: f64,
    pub delta_t: f64,
    pub predicted_power_w: f64,
    pub aggregate_kw: f64,
    pub status: ImpactStatus,
}

impl ScenarioRecord {
    fn new(p: &PredictionResult, status: ImpactStatus) -> Self {
        Self {
            setpoint_c: p.scenario.indoor_setpoint(),
            delta_t: p.scenario.delta_t(),
            predicted_power_w: p.predicted_power_watts,
            aggregate_kw: p.aggregate_kw(),
            status,
        }
    }
}

/// Full impact report plus the advisory texts shown beside it.
#[derive(Debug, Serialize)]
pub struct ImpactResponse {
    pub outdoor_temperature: f64,
    pub unit_count: u32,
    pub baseline: ScenarioRecord,
    pub load_shed: ScenarioRecord,
    pub impact_mw: f64,
    pub flex_down_pct: f64,
    pub status: ImpactStatus,
    pub advisory: Advisory,
    pub note: String,
    pub analysis: String,
}

impl From<&ImpactReport> for ImpactResponse {
    fn from(r: &ImpactReport) -> Self {
        Self {
            outdoor_temperature: r.outdoor_temperature(),
            unit_count: r.unit_count,
            baseline: ScenarioRecord::new(&r.baseline, ImpactStatus::Baseline),
            load_shed: ScenarioRecord::new(&r.load_shed, r.status),
            impact_mw: r.impact_mw,
            flex_down_pct: r.flex_down_pct,
            status: r.status,
            advisory: Advisory::for_flex(r.flex_down_pct),
            note: advisory_note(r),
            analysis: advisory_analysis(r),
        }
    }
}

/// Compact per-temperature row for sweeps. Column names match the CSV export.
#[derive(Debug, Serialize)]
pub struct SweepRecord {
    pub outdoor_c: f64,
    pub baseline_w: f64,
    pub load_shed_w: f64,
    pub unit_count: u32,
    pub impact_mw: f64,
    pub flex_down_pct: f64,
    pub status: ImpactStatus,
}

impl From<&ImpactReport> for SweepRecord {
    fn from(r: &ImpactReport) -> Self {
        Self {
            outdoor_c: r.outdoor_temperature(),
            baseline_w: r.baseline.predicted_power_watts,
            load_shed_w: r.load_shed.predicted_power_watts,
            unit_count: r.unit_count,
            impact_mw: r.impact_mw,
            flex_down_pct: r.flex_down_pct,
            status: r.status,
        }
    }
}

/// Active setpoints, dead-band, and input limits.
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub setpoints: Setpoints,
    pub dead_band_mw: f64,
    pub inputs: InputLimits,
    pub model_kind: &'static str,
    /// Column names recorded in the scaler asset.
    pub feature_names: Vec<String>,
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::ScenarioInput;

    fn make_report() -> ImpactReport {
        ImpactReport {
            baseline: PredictionResult {
                scenario: ScenarioInput::new(35.0, 22.22, 1000).expect("baseline scenario is valid"),
                predicted_power_watts: 3000.0,
            },
            load_shed: PredictionResult {
                scenario: ScenarioInput::new(35.0, 24.44, 1000).expect("load-shed scenario is valid"),
                predicted_power_watts: 2850.0,
            },
            unit_count: 1000,
            impact_mw: -0.15,
            flex_down_pct: -5.0,
            status: ImpactStatus::Reduced,
        }
    }

    #[test]
    fn impact_response_maps_fields() {
        let resp = ImpactResponse::from(&make_report());
        assert_eq!(resp.outdoor_temperature, 35.0);
        assert_eq!(resp.baseline.status, ImpactStatus::Baseline);
        assert_eq!(resp.baseline.aggregate_kw, 3000.0);
        assert_eq!(resp.load_shed.aggregate_kw, 2850.0);
        assert_eq!(resp.load_shed.status, ImpactStatus::Reduced);
        assert_eq!(resp.advisory, Advisory::DemandRelief);
        assert!(resp.analysis.contains("Virtual Power Plant"));
    }

    #[test]
    fn impact_response_json_shape() {
        let json = serde_json::to_value(ImpactResponse::from(&make_report())).unwrap();
        assert_eq!(json["status"], "REDUCED");
        assert_eq!(json["advisory"], "demand_relief");
        assert_eq!(json["baseline"]["status"], "BASELINE");
        assert_eq!(json["unit_count"], 1000);
    }
}
