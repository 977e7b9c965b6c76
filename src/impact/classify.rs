//! Dead-band classification of the load-shed change.

use serde::Serialize;

use super::types::ImpactStatus;

/// Half-width of the band around zero treated as no change (MW).
pub const STATUS_DEAD_BAND_MW: f64 = 0.005;

/// Classifies an aggregate change in draw.
///
/// Depends only on `impact_mw`; the band edges themselves are `STABLE`.
pub fn classify(impact_mw: f64, dead_band_mw: f64) -> ImpactStatus {
    if impact_mw > dead_band_mw {
        ImpactStatus::Increased
    } else if impact_mw < -dead_band_mw {
        ImpactStatus::Reduced
    } else {
        ImpactStatus::Stable
    }
}

/// Which explanation accompanies a report, keyed on the sign of the flex shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Positive shift: units are already at their compressor limit.
    Saturation,
    /// Zero or negative shift: the fleet can shed load.
    DemandRelief,
}

impl Advisory {
    pub fn for_flex(flex_down_pct: f64) -> Self {
        if flex_down_pct > 0.0 {
            Self::Saturation
        } else {
            Self::DemandRelief
        }
    }
}
