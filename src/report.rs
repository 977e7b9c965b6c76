//! Text rendering of an impact report: comparison table, flex summary, advisory.

use std::fmt;

use crate::impact::{Advisory, ImpactReport, ImpactStatus, ScenarioRow};

/// Table header for the per-scenario comparison.
pub fn impact_column_title(unit_count: u32) -> String {
    format!("IMPACT (MW) - {} units", group_thousands(unit_count))
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Impact cell for a table row: unsigned for the baseline reference, signed
/// for the load-shed scenario.
pub fn row_impact(row: &ScenarioRow) -> String {
    if row.status == ImpactStatus::Baseline {
        format!("{:.3} MW", row.impact_mw)
    } else {
        format!("{:+.3} MW", row.impact_mw)
    }
}

/// One-line flex-capacity summary.
pub fn flex_summary(report: &ImpactReport) -> String {
    format!(
        "Load-Shed Capacity: {:+.2}% shift in demand potential.",
        report.flex_down_pct
    )
}

/// Explanation of what the sign of the flex shift means physically.
pub fn advisory_note(report: &ImpactReport) -> String {
    match Advisory::for_flex(report.flex_down_pct) {
        Advisory::Saturation => format!(
            "Note: The positive shift (+{:.2}%) at {:.1}°C indicates 'Saturation'. Raising the \
             setpoint fails to reduce power because the compressor is already operating at its \
             maximum physical limit to combat the high ambient temperature.",
            report.flex_down_pct,
            report.outdoor_temperature()
        ),
        Advisory::DemandRelief => format!(
            "Note: The negative shift ({:.2}%) indicates successful demand relief on the grid. \
             The individual heat pump units have sufficient capacity to modulate power in \
             response to setpoint changes.",
            report.flex_down_pct
        ),
    }
}

/// Fleet-level reading of the result in Virtual Power Plant terms.
pub fn advisory_analysis(report: &ImpactReport) -> String {
    match Advisory::for_flex(report.flex_down_pct) {
        Advisory::Saturation => format!(
            "Analysis: At {:.1}°C, {} cooling units draw more power from the grid when the \
             setpoint is raised.",
            report.outdoor_temperature(),
            report.unit_count
        ),
        Advisory::DemandRelief => format!(
            "Analysis: At {:.1}°C, {} cooling units function as a {:.3} MW Virtual Power Plant \
             when the setpoint is raised.",
            report.outdoor_temperature(),
            report.unit_count,
            report.impact_mw.abs()
        ),
    }
}

/// Plain-text dashboard for stdout.
pub struct TextReport<'a>(pub &'a ImpactReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let impact_title = impact_column_title(r.unit_count);
        writeln!(f, "--- Grid Impact Results ---")?;
        writeln!(
            f,
            "Outdoor ambient: {:.1}°C   Units: {}",
            r.outdoor_temperature(),
            group_thousands(r.unit_count)
        )?;
        writeln!(
            f,
            "{:<14} {:>10} {:>10} {:>w$} {:>10}",
            "SCENARIO",
            "SETPOINT",
            "POWER (W)",
            impact_title,
            "STATUS",
            w = impact_title.len()
        )?;
        for row in &r.rows() {
            writeln!(
                f,
                "{:<14} {:>10} {:>10} {:>w$} {:>10}",
                row.name,
                format!("{:.2}°C", row.setpoint_c),
                format!("{:.0} W", row.power_w),
                row_impact(row),
                row.status,
                w = impact_title.len()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{}", flex_summary(r))?;
        writeln!(f, "{}", advisory_note(r))?;
        writeln!(f, "{}", advisory_analysis(r))?;
        writeln!(f)?;
        writeln!(f, "--- Aggregated Load Profile ---")?;
        writeln!(f, "Baseline:   {:.1} kW", r.baseline.aggregate_kw())?;
        write!(f, "Load-Shed:  {:.1} kW", r.load_shed.aggregate_kw())
    }
}
