//! CSV export for impact reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::impact::ImpactReport;

/// Schema v1 column header for CSV impact export.
const HEADER: &str = "outdoor_c,baseline_setpoint_c,load_shed_setpoint_c,\
                       baseline_w,load_shed_w,unit_count,impact_mw,flex_down_pct,status";

/// Exports impact reports to a CSV file at the given path.
///
/// Writes a header row followed by one data row per report using the schema
/// v1 column layout. Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(reports: &[ImpactReport], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(reports, buf)
}

/// Writes impact reports as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(reports: &[ImpactReport], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in reports {
        wtr.write_record(&[
            format!("{:.2}", r.outdoor_temperature()),
            format!("{:.2}", r.baseline.scenario.indoor_setpoint()),
            format!("{:.2}", r.load_shed.scenario.indoor_setpoint()),
            format!("{:.4}", r.baseline.predicted_power_watts),
            format!("{:.4}", r.load_shed.predicted_power_watts),
            r.unit_count.to_string(),
            format!("{:.6}", r.impact_mw),
            format!("{:.4}", r.flex_down_pct),
            r.status.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
