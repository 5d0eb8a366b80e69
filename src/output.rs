//! Output formatting and persistence for dataset reports.
//!
//! Supports pretty-printing, JSON serialization, and CSV export of the
//! monthly pivot for the presentation layer.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::{CountPivot, DatasetReport};
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &DatasetReport) {
    debug!("{:#?}", report);
}

/// Renders a report as pretty-printed JSON.
pub fn to_json(report: &DatasetReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a report as pretty-printed JSON to a file.
pub fn write_report(path: &Path, report: &DatasetReport) -> Result<()> {
    std::fs::write(path, to_json(report)?)?;
    info!(path = %path.display(), "Report written");
    Ok(())
}

/// Writes the monthly count pivot as a CSV table: one row per month, one
/// column per year.
pub fn write_monthly_csv(path: &Path, pivot: &CountPivot) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let mut header = vec!["month".to_string()];
    header.extend(pivot.years.iter().cloned());
    writer.write_record(&header)?;

    for (month, cells) in pivot.months.iter().zip(&pivot.values) {
        let mut record = vec![month.clone()];
        record.extend(cells.iter().map(u64::to_string));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    info!(path = %path.display(), "Monthly pivot written");
    Ok(())
}
