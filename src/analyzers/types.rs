//! Data types produced by the aggregation queries.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Dataset-wide ride count totals.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub cnt: u64,
    pub registered: u64,
    pub casual: u64,
}

/// Summed `cnt` per (month, year) cell.
///
/// `values[m][y]` corresponds to `months[m]` and `years[y]`; months follow
/// calendar order, years follow year-label order. Cells with no underlying
/// rows hold 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountPivot {
    pub months: Vec<String>,
    pub years: Vec<String>,
    pub values: Vec<Vec<u64>>,
}

/// Mean `cnt` per (month, year) cell, same shape as [`CountPivot`].
///
/// Cells with no underlying rows hold `None` (JSON `null`) — a real group
/// with mean 0 stays distinguishable from an absent group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanPivot {
    pub months: Vec<String>,
    pub years: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

/// Mean `cnt` for one season, labeled for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonMean {
    pub season: String,
    pub mean_cnt: f64,
}

/// Descriptive summary for one numeric measure column.
#[derive(Debug, Clone, Serialize)]
pub struct MeasureSummary {
    pub measure: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Dataset quality findings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub rows: usize,
    pub duplicate_rows: usize,
    /// Rows where `cnt != casual + registered`.
    pub count_mismatches: usize,
}

/// Complete aggregation result for one dataset run, serialized as JSON for
/// the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub schema_version: u8,
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub totals: Totals,
    pub monthly_counts: CountPivot,
    pub monthly_means: MeanPivot,
    pub seasonal_means: Vec<SeasonMean>,
    pub measures: Vec<MeasureSummary>,
    pub quality: QualityReport,
}
