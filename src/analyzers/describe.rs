//! Descriptive summaries for the numeric measure columns.

use crate::analyzers::types::MeasureSummary;
use crate::analyzers::utility::{mean, percentile, sample_stddev};
use crate::normalize::DayRecord;

/// Summarizes every numeric measure column: the three ride counts and the
/// four normalized weather measures.
pub fn describe(rows: &[DayRecord]) -> Vec<MeasureSummary> {
    let columns: [(&str, fn(&DayRecord) -> f64); 7] = [
        ("casual", |r| f64::from(r.casual)),
        ("registered", |r| f64::from(r.registered)),
        ("cnt", |r| f64::from(r.cnt)),
        ("temp", |r| r.temp),
        ("atemp", |r| r.atemp),
        ("hum", |r| r.hum),
        ("windspeed", |r| r.windspeed),
    ];

    columns
        .into_iter()
        .map(|(name, extract)| {
            let values: Vec<f64> = rows.iter().map(extract).collect();
            summarize(name, &values)
        })
        .collect()
}

/// Builds a [`MeasureSummary`] for one column. Statistics over an empty
/// column are NaN (serialized as JSON `null`).
pub fn summarize(measure: &str, values: &[f64]) -> MeasureSummary {
    if values.is_empty() {
        return MeasureSummary {
            measure: measure.to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = mean(values);
    MeasureSummary {
        measure: measure.to_string(),
        count: values.len(),
        mean,
        std: sample_stddev(values, mean),
        min: sorted[0],
        p25: percentile(&sorted, 25.0),
        median: percentile(&sorted, 50.0),
        p75: percentile(&sorted, 75.0),
        max: sorted[sorted.len() - 1],
    }
}
