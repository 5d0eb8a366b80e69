//! Dataset quality checks: duplicates and the count invariant.

use std::collections::HashSet;

use crate::analyzers::types::QualityReport;
use crate::normalize::DayRecord;

type RowKey<'a> = (
    (u8, &'a str, &'a str, u8, u8, u8, u8),
    (u64, u64, u64, u64),
    (u32, u32, u32),
);

/// Full-row identity key over the normalized columns, grouped as
/// (categoricals, weather, counts). Float measures participate via their
/// bit patterns.
fn row_key(row: &DayRecord) -> RowKey<'_> {
    (
        (
            row.season,
            row.year.as_str(),
            row.month.as_str(),
            row.holiday,
            row.weekday,
            row.workingday,
            row.weathersit,
        ),
        (
            row.temp.to_bits(),
            row.atemp.to_bits(),
            row.hum.to_bits(),
            row.windspeed.to_bits(),
        ),
        (row.casual, row.registered, row.cnt),
    )
}

/// Counts duplicate rows and count-invariant violations.
pub fn quality_report(rows: &[DayRecord]) -> QualityReport {
    let mut seen = HashSet::new();
    let mut duplicate_rows = 0;
    let mut count_mismatches = 0;

    for row in rows {
        if !seen.insert(row_key(row)) {
            duplicate_rows += 1;
        }
        if !row.counts_consistent() {
            count_mismatches += 1;
        }
    }

    QualityReport {
        rows: rows.len(),
        duplicate_rows,
        count_mismatches,
    }
}
