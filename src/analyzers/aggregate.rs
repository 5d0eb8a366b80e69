use std::collections::HashMap;

use chrono::Utc;
use tracing::info;

use crate::analyzers::describe::describe;
use crate::analyzers::quality::quality_report;
use crate::analyzers::types::{CountPivot, DatasetReport, MeanPivot, SeasonMean, Totals};
use crate::normalize::{CategoryMaps, DayRecord, UnmappedCode};

/// Report layout version, bumped when the JSON shape changes.
const SCHEMA_VERSION: u8 = 1;

/// Sums the three count measures over all rows. Empty input yields zeros.
pub fn totals(rows: &[DayRecord]) -> Totals {
    let mut t = Totals::default();
    for row in rows {
        t.cnt += u64::from(row.cnt);
        t.registered += u64::from(row.registered);
        t.casual += u64::from(row.casual);
    }
    t
}

/// Groups rows by (month, year) and sums `cnt` per group.
///
/// The output matrix covers the full mapping domains: months in calendar
/// order, years in label order, absent combinations as 0. The shape is the
/// same for every input, including an empty one.
pub fn monthly_count_pivot(rows: &[DayRecord], maps: &CategoryMaps) -> CountPivot {
    let mut groups: HashMap<(&str, &str), u64> = HashMap::new();
    for row in rows {
        *groups
            .entry((row.month.as_str(), row.year.as_str()))
            .or_default() += u64::from(row.cnt);
    }

    let months: Vec<String> = maps.month.labels().map(str::to_string).collect();
    let years: Vec<String> = maps.year.labels().map(str::to_string).collect();
    let values = months
        .iter()
        .map(|month| {
            years
                .iter()
                .map(|year| {
                    groups
                        .get(&(month.as_str(), year.as_str()))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();

    CountPivot {
        months,
        years,
        values,
    }
}

/// Groups rows by (month, year) and averages `cnt` per group.
///
/// Same shape as [`monthly_count_pivot`], but absent combinations are `None`
/// rather than 0 so they stay distinguishable from a real zero mean.
pub fn monthly_mean_pivot(rows: &[DayRecord], maps: &CategoryMaps) -> MeanPivot {
    let mut groups: HashMap<(&str, &str), (u64, usize)> = HashMap::new();
    for row in rows {
        let entry = groups
            .entry((row.month.as_str(), row.year.as_str()))
            .or_default();
        entry.0 += u64::from(row.cnt);
        entry.1 += 1;
    }

    let months: Vec<String> = maps.month.labels().map(str::to_string).collect();
    let years: Vec<String> = maps.year.labels().map(str::to_string).collect();
    let values = months
        .iter()
        .map(|month| {
            years
                .iter()
                .map(|year| {
                    groups
                        .get(&(month.as_str(), year.as_str()))
                        .map(|(sum, n)| *sum as f64 / *n as f64)
                })
                .collect()
        })
        .collect();

    MeanPivot {
        months,
        years,
        values,
    }
}

/// Groups rows by season, labels the codes, and averages `cnt` per season.
///
/// Output order is the season map's display order {Spring, Summer, Fall,
/// Winter} restricted to seasons actually present; absent seasons are
/// omitted, not zero-filled.
///
/// # Errors
///
/// Returns [`UnmappedCode`] if any observed season code has no label.
pub fn seasonal_means(
    rows: &[DayRecord],
    maps: &CategoryMaps,
) -> Result<Vec<SeasonMean>, UnmappedCode> {
    let mut groups: HashMap<u8, (u64, usize)> = HashMap::new();
    for row in rows {
        let entry = groups.entry(row.season).or_default();
        entry.0 += u64::from(row.cnt);
        entry.1 += 1;
    }

    // Every observed code must be mappable before anything is emitted.
    let mut codes: Vec<u8> = groups.keys().copied().collect();
    codes.sort_unstable();
    for code in codes {
        maps.season.label(code)?;
    }

    let mut out = Vec::new();
    for (code, label) in maps.season.entries() {
        if let Some((sum, n)) = groups.get(&code) {
            out.push(SeasonMean {
                season: label.to_string(),
                mean_cnt: *sum as f64 / *n as f64,
            });
        }
    }

    Ok(out)
}

/// Runs every query over the normalized rows and assembles the full report.
pub fn aggregate_days(
    source: &str,
    rows: &[DayRecord],
    maps: &CategoryMaps,
) -> Result<DatasetReport, UnmappedCode> {
    let now = Utc::now();

    let totals = totals(rows);
    let monthly_counts = monthly_count_pivot(rows, maps);
    let monthly_means = monthly_mean_pivot(rows, maps);
    let seasonal_means = seasonal_means(rows, maps)?;
    let measures = describe(rows);
    let quality = quality_report(rows);

    info!(
        rows = rows.len(),
        total_cnt = totals.cnt,
        seasons = seasonal_means.len(),
        "Aggregation complete"
    );

    Ok(DatasetReport {
        schema_version: SCHEMA_VERSION,
        source: source.to_string(),
        generated_at: now,
        totals,
        monthly_counts,
        monthly_means,
        seasonal_means,
        measures,
        quality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(mnth: u8, yr: u8, season: u8, cnt: u32) -> DayRecord {
        let maps = CategoryMaps::default();
        let casual = cnt / 2;
        DayRecord {
            season,
            year: maps.year.label(yr).unwrap().to_string(),
            month: maps.month.label(mnth).unwrap().to_string(),
            holiday: 0,
            weekday: 1,
            workingday: 1,
            weathersit: 1,
            temp: 0.5,
            atemp: 0.48,
            hum: 0.6,
            windspeed: 0.2,
            casual,
            registered: cnt - casual,
            cnt,
        }
    }

    #[test]
    fn test_totals_sum_all_three_measures() {
        let rows = vec![day(1, 0, 1, 100), day(1, 1, 1, 150), day(2, 0, 1, 80)];
        let t = totals(&rows);

        assert_eq!(t.cnt, 330);
        assert_eq!(t.casual + t.registered, 330);
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(totals(&[]), Totals::default());
    }

    #[test]
    fn test_count_pivot_worked_example() {
        // {mnth:1, yr:0, cnt:100}, {mnth:1, yr:1, cnt:150}, {mnth:2, yr:0, cnt:80}
        let rows = vec![day(1, 0, 1, 100), day(1, 1, 1, 150), day(2, 0, 1, 80)];
        let maps = CategoryMaps::default();
        let pivot = monthly_count_pivot(&rows, &maps);

        assert_eq!(pivot.months.len(), 12);
        assert_eq!(pivot.years, vec!["2011", "2012"]);
        assert_eq!(pivot.months[0], "Januari");
        assert_eq!(pivot.values[0], vec![100, 150]);
        // absent (Februari, 2012) is zero-filled, not omitted
        assert_eq!(pivot.values[1], vec![80, 0]);
        // untouched months are present with zero cells
        assert_eq!(pivot.values[11], vec![0, 0]);
    }

    #[test]
    fn test_count_pivot_months_follow_calendar_order() {
        // arrival order is December before January
        let rows = vec![day(12, 0, 4, 10), day(1, 0, 1, 20)];
        let maps = CategoryMaps::default();
        let pivot = monthly_count_pivot(&rows, &maps);

        assert_eq!(pivot.months.first().map(String::as_str), Some("Januari"));
        assert_eq!(pivot.months.last().map(String::as_str), Some("Desember"));
        assert_eq!(pivot.values[0][0], 20);
        assert_eq!(pivot.values[11][0], 10);
    }

    #[test]
    fn test_count_pivot_accounts_for_every_row() {
        let rows = vec![
            day(1, 0, 1, 100),
            day(1, 0, 1, 50),
            day(6, 1, 2, 75),
            day(12, 1, 4, 5),
        ];
        let maps = CategoryMaps::default();
        let pivot = monthly_count_pivot(&rows, &maps);

        let cell_sum: u64 = pivot.values.iter().flatten().sum();
        assert_eq!(cell_sum, totals(&rows).cnt);
    }

    #[test]
    fn test_mean_pivot_absent_cells_are_none() {
        let rows = vec![day(1, 0, 1, 100), day(1, 0, 1, 200)];
        let maps = CategoryMaps::default();
        let pivot = monthly_mean_pivot(&rows, &maps);

        assert_eq!(pivot.values[0][0], Some(150.0));
        assert_eq!(pivot.values[0][1], None);
        assert_eq!(pivot.values[1][0], None);
    }

    #[test]
    fn test_pivots_share_shape() {
        let rows = vec![day(3, 0, 1, 10), day(9, 1, 3, 20)];
        let maps = CategoryMaps::default();
        let counts = monthly_count_pivot(&rows, &maps);
        let means = monthly_mean_pivot(&rows, &maps);

        assert_eq!(counts.months, means.months);
        assert_eq!(counts.years, means.years);
        assert_eq!(counts.values.len(), means.values.len());
        assert_eq!(counts.values[0].len(), means.values[0].len());
    }

    #[test]
    fn test_empty_input_keeps_pivot_shape() {
        let maps = CategoryMaps::default();
        let counts = monthly_count_pivot(&[], &maps);
        let means = monthly_mean_pivot(&[], &maps);

        assert_eq!(counts.months.len(), 12);
        assert!(counts.values.iter().flatten().all(|v| *v == 0));
        assert!(means.values.iter().flatten().all(|v| v.is_none()));
    }

    #[test]
    fn test_seasonal_means_fixed_display_order() {
        // arrival order: Winter rows first, then Spring
        let rows = vec![day(12, 0, 4, 40), day(1, 0, 1, 10), day(2, 0, 1, 20)];
        let maps = CategoryMaps::default();
        let means = seasonal_means(&rows, &maps).unwrap();

        let labels: Vec<&str> = means.iter().map(|m| m.season.as_str()).collect();
        assert_eq!(labels, vec!["Spring", "Winter"]);
        assert_eq!(means[0].mean_cnt, 15.0);
        assert_eq!(means[1].mean_cnt, 40.0);
    }

    #[test]
    fn test_seasonal_means_absent_seasons_omitted() {
        let rows = vec![day(7, 0, 3, 100)];
        let maps = CategoryMaps::default();
        let means = seasonal_means(&rows, &maps).unwrap();

        assert_eq!(means.len(), 1);
        assert_eq!(means[0].season, "Fall");
    }

    #[test]
    fn test_seasonal_means_unmapped_code_fails() {
        let mut bad = day(1, 0, 1, 10);
        bad.season = 9;
        let rows = vec![day(1, 0, 1, 10), bad];
        let maps = CategoryMaps::default();
        let err = seasonal_means(&rows, &maps).unwrap_err();

        assert_eq!(err, UnmappedCode { column: "season", code: 9 });
    }

    #[test]
    fn test_seasonal_means_empty_input() {
        let maps = CategoryMaps::default();
        assert!(seasonal_means(&[], &maps).unwrap().is_empty());
    }

    #[test]
    fn test_aggregate_days_assembles_report() {
        let rows = vec![day(1, 0, 1, 100), day(1, 1, 1, 150), day(2, 0, 1, 80)];
        let maps = CategoryMaps::default();
        let report = aggregate_days("day.csv", &rows, &maps).unwrap();

        assert_eq!(report.source, "day.csv");
        assert_eq!(report.totals.cnt, 330);
        assert_eq!(report.quality.rows, 3);
        assert_eq!(report.seasonal_means.len(), 1);
        assert!(report.measures.iter().any(|m| m.measure == "cnt"));
    }

    #[test]
    fn test_aggregate_days_empty_input() {
        let maps = CategoryMaps::default();
        let report = aggregate_days("empty.csv", &[], &maps).unwrap();

        assert_eq!(report.totals, Totals::default());
        assert_eq!(report.monthly_counts.months.len(), 12);
        assert!(report.seasonal_means.is_empty());
    }
}
