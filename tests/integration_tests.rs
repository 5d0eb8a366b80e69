use std::path::Path;

use bikeshare_insights::analyzers::aggregate::{
    aggregate_days, monthly_count_pivot, seasonal_means,
};
use bikeshare_insights::loader::load;
use bikeshare_insights::normalize::{CategoryMaps, DayRecord, normalize};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/day_sample.csv");

fn fixture_rows() -> (Vec<DayRecord>, CategoryMaps) {
    let raw = load(Path::new(FIXTURE)).expect("Failed to load fixture");
    let maps = CategoryMaps::default();
    let rows = normalize(&raw, &maps).expect("Failed to normalize fixture");
    (rows, maps)
}

#[test]
fn test_full_pipeline() {
    let (rows, maps) = fixture_rows();
    let report = aggregate_days("day_sample.csv", &rows, &maps).unwrap();

    assert_eq!(report.quality.rows, 12);
    assert_eq!(report.totals.cnt, 48454);
    assert_eq!(report.totals.casual, 11670);
    assert_eq!(report.totals.registered, 36784);
    assert_eq!(report.quality.duplicate_rows, 0);
    assert_eq!(report.quality.count_mismatches, 0);
}

#[test]
fn test_monthly_pivot_against_fixture() {
    let (rows, maps) = fixture_rows();
    let pivot = monthly_count_pivot(&rows, &maps);

    assert_eq!(pivot.years, vec!["2011", "2012"]);

    // Januari: 985 + 801 + 1349 in 2011, 1956 + 2236 in 2012
    assert_eq!(pivot.values[0], vec![3135, 4192]);
    // Juli appears in both years
    assert_eq!(pivot.values[6], vec![10708, 14415]);
    // April has 2011 data only; Oktober 2012 only
    assert_eq!(pivot.values[3], vec![3115, 0]);
    assert_eq!(pivot.values[9], vec![0, 7191]);

    // every row is accounted for exactly once
    let cell_sum: u64 = pivot.values.iter().flatten().sum();
    assert_eq!(cell_sum, 48454);
}

#[test]
fn test_seasonal_means_against_fixture() {
    let (rows, maps) = fixture_rows();
    let means = seasonal_means(&rows, &maps).unwrap();

    let labels: Vec<&str> = means.iter().map(|m| m.season.as_str()).collect();
    assert_eq!(labels, vec!["Spring", "Summer", "Fall", "Winter"]);

    // Spring: (985 + 801 + 1349 + 1956 + 2236) / 5
    assert!((means[0].mean_cnt - 1465.4).abs() < 1e-9);
    // Summer: single April row
    assert_eq!(means[1].mean_cnt, 3115.0);
    // Fall: (6043 + 4665 + 7149 + 7266) / 4
    assert!((means[2].mean_cnt - 6280.75).abs() < 1e-9);
    // Winter: (7191 + 5698) / 2
    assert!((means[3].mean_cnt - 6444.5).abs() < 1e-9);
}

#[test]
fn test_report_serializes_to_json() {
    let (rows, maps) = fixture_rows();
    let report = aggregate_days("day_sample.csv", &rows, &maps).unwrap();
    let json = serde_json::to_string(&report).unwrap();

    assert!(json.contains("\"Januari\""));
    assert!(json.contains("\"Spring\""));
    // mean pivot uses null for absent (month, year) groups
    assert!(json.contains("null"));
}
