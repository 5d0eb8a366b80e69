//! CSV loader for the daily bike-sharing dataset.
//!
//! Reads raw rows in file order into typed records. No value transformation
//! happens here; that is the normalizer's job.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Columns the input file must carry. Extra columns are ignored.
static EXPECTED_COLUMNS: &[&str] = &[
    "instant",
    "dteday",
    "season",
    "yr",
    "mnth",
    "holiday",
    "weekday",
    "workingday",
    "weathersit",
    "temp",
    "atemp",
    "hum",
    "windspeed",
    "casual",
    "registered",
    "cnt",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("missing expected column(s): {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    #[error("malformed record: {0}")]
    Malformed(#[from] csv::Error),
}

/// One raw observation, field values exactly as they appear in the file.
///
/// `season` 1-4, `yr` 0/1, `mnth` 1-12, `weekday` 0-6; `holiday` and
/// `workingday` are 0/1 flags. `cnt` should equal `casual + registered`
/// for every row, but that is not checked here.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub instant: u32,
    pub dteday: NaiveDate,
    pub season: u8,
    pub yr: u8,
    pub mnth: u8,
    pub holiday: u8,
    pub weekday: u8,
    pub workingday: u8,
    pub weathersit: u8,
    pub temp: f64,
    pub atemp: f64,
    pub hum: f64,
    pub windspeed: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

/// Loads all rows from a CSV file, preserving file order.
///
/// # Errors
///
/// Returns [`LoadError::SourceUnavailable`] if the file cannot be opened,
/// [`LoadError::SchemaMismatch`] if the header lacks expected columns, and
/// [`LoadError::Malformed`] if a row does not parse into [`RawRecord`].
pub fn load(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = load_from_reader(file)?;
    debug!(path = %path.display(), rows = rows.len(), "Dataset loaded");
    Ok(rows)
}

/// Loads all rows from any CSV byte stream with a header line.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>, LoadError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = EXPECTED_COLUMNS
        .iter()
        .filter(|expected| !headers.iter().any(|h| h == **expected))
        .map(|s| s.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::SchemaMismatch { missing });
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}
