//! Type normalization and categorical label mapping.
//!
//! Turns raw file rows into analysis rows: identifier and raw-date fields are
//! dropped, month and year codes become display labels, and the
//! `cnt = casual + registered` invariant is checked (warning only).

use thiserror::Error;
use tracing::warn;

use crate::loader::RawRecord;

static MONTH_LABELS: &[(u8, &str)] = &[
    (1, "Januari"),
    (2, "Februari"),
    (3, "Maret"),
    (4, "April"),
    (5, "Mei"),
    (6, "Juni"),
    (7, "Juli"),
    (8, "Agustus"),
    (9, "September"),
    (10, "Oktober"),
    (11, "November"),
    (12, "Desember"),
];

static SEASON_LABELS: &[(u8, &str)] = &[
    (1, "Spring"),
    (2, "Summer"),
    (3, "Fall"),
    (4, "Winter"),
];

static YEAR_LABELS: &[(u8, &str)] = &[(0, "2011"), (1, "2012")];

/// A categorical value whose code has no display label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no {column} label for code {code}")]
pub struct UnmappedCode {
    pub column: &'static str,
    pub code: u8,
}

/// An ordered code-to-label mapping for one categorical column.
///
/// Entry order is display order; the pivot and seasonal queries iterate it
/// to lay out their output axes.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    column: &'static str,
    entries: &'static [(u8, &'static str)],
}

impl CategoryMap {
    pub fn label(&self, code: u8) -> Result<&'static str, UnmappedCode> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
            .ok_or(UnmappedCode {
                column: self.column,
                code,
            })
    }

    /// Labels in display order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(_, label)| *label)
    }

    /// `(code, label)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, &'static str)> {
        self.entries.iter().copied()
    }
}

/// The label mappings for the three labeled categorical columns.
#[derive(Debug, Clone)]
pub struct CategoryMaps {
    pub month: CategoryMap,
    pub season: CategoryMap,
    pub year: CategoryMap,
}

impl Default for CategoryMaps {
    fn default() -> Self {
        Self {
            month: CategoryMap {
                column: "mnth",
                entries: MONTH_LABELS,
            },
            season: CategoryMap {
                column: "season",
                entries: SEASON_LABELS,
            },
            year: CategoryMap {
                column: "yr",
                entries: YEAR_LABELS,
            },
        }
    }
}

/// One normalized observation.
///
/// `instant` and `dteday` are gone by construction. Month and year carry
/// display labels; season stays a code until the seasonal query labels it.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    pub season: u8,
    pub year: String,
    pub month: String,
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

impl DayRecord {
    /// Whether `cnt` matches `casual + registered`.
    pub fn counts_consistent(&self) -> bool {
        self.cnt == self.casual + self.registered
    }
}

/// Normalizes raw rows: drops excluded columns, applies month and year
/// labels, and warns on rows violating the count invariant.
///
/// Row count and order are preserved.
///
/// # Errors
///
/// Returns [`UnmappedCode`] if a month or year code is outside its mapping
/// domain. Season codes are not checked here; the seasonal query validates
/// them at its point of use.
pub fn normalize(rows: &[RawRecord], maps: &CategoryMaps) -> Result<Vec<DayRecord>, UnmappedCode> {
    let mut out = Vec::with_capacity(rows.len());

    for (index, raw) in rows.iter().enumerate() {
        if raw.cnt != raw.casual + raw.registered {
            warn!(
                row = index,
                cnt = raw.cnt,
                casual = raw.casual,
                registered = raw.registered,
                "Count does not equal casual + registered"
            );
        }

        out.push(DayRecord {
            season: raw.season,
            year: maps.year.label(raw.yr)?.to_string(),
            month: maps.month.label(raw.mnth)?.to_string(),
            holiday: raw.holiday,
            weekday: raw.weekday,
            workingday: raw.workingday,
            weathersit: raw.weathersit,
            temp: raw.temp,
            atemp: raw.atemp,
            hum: raw.hum,
            windspeed: raw.windspeed,
            casual: raw.casual,
            registered: raw.registered,
            cnt: raw.cnt,
        });
    }

    Ok(out)
}
