//! Aggregation queries over the normalized dataset.
//!
//! This module computes the report consumed by the presentation layer:
//! totals, the monthly count and mean pivots, seasonal means, per-measure
//! descriptive summaries, and a dataset quality report.

pub mod aggregate;
pub mod describe;
pub mod quality;
pub mod types;
pub mod utility;
