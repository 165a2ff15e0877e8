//! Comparison metrics between a baseline and a candidate solver.
//!
//! - [`compare`] — one pair → [`ComparisonResult`]
//! - [`ExperimentSummary`] — many pairs → rates and reduction statistics

mod comparison;
mod summary;

pub use comparison::{compare, reduction_pct, ComparisonResult};
pub use summary::{ExperimentSummary, SeriesStats};
