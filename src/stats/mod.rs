//! Descriptive statistics over a numeric sample, relative to an optional line.
//!
//! Inputs are never mutated; order statistics work on a sorted private copy.

mod descriptive;
mod summary;

pub use descriptive::{
    histogram, mean, median, p_over, p_under, percentile_of_value, quantile, stdev, z_score,
    HistogramBin,
};
pub use summary::{round_to, SummaryStatistics};
