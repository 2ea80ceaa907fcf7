use super::descriptive::{
    histogram, mean, p_over, p_under, percentile_of_value, quantile_sorted, sorted_copy, stdev,
    z_score, HistogramBin,
};
use serde::Serialize;

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Descriptive summary of one sample relative to an optional line.
///
/// `compute` keeps every value unrounded. Call `for_display` on the way
/// out of the service: comparisons (`p_over`, `p_under`, histogram bucketing)
/// are always made against the raw sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub n: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub stdev: Option<f64>,
    pub p10: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub histogram: Vec<HistogramBin>,
    pub p_over: Option<f64>,
    pub p_under: Option<f64>,
    pub z_score: Option<f64>,
    /// Fraction at or below the line; a percentage after `for_display`
    pub percentile: Option<f64>,
}

impl SummaryStatistics {
    pub fn compute(sample: &[f64], line: Option<f64>) -> Self {
        let sorted = sorted_copy(sample);
        let q = |p: f64| quantile_sorted(&sorted, p);
        let mean = mean(sample);
        let stdev = stdev(sample);

        Self {
            n: sample.len(),
            mean,
            median: q(0.5),
            stdev,
            p10: q(0.10),
            p25: q(0.25),
            p50: q(0.5),
            p75: q(0.75),
            p90: q(0.90),
            min: sorted.first().copied(),
            max: sorted.last().copied(),
            histogram: histogram(sample),
            p_over: line.and_then(|l| p_over(sample, l)),
            p_under: line.and_then(|l| p_under(sample, l)),
            z_score: z_score(line, mean, stdev),
            percentile: line.and_then(|l| percentile_of_value(sample, l)),
        }
    }

    /// Presentation copy: one decimal for display fields, percentile as a
    /// one-decimal percentage, z-score to two decimals.
    pub fn for_display(&self) -> Self {
        let r1 = |v: Option<f64>| v.map(|x| round_to(x, 1));
        let r3 = |v: Option<f64>| v.map(|x| round_to(x, 3));
        Self {
            n: self.n,
            mean: r1(self.mean),
            median: r1(self.median),
            stdev: r1(self.stdev),
            p10: r1(self.p10),
            p25: r1(self.p25),
            p50: r1(self.p50),
            p75: r1(self.p75),
            p90: r1(self.p90),
            min: r1(self.min),
            max: r1(self.max),
            histogram: self
                .histogram
                .iter()
                .map(|b| HistogramBin {
                    start: round_to(b.start, 1),
                    end: round_to(b.end, 1),
                    count: b.count,
                })
                .collect(),
            p_over: r3(self.p_over),
            p_under: r3(self.p_under),
            z_score: self.z_score.map(|z| round_to(z, 2)),
            percentile: self.percentile.map(|p| round_to(p * 100.0, 1)),
        }
    }
}
