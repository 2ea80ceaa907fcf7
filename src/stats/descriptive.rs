use serde::Serialize;

const STDEV_EPSILON: f64 = 1e-12;
const MIN_BUCKETS: usize = 8;
const MAX_BUCKETS: usize = 20;

pub(crate) fn sorted_copy(sample: &[f64]) -> Vec<f64> {
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn mean(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(sample.iter().sum::<f64>() / sample.len() as f64)
}

pub fn median(sample: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(sample);
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

/// Linear-interpolation quantile, `q` clamped to `[0, 1]`.
pub fn quantile(sample: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted_copy(sample), q)
}

pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = (n - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Sample standard deviation (`n - 1` denominator).
pub fn stdev(sample: &[f64]) -> Option<f64> {
    if sample.len() < 2 {
        return None;
    }
    let m = mean(sample)?;
    let ss: f64 = sample.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (sample.len() - 1) as f64).sqrt())
}

/// Equal-width bin; half-open `[start, end)` except the last, which is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// `clamp(ceil(sqrt(n)), 8, 20)` equal-width bins over `[min, max]`.
///
/// A constant sample has zero width and lands entirely in the last bin.
pub fn histogram(sample: &[f64]) -> Vec<HistogramBin> {
    let n = sample.len();
    if n == 0 {
        return Vec::new();
    }
    let buckets = ((n as f64).sqrt().ceil() as usize).clamp(MIN_BUCKETS, MAX_BUCKETS);
    let min = sample.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / buckets as f64;

    let mut bins: Vec<HistogramBin> = (0..buckets)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == buckets {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for &v in sample {
        let idx = if v >= max || width <= 0.0 {
            buckets - 1
        } else {
            (((v - min) / width).floor() as usize).min(buckets - 1)
        };
        bins[idx].count += 1;
    }
    bins
}

/// Fraction of the sample at or below `line`.
pub fn percentile_of_value(sample: &[f64], line: f64) -> Option<f64> {
    fraction(sample, |v| v <= line)
}

/// Fraction of the sample strictly above `line`.
pub fn p_over(sample: &[f64], line: f64) -> Option<f64> {
    fraction(sample, |v| v > line)
}

/// Fraction of the sample strictly below `line`.
pub fn p_under(sample: &[f64], line: f64) -> Option<f64> {
    fraction(sample, |v| v < line)
}

/// Standard score of `line`; absent for a missing or zero deviation.
pub fn z_score(line: Option<f64>, mean: Option<f64>, stdev: Option<f64>) -> Option<f64> {
    let (line, mean, stdev) = (line?, mean?, stdev?);
    if stdev.abs() < STDEV_EPSILON {
        return None;
    }
    Some((line - mean) / stdev)
}

fn fraction(sample: &[f64], pred: impl Fn(f64) -> bool) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    let hits = sample.iter().filter(|&&v| pred(v)).count();
    Some(hits as f64 / sample.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(median(&[40.0, 10.0, 30.0, 20.0]), Some(25.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_quantile_bounds_and_interpolation() {
        let sample = [250.0, 180.0, 310.0, 220.0, 275.0];
        assert_eq!(quantile(&sample, 0.0), Some(180.0));
        assert_eq!(quantile(&sample, 1.0), Some(310.0));
        // position (5-1)*0.25 = 1 -> exact element
        assert_eq!(quantile(&sample, 0.25), Some(220.0));
        // position 4*0.9 = 3.6 -> 275 + 0.6 * 35
        assert!(approx_eq(quantile(&sample, 0.9).unwrap(), 296.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_input_not_mutated() {
        let sample = vec![3.0, 1.0, 2.0];
        let _ = median(&sample);
        let _ = quantile(&sample, 0.5);
        assert_eq!(sample, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_stdev_sample_denominator() {
        // mean 5, squared deviations sum 32, / (8 - 1)
        let sample = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx_eq(stdev(&sample).unwrap(), (32.0_f64 / 7.0).sqrt()));
        assert_eq!(stdev(&[1.0]), None);
    }

    #[test]
    fn test_histogram_counts_and_last_bin_closed() {
        let sample: Vec<f64> = (0..=100).map(f64::from).collect();
        let bins = histogram(&sample);
        // ceil(sqrt(101)) = 11
        assert_eq!(bins.len(), 11);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), sample.len());
        assert_eq!(bins.last().unwrap().end, 100.0);
        assert!(bins.last().unwrap().count >= 1);
    }

    #[test]
    fn test_histogram_bucket_clamp() {
        assert_eq!(histogram(&[1.0, 2.0, 3.0]).len(), 8);
        let big: Vec<f64> = (0..1000).map(f64::from).collect();
        assert_eq!(histogram(&big).len(), 20);
        assert!(histogram(&[]).is_empty());
    }

    #[test]
    fn test_histogram_constant_sample() {
        let bins = histogram(&[250.0; 5]);
        assert_eq!(bins.len(), 8);
        assert_eq!(bins[7].count, 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
    }

    #[test]
    fn test_over_under_and_percentile() {
        let sample = [200.0, 250.0, 260.0, 300.0];
        assert_eq!(p_over(&sample, 250.0), Some(0.5));
        assert_eq!(p_under(&sample, 250.0), Some(0.25));
        assert_eq!(percentile_of_value(&sample, 250.0), Some(0.5));
        // No value equals the line: the two sides cover the sample
        assert_eq!(
            p_over(&sample, 255.0).unwrap() + p_under(&sample, 255.0).unwrap(),
            1.0
        );
        assert_eq!(p_over(&[], 1.0), None);
    }

    #[test]
    fn test_z_score_guards() {
        assert_eq!(z_score(Some(260.0), Some(250.0), Some(20.0)), Some(0.5));
        assert_eq!(z_score(Some(260.0), Some(250.0), Some(0.0)), None);
        assert_eq!(z_score(None, Some(250.0), Some(20.0)), None);
        assert_eq!(z_score(Some(260.0), Some(250.0), None), None);
    }
}
