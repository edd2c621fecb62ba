//! Scalar statistics over distance samples.

use serde::{Deserialize, Serialize};

/// Arithmetic mean. NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median (average of the two middle values for even lengths). NaN for an
/// empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) * 0.5
    }
}

/// Minimum. NaN for an empty slice.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, |acc, v| {
        if acc.is_nan() || v < acc {
            v
        } else {
            acc
        }
    })
}

/// Maximum. NaN for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NAN, |acc, v| {
        if acc.is_nan() || v > acc {
            v
        } else {
            acc
        }
    })
}

/// Population standard deviation. NaN for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Summary of a set of distance samples.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DistanceStats {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
}

impl DistanceStats {
    /// Summarize `samples`. All fields are NaN when the slice is empty.
    pub fn from_samples(samples: &[f64]) -> Self {
        Self {
            mean: mean(samples),
            median: median(samples),
            min: min(samples),
            max: max(samples),
            std: std_dev(samples),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_stats() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&v), 5.0, epsilon = 1e-12);
        assert_relative_eq!(median(&v), 4.5, epsilon = 1e-12);
        assert_relative_eq!(min(&v), 2.0, epsilon = 1e-12);
        assert_relative_eq!(max(&v), 9.0, epsilon = 1e-12);
        assert_relative_eq!(std_dev(&v), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_median_odd() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_is_nan() {
        let stats = DistanceStats::from_samples(&[]);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert!(stats.min.is_nan());
        assert!(stats.max.is_nan());
        assert!(stats.std.is_nan());
    }
}
