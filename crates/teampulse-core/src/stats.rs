//! Shared statistics helpers.
//!
//! Both engines aggregate f64 samples; the policy for degenerate input is
//! uniform: an empty slice yields 0 everywhere.

/// Arithmetic mean. Returns 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of the values. Returns 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Population standard deviation (divide by N, not N-1).
/// Returns 0 for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[10.0, 20.0, 30.0]), 20.0);
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[30.0, 10.0, 20.0]), 20.0);
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&[10.0, 20.0, 30.0, 40.0]), 25.0);
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_std_dev_equal_values_is_zero() {
        assert_eq!(population_std_dev(&[5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_std_dev_population_divisor() {
        // Population std dev of [2, 4] is 1.0 (sample std dev would be ~1.414)
        assert!((population_std_dev(&[2.0, 4.0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_std_dev_permutation_invariant() {
        let a = population_std_dev(&[1.0, 7.0, 3.0]);
        let b = population_std_dev(&[3.0, 1.0, 7.0]);
        assert!((a - b).abs() < 1e-12);
    }
}
