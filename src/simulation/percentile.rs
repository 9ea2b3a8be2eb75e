//! Percentiles with linear interpolation between closest ranks

/// Percentile `p` (0..=100) of an ascending slice
///
/// Rank `k = p/100 * (n-1)`; the result interpolates between the values at
/// `floor(k)` and `ceil(k)` by the fractional part of `k`.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let p = p.clamp(0.0, 100.0);
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Sort finite values ascending, dropping anything non-finite
pub fn sorted_finite<I: IntoIterator<Item = f64>>(values: I) -> Vec<f64> {
    let mut finite: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    finite.sort_by(|a, b| a.total_cmp(b));
    finite
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(percentile(&[0.12], 25.0), Some(0.12));
        assert_eq!(percentile(&[0.12], 75.0), Some(0.12));
    }

    #[test]
    fn test_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        // k = 0.25 * 3 = 0.75
        assert_relative_eq!(percentile(&values, 25.0).unwrap(), 1.75);
        // k = 1.5
        assert_relative_eq!(percentile(&values, 50.0).unwrap(), 2.5);
        // k = 2.25
        assert_relative_eq!(percentile(&values, 75.0).unwrap(), 3.25);
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 100.0), Some(4.0));
    }

    #[test]
    fn test_sorted_finite_drops_nan_and_inf() {
        let sorted = sorted_finite([3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]);
        assert_eq!(sorted, vec![-1.0, 2.0, 3.0]);
    }
}
