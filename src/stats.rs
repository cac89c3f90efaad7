//! Interval statistics
//!
//! This module provides the small statistical toolbox used by the timing
//! generator: consecutive differences, a percentile estimator, and
//! mean/variance helpers.
//!
//! The percentile estimator uses linear interpolation between order
//! statistics. Different interpolation methods yield different trim
//! boundaries on small samples, so the method is fixed here rather than
//! left to a dependency default.

/// Compute the consecutive differences of an ordered sequence.
///
/// For `n` timings this returns the `n - 1` inter-event intervals.
/// Returns an empty vector for sequences shorter than 2.
pub fn diff(timings: &[f64]) -> Vec<f64> {
    timings.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Compute the value at a given percentile of `data`.
///
/// Uses linear interpolation between adjacent order statistics: the
/// percentile `p` (in percent, 0-100) maps to the fractional index
/// `p / 100 * (n - 1)` of the sorted data.
///
/// # Arguments
///
/// * `data` - Sample values (need not be sorted)
/// * `p` - Percentile in percent, clamped to `[0, 100]`
///
/// # Panics
///
/// Panics if `data` is empty. Callers validate sample counts before
/// estimating percentiles.
pub fn percentile(data: &[f64], p: f64) -> f64 {
    assert!(!data.is_empty(), "percentile of an empty sample");

    if data.len() == 1 {
        return data[0];
    }

    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let p = p.clamp(0.0, 100.0);
    let idx = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let frac = idx - lower as f64;
        sorted[lower] + frac * (sorted[upper] - sorted[lower])
    }
}

/// Arithmetic mean of a sample. Returns `None` for an empty sample.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population variance of a sample. Returns `None` for an empty sample.
pub fn variance(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let var = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64;
    Some(var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_diff() {
        let timings = vec![0.0, 1.0, 3.0, 4.0, 100.0];
        assert_eq!(diff(&timings), vec![1.0, 2.0, 1.0, 96.0]);
    }

    #[test]
    fn test_diff_short_sequence() {
        assert!(diff(&[]).is_empty());
        assert!(diff(&[1.5]).is_empty());
    }

    #[test]
    fn test_percentile_endpoints() {
        let data = vec![3.0, 1.0, 2.0, 5.0, 4.0];
        assert_eq!(percentile(&data, 0.0), 1.0);
        assert_eq!(percentile(&data, 100.0), 5.0);
        assert_eq!(percentile(&data, 50.0), 3.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        // Sorted: [1, 1, 2, 96]; the 90th percentile sits at fractional
        // index 2.7, between 2 and 96.
        let data = vec![1.0, 2.0, 1.0, 96.0];
        let p90 = percentile(&data, 90.0);
        assert!((p90 - 67.8).abs() < 1e-9);
        let p10 = percentile(&data, 10.0);
        assert!((p10 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[7.0], 35.0), 7.0);
    }

    #[test]
    fn test_mean_and_variance() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&data), Some(2.5));
        assert_eq!(variance(&data), Some(1.25));
        assert_eq!(mean(&[]), None);
        assert_eq!(variance(&[]), None);
    }
}
