//! Linear-interpolation percentiles
//!
//! Uses the conventional definition: for a sorted sample `x[0..n]` and
//! probability `p`, the rank is `h = p * (n - 1)` and the percentile is
//! `x[floor(h)] + (h - floor(h)) * (x[ceil(h)] - x[floor(h)])`.

use fissile_core::{Error, Numeric, Result};

/// Copy a sample into a sorted `f64` buffer, rejecting empty and non-finite input
///
/// `operation` names the caller in the resulting error.
pub fn sorted_finite<T: Numeric>(sample: &[T], operation: &str) -> Result<Vec<f64>> {
    if sample.is_empty() {
        return Err(Error::empty_input(operation));
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite(operation));
    }

    let mut sorted: Vec<f64> = sample.iter().map(Numeric::to_f64).collect();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Interpolated percentile of pre-sorted data
///
/// # Arguments
/// * `sorted` - The data sample, already sorted ascending
/// * `p` - The probability (0.0 to 1.0)
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(Error::empty_input("percentile"));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_quantile(p));
    }
    Ok(interpolate(sorted, p))
}

/// Interpolated percentile of an unsorted sample
///
/// The caller's slice is left untouched; a sorted copy is made internally.
pub fn percentile<T: Numeric>(sample: &[T], p: f64) -> Result<f64> {
    let sorted = sorted_finite(sample, "percentile")?;
    percentile_sorted(&sorted, p)
}

/// Interquartile range `P75 - P25` of an unsorted sample
///
/// # Errors
/// Besides empty and non-finite samples, a sample whose quartiles lie more
/// than `f64::MAX` apart yields [`Error::Computation`].
pub fn interquartile_range<T: Numeric>(sample: &[T]) -> Result<f64> {
    let sorted = sorted_finite(sample, "interquartile range")?;
    let (q1, q3) = quartiles_sorted(&sorted);
    let iqr = q3 - q1;
    if iqr.is_finite() {
        Ok(iqr)
    } else {
        Err(Error::Computation(
            "interquartile range exceeds the f64 range".to_string(),
        ))
    }
}

/// `(P25, P75)` of non-empty, sorted data
pub(crate) fn quartiles_sorted(sorted: &[f64]) -> (f64, f64) {
    (interpolate(sorted, 0.25), interpolate(sorted, 0.75))
}

// Caller guarantees `sorted` is non-empty and `p` lies in [0, 1].
fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    let (a, b) = (sorted[lo], sorted[hi]);
    let span = b - a;
    if span.is_finite() {
        a + frac * span
    } else {
        // a and b have opposite signs here, so neither product can overflow
        a * (1.0 - frac) + b * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_quartiles() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_relative_eq!(percentile(&data, 0.25).unwrap(), 3.25);
        assert_relative_eq!(percentile(&data, 0.75).unwrap(), 7.75);
        assert_relative_eq!(interquartile_range(&data).unwrap(), 4.5);
    }

    #[test]
    fn test_extremes_are_order_statistics() {
        let data = vec![4.0, -1.0, 9.5, 2.0];
        assert_eq!(percentile(&data, 0.0).unwrap(), -1.0);
        assert_eq!(percentile(&data, 1.0).unwrap(), 9.5);
        assert_relative_eq!(percentile(&data, 0.5).unwrap(), 3.0);
    }

    #[test]
    fn test_single_element() {
        assert_eq!(percentile(&[3.7], 0.25).unwrap(), 3.7);
        assert_eq!(interquartile_range(&[3.7]).unwrap(), 0.0);
    }

    #[test]
    fn test_integer_sample() {
        let data = [10u32, 20, 30, 40, 50];
        assert_relative_eq!(percentile(&data, 0.25).unwrap(), 20.0);
        assert_relative_eq!(percentile(&data, 0.1).unwrap(), 14.0);
    }

    #[test]
    fn test_sample_not_mutated() {
        let data = vec![3.0, 1.0, 2.0];
        let _ = percentile(&data, 0.5).unwrap();
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_invalid_probability() {
        let data = vec![1.0, 2.0];
        assert!(matches!(percentile(&data, 1.5), Err(Error::InvalidParameter(_))));
        assert!(matches!(percentile(&data, -0.1), Err(Error::InvalidParameter(_))));
        assert!(matches!(percentile(&data, f64::NAN), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_quartiles_near_f64_limits() {
        let data = [-1.7e308, 0.0, 0.0, 1.7e308];
        assert_relative_eq!(percentile(&data, 0.25).unwrap(), -0.425e308, max_relative = 1e-12);
        assert_relative_eq!(percentile(&data, 0.75).unwrap(), 0.425e308, max_relative = 1e-12);
        assert_relative_eq!(
            percentile(&[-1.7e308, 1.7e308], 0.5).unwrap(),
            0.0,
            epsilon = 1e295
        );
        assert_relative_eq!(interquartile_range(&data).unwrap(), 0.85e308, max_relative = 1e-12);
        assert!(matches!(
            interquartile_range(&[-f64::MAX, -f64::MAX, f64::MAX, f64::MAX]),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn test_empty_and_non_finite() {
        assert!(matches!(percentile::<f64>(&[], 0.5), Err(Error::EmptyInput { .. })));
        assert!(matches!(percentile_sorted(&[], 0.5), Err(Error::EmptyInput { .. })));
        assert!(matches!(
            interquartile_range(&[1.0, f64::NAN]),
            Err(Error::Computation(_))
        ));
    }
}
