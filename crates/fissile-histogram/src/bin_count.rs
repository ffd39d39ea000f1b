//! Bin-count selection
//!
//! The Freedman-Diaconis rule picks a bin width of `2 * IQR / n^(1/3)`, which
//! is robust to outliers because the IQR ignores the tails. The bin count is
//! then `ceil(range / width)`, never less than one.

use crate::percentile::{quartiles_sorted, sorted_finite};
use fissile_core::{Error, Numeric, Result};

/// Recommended number of histogram bins for `sample` (Freedman-Diaconis rule)
///
/// Degenerate samples (a single value, or more than half the sample sharing
/// one value so that the IQR vanishes) yield one bin.
///
/// # Errors
/// * [`fissile_core::Error::EmptyInput`] if `sample` is empty
/// * [`fissile_core::Error::Computation`] if `sample` contains NaN or infinities
///
/// # Example
///
/// ```rust
/// use fissile_histogram::optimal_bin_count;
///
/// let sample: Vec<f64> = (1..=10).map(f64::from).collect();
/// assert_eq!(optimal_bin_count(&sample).unwrap(), 3);
/// assert_eq!(optimal_bin_count(&[5.0, 5.0, 5.0, 5.0]).unwrap(), 1);
/// ```
pub fn optimal_bin_count<T: Numeric>(sample: &[T]) -> Result<usize> {
    let sorted = sorted_finite(sample, "Freedman-Diaconis bin count")?;
    Ok(freedman_diaconis_sorted(&sorted))
}

/// Freedman-Diaconis bin width `2 * IQR / n^(1/3)` for sorted data
///
/// # Errors
/// * [`Error::EmptyInput`] if `sorted` is empty
/// * [`Error::Computation`] if it contains NaN or infinities, or the width
///   itself exceeds the f64 range
/// * [`Error::InvalidInput`] if it is not sorted ascending
pub fn freedman_diaconis_width(sorted: &[f64]) -> Result<f64> {
    const OPERATION: &str = "Freedman-Diaconis width";
    if sorted.is_empty() {
        return Err(Error::empty_input(OPERATION));
    }
    if sorted.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite(OPERATION));
    }
    if sorted.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::InvalidInput(format!(
            "{OPERATION} needs data sorted ascending"
        )));
    }

    let (half_iqr, _) = half_spans(sorted);
    let width = half_iqr / (sorted.len() as f64).cbrt() * 4.0;
    if width.is_finite() {
        Ok(width)
    } else {
        Err(Error::Computation(format!("{OPERATION} exceeds the f64 range")))
    }
}

/// Half the interquartile range and half the range of sorted data
///
/// Both spans are taken between halved values so they stay finite for
/// samples reaching towards `±f64::MAX`. Halving is exact for normal values,
/// and the bin count depends only on the ratio of the two.
fn half_spans(sorted: &[f64]) -> (f64, f64) {
    let (q1, q3) = quartiles_sorted(sorted);
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    (q3 / 2.0 - q1 / 2.0, max / 2.0 - min / 2.0)
}

/// Bin count for non-empty, finite, sorted data
///
/// `range / width` is evaluated as `(range / IQR) * n^(1/3) / 2`, which never
/// forms the width and cannot overflow before the final saturation.
pub(crate) fn freedman_diaconis_sorted(sorted: &[f64]) -> usize {
    let (half_iqr, half_range) = half_spans(sorted);
    // Zero IQR makes the width vanish; the ratio below would be inf or NaN.
    if half_iqr <= 0.0 {
        return 1;
    }

    let n = sorted.len() as f64;
    clamp_count((half_range / half_iqr * n.cbrt() / 2.0).ceil())
}

/// Convert a raw (already rounded) bin count to `usize`, flooring at one
fn clamp_count(raw: f64) -> usize {
    if raw.is_nan() || raw < 1.0 {
        1
    } else if raw >= usize::MAX as f64 {
        usize::MAX
    } else {
        raw as usize
    }
}

/// A strategy for choosing how many bins a histogram gets
pub trait BinCountRule {
    /// Number of bins to use for `sample`
    fn bin_count(&self, sample: &[f64]) -> Result<usize>;

    /// Short human-readable name of the rule
    fn name(&self) -> &'static str;
}
