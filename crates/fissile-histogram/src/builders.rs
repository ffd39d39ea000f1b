//! Histogram building strategies

use crate::bin_count::{freedman_diaconis_sorted, BinCountRule};
use crate::percentile::sorted_finite;
use crate::traits::HistogramBuilder;
use crate::types::{Histogram, HistogramBin};
use fissile_core::{Error, Numeric, Result};

/// Fixed-width histogram builder
///
/// Creates a histogram with a specified number of equal-width bins spanning
/// `[min, max]` of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthBuilder {
    num_bins: usize,
}

impl FixedWidthBuilder {
    /// Create a new fixed-width histogram builder (at least one bin)
    pub fn new(num_bins: usize) -> Self {
        Self {
            num_bins: num_bins.max(1),
        }
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Bin already sorted, finite `f64` data
    ///
    /// Fails with [`Error::Computation`] when the bin vector cannot be
    /// allocated, which happens for saturated counts from degenerate samples.
    pub(crate) fn bin_sorted_f64(&self, sorted: &[f64]) -> Result<Histogram> {
        let Some((&min, &max)) = sorted.first().zip(sorted.last()) else {
            return Ok(Histogram::new(vec![], 0, 0.0, 0.0));
        };
        let total = sorted.len();

        if max <= min {
            // All values are the same
            let bin = HistogramBin::new(min, max, total, total);
            return Ok(Histogram::new(vec![bin], total, min, max));
        }

        let mut bins: Vec<HistogramBin> = Vec::new();
        bins.try_reserve_exact(self.num_bins).map_err(|_| {
            Error::Computation(format!("cannot allocate {} histogram bins", self.num_bins))
        })?;
        bins.extend((0..self.num_bins).map(|i| {
            let left = edge(min, max, i, self.num_bins);
            let right = if i == self.num_bins - 1 {
                max // Ensure last bin includes max
            } else {
                edge(min, max, i + 1, self.num_bins)
            };
            HistogramBin::new(left, right, 0, total)
        }));

        // Single pass through sorted data
        let mut current = 0;
        for &value in sorted {
            while current < self.num_bins - 1 && value >= bins[current].right {
                current += 1;
            }
            bins[current].count += 1;
        }

        for bin in &mut bins {
            bin.update_density(total);
        }

        Ok(Histogram::new(bins, total, min, max))
    }
}

/// Left edge of bin `i` out of `num_bins` equal bins over `[min, max]`
fn edge(min: f64, max: f64, i: usize, num_bins: usize) -> f64 {
    let span = max - min;
    if span.is_finite() {
        min + i as f64 * (span / num_bins as f64)
    } else {
        // only reachable with min < 0 < max, so the products cannot overflow
        let t = i as f64 / num_bins as f64;
        min * (1.0 - t) + max * t
    }
}

impl<T: Numeric> HistogramBuilder<T> for FixedWidthBuilder {
    fn build(&self, sample: &[T]) -> Result<Histogram> {
        if sample.is_empty() {
            return Ok(Histogram::new(vec![], 0, 0.0, 0.0));
        }
        let sorted = sorted_finite(sample, "fixed-width histogram")?;
        self.bin_sorted_f64(&sorted)
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.num_bins)
    }
}

impl BinCountRule for FixedWidthBuilder {
    fn bin_count(&self, _sample: &[f64]) -> Result<usize> {
        Ok(self.num_bins)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Freedman-Diaconis rule for bin width
///
/// Uses the formula: h = 2 * IQR * n^(-1/3), with the IQR taken from
/// linearly interpolated quartiles. The resulting count is floored at one.
///
/// Unlike [`FixedWidthBuilder`], an empty sample is an error here since the
/// rule itself is undefined on zero elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreedmanDiaconisRule;

impl BinCountRule for FreedmanDiaconisRule {
    fn bin_count(&self, sample: &[f64]) -> Result<usize> {
        crate::optimal_bin_count(sample)
    }

    fn name(&self) -> &'static str {
        "freedman-diaconis"
    }
}

impl<T: Numeric> HistogramBuilder<T> for FreedmanDiaconisRule {
    fn build(&self, sample: &[T]) -> Result<Histogram> {
        let sorted = sorted_finite(sample, "Freedman-Diaconis histogram")?;
        let num_bins = freedman_diaconis_sorted(&sorted);
        FixedWidthBuilder::new(num_bins).bin_sorted_f64(&sorted)
    }
}

/// Build a histogram whose bin count is chosen by `rule`
pub fn histogram_with_rule<R: BinCountRule + ?Sized>(rule: &R, sample: &[f64]) -> Result<Histogram> {
    if sample.is_empty() {
        return Err(Error::empty_input(rule.name()));
    }
    let num_bins = rule.bin_count(sample)?;
    FixedWidthBuilder::new(num_bins).build(sample)
}
