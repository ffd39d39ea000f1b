//! Core traits for histogram building

use crate::types::Histogram;
use fissile_core::{Numeric, Result};

/// Trait for building histograms from sample data
pub trait HistogramBuilder<T: Numeric = f64> {
    /// Build a histogram from the given sample
    fn build(&self, sample: &[T]) -> Result<Histogram>;

    /// Build a histogram from pre-sorted data
    ///
    /// Default implementation just calls build().
    fn build_sorted(&self, sorted_sample: &[T]) -> Result<Histogram> {
        self.build(sorted_sample)
    }

    /// Get the target number of bins (if known before seeing data)
    fn target_bins(&self) -> Option<usize> {
        None
    }
}
