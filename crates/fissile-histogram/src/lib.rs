//! Histogram support for simulation output
//!
//! Tallies and collision-track records coming out of the transport engine are
//! usually inspected as histograms. This crate provides:
//!
//! - **Interpolated percentiles**: the conventional linear-interpolation
//!   definition, including the interquartile range
//! - **Bin-count selection**: the Freedman-Diaconis rule, floored at one bin
//!   so degenerate samples never produce zero, infinite or NaN counts
//! - **Histogram types and builders**: fixed-width bins, or bins sized by a
//!   [`BinCountRule`]
//!
//! # Examples
//!
//! ## Choosing a bin count
//!
//! ```rust
//! use fissile_histogram::optimal_bin_count;
//!
//! let sample = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! // IQR = 4.5, width = 9 / 10^(1/3), range 9 -> ceil(2.15) = 3 bins
//! assert_eq!(optimal_bin_count(&sample).unwrap(), 3);
//!
//! // Empty samples are rejected explicitly
//! assert!(optimal_bin_count::<f64>(&[]).is_err());
//! ```
//!
//! ## Building a histogram
//!
//! ```rust
//! use fissile_histogram::{FreedmanDiaconisRule, HistogramBuilder};
//!
//! let times = vec![0.3, 1.1, 1.4, 2.2, 2.9, 3.0, 3.1, 4.8, 7.5];
//! let histogram = FreedmanDiaconisRule.build(&times).unwrap();
//!
//! for bin in histogram.bins() {
//!     println!("  {bin}");
//! }
//! assert_eq!(histogram.total_count(), times.len());
//! ```

pub mod bin_count;
pub mod builders;
pub mod percentile;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use bin_count::{freedman_diaconis_width, optimal_bin_count, BinCountRule};
pub use builders::{histogram_with_rule, FixedWidthBuilder, FreedmanDiaconisRule};
pub use percentile::{interquartile_range, percentile, percentile_sorted};
pub use traits::HistogramBuilder;
pub use types::{Histogram, HistogramBin};

pub use fissile_core::Result;

/// Create a histogram with a fixed number of equal-width bins
pub fn fixed_histogram(data: &[f64], num_bins: usize) -> Result<Histogram> {
    FixedWidthBuilder::new(num_bins).build(data)
}

/// Create a histogram whose bin count follows the Freedman-Diaconis rule
pub fn fd_histogram(data: &[f64]) -> Result<Histogram> {
    FreedmanDiaconisRule.build(data)
}
