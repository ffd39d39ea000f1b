//! Histogram representation

use std::fmt;

/// A single bin in a histogram
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// Left edge of the bin (inclusive)
    pub left: f64,
    /// Right edge of the bin (exclusive, except for the last bin)
    pub right: f64,
    /// Number of values in this bin
    pub count: usize,
    /// Density (count / (total_count * bin_width)), zero for zero-width bins
    pub density: f64,
}

impl HistogramBin {
    /// Create a new histogram bin
    pub fn new(left: f64, right: f64, count: usize, total_count: usize) -> Self {
        let mut bin = Self {
            left,
            right,
            count,
            density: 0.0,
        };
        bin.update_density(total_count);
        bin
    }

    pub(crate) fn update_density(&mut self, total_count: usize) {
        let width = self.width();
        self.density = if width > 0.0 && total_count > 0 {
            self.count as f64 / (total_count as f64 * width)
        } else {
            0.0
        };
    }

    /// Centre of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a value falls within this bin (right edge excluded)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.left && value < self.right
    }

    /// Relative frequency (count / total_count)
    pub fn frequency(&self, total_count: usize) -> f64 {
        if total_count > 0 {
            self.count as f64 / total_count as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}): count={}, density={:.3}",
            self.left, self.right, self.count, self.density
        )
    }
}

/// A histogram of a finite sample
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    total_count: usize,
    min: f64,
    max: f64,
}

impl Histogram {
    /// Create a new histogram
    pub fn new(bins: Vec<HistogramBin>, total_count: usize, min: f64, max: f64) -> Self {
        Self {
            bins,
            total_count,
            min,
            max,
        }
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total count of data points
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Smallest sample value
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample value
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Largest count in any bin
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Find which bin contains a given value
    pub fn find_bin(&self, value: f64) -> Option<usize> {
        // Last bin is closed on the right
        if let Some(last) = self.bins.last() {
            if value == last.right {
                return Some(self.bins.len() - 1);
            }
        }

        self.bins.iter().position(|bin| bin.contains(value))
    }

    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    pub fn densities(&self) -> Vec<f64> {
        self.bins.iter().map(|bin| bin.density).collect()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|bin| bin.frequency(self.total_count))
            .collect()
    }

    pub fn centers(&self) -> Vec<f64> {
        self.bins.iter().map(HistogramBin::center).collect()
    }

    /// Bin edges, including the rightmost edge
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|bin| bin.left).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.right);
        }
        edges
    }

    /// Create a normalized copy whose densities integrate to one
    pub fn normalize(&self) -> Self {
        let mut normalized = self.clone();
        let total: f64 = self.bins.iter().map(|bin| bin.density * bin.width()).sum();

        if total > 0.0 {
            for bin in &mut normalized.bins {
                bin.density /= total;
            }
        }

        normalized
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, range=[{:.3}, {:.3}])",
            self.len(),
            self.total_count,
            self.min,
            self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bin() {
        let bin = HistogramBin::new(0.0, 1.0, 5, 10);
        assert_eq!(bin.center(), 0.5);
        assert_eq!(bin.width(), 1.0);
        assert!(bin.contains(0.5));
        assert!(!bin.contains(1.0)); // Right edge is exclusive
        assert_eq!(bin.frequency(10), 0.5);
        assert_eq!(bin.density, 0.5);
    }

    #[test]
    fn test_zero_width_bin_has_zero_density() {
        let bin = HistogramBin::new(2.0, 2.0, 4, 4);
        assert_eq!(bin.density, 0.0);
        assert_eq!(bin.frequency(4), 1.0);
    }

    #[test]
    fn test_histogram() {
        let bins = vec![
            HistogramBin::new(0.0, 1.0, 2, 10),
            HistogramBin::new(1.0, 2.0, 5, 10),
            HistogramBin::new(2.0, 3.0, 3, 10),
        ];
        let hist = Histogram::new(bins, 10, 0.0, 3.0);

        assert_eq!(hist.len(), 3);
        assert_eq!(hist.total_count(), 10);
        assert_eq!(hist.range(), 3.0);
        assert_eq!(hist.max_count(), 5);
        assert_eq!(hist.find_bin(1.5), Some(1));
        assert_eq!(hist.find_bin(3.0), Some(2)); // Last bin includes right edge
        assert_eq!(hist.find_bin(3.5), None);
        assert_eq!(hist.counts(), vec![2, 5, 3]);
        assert_eq!(hist.edges(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(hist.to_string(), "Histogram(3 bins, n=10, range=[0.000, 3.000])");
    }

    #[test]
    fn test_normalize() {
        let bins = vec![
            HistogramBin::new(0.0, 2.0, 1, 4),
            HistogramBin::new(2.0, 4.0, 3, 4),
        ];
        let hist = Histogram::new(bins, 4, 0.0, 4.0).normalize();
        let area: f64 = hist.bins().iter().map(|b| b.density * b.width()).sum();
        assert!((area - 1.0).abs() < 1e-12);
    }
}
