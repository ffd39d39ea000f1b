//! Histogram plots of simulation samples

use fissile_core::{Error, Result};
use fissile_histogram::{FreedmanDiaconisRule, Histogram, HistogramBuilder};
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, instrument};

/// Bin `sample` with the Freedman-Diaconis rule and draw the bars to an SVG file
///
/// Returns the histogram that was drawn.
#[instrument(skip(sample, path), fields(n = sample.len(), path = %path.as_ref().display()))]
pub fn render_histogram(sample: &[f64], path: impl AsRef<Path>, title: &str) -> Result<Histogram> {
    let histogram = FreedmanDiaconisRule.build(sample)?;
    draw_histogram(&histogram, path.as_ref(), title).map_err(Error::render)?;
    info!(bins = histogram.len(), "rendered histogram");
    Ok(histogram)
}

/// Horizontal extent of the plot; a single-valued sample gets a unit-wide window
pub(crate) fn x_range(histogram: &Histogram) -> (f64, f64) {
    if histogram.range() > 0.0 {
        (histogram.min(), histogram.max())
    } else {
        (histogram.min() - 0.5, histogram.max() + 0.5)
    }
}

fn draw_histogram(
    histogram: &Histogram,
    path: &Path,
    title: &str,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, (1200, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_min, x_max) = x_range(histogram);
    let y_max = (histogram.max_count().max(1) as f64) * 1.1;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("value")
        .y_desc("count")
        .draw()?;

    let fill = RGBColor(0x4A, 0x90, 0xE2);
    let edge = RGBColor(0x2E, 0x5C, 0x8A);
    for bin in histogram.bins() {
        let (left, right) = if bin.width() > 0.0 {
            (bin.left, bin.right)
        } else {
            (x_min, x_max)
        };
        let corners = [(left, 0.0), (right, bin.count as f64)];
        chart.draw_series([
            Rectangle::new(corners, fill.mix(0.8).filled()),
            Rectangle::new(corners, edge.stroke_width(1)),
        ])?;
    }

    root.present()?;
    Ok(())
}
