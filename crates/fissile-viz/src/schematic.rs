//! Cross-section diagram of the sphere system
//!
//! The diagram is a 2-D slice through the centre: the vacuum boundary, the
//! homogeneous mixture sphere and one detector sphere on the +x axis, with
//! dimension lines for both diameters and the surface-to-surface gap.

use fissile_core::{Error, Result};
use fissile_model::SphereConfig;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::TAU;
use std::path::Path;
use tracing::{debug, info, instrument};

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;
type Xy = (f64, f64);

/// Polygon resolution used for circles
const CIRCLE_SEGMENTS: usize = 180;
/// Dashes per full circle on the vacuum boundary
const CIRCLE_DASHES: usize = 48;
/// cm
const LEADER_DASH: f64 = 1.2;
const ARROW_LENGTH: f64 = 1.6;
const ARROW_HALF_WIDTH: f64 = 0.8;

/// Fill and edge colours of one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionStyle {
    pub fill: (u8, u8, u8),
    pub edge: (u8, u8, u8),
    /// Fill opacity
    pub opacity: f64,
}

impl RegionStyle {
    pub const fn new(fill: (u8, u8, u8), edge: (u8, u8, u8), opacity: f64) -> Self {
        Self { fill, edge, opacity }
    }

    fn fill_color(&self) -> RGBAColor {
        RGBColor(self.fill.0, self.fill.1, self.fill.2).mix(self.opacity)
    }

    fn edge_color(&self) -> RGBColor {
        RGBColor(self.edge.0, self.edge.1, self.edge.2)
    }
}

/// Dimensions (cm) and styling of the schematic
#[derive(Debug, Clone, PartialEq)]
pub struct SchematicLayout {
    pub vacuum_radius: f64,
    pub mixture_radius: f64,
    pub detector_radius: f64,
    /// Distance between the mixture surface and the detector surface
    pub gap: f64,
    /// Output image size in pixels
    pub size: (u32, u32),
    pub mixture: RegionStyle,
    pub detector: RegionStyle,
    pub vacuum: RegionStyle,
}

impl Default for SchematicLayout {
    fn default() -> Self {
        Self {
            vacuum_radius: 45.0,
            mixture_radius: 20.0,
            detector_radius: 5.0,
            gap: 10.0,
            size: (1000, 1000),
            mixture: RegionStyle::new((0x4A, 0x90, 0xE2), (0x2E, 0x5C, 0x8A), 0.8),
            detector: RegionStyle::new((0xE7, 0x4C, 0x3C), (0xA9, 0x32, 0x26), 0.8),
            vacuum: RegionStyle::new((0xEC, 0xF0, 0xF1), (0x34, 0x49, 0x5E), 0.3),
        }
    }
}

impl SchematicLayout {
    /// Layout matching the dimensions of a model configuration
    ///
    /// The vacuum circle is drawn at the default radius unless the detector
    /// would not fit inside it; the real vacuum boundary is far larger and
    /// would shrink the spheres to dots.
    pub fn from_config(config: &SphereConfig) -> Self {
        let defaults = Self::default();
        let mixture_radius = config.geometry.fuel_radius;
        let detector_radius = config.detector.radius;
        let gap = config.detector.offset - detector_radius;
        let far_edge = mixture_radius + gap + 2.0 * detector_radius;
        Self {
            vacuum_radius: defaults.vacuum_radius.max(far_edge + 10.0),
            mixture_radius,
            detector_radius,
            gap,
            ..defaults
        }
    }

    /// Centre of the detector sphere, on the +x axis
    pub fn detector_center(&self) -> Xy {
        (self.mixture_radius + self.gap + self.detector_radius, 0.0)
    }

    pub fn mixture_diameter(&self) -> f64 {
        2.0 * self.mixture_radius
    }

    pub fn detector_diameter(&self) -> f64 {
        2.0 * self.detector_radius
    }

    /// Half-width of the plotted square
    pub fn view_extent(&self) -> f64 {
        self.vacuum_radius + 10.0
    }

    fn mixture_dimension_y(&self) -> f64 {
        -(self.mixture_radius + 8.0)
    }

    fn detector_dimension_y(&self) -> f64 {
        -(self.detector_radius + 10.0)
    }

    fn gap_dimension_y(&self) -> f64 {
        self.mixture_radius + 8.0
    }

    fn vacuum_label_y(&self) -> f64 {
        self.mixture_radius + 12.0
    }

    /// Reject layouts that cannot be drawn as a sensible cross-section
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("vacuum radius", self.vacuum_radius),
            ("mixture radius", self.mixture_radius),
            ("detector radius", self.detector_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.gap.is_finite() && self.gap > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "detector must sit clear of the mixture, gap is {}",
                self.gap
            )));
        }
        let far_edge = self.detector_center().0 + self.detector_radius;
        if far_edge > self.vacuum_radius {
            return Err(Error::InvalidParameter(format!(
                "detector edge at {far_edge} cm lies outside the vacuum boundary at {} cm",
                self.vacuum_radius
            )));
        }
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(Error::InvalidParameter("image size must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Plain-text description of the drawn geometry
pub fn geometry_summary(layout: &SchematicLayout) -> String {
    let (cx, cy) = layout.detector_center();
    format!(
        "Geometry Summary:\n  \
         Vacuum boundary: R = {} cm (centered at origin)\n  \
         Mixture sphere: D = {} cm (centered at origin)\n  \
         Detector sphere: d = {} cm (center at x={} cm, y={})\n  \
         Gap between surfaces: {} cm",
        layout.vacuum_radius,
        layout.mixture_diameter(),
        layout.detector_diameter(),
        cx,
        cy,
        layout.gap
    )
}

/// Draw the cross-section to an SVG file
#[instrument(skip(layout, path), fields(path = %path.as_ref().display()))]
pub fn render_schematic(layout: &SchematicLayout, path: impl AsRef<Path>) -> Result<()> {
    layout.validate()?;
    draw_schematic(layout, path.as_ref()).map_err(Error::render)?;
    info!(
        mixture_radius = layout.mixture_radius,
        detector_radius = layout.detector_radius,
        gap = layout.gap,
        "rendered schematic"
    );
    Ok(())
}

fn draw_schematic(layout: &SchematicLayout, path: &Path) -> DrawResult<()> {
    let root = SVGBackend::new(path, layout.size).into_drawing_area();
    root.fill(&WHITE)?;

    let v = layout.view_extent();
    let mut chart = ChartBuilder::on(&root)
        .caption("System Geometry", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-v..v, -v..v)?;

    chart
        .configure_mesh()
        .x_desc("X (cm)")
        .y_desc("Y (cm)")
        .axis_desc_style(("sans-serif", 18, FontStyle::Bold))
        .draw()?;

    let origin = (0.0, 0.0);
    let detector = layout.detector_center();

    // vacuum boundary: translucent fill, dashed edge
    let vacuum_fill = layout.vacuum.fill_color();
    let vacuum_edge = layout.vacuum.edge_color();
    chart
        .draw_series(std::iter::once(Polygon::new(
            circle_points(origin, layout.vacuum_radius),
            vacuum_fill.filled(),
        )))?
        .label("Vacuum Boundary")
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 6), (x + 18, y + 6)], vacuum_fill.filled())
        });
    chart.draw_series(
        dashed_circle(origin, layout.vacuum_radius)
            .into_iter()
            .map(|dash| PathElement::new(dash, vacuum_edge.stroke_width(2))),
    )?;

    let mixture_fill = layout.mixture.fill_color();
    chart
        .draw_series(std::iter::once(Polygon::new(
            circle_points(origin, layout.mixture_radius),
            mixture_fill.filled(),
        )))?
        .label(format!("Homogeneous Mixture (D={} cm)", layout.mixture_diameter()))
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 6), (x + 18, y + 6)], mixture_fill.filled())
        });
    chart.draw_series(std::iter::once(PathElement::new(
        circle_points(origin, layout.mixture_radius),
        layout.mixture.edge_color().stroke_width(3),
    )))?;

    let detector_fill = layout.detector.fill_color();
    chart
        .draw_series(std::iter::once(Polygon::new(
            circle_points(detector, layout.detector_radius),
            detector_fill.filled(),
        )))?
        .label(format!("Detector Sphere (d={} cm)", layout.detector_diameter()))
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - 6), (x + 18, y + 6)], detector_fill.filled())
        });
    chart.draw_series(std::iter::once(PathElement::new(
        circle_points(detector, layout.detector_radius),
        layout.detector.edge_color().stroke_width(3),
    )))?;

    // axes through the origin
    let axis = BLACK.mix(0.4).stroke_width(1);
    chart.draw_series([
        PathElement::new(vec![(-v, 0.0), (v, 0.0)], axis),
        PathElement::new(vec![(0.0, -v), (0.0, v)], axis),
    ])?;

    // region labels
    chart.draw_series([
        Text::new("Homogeneous".to_string(), (0.0, 2.5), label_style(16.0, FontStyle::Bold)),
        Text::new("Mixture".to_string(), (0.0, -2.5), label_style(16.0, FontStyle::Bold)),
        Text::new("Detector".to_string(), detector, label_style(11.0, FontStyle::Bold)),
        Text::new(
            "Vacuum".to_string(),
            (0.0, layout.vacuum_label_y()),
            label_style(14.0, FontStyle::Italic),
        ),
    ])?;

    // dimension lines
    let r = layout.mixture_radius;
    let y = layout.mixture_dimension_y();
    draw_dimension(&mut chart, (-r, y), (r, y), format!("D = {} cm", layout.mixture_diameter()), -3.5)?;
    draw_leaders(&mut chart, &[((-r, 0.0), (-r, y)), ((r, 0.0), (r, y))])?;

    let (dx, dy) = detector;
    let dr = layout.detector_radius;
    let y = layout.detector_dimension_y();
    draw_dimension(
        &mut chart,
        (dx - dr, y),
        (dx + dr, y),
        format!("d = {} cm", layout.detector_diameter()),
        -3.5,
    )?;
    draw_leaders(&mut chart, &[((dx - dr, dy), (dx - dr, y)), ((dx + dr, dy), (dx + dr, y))])?;

    let y = layout.gap_dimension_y();
    let gap_end = dx - dr;
    draw_dimension(&mut chart, (r, y), (gap_end, y), format!("Gap = {} cm", layout.gap), 3.5)?;
    draw_leaders(&mut chart, &[((r, 0.0), (r, y)), ((gap_end, dy), (gap_end, y))])?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(("sans-serif", 14))
        .background_style(WHITE.mix(0.95))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    debug!(path = %path.display(), "schematic written");
    Ok(())
}

type SchematicChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<plotters::coord::types::RangedCoordf64, plotters::coord::types::RangedCoordf64>>;

/// Double-headed horizontal arrow from `from` to `to` with a centred caption
fn draw_dimension(
    chart: &mut SchematicChart<'_, '_>,
    from: Xy,
    to: Xy,
    caption: String,
    caption_offset: f64,
) -> DrawResult<()> {
    chart.draw_series(std::iter::once(PathElement::new(
        vec![from, to],
        BLACK.stroke_width(2),
    )))?;
    let direction = if to.0 >= from.0 { 1.0 } else { -1.0 };
    chart.draw_series([
        Polygon::new(arrow_head(to, direction), BLACK.filled()),
        Polygon::new(arrow_head(from, -direction), BLACK.filled()),
    ])?;
    let center = ((from.0 + to.0) / 2.0, from.1 + caption_offset);
    chart.draw_series(std::iter::once(Text::new(
        caption,
        center,
        label_style(13.0, FontStyle::Bold),
    )))?;
    Ok(())
}

/// Dashed leader lines joining a surface to its dimension line
fn draw_leaders(chart: &mut SchematicChart<'_, '_>, leaders: &[(Xy, Xy)]) -> DrawResult<()> {
    let style = BLACK.mix(0.5).stroke_width(1);
    chart.draw_series(
        leaders
            .iter()
            .flat_map(|&(from, to)| dash_segments(from, to, LEADER_DASH))
            .map(|segment| PathElement::new(segment, style)),
    )?;
    Ok(())
}

fn label_style(size: f64, style: FontStyle) -> TextStyle<'static> {
    TextStyle::from(("sans-serif", size, style).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Closed polygon approximating a circle
pub(crate) fn circle_points(center: Xy, radius: f64) -> Vec<Xy> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
            (center.0 + radius * theta.cos(), center.1 + radius * theta.sin())
        })
        .collect()
}

/// Arcs making up a dashed circle, dash and gap of equal length
pub(crate) fn dashed_circle(center: Xy, radius: f64) -> Vec<Vec<Xy>> {
    let per_dash = CIRCLE_SEGMENTS / (2 * CIRCLE_DASHES);
    let step = TAU / (2 * CIRCLE_DASHES) as f64;
    (0..CIRCLE_DASHES)
        .map(|k| {
            let start = 2.0 * k as f64 * step;
            (0..=per_dash.max(1))
                .map(|i| {
                    let theta = start + step * i as f64 / per_dash.max(1) as f64;
                    (center.0 + radius * theta.cos(), center.1 + radius * theta.sin())
                })
                .collect()
        })
        .collect()
}

/// Split a straight line into dashes of length `dash` separated by equal gaps
pub(crate) fn dash_segments(from: Xy, to: Xy, dash: f64) -> Vec<Vec<Xy>> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let length = dx.hypot(dy);
    if length == 0.0 || dash <= 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut segments = Vec::new();
    let mut s = 0.0;
    while s < length {
        let e = (s + dash).min(length);
        segments.push(vec![
            (from.0 + ux * s, from.1 + uy * s),
            (from.0 + ux * e, from.1 + uy * e),
        ]);
        s += 2.0 * dash;
    }
    segments
}

/// Triangle with its tip at `tip`, pointing along +x (`direction` 1) or -x (-1)
fn arrow_head(tip: Xy, direction: f64) -> Vec<Xy> {
    let base = tip.0 - direction * ARROW_LENGTH;
    vec![
        tip,
        (base, tip.1 + ARROW_HALF_WIDTH),
        (base, tip.1 - ARROW_HALF_WIDTH),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_layout() {
        let layout = SchematicLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.detector_center(), (35.0, 0.0));
        assert_eq!(layout.mixture_diameter(), 40.0);
        assert_eq!(layout.detector_diameter(), 10.0);
        assert_eq!(layout.view_extent(), 55.0);
        assert_eq!(layout.mixture_dimension_y(), -28.0);
        assert_eq!(layout.detector_dimension_y(), -15.0);
        assert_eq!(layout.gap_dimension_y(), 28.0);
        assert_eq!(layout.vacuum_label_y(), 32.0);
    }

    #[test]
    fn test_from_config() {
        let layout = SchematicLayout::from_config(&SphereConfig::default());
        assert_eq!(layout.mixture_radius, 20.0);
        assert_eq!(layout.gap, 5.0);
        // detector centre matches the model's fuel radius + offset
        assert_eq!(layout.detector_center(), (30.0, 0.0));
        assert_eq!(layout.vacuum_radius, 45.0);
        assert!(layout.validate().is_ok());

        let mut config = SphereConfig::default();
        config.geometry.fuel_radius = 40.0;
        let layout = SchematicLayout::from_config(&config);
        assert_eq!(layout.vacuum_radius, 65.0);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_invalid_layouts() {
        let overlapping = SchematicLayout {
            gap: -1.0,
            ..Default::default()
        };
        assert!(matches!(overlapping.validate(), Err(Error::InvalidParameter(_))));

        let outside = SchematicLayout {
            vacuum_radius: 30.0,
            ..Default::default()
        };
        assert!(outside.validate().is_err());

        let degenerate = SchematicLayout {
            mixture_radius: 0.0,
            ..Default::default()
        };
        assert!(degenerate.validate().is_err());
    }

    #[test]
    fn test_summary() {
        let summary = geometry_summary(&SchematicLayout::default());
        assert!(summary.contains("Vacuum boundary: R = 45 cm"));
        assert!(summary.contains("Mixture sphere: D = 40 cm"));
        assert!(summary.contains("Detector sphere: d = 10 cm (center at x=35 cm, y=0)"));
        assert!(summary.contains("Gap between surfaces: 10 cm"));
    }

    #[test]
    fn test_circle_points() {
        let points = circle_points((35.0, 0.0), 5.0);
        assert_eq!(points.len(), CIRCLE_SEGMENTS + 1);
        for (x, y) in &points {
            assert_relative_eq!((x - 35.0).hypot(*y), 5.0, epsilon = 1e-9);
        }
        assert_relative_eq!(points[0].0, points[CIRCLE_SEGMENTS].0, epsilon = 1e-9);
    }

    #[test]
    fn test_dashes() {
        let dashes = dash_segments((0.0, 0.0), (0.0, -10.0), 1.0);
        assert_eq!(dashes.len(), 5);
        assert_eq!(dashes[0], vec![(0.0, 0.0), (0.0, -1.0)]);
        assert!(dash_segments((1.0, 1.0), (1.0, 1.0), 1.0).is_empty());

        let arcs = dashed_circle((0.0, 0.0), 45.0);
        assert_eq!(arcs.len(), CIRCLE_DASHES);
        assert!(arcs.iter().all(|arc| arc.len() >= 2));
    }

    #[test]
    #[ignore = "requires system fonts"]
    fn test_render_schematic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system_plot.svg");
        render_schematic(&SchematicLayout::default(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Gap = 10 cm"));
    }

    #[test]
    fn test_render_rejects_invalid_layout() {
        let dir = tempfile::tempdir().unwrap();
        let layout = SchematicLayout {
            gap: 0.0,
            ..Default::default()
        };
        let result = render_schematic(&layout, dir.path().join("bad.svg"));
        assert!(result.is_err());
        assert!(!dir.path().join("bad.svg").exists());
    }
}
