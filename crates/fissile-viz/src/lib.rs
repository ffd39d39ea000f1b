//! Figures for the sphere study
//!
//! - [`render_schematic`]: SVG cross-section of the mixture sphere, detector
//!   and vacuum boundary with dimension lines
//! - [`render_histogram`]: SVG histogram of a sample, binned with the
//!   Freedman-Diaconis rule
//!
//! Both draw with `plotters` and need a system font for text.
//!
//! ```rust
//! use fissile_viz::{geometry_summary, SchematicLayout};
//!
//! let layout = SchematicLayout::default();
//! assert_eq!(layout.detector_center(), (35.0, 0.0));
//! println!("{}", geometry_summary(&layout));
//! ```

pub mod histogram;
pub mod schematic;

pub use histogram::render_histogram;
pub use schematic::{geometry_summary, render_schematic, RegionStyle, SchematicLayout};

pub use fissile_core::{Error, Result};
