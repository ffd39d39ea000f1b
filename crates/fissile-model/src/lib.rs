//! Model description for an OpenMC-compatible transport engine
//!
//! A [`Model`] bundles [`Materials`], a [`Geometry`] built from surfaces and
//! half-space [`Region`]s, and run [`Settings`]. It is exported as a single
//! `model.xml` and handed to a [`TransportEngine`]; no transport physics is
//! done here.
//!
//! # Example
//!
//! ```rust
//! use fissile_model::{
//!     BoundaryType, Cell, DensityUnits, Fill, Geometry, Material, Materials, Model,
//!     PercentType, Settings, Surface,
//! };
//!
//! let water = Material::new(1, "Water")
//!     .with_nuclide("H1", 2.0, PercentType::Atom)
//!     .with_nuclide("O16", 1.0, PercentType::Atom)
//!     .with_density(DensityUnits::GramsPerCc, 1.0);
//!
//! let ball = Surface::sphere(1, 20.0);
//! let edge = Surface::sphere(2, 120.0).with_boundary(BoundaryType::Vacuum);
//! let geometry = Geometry::new(vec![
//!     Cell::new(1, "water", Fill::Material(1), ball.inside()),
//!     Cell::void(2, "void", ball.outside() & edge.inside()),
//! ]);
//!
//! let model = Model::new(geometry, Materials::new(vec![water]), Settings::default());
//! let xml = model.to_xml().unwrap();
//! assert!(xml.contains(r#"region="1 -2""#));
//! ```
//!
//! The two sphere studies are available ready-made in [`presets`].

pub mod config;
pub mod engine;
pub mod geometry;
pub mod material;
pub mod model;
pub mod presets;
pub mod settings;
pub mod surface;

mod xml;

pub use config::SphereConfig;
pub use engine::{OpenMcExecutable, RunReport, TransportEngine};
pub use geometry::{Cell, Fill, Geometry};
pub use material::{Density, DensityUnits, Material, Materials, NuclideFraction, PercentType};
pub use model::{Model, MODEL_FILE};
pub use presets::{collision_track_system, k_system};
pub use settings::{CollisionTrack, Discrete, IndependentSource, RunMode, Settings};
pub use surface::{BoundaryType, Halfspace, Point, Region, Side, Surface, SurfaceKind};

pub use fissile_core::{Error, Result};
