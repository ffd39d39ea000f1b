//! # fissile
//!
//! Model construction, engine orchestration and plotting for a bare
//! uranium-water sphere criticality study.
//!
//! ## Crates
//!
//! - [`core`]: shared error type and numeric trait
//! - [`histogram`]: percentiles and Freedman-Diaconis bin selection
//! - [`model`]: materials, geometry, settings, `model.xml` export and the engine runner
//! - [`viz`]: geometry schematic and histogram figures (feature `viz`)
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use fissile::prelude::*;
//!
//! let config = SphereConfig::default();
//! let model = k_system(&config)?;
//! model.export_to_model_xml("k_system")?;
//!
//! let absorption_times = vec![0.4, 1.3, 2.2, 2.5, 3.9, 7.1];
//! let bins = optimal_bin_count(&absorption_times)?;
//! println!("{bins} bins");
//! # Ok::<(), fissile::core::Error>(())
//! ```

pub use fissile_core as core;
pub use fissile_histogram as histogram;
pub use fissile_model as model;
#[cfg(feature = "viz")]
pub use fissile_viz as viz;

pub use fissile_core::{Error, Result};

/// Common imports
pub mod prelude {
    pub use fissile_core::prelude::*;
    pub use fissile_histogram::{
        fd_histogram, optimal_bin_count, BinCountRule, FreedmanDiaconisRule, Histogram,
        HistogramBuilder,
    };
    pub use fissile_model::{
        collision_track_system, k_system, Model, OpenMcExecutable, SphereConfig, TransportEngine,
    };
    #[cfg(feature = "viz")]
    pub use fissile_viz::{geometry_summary, render_histogram, render_schematic, SchematicLayout};
}
