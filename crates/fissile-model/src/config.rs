//! Scenario configuration
//!
//! Every constant that shapes the sphere models lives here so a study can be
//! re-run from a JSON file instead of editing code. Missing fields fall back
//! to the reference values.

use fissile_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fuel mixture composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Atom fraction of U-235; the rest is H2O split 2:1 between H1 and O16
    pub u235_fraction: f64,
    /// g/cm3
    pub density: f64,
    pub thermal_scattering: Option<String>,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            u235_fraction: 0.00113,
            density: 1.0,
            thermal_scattering: Some("c_H_in_H2O".to_string()),
        }
    }
}

impl FuelConfig {
    pub fn h1_fraction(&self) -> f64 {
        2.0 * (1.0 - self.u235_fraction) / 3.0
    }

    pub fn o16_fraction(&self) -> f64 {
        (1.0 - self.u235_fraction) / 3.0
    }
}

/// Sphere radii, in cm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereGeometryConfig {
    pub fuel_radius: f64,
    /// Distance from the fuel surface to the vacuum boundary
    pub vacuum_margin: f64,
}

impl Default for SphereGeometryConfig {
    fn default() -> Self {
        Self {
            fuel_radius: 20.0,
            vacuum_margin: 100.0,
        }
    }
}

impl SphereGeometryConfig {
    pub fn outer_radius(&self) -> f64 {
        self.fuel_radius + self.vacuum_margin
    }
}

/// Boron absorber detector spheres placed on the ±y axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub radius: f64,
    /// Distance from the fuel surface to each detector centre
    pub offset: f64,
    pub absorber_nuclide: String,
    /// g/cm3
    pub absorber_density: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            offset: 10.0,
            absorber_nuclide: "B10".to_string(),
            absorber_density: 2.34 * 10.0,
        }
    }
}

/// Eigenvalue (criticality) run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalityRunConfig {
    pub batches: u32,
    pub inactive: u32,
    pub particles: u64,
    pub output_path: PathBuf,
}

impl Default for CriticalityRunConfig {
    fn default() -> Self {
        Self {
            batches: 100,
            inactive: 30,
            particles: 100_000,
            output_path: PathBuf::from("../data/k_system"),
        }
    }
}

/// Fixed-source collision-tracking run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionTrackRunConfig {
    pub batches: u32,
    pub particles: u64,
    /// eV
    pub source_energy: f64,
    pub source_position: [f64; 3],
    /// Collision-file capacity per simulated history
    pub collisions_per_history: u64,
    pub reactions: Vec<String>,
    pub create_delayed_neutrons: bool,
    pub output_path: PathBuf,
}

impl Default for CollisionTrackRunConfig {
    fn default() -> Self {
        Self {
            batches: 100,
            particles: 10_000,
            source_energy: 2.5e6,
            source_position: [0.0, 0.0, 0.0],
            collisions_per_history: 50,
            reactions: vec!["absorption".to_string()],
            create_delayed_neutrons: false,
            output_path: PathBuf::from("../data/simple_collision_track"),
        }
    }
}

impl CollisionTrackRunConfig {
    pub fn max_collisions(&self) -> u64 {
        self.collisions_per_history
            .saturating_mul(self.batches as u64)
            .saturating_mul(self.particles)
    }
}

/// Complete configuration of the sphere study
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub fuel: FuelConfig,
    pub geometry: SphereGeometryConfig,
    pub detector: DetectorConfig,
    pub criticality: CriticalityRunConfig,
    pub collision_track: CollisionTrackRunConfig,
}

impl SphereConfig {
    /// Load from a JSON file; absent fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Distance from the origin to each detector centre
    pub fn detector_distance(&self) -> f64 {
        self.geometry.fuel_radius + self.detector.offset
    }

    /// Reject non-physical values before any model is built
    pub fn validate(&self) -> Result<()> {
        let f = self.fuel.u235_fraction;
        if !(f > 0.0 && f < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "U-235 fraction must lie in (0, 1), got {f}"
            )));
        }
        positive("fuel density", self.fuel.density)?;
        positive("fuel radius", self.geometry.fuel_radius)?;
        positive("vacuum margin", self.geometry.vacuum_margin)?;
        positive("detector radius", self.detector.radius)?;
        positive("absorber density", self.detector.absorber_density)?;
        positive("source energy", self.collision_track.source_energy)?;

        if self.detector.offset < self.detector.radius {
            return Err(Error::InvalidParameter(format!(
                "detector (radius {}) at offset {} would overlap the fuel",
                self.detector.radius, self.detector.offset
            )));
        }
        let far_edge = self.detector_distance() + self.detector.radius;
        if far_edge >= self.geometry.outer_radius() {
            return Err(Error::InvalidParameter(format!(
                "detector reaches {far_edge} cm, beyond the vacuum boundary at {} cm",
                self.geometry.outer_radius()
            )));
        }
        Ok(())
    }
}

fn positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!("{what} must be positive, got {value}")))
    }
}
