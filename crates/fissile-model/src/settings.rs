//! Run settings: mode, particle counts, source and collision tracking

use crate::surface::Point;
use crate::xml::{join, XmlWriter};
use fissile_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the engine runs the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// k-eigenvalue (criticality) calculation
    #[default]
    Eigenvalue,
    /// Fixed external source
    FixedSource,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eigenvalue => "eigenvalue",
            Self::FixedSource => "fixed source",
        }
    }
}

/// Discrete distribution: `values[i]` with probability `probabilities[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrete {
    pub values: Vec<f64>,
    pub probabilities: Vec<f64>,
}

impl Discrete {
    pub fn new(values: Vec<f64>, probabilities: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::empty_input("discrete distribution"));
        }
        if values.len() != probabilities.len() {
            return Err(Error::InvalidInput(format!(
                "discrete distribution has {} values but {} probabilities",
                values.len(),
                probabilities.len()
            )));
        }
        if probabilities.iter().any(|p| !(p.is_finite() && *p >= 0.0)) {
            return Err(Error::InvalidParameter(
                "discrete probabilities must be finite and non-negative".to_string(),
            ));
        }
        if probabilities.iter().sum::<f64>() <= 0.0 {
            return Err(Error::InvalidParameter(
                "discrete probabilities sum to zero".to_string(),
            ));
        }
        Ok(Self {
            values,
            probabilities,
        })
    }

    /// Single value with probability one
    pub fn delta(value: f64) -> Self {
        Self {
            values: vec![value],
            probabilities: vec![1.0],
        }
    }

    fn write_xml(&self, xml: &mut XmlWriter, tag: &str) {
        let mut params = self.values.clone();
        params.extend_from_slice(&self.probabilities);
        xml.open(tag, &[("type", "discrete".to_string())]);
        xml.text("parameters", &join(&params));
        xml.close(tag);
    }
}

/// Source emitting from one point with independent energy and time distributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndependentSource {
    pub position: Point,
    /// Energy distribution in eV
    pub energy: Discrete,
    /// Emission time distribution in seconds
    pub time: Option<Discrete>,
    pub strength: f64,
}

impl IndependentSource {
    /// Monoenergetic point source emitting a single pulse at `t = 0`
    pub fn point_pulse(position: Point, energy_ev: f64) -> Self {
        Self {
            position,
            energy: Discrete::delta(energy_ev),
            time: Some(Discrete::delta(0.0)),
            strength: 1.0,
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.position.iter().all(|c| c.is_finite()) {
            return Err(Error::non_finite("source position"));
        }
        if self.energy.values.iter().any(|e| !(e.is_finite() && *e > 0.0)) {
            return Err(Error::InvalidParameter("source energies must be positive".to_string()));
        }
        if let Some(time) = &self.time {
            if time.values.iter().any(|t| !(t.is_finite() && *t >= 0.0)) {
                return Err(Error::InvalidParameter("emission times must be non-negative".to_string()));
            }
        }
        if !(self.strength.is_finite() && self.strength > 0.0) {
            return Err(Error::InvalidParameter("source strength must be positive".to_string()));
        }
        Ok(())
    }

    fn write_xml(&self, xml: &mut XmlWriter) {
        xml.open(
            "source",
            &[
                ("particle", "neutron".to_string()),
                ("strength", self.strength.to_string()),
                ("type", "independent".to_string()),
            ],
        );
        xml.open("space", &[("type", "point".to_string())]);
        xml.text("parameters", &join(&self.position));
        xml.close("space");
        self.energy.write_xml(xml, "energy");
        if let Some(time) = &self.time {
            time.write_xml(xml, "time");
        }
        xml.close("source");
    }
}

/// Which collisions the engine records to its collision-track file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionTrack {
    pub max_collisions: u64,
    /// Reaction names, e.g. `absorption`; empty means all
    pub reactions: Vec<String>,
    /// Restrict to these cells; empty means all
    pub cell_ids: Vec<u32>,
    pub material_ids: Vec<u32>,
    pub nuclides: Vec<String>,
}

impl CollisionTrack {
    fn write_xml(&self, xml: &mut XmlWriter) {
        xml.open("collision_track", &[]);
        xml.text("max_collisions", &self.max_collisions.to_string());
        if !self.reactions.is_empty() {
            xml.text("reactions", &self.reactions.join(" "));
        }
        if !self.cell_ids.is_empty() {
            xml.text("cell_ids", &join(&self.cell_ids));
        }
        if !self.material_ids.is_empty() {
            xml.text("material_ids", &join(&self.material_ids));
        }
        if !self.nuclides.is_empty() {
            xml.text("nuclides", &self.nuclides.join(" "));
        }
        xml.close("collision_track");
    }
}

/// Engine run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub run_mode: RunMode,
    pub batches: u32,
    /// Discarded batches while the fission source converges (eigenvalue only)
    pub inactive: u32,
    /// Particles per batch
    pub particles: u64,
    pub source: Option<IndependentSource>,
    pub collision_track: Option<CollisionTrack>,
    /// `None` leaves the engine default
    pub create_delayed_neutrons: Option<bool>,
    /// Directory the engine writes results into, relative to its working directory
    pub output_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            run_mode: RunMode::Eigenvalue,
            batches: 100,
            inactive: 0,
            particles: 1000,
            source: None,
            collision_track: None,
            create_delayed_neutrons: None,
            output_path: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.batches == 0 {
            return Err(Error::InvalidParameter("batches must be positive".to_string()));
        }
        if self.particles == 0 {
            return Err(Error::InvalidParameter("particles must be positive".to_string()));
        }
        match self.run_mode {
            RunMode::Eigenvalue if self.inactive >= self.batches => {
                return Err(Error::InvalidParameter(format!(
                    "inactive batches ({}) must be fewer than batches ({})",
                    self.inactive, self.batches
                )));
            }
            RunMode::FixedSource if self.source.is_none() => {
                return Err(Error::Model("fixed-source run has no source".to_string()));
            }
            RunMode::FixedSource if self.inactive > 0 => {
                return Err(Error::InvalidParameter(
                    "inactive batches only apply to eigenvalue runs".to_string(),
                ));
            }
            _ => {}
        }
        if let Some(source) = &self.source {
            source.validate()?;
        }
        if let Some(track) = &self.collision_track {
            if track.max_collisions == 0 {
                return Err(Error::InvalidParameter(
                    "collision track max_collisions must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn write_xml(&self, xml: &mut XmlWriter) {
        xml.open("settings", &[]);
        xml.text("run_mode", self.run_mode.as_str());
        xml.text("particles", &self.particles.to_string());
        xml.text("batches", &self.batches.to_string());
        if self.run_mode == RunMode::Eigenvalue {
            xml.text("inactive", &self.inactive.to_string());
        }
        if let Some(source) = &self.source {
            source.write_xml(xml);
        }
        if let Some(path) = &self.output_path {
            xml.open("output", &[]);
            xml.text("path", &path.to_string_lossy());
            xml.close("output");
        }
        if let Some(track) = &self.collision_track {
            track.write_xml(xml);
        }
        if let Some(delayed) = self.create_delayed_neutrons {
            xml.text("create_delayed_neutrons", if delayed { "true" } else { "false" });
        }
        xml.close("settings");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete_validation() {
        assert!(Discrete::new(vec![1.0, 2.0], vec![0.5, 0.5]).is_ok());
        assert!(Discrete::new(vec![1.0, 2.0], vec![1.0]).is_err());
        assert!(Discrete::new(vec![], vec![]).is_err());
        assert!(Discrete::new(vec![1.0], vec![-1.0]).is_err());
        assert!(Discrete::new(vec![1.0], vec![0.0]).is_err());
    }

    #[test]
    fn test_eigenvalue_needs_active_batches() {
        let settings = Settings {
            batches: 30,
            inactive: 30,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            batches: 100,
            inactive: 30,
            particles: 100_000,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_fixed_source_needs_source() {
        let mut settings = Settings {
            run_mode: RunMode::FixedSource,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Model(_))));

        settings.source = Some(IndependentSource::point_pulse([0.0; 3], 2.5e6));
        assert!(settings.validate().is_ok());

        settings.source = Some(IndependentSource::point_pulse([0.0; 3], -1.0));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_zero_counts_rejected() {
        let settings = Settings {
            particles: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            batches: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_xml() {
        let settings = Settings {
            run_mode: RunMode::FixedSource,
            batches: 100,
            inactive: 0,
            particles: 10_000,
            source: Some(IndependentSource::point_pulse([0.0; 3], 2.5e6)),
            collision_track: Some(CollisionTrack {
                max_collisions: 50_000_000,
                reactions: vec!["absorption".to_string()],
                cell_ids: vec![2, 3],
                ..Default::default()
            }),
            create_delayed_neutrons: Some(false),
            output_path: Some(PathBuf::from("../data/run")),
        };
        let mut xml = XmlWriter::new();
        settings.write_xml(&mut xml);
        let out = xml.finish();

        assert!(out.contains("<run_mode>fixed source</run_mode>"));
        assert!(!out.contains("<inactive>"));
        assert!(out.contains(r#"<source particle="neutron" strength="1" type="independent">"#));
        assert!(out.contains("<parameters>2500000 1</parameters>"));
        assert!(out.contains("<parameters>0 1</parameters>"));
        assert!(out.contains("<max_collisions>50000000</max_collisions>"));
        assert!(out.contains("<cell_ids>2 3</cell_ids>"));
        assert!(out.contains("<path>../data/run</path>"));
        assert!(out.contains("<create_delayed_neutrons>false</create_delayed_neutrons>"));
    }
}
