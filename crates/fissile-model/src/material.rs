//! Material compositions
//!
//! A [`Material`] is a list of nuclides with atom or weight fractions, a
//! density, and optionally thermal scattering (`S(α,β)`) tables. Fractions are
//! handed to the engine as given; it normalises them itself.

use crate::xml::XmlWriter;
use fissile_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How a nuclide fraction is expressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentType {
    /// Atom fraction
    #[default]
    Atom,
    /// Weight fraction
    Weight,
}

impl PercentType {
    /// Attribute name the engine expects (`ao` / `wo`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Atom => "ao",
            Self::Weight => "wo",
        }
    }
}

/// Units of a material density
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityUnits {
    #[default]
    GramsPerCc,
    KgPerM3,
    AtomPerBarnCm,
    /// Density is the sum of the nuclide densities; no value is given
    Sum,
}

impl DensityUnits {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GramsPerCc => "g/cm3",
            Self::KgPerM3 => "kg/m3",
            Self::AtomPerBarnCm => "atom/b-cm",
            Self::Sum => "sum",
        }
    }
}

/// One nuclide entry of a material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuclideFraction {
    /// GNDS name, e.g. `U235`, `H1`
    pub name: String,
    pub fraction: f64,
    pub percent_type: PercentType,
}

/// Material density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub units: DensityUnits,
    /// `None` only for [`DensityUnits::Sum`]
    pub value: Option<f64>,
}

/// A homogeneous material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    id: u32,
    name: String,
    nuclides: Vec<NuclideFraction>,
    density: Option<Density>,
    s_alpha_beta: Vec<String>,
}

impl Material {
    /// Create an empty material
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            nuclides: Vec::new(),
            density: None,
            s_alpha_beta: Vec::new(),
        }
    }

    /// Add a nuclide with the given fraction
    pub fn with_nuclide(mut self, name: impl Into<String>, fraction: f64, percent_type: PercentType) -> Self {
        self.nuclides.push(NuclideFraction {
            name: name.into(),
            fraction,
            percent_type,
        });
        self
    }

    /// Set the density
    pub fn with_density(mut self, units: DensityUnits, value: f64) -> Self {
        let value = (units != DensityUnits::Sum).then_some(value);
        self.density = Some(Density { units, value });
        self
    }

    /// Attach a thermal scattering table, e.g. `c_H_in_H2O`
    pub fn with_s_alpha_beta(mut self, table: impl Into<String>) -> Self {
        self.s_alpha_beta.push(table.into());
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nuclides(&self) -> &[NuclideFraction] {
        &self.nuclides
    }

    pub fn density(&self) -> Option<Density> {
        self.density
    }

    pub fn s_alpha_beta(&self) -> &[String] {
        &self.s_alpha_beta
    }

    /// Fraction of the named nuclide, if present
    pub fn fraction_of(&self, nuclide: &str) -> Option<f64> {
        self.nuclides
            .iter()
            .find(|n| n.name == nuclide)
            .map(|n| n.fraction)
    }

    /// Sum of all nuclide fractions
    pub fn total_fraction(&self) -> f64 {
        self.nuclides.iter().map(|n| n.fraction).sum()
    }

    /// Check the composition and density are usable by the engine
    pub fn validate(&self) -> Result<()> {
        let label = format!("material {} ({})", self.id, self.name);
        if self.id == 0 {
            return Err(Error::Model(format!("{label}: ids must be positive")));
        }
        if self.nuclides.is_empty() {
            return Err(Error::Model(format!("{label} has no nuclides")));
        }

        let mut seen = HashSet::new();
        for nuclide in &self.nuclides {
            if !(nuclide.fraction.is_finite() && nuclide.fraction > 0.0) {
                return Err(Error::Model(format!(
                    "{label}: fraction of {} must be positive, got {}",
                    nuclide.name, nuclide.fraction
                )));
            }
            if !seen.insert(nuclide.name.as_str()) {
                return Err(Error::Model(format!("{label}: nuclide {} added twice", nuclide.name)));
            }
        }

        let first = self.nuclides[0].percent_type;
        if self.nuclides.iter().any(|n| n.percent_type != first) {
            return Err(Error::Model(format!("{label} mixes atom and weight fractions")));
        }

        match self.density {
            None => return Err(Error::Model(format!("{label} has no density"))),
            Some(Density { units: DensityUnits::Sum, .. }) => {}
            Some(Density { value, .. }) => match value {
                Some(v) if v.is_finite() && v > 0.0 => {}
                _ => return Err(Error::Model(format!("{label}: density must be positive"))),
            },
        }

        if self.s_alpha_beta.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::Model(format!("{label}: empty S(a,b) table name")));
        }
        Ok(())
    }

    pub(crate) fn write_xml(&self, xml: &mut XmlWriter) {
        xml.open(
            "material",
            &[("id", self.id.to_string()), ("name", self.name.clone())],
        );
        if let Some(density) = self.density {
            let mut attrs = vec![("units", density.units.as_str().to_string())];
            if let Some(value) = density.value {
                attrs.push(("value", value.to_string()));
            }
            xml.empty("density", &attrs);
        }
        for nuclide in &self.nuclides {
            xml.empty(
                "nuclide",
                &[
                    ("name", nuclide.name.clone()),
                    (nuclide.percent_type.as_str(), nuclide.fraction.to_string()),
                ],
            );
        }
        for table in &self.s_alpha_beta {
            xml.empty("sab", &[("name", table.clone())]);
        }
        xml.close("material");
    }
}

/// The set of materials in a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Materials(Vec<Material>);

impl Materials {
    pub fn new(materials: Vec<Material>) -> Self {
        Self(materials)
    }

    pub fn push(&mut self, material: Material) {
        self.0.push(material);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a material by id
    pub fn get(&self, id: u32) -> Option<&Material> {
        self.0.iter().find(|m| m.id == id)
    }

    /// Validate every material and check ids are unique
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for material in &self.0 {
            material.validate()?;
            if !ids.insert(material.id) {
                return Err(Error::duplicate_id("material", material.id));
            }
        }
        Ok(())
    }

    pub(crate) fn write_xml(&self, xml: &mut XmlWriter) {
        xml.open("materials", &[]);
        for material in &self.0 {
            material.write_xml(xml);
        }
        xml.close("materials");
    }
}
