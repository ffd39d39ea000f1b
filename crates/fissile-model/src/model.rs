//! A complete engine model: materials, geometry and settings

use crate::engine::{RunReport, TransportEngine};
use crate::geometry::{Fill, Geometry};
use crate::material::Materials;
use crate::settings::Settings;
use crate::xml::XmlWriter;
use fissile_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// File name the engine looks for in its working directory
pub const MODEL_FILE: &str = "model.xml";

/// Materials, geometry and settings handed to the transport engine together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub materials: Materials,
    pub geometry: Geometry,
    pub settings: Settings,
}

impl Model {
    pub fn new(geometry: Geometry, materials: Materials, settings: Settings) -> Self {
        Self {
            materials,
            geometry,
            settings,
        }
    }

    /// Check each part and the references between them
    pub fn validate(&self) -> Result<()> {
        self.materials.validate()?;
        self.geometry.validate()?;
        self.settings.validate()?;

        for cell in self.geometry.cells() {
            if let Fill::Material(id) = cell.fill {
                if self.materials.get(id).is_none() {
                    return Err(Error::unknown_reference(
                        "material",
                        id,
                        &format!("cell {} ({})", cell.id, cell.name),
                    ));
                }
            }
        }

        if let Some(track) = &self.settings.collision_track {
            for &id in &track.cell_ids {
                if self.geometry.cell(id).is_none() {
                    return Err(Error::unknown_reference("cell", id, "collision track"));
                }
            }
            for &id in &track.material_ids {
                if self.materials.get(id).is_none() {
                    return Err(Error::unknown_reference("material", id, "collision track"));
                }
            }
        }

        if let Some(source) = &self.settings.source {
            if self.geometry.find_cell(source.position).is_none() {
                return Err(Error::Model(format!(
                    "source position {:?} lies outside every cell",
                    source.position
                )));
            }
        }
        Ok(())
    }

    /// Render the single-file `model.xml` document
    pub fn to_xml(&self) -> Result<String> {
        self.validate()?;
        let mut xml = XmlWriter::with_declaration();
        xml.open("model", &[]);
        self.materials.write_xml(&mut xml);
        self.geometry.write_xml(&mut xml)?;
        self.settings.write_xml(&mut xml);
        xml.close("model");
        Ok(xml.finish())
    }

    /// Write `dir/model.xml`, creating `dir` if needed, and return the file path
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub fn export_to_model_xml(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let document = self.to_xml()?;
        fs::create_dir_all(dir)?;
        let path = dir.join(MODEL_FILE);
        fs::write(&path, document)?;
        info!(
            path = %path.display(),
            materials = self.materials.len(),
            cells = self.geometry.cells().len(),
            "exported model"
        );
        Ok(path)
    }

    /// Export into `dir` and run `engine` there
    pub fn run<E: TransportEngine + ?Sized>(&self, engine: &E, dir: impl AsRef<Path>) -> Result<RunReport> {
        let dir = dir.as_ref();
        self.export_to_model_xml(dir)?;
        debug!(engine = engine.name(), "launching transport engine");
        engine.run(dir)
    }

    /// Pretty JSON dump of the model, for records next to the results
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
