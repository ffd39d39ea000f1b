//! Cells and geometry

use crate::surface::{BoundaryType, Point, Region, Surface};
use crate::xml::{join, XmlWriter};
use fissile_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// What a cell is filled with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    #[default]
    Void,
    /// Material id
    Material(u32),
}

/// A region of space with a fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: u32,
    pub name: String,
    pub fill: Fill,
    pub region: Region,
}

impl Cell {
    pub fn new(id: u32, name: impl Into<String>, fill: Fill, region: Region) -> Self {
        Self {
            id,
            name: name.into(),
            fill,
            region,
        }
    }

    /// Void cell
    pub fn void(id: u32, name: impl Into<String>, region: Region) -> Self {
        Self::new(id, name, Fill::Void, region)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.region.contains(p)
    }

    fn write_xml(&self, xml: &mut XmlWriter) {
        let material = match self.fill {
            Fill::Void => "void".to_string(),
            Fill::Material(id) => id.to_string(),
        };
        xml.empty(
            "cell",
            &[
                ("id", self.id.to_string()),
                ("material", material),
                ("name", self.name.clone()),
                ("region", self.region.to_string()),
                ("universe", "1".to_string()),
            ],
        );
    }
}

/// The root universe: a flat list of cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    cells: Vec<Cell>,
}

impl Geometry {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: u32) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// First cell containing `p`, if any
    pub fn find_cell(&self, p: Point) -> Option<&Cell> {
        self.cells.iter().find(|c| c.contains(p))
    }

    /// Unique surfaces referenced by the cells, ordered by id
    ///
    /// Two different surfaces sharing one id is an error.
    pub fn surfaces(&self) -> Result<Vec<Surface>> {
        let mut by_id: BTreeMap<u32, Surface> = BTreeMap::new();
        for cell in &self.cells {
            for surface in cell.region.surfaces() {
                match by_id.get(&surface.id) {
                    Some(existing) if *existing != surface => {
                        return Err(Error::duplicate_id("surface", surface.id));
                    }
                    Some(_) => {}
                    None => {
                        by_id.insert(surface.id, surface);
                    }
                }
            }
        }
        Ok(by_id.into_values().collect())
    }

    /// Check ids are unique, surfaces are well formed and particles can leak
    pub fn validate(&self) -> Result<()> {
        if self.cells.is_empty() {
            return Err(Error::Model("geometry has no cells".to_string()));
        }

        let mut ids = HashSet::new();
        for cell in &self.cells {
            if cell.id == 0 {
                return Err(Error::Model(format!("cell {}: ids must be positive", cell.name)));
            }
            if !ids.insert(cell.id) {
                return Err(Error::duplicate_id("cell", cell.id));
            }
        }

        let surfaces = self.surfaces()?;
        for surface in &surfaces {
            surface.validate()?;
        }
        if !surfaces.iter().any(|s| s.boundary == BoundaryType::Vacuum) {
            return Err(Error::Model(
                "geometry has no vacuum boundary; particle histories would never terminate".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn write_xml(&self, xml: &mut XmlWriter) -> Result<()> {
        xml.open("geometry", &[]);
        for cell in &self.cells {
            cell.write_xml(xml);
        }
        for surface in self.surfaces()? {
            let (kind, coeffs) = surface.type_and_coeffs();
            let mut attrs = vec![("id", surface.id.to_string())];
            if surface.boundary != BoundaryType::Transmission {
                attrs.push(("boundary", surface.boundary.as_str().to_string()));
            }
            attrs.push(("coeffs", join(&coeffs)));
            attrs.push(("type", kind.to_string()));
            xml.empty("surface", &attrs);
        }
        xml.close("geometry");
        Ok(())
    }
}
