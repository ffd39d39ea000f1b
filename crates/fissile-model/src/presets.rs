//! Ready-made models of the bare uranium-water sphere
//!
//! Both presets share the fuel mixture and the vacuum boundary. The
//! collision-tracking variant adds two boron detector spheres on the ±y axis.

use crate::config::SphereConfig;
use crate::geometry::{Cell, Fill, Geometry};
use crate::material::{DensityUnits, Material, Materials, PercentType};
use crate::model::Model;
use crate::settings::{CollisionTrack, IndependentSource, RunMode, Settings};
use crate::surface::{BoundaryType, Surface};
use fissile_core::Result;
use tracing::debug;

pub const FUEL_MATERIAL_ID: u32 = 1;
pub const ABSORBER_MATERIAL_ID: u32 = 2;

pub const FUEL_CELL_ID: u32 = 1;
pub const DETECTOR_CELL_IDS: [u32; 2] = [2, 3];
pub const VOID_CELL_ID: u32 = 4;

/// Homogeneous U-235 / light-water mixture
pub fn fuel_material(config: &SphereConfig) -> Material {
    let fuel = &config.fuel;
    let mut material = Material::new(FUEL_MATERIAL_ID, "U235-H2O mixture")
        .with_nuclide("U235", fuel.u235_fraction, PercentType::Atom)
        .with_nuclide("H1", fuel.h1_fraction(), PercentType::Atom)
        .with_nuclide("O16", fuel.o16_fraction(), PercentType::Atom)
        .with_density(DensityUnits::GramsPerCc, fuel.density);
    if let Some(table) = &fuel.thermal_scattering {
        material = material.with_s_alpha_beta(table.clone());
    }
    material
}

/// Pure absorber filling the detector spheres
pub fn absorber_material(config: &SphereConfig) -> Material {
    let detector = &config.detector;
    Material::new(ABSORBER_MATERIAL_ID, "Absorber")
        .with_nuclide(detector.absorber_nuclide.clone(), 1.0, PercentType::Atom)
        .with_density(DensityUnits::GramsPerCc, detector.absorber_density)
}

fn outer_boundary(id: u32, config: &SphereConfig) -> Surface {
    Surface::sphere(id, config.geometry.outer_radius()).with_boundary(BoundaryType::Vacuum)
}

/// Eigenvalue run of the bare fuel sphere surrounded by void
pub fn k_system(config: &SphereConfig) -> Result<Model> {
    config.validate()?;

    let fuel_surface = Surface::sphere(1, config.geometry.fuel_radius);
    let outer = outer_boundary(2, config);
    let geometry = Geometry::new(vec![
        Cell::new(FUEL_CELL_ID, "Fuel", Fill::Material(FUEL_MATERIAL_ID), fuel_surface.inside()),
        Cell::void(2, "Void", fuel_surface.outside() & outer.inside()),
    ]);

    let run = &config.criticality;
    let settings = Settings {
        run_mode: RunMode::Eigenvalue,
        batches: run.batches,
        inactive: run.inactive,
        particles: run.particles,
        output_path: Some(run.output_path.clone()),
        ..Default::default()
    };

    let model = Model::new(geometry, Materials::new(vec![fuel_material(config)]), settings);
    model.validate()?;
    debug!(fuel_radius = config.geometry.fuel_radius, "built k-eigenvalue model");
    Ok(model)
}

/// Fixed-source pulse with absorption tracking in two detector spheres
pub fn collision_track_system(config: &SphereConfig) -> Result<Model> {
    config.validate()?;

    let distance = config.detector_distance();
    let radius = config.detector.radius;
    let fuel_surface = Surface::sphere(1, config.geometry.fuel_radius);
    let detector_up = Surface::sphere_at(2, [0.0, distance, 0.0], radius);
    let detector_down = Surface::sphere_at(3, [0.0, -distance, 0.0], radius);
    let outer = outer_boundary(4, config);

    let geometry = Geometry::new(vec![
        Cell::new(FUEL_CELL_ID, "Fuel", Fill::Material(FUEL_MATERIAL_ID), fuel_surface.inside()),
        Cell::new(
            DETECTOR_CELL_IDS[0],
            "Detector 1",
            Fill::Material(ABSORBER_MATERIAL_ID),
            detector_up.inside(),
        ),
        Cell::new(
            DETECTOR_CELL_IDS[1],
            "Detector 2",
            Fill::Material(ABSORBER_MATERIAL_ID),
            detector_down.inside(),
        ),
        Cell::void(
            VOID_CELL_ID,
            "Void",
            fuel_surface.outside() & detector_up.outside() & detector_down.outside() & outer.inside(),
        ),
    ]);

    let run = &config.collision_track;
    let settings = Settings {
        run_mode: RunMode::FixedSource,
        batches: run.batches,
        inactive: 0,
        particles: run.particles,
        source: Some(IndependentSource::point_pulse(run.source_position, run.source_energy)),
        collision_track: Some(CollisionTrack {
            max_collisions: run.max_collisions(),
            reactions: run.reactions.clone(),
            cell_ids: DETECTOR_CELL_IDS.to_vec(),
            ..Default::default()
        }),
        create_delayed_neutrons: Some(run.create_delayed_neutrons),
        output_path: Some(run.output_path.clone()),
    };

    let materials = Materials::new(vec![fuel_material(config), absorber_material(config)]);
    let model = Model::new(geometry, materials, settings);
    model.validate()?;
    debug!(
        detector_distance = distance,
        max_collisions = run.max_collisions(),
        "built collision-tracking model"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fuel_composition() {
        let fuel = fuel_material(&SphereConfig::default());
        assert_eq!(fuel.name(), "U235-H2O mixture");
        assert_relative_eq!(fuel.fraction_of("U235").unwrap(), 0.00113);
        assert_relative_eq!(fuel.fraction_of("H1").unwrap(), 2.0 * 0.99887 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(fuel.fraction_of("O16").unwrap(), 0.99887 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(fuel.total_fraction(), 1.0, epsilon = 1e-12);
        assert_eq!(fuel.s_alpha_beta(), ["c_H_in_H2O".to_string()]);
    }

    #[test]
    fn test_k_system() {
        let model = k_system(&SphereConfig::default()).unwrap();
        assert_eq!(model.settings.run_mode, RunMode::Eigenvalue);
        assert_eq!(model.settings.batches, 100);
        assert_eq!(model.settings.inactive, 30);
        assert_eq!(model.settings.particles, 100_000);
        assert_eq!(model.geometry.cells().len(), 2);
        assert_eq!(model.geometry.find_cell([0.0, 0.0, 19.0]).map(|c| c.id), Some(FUEL_CELL_ID));
        assert_eq!(model.geometry.find_cell([0.0, 0.0, 119.0]).map(|c| c.id), Some(2));
        assert!(model.geometry.find_cell([0.0, 0.0, 121.0]).is_none());
    }

    #[test]
    fn test_collision_track_cells() {
        let model = collision_track_system(&SphereConfig::default()).unwrap();
        let geometry = &model.geometry;
        assert_eq!(geometry.find_cell([0.0, 0.0, 0.0]).map(|c| c.id), Some(1));
        assert_eq!(geometry.find_cell([0.0, 30.0, 0.0]).map(|c| c.id), Some(2));
        assert_eq!(geometry.find_cell([0.0, -30.0, 0.0]).map(|c| c.id), Some(3));
        assert_eq!(geometry.find_cell([30.0, 0.0, 0.0]).map(|c| c.id), Some(VOID_CELL_ID));
        assert_eq!(geometry.find_cell([0.0, 24.0, 0.0]).map(|c| c.id), Some(VOID_CELL_ID));
    }

    #[test]
    fn test_collision_track_settings() {
        let model = collision_track_system(&SphereConfig::default()).unwrap();
        let settings = &model.settings;
        assert_eq!(settings.run_mode, RunMode::FixedSource);
        assert_eq!(settings.create_delayed_neutrons, Some(false));
        let track = settings.collision_track.as_ref().unwrap();
        assert_eq!(track.max_collisions, 50_000_000);
        assert_eq!(track.cell_ids, vec![2, 3]);
        assert_eq!(track.reactions, vec!["absorption".to_string()]);
        let source = settings.source.as_ref().unwrap();
        assert_eq!(source.energy.values, vec![2.5e6]);
        assert_eq!(source.position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SphereConfig::default();
        config.detector.radius = 15.0;
        assert!(collision_track_system(&config).is_err());
    }
}
