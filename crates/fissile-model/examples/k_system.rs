//! Bare uranium-water sphere criticality run
//!
//! Usage: `cargo run --example k_system [config.json]`
//!
//! Writes `k_system/model.xml`. Set `FISSILE_RUN_ENGINE=1` to launch
//! `openmc` on it afterwards.

use fissile_model::{k_system, Model, OpenMcExecutable, SphereConfig, TransportEngine};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match env::args().nth(1) {
        Some(path) => SphereConfig::from_json_file(path)?,
        None => SphereConfig::default(),
    };

    let model = k_system(&config)?;
    println!("=== k-eigenvalue model ===");
    println!("  Fuel radius:    {} cm", config.geometry.fuel_radius);
    println!("  Vacuum radius:  {} cm", config.geometry.outer_radius());
    println!("  U-235 fraction: {}", config.fuel.u235_fraction);
    println!(
        "  Batches:        {} ({} inactive), {} particles each",
        model.settings.batches, model.settings.inactive, model.settings.particles
    );

    run_or_export(&model, "k_system")
}

fn run_or_export(model: &Model, dir: &str) -> anyhow::Result<()> {
    if env::var_os("FISSILE_RUN_ENGINE").is_none() {
        let path = model.export_to_model_xml(dir)?;
        println!("\nExported {}", path.display());
        println!("Set FISSILE_RUN_ENGINE=1 to run the engine");
        return Ok(());
    }

    let engine = OpenMcExecutable::new();
    let report = model.run(&engine, dir)?;
    println!("\n{} finished in {:.1?}", engine.name(), report.elapsed);
    for line in report.stdout.lines().filter(|l| l.contains("k-effective")) {
        println!("  {}", line.trim());
    }
    Ok(())
}
