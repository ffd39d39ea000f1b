//! Draw the system geometry figure
//!
//! Usage: `cargo run --example system_plot [output.svg] [config.json]`
//!
//! Without a config the figure uses the reference dimensions; with one, the
//! spheres are sized from the model configuration.

use fissile_model::SphereConfig;
use fissile_viz::{geometry_summary, render_schematic, SchematicLayout};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("results/figures/system_plot.svg"));
    let layout = match args.next() {
        Some(config) => SchematicLayout::from_config(&SphereConfig::from_json_file(config)?),
        None => SchematicLayout::default(),
    };

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    render_schematic(&layout, &output)?;

    println!("Plot saved as '{}'", output.display());
    println!("\n{}", geometry_summary(&layout));
    Ok(())
}
