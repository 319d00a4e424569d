//! facet command-line interface.
//!
//! Look up optical constants, generate tube polygons and export scenes:
//! ```sh
//! facet materials
//! facet ior ruby
//! facet ring --corners 6 --tube-radius 0.1 --base-width 1 --segment-radius 0.2 --obj ring.obj
//! facet scene --config pendant.toml --output pendant.json
//! ```

mod config;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use facet_core::{MaterialTable, PolygonRingSpec, Scene, Tessellation};

#[derive(Parser)]
#[command(name = "facet")]
#[command(about = "facet: gem optics and tube polygon scene toolkit")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the material table with aliases.
    Materials,
    /// Print the refractive index and dispersion of a material.
    Ior {
        /// Material name or alias (case-insensitive).
        name: String,
    },
    /// Generate a tube polygon and print its layout.
    Ring {
        #[arg(long)]
        corners: u32,
        #[arg(long)]
        tube_radius: f32,
        #[arg(long)]
        base_width: f32,
        /// Corner rounding radius; 0 gives sharp corners.
        #[arg(long, default_value_t = 0.0)]
        segment_radius: f32,
        /// Merge into a solid disk silhouette.
        #[arg(long)]
        filled: bool,
        /// Write a tessellated mesh to this OBJ file.
        #[arg(long)]
        obj: Option<PathBuf>,
        #[arg(long, default_value_t = 12)]
        arc_steps: u32,
        #[arg(long, default_value_t = 16)]
        tube_steps: u32,
    },
    /// Build the showcase scene, or one described by a TOML file, as JSON.
    Scene {
        /// Path to a TOML scene configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output file; JSON is printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let table = MaterialTable::standard()?;
    log::debug!(
        "Material table: {} materials, {} aliases",
        table.len(),
        table.alias_count()
    );

    match cli.command {
        Commands::Materials => {
            println!("{:<20} {:>7} {:>8}", "Material", "IOR", "Disp.");
            for line in runner::material_listing(&table)? {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Ior { name } => {
            let property = table.get(&name)?;
            match property.dispersion() {
                Some(dispersion) => println!(
                    "{}: ior {:.4}, dispersion {:.5}",
                    property.name(),
                    property.ior(),
                    dispersion
                ),
                None => println!("{}: ior {:.4}", property.name(), property.ior()),
            }
            Ok(())
        }
        Commands::Ring {
            corners,
            tube_radius,
            base_width,
            segment_radius,
            filled,
            obj,
            arc_steps,
            tube_steps,
        } => {
            let ring = PolygonRingSpec::new(corners, tube_radius, base_width)
                .with_segment_radius(segment_radius)
                .with_filled(filled)
                .generate()?;
            for line in runner::ring_summary(&ring) {
                println!("{line}");
            }

            if let Some(path) = obj {
                let quality = Tessellation {
                    arc_steps,
                    tube_steps,
                };
                runner::write_ring_obj(&ring, &quality, &path)?;
                println!("Mesh (OBJ) written to: {}", path.display());
            }
            Ok(())
        }
        Commands::Scene { config, output } => {
            let scene = match config {
                Some(path) => {
                    let scene_config = config::load_config(&path)?;
                    runner::build_scene(&scene_config, &table)?
                }
                None => Scene::sample(&table)?,
            };

            match output {
                Some(path) => runner::write_scene_json(&scene, &path)?,
                None => println!("{}", runner::scene_json(&scene)?),
            }
            Ok(())
        }
    }
}
