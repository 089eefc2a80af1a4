//! badgesmith - textured badge solid generator
//!
//! Builds a rounded, chamfered badge with a lanyard slot and a photo on both
//! faces, written as GLB/glTF plus an optional vertex-colored OBJ.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use badgesmith_export::{ContainerFormat, manifest, obj, pipeline};

#[derive(Parser)]
#[command(name = "badgesmith")]
#[command(about = "Textured badge solid generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a badge container (and OBJ) from a manifest
    Build {
        /// Path to badge.toml (defaults apply when absent)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Photo to map onto the faces (PNG/JPG)
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Output container path (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Container format (overrides manifest)
        #[arg(short, long, value_enum)]
        format: Option<ContainerFormat>,

        /// Face grid subdivisions (overrides manifest)
        #[arg(short, long)]
        subdivisions: Option<u32>,

        /// Skip the OBJ export
        #[arg(long)]
        no_obj: bool,
    },

    /// Validate a manifest without building
    Check {
        /// Path to badge.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert a GLB/glTF to OBJ
    Obj {
        /// Input GLB/glTF file
        input: PathBuf,

        /// Output .obj file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not bake texture colors into vertices
        #[arg(long)]
        no_colors: bool,

        /// Bilinear texture sampling
        #[arg(long)]
        bilinear: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            image,
            output,
            format,
            subdivisions,
            no_obj,
        } => {
            let mut manifest = manifest::load_or_default(config.as_deref())?;
            if let Some(format) = format {
                manifest.output.format = format;
            }
            if let Some(subdivisions) = subdivisions {
                manifest.mesh.subdivisions = subdivisions;
            }
            if no_obj {
                manifest.output.obj = false;
            }

            let request = pipeline::BuildRequest {
                manifest,
                image,
                search_dir: std::env::current_dir().context("Failed to read working directory")?,
                output,
            };
            let report = pipeline::build_badge(&request)?;
            tracing::info!(
                "Build complete: {} vertices, {} triangles, {} bytes -> {:?}",
                report.vertices,
                report.triangles,
                report.container_bytes,
                report.container_path
            );
            if let Some(obj_path) = report.obj_path {
                tracing::info!("OBJ: {:?}", obj_path);
            }
        }

        Commands::Check { config } => {
            let manifest = manifest::load_or_default(config.as_deref())?;
            manifest::validate(&manifest).context("Manifest validation failed")?;
            tracing::info!("Manifest is valid");
        }

        Commands::Obj {
            input,
            output,
            no_colors,
            bilinear,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("obj"));
            let options = obj::ObjOptions {
                bake_colors: !no_colors,
                bilinear,
            };
            obj::convert_container_to_obj(&input, &output, &options)?;
        }
    }

    Ok(())
}
