//! Build orchestration: photo -> UV plan -> mesh -> container -> OBJ

use anyhow::{Context, Result};
use badge_core::{BadgeConfig, BadgeMesh, UvRegion, build_badge_mesh};
use std::path::{Path, PathBuf};

use crate::container::{BinaryContainer, ContainerFormat, MaterialSettings, encode_container};
use crate::manifest::{self, Manifest};
use crate::obj::{ObjOptions, convert_container_to_obj};
use crate::texture::{SourceImage, build_atlas, encode_png, load_source_image};

/// File names probed, in order, when no image is given explicitly
pub const CANDIDATE_IMAGES: [&str; 3] = ["image.png", "texture.png", "badge.png"];

/// First candidate image present in `dir`
pub fn find_default_image(dir: &Path) -> Option<PathBuf> {
    CANDIDATE_IMAGES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// In-memory results of one badge build
#[derive(Debug, Clone)]
pub struct BadgeArtifacts {
    pub mesh: BadgeMesh,
    pub uv: UvRegion,
    pub container: BinaryContainer,
}

/// Run the core pipeline without touching the filesystem.
///
/// Without an image the badge is untextured and the material's flat color
/// is used.
pub fn generate(
    config: &BadgeConfig,
    image: Option<&SourceImage>,
    material: &MaterialSettings,
) -> Result<BadgeArtifacts> {
    config.validate().context("Invalid badge configuration")?;
    material.validate().context("Invalid material")?;

    let (uv, atlas_png) = match image {
        Some(image) => {
            let uv = UvRegion::plan(image.size(), &config.badge, &config.texture)?;
            let atlas = build_atlas(image, &uv.placement, config.texture.background);
            let png = encode_png(&atlas)?;
            tracing::info!(
                "Texture atlas: {}px, {} bytes PNG, mapped area {:.1}x{:.1} mm",
                uv.placement.atlas_size,
                png.len(),
                uv.mapped_width * 1000.0,
                uv.mapped_height * 1000.0
            );
            (uv, Some(png))
        }
        None => {
            tracing::warn!("No image provided, building an untextured badge");
            (UvRegion::untextured(&config.badge, &config.texture)?, None)
        }
    };

    let mesh = build_badge_mesh(config, &uv)?;
    let container = encode_container(&mesh.mesh, atlas_png.as_deref(), material)?;

    Ok(BadgeArtifacts {
        mesh,
        uv,
        container,
    })
}

/// Inputs for a file-producing build
#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub manifest: Manifest,
    /// Explicit photo; otherwise [`CANDIDATE_IMAGES`] are searched in `search_dir`
    pub image: Option<PathBuf>,
    pub search_dir: PathBuf,
    /// Explicit container path; otherwise derived from `[output]`.
    /// Its extension (`.glb` or `.gltf`) selects the format.
    pub output: Option<PathBuf>,
}

/// What a build wrote
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub container_path: PathBuf,
    pub container_bytes: usize,
    /// Set only when the OBJ was requested and written
    pub obj_path: Option<PathBuf>,
    pub vertices: usize,
    pub triangles: usize,
    pub textured: bool,
}

/// Full pipeline: load, build, write the container, then the optional OBJ.
///
/// An OBJ failure is logged and leaves the written container in place.
pub fn build_badge(request: &BuildRequest) -> Result<BuildReport> {
    let manifest = &request.manifest;
    manifest::validate(manifest).context("Invalid manifest")?;

    let output = &manifest.output;
    let (container_path, format) = match &request.output {
        Some(path) => {
            let format = ContainerFormat::from_path(path).with_context(|| {
                format!("Output path must end in .glb or .gltf: {:?}", path)
            })?;
            if format != output.format {
                tracing::warn!(
                    "Writing {:?} as {:?} instead of the configured {:?}",
                    path,
                    format,
                    output.format
                );
            }
            (path.clone(), format)
        }
        None => (output.container_path(), output.format),
    };

    let image_path = request
        .image
        .clone()
        .or_else(|| find_default_image(&request.search_dir));
    let image = image_path
        .as_deref()
        .map(load_source_image)
        .transpose()?;

    let artifacts = generate(&manifest.badge_config(), image.as_ref(), &manifest.material)?;

    let bytes = artifacts
        .container
        .to_bytes(format)
        .context("Failed to serialize container")?;

    if let Some(parent) = container_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    std::fs::write(&container_path, &bytes)
        .with_context(|| format!("Failed to write container: {:?}", container_path))?;
    tracing::info!(
        "Wrote {:?} ({} bytes, {:?})",
        container_path,
        bytes.len(),
        format
    );

    let obj_path = if output.obj {
        let obj_path = container_path.with_extension("obj");
        let options = ObjOptions {
            bake_colors: output.bake_colors,
            bilinear: false,
        };
        match convert_container_to_obj(&container_path, &obj_path, &options) {
            Ok(_) => Some(obj_path),
            Err(e) => {
                tracing::warn!("OBJ export failed, keeping {:?}: {}", container_path, e);
                None
            }
        }
    } else {
        None
    };

    Ok(BuildReport {
        container_path,
        container_bytes: bytes.len(),
        obj_path,
        vertices: artifacts.mesh.mesh.vertex_count(),
        triangles: artifacts.mesh.mesh.triangle_count(),
        textured: image.is_some(),
    })
}
