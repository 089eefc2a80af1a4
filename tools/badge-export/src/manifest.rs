//! Manifest parsing
//!
//! Parses badge.toml. Every table and key is optional; missing values fall
//! back to the reference badge.

use anyhow::{Context, Result};
use badge_core::{BadgeConfig, BadgeSpec, ConfigError, MeshSettings, TextureSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::container::{ContainerFormat, MaterialSettings};

/// Default manifest file name looked up in the working directory
pub const DEFAULT_MANIFEST: &str = "badge.toml";

/// Root manifest structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub badge: BadgeSpec,
    #[serde(default)]
    pub mesh: MeshSettings,
    #[serde(default)]
    pub texture: TextureSettings,
    #[serde(default)]
    pub material: MaterialSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// File stem shared by the container and the OBJ
    #[serde(default = "default_output_name")]
    pub name: String,
    #[serde(default)]
    pub format: ContainerFormat,
    #[serde(default = "default_true")]
    pub obj: bool,
    #[serde(default = "default_true")]
    pub bake_colors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            name: default_output_name(),
            format: ContainerFormat::default(),
            obj: true,
            bake_colors: true,
        }
    }
}

impl OutputConfig {
    /// `<dir>/<name>.<glb|gltf>`
    pub fn container_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.name, self.format.extension()))
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_output_name() -> String {
    "badge".to_string()
}

fn default_true() -> bool {
    true
}

impl Manifest {
    /// The core configuration carried by this manifest
    pub fn badge_config(&self) -> BadgeConfig {
        BadgeConfig {
            badge: self.badge,
            mesh: self.mesh,
            texture: self.texture,
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

/// Load `path` when given, else `badge.toml` if present, else the defaults
pub fn load_or_default(path: Option<&Path>) -> Result<Manifest> {
    match path {
        Some(path) => load_manifest(path),
        None if Path::new(DEFAULT_MANIFEST).is_file() => load_manifest(Path::new(DEFAULT_MANIFEST)),
        None => {
            tracing::info!("No {} found, using the reference badge", DEFAULT_MANIFEST);
            Ok(Manifest::default())
        }
    }
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<(), ConfigError> {
    manifest.badge_config().validate()?;
    manifest.material.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_manifest_is_reference_badge() {
        let manifest: Manifest = toml::from_str("").expect("parse");
        assert_eq!(manifest.badge_config(), BadgeConfig::default());
        assert_eq!(manifest.material, MaterialSettings::default());
        assert_eq!(manifest.output.dir, PathBuf::from("output"));
        assert_eq!(manifest.output.format, ContainerFormat::Glb);
        assert!(manifest.output.obj && manifest.output.bake_colors);
        assert_eq!(validate(&manifest), Ok(()));
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let manifest: Manifest = toml::from_str(
            r#"
            [badge]
            width = 0.054

            [badge.hole]
            enabled = false

            [mesh]
            subdivisions = 64

            [output]
            format = "gltf"
            name = "visitor"
            "#,
        )
        .expect("parse");

        assert_eq!(manifest.badge.width, 0.054);
        assert_eq!(manifest.badge.height, BadgeSpec::default().height);
        assert!(!manifest.badge.hole.enabled);
        assert_eq!(manifest.mesh.subdivisions, 64);
        assert_eq!(manifest.mesh.hole_segments, None);
        assert_eq!(
            manifest.output.container_path(),
            PathBuf::from("output").join("visitor.gltf")
        );
        assert!(manifest.output.obj);
    }

    #[test]
    fn test_invalid_material_rejected() {
        let manifest: Manifest = toml::from_str("[material]\nmetallic = -0.5").expect("parse");
        assert!(matches!(
            validate(&manifest),
            Err(ConfigError::OutOfRange { field: "material.metallic", .. })
        ));
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let manifest: Manifest =
            toml::from_str("[badge]\ncorner_radius = 0.05").expect("parse");
        assert!(matches!(
            validate(&manifest),
            Err(ConfigError::CornerRadiusTooLarge { .. })
        ));
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        assert!(toml::from_str::<Manifest>("[output]\nformat = \"fbx\"").is_err());
    }

    #[test]
    fn test_load_manifest_reports_path() {
        let err = load_manifest(Path::new("missing/badge.toml")).expect_err("missing file");
        assert!(err.to_string().contains("missing/badge.toml"));
    }
}
