//! Badgesmith core - procedural badge tessellation
//!
//! Builds a rounded, edge-chamfered rectangular slab with a lanyard cutout
//! and a photo mapped onto both faces. The output is a single indexed mesh
//! (positions, UVs, normals, triangle indices) ready for a glTF encoder.
//!
//! Pipeline:
//! 1. [`BadgeConfig::validate`] rejects impossible geometry up front
//! 2. [`UvRegion::plan`] sizes the photo on the face and in the atlas
//! 3. [`build_badge_mesh`] runs the face builders and the assembler

pub mod config;
pub mod error;
pub mod faces;
pub mod geometry;
pub mod mesh;
pub mod uv;

pub use config::{BadgeConfig, BadgeSpec, HoleSpec, MeshSettings, TextureSettings};
pub use error::{BadgeError, ConfigError, EncodingError};
pub use faces::FaceSide;
pub use mesh::{BadgeMesh, MeshBuffers, PartKind, PartRange, assemble, build_badge_mesh};
pub use uv::{AtlasPlacement, ImageSize, TextureBounds, UvRegion};
