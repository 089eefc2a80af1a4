//! badgesmith-export library
//!
//! Turns a badge configuration and an optional photo into a textured glTF/GLB
//! solid, and optionally a Wavefront OBJ with baked vertex colors.

pub mod container;
pub mod error;
pub mod manifest;
pub mod obj;
pub mod pipeline;
pub mod texture;

pub use container::{BinaryContainer, ContainerFormat, MaterialSettings, encode_container};
pub use error::CollaboratorError;
pub use manifest::{Manifest, OutputConfig, load_manifest};
pub use obj::{ObjOptions, ObjSummary, convert_container_to_obj};
pub use pipeline::{BadgeArtifacts, BuildReport, BuildRequest, build_badge, generate};
pub use texture::{SourceImage, load_source_image};
