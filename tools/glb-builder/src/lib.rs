//! GLB/GLTF generation utilities
//!
//! This library provides builder-pattern APIs for constructing glTF assets:
//! - BufferBuilder: Pack binary data with automatic alignment
//! - MeshBuilder: Indexed mesh streams with u16/u32 index selection
//! - GltfBuilder: Top-level document (images, textures, materials, meshes,
//!   nodes, scenes)
//! - assemble_glb / data_uri: GLB chunk layout or an embedded base64 buffer
//!
//! # Example
//!
//! ```no_run
//! use glb_builder::*;
//!
//! let mut buffer = BufferBuilder::new();
//! let mesh = MeshBuilder::new()
//!     .positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]])
//!     .normals(&[[0.0, 0.0, 1.0]; 3])
//!     .indices(&[0, 1, 2])
//!     .build(&mut buffer);
//!
//! let gltf = GltfBuilder::new()
//!     .buffer_byte_length(buffer.data().len() as u64)
//!     .add_mesh_from_accessors("Triangle", &mesh, None);
//!
//! // Build final document with accessors and views
//! let root = gltf.build(buffer.views(), buffer.accessors(), "glb-builder");
//! let glb_bytes = assemble_glb(&root, buffer.data())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod buffer;
pub mod document;
pub mod mesh;
pub mod utils;

pub use buffer::{AccessorIndex, BufferBuilder, IndexType, ViewIndex};
pub use document::{GltfBuilder, MaterialDesc};
pub use mesh::{MeshAccessors, MeshBuilder};
pub use utils::{
    OCTET_STREAM_PREFIX, align_buffer, assemble_glb, compute_bounds, data_uri, to_embedded_gltf,
};

// Re-export commonly used gltf-json types
pub use gltf_json as json;
pub use gltf_json::validation::Checked::Valid;
