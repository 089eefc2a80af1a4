//! High-level mesh construction

use crate::buffer::{AccessorIndex, BufferBuilder, IndexType};

/// Accessor indices for a mesh
#[derive(Debug, Clone)]
pub struct MeshAccessors {
    pub positions: AccessorIndex,
    pub uvs: Option<AccessorIndex>,
    pub normals: Option<AccessorIndex>,
    pub indices: Option<AccessorIndex>,
    pub index_type: Option<IndexType>,
}

/// Builder for indexed triangle mesh data
#[derive(Default)]
pub struct MeshBuilder {
    positions: Vec<[f32; 3]>,
    uvs: Option<Vec<[f32; 2]>>,
    normals: Option<Vec<[f32; 3]>>,
    indices: Option<Vec<u32>>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set positions (required)
    pub fn positions(mut self, positions: &[[f32; 3]]) -> Self {
        self.positions = positions.to_vec();
        self
    }

    /// Set UVs (optional)
    pub fn uvs(mut self, uvs: &[[f32; 2]]) -> Self {
        self.uvs = Some(uvs.to_vec());
        self
    }

    /// Set normals (optional)
    pub fn normals(mut self, normals: &[[f32; 3]]) -> Self {
        self.normals = Some(normals.to_vec());
        self
    }

    /// Set triangle indices (optional); packed as u16 when the vertex count allows
    pub fn indices(mut self, indices: &[u32]) -> Self {
        self.indices = Some(indices.to_vec());
        self
    }

    /// Pack into the buffer in the order positions, UVs, normals, indices
    pub fn build(self, buffer: &mut BufferBuilder) -> MeshAccessors {
        let vertex_count = self.positions.len();
        let positions = buffer.pack_positions(&self.positions);
        let uvs = self.uvs.as_ref().map(|uv| buffer.pack_vec2(uv));
        let normals = self.normals.as_ref().map(|n| buffer.pack_vec3(n));
        let packed = self
            .indices
            .as_ref()
            .map(|i| buffer.pack_indices(i, vertex_count));

        MeshAccessors {
            positions,
            uvs,
            normals,
            indices: packed.map(|(accessor, _)| accessor),
            index_type: packed.map(|(_, index_type)| index_type),
        }
    }
}
