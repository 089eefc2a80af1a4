//! Binary buffer packing with alignment and accessor creation
//!
//! Every pack call aligns the buffer to 4 bytes *before* writing, so the
//! buffer never carries trailing padding and its length is exactly the sum
//! of the padded sections that precede the last one.

use crate::utils::{align_buffer, compute_bounds};
use gltf_json as json;
use gltf_json::validation::Checked::Valid;

/// Accessor index returned by buffer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorIndex(pub u32);

impl AccessorIndex {
    pub fn as_json_index(&self) -> json::Index<json::Accessor> {
        json::Index::new(self.0)
    }
}

/// Buffer view index for data that is referenced without an accessor (images)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewIndex(pub u32);

impl ViewIndex {
    pub fn as_json_index(&self) -> json::Index<json::buffer::View> {
        json::Index::new(self.0)
    }
}

/// Width of the triangle index component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U16,
    U32,
}

impl IndexType {
    /// Narrowest type that can address `vertex_count` vertices
    pub fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count < 65536 {
            IndexType::U16
        } else {
            IndexType::U32
        }
    }

    pub fn byte_size(&self) -> usize {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }

    fn component_type(&self) -> json::accessor::ComponentType {
        match self {
            IndexType::U16 => json::accessor::ComponentType::U16,
            IndexType::U32 => json::accessor::ComponentType::U32,
        }
    }
}

/// Builder for a single binary buffer with automatic alignment
pub struct BufferBuilder {
    buffer: Vec<u8>,
    views: Vec<json::buffer::View>,
    accessors: Vec<json::Accessor>,
}

impl BufferBuilder {
    /// Create a new empty buffer builder
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            views: Vec::new(),
            accessors: Vec::new(),
        }
    }

    /// Get the current accessor count
    pub fn accessor_count(&self) -> u32 {
        self.accessors.len() as u32
    }

    /// Get the binary buffer data
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the builder, returning the buffer bytes
    pub fn into_data(self) -> Vec<u8> {
        self.buffer
    }

    /// Get the buffer views
    pub fn views(&self) -> &[json::buffer::View] {
        &self.views
    }

    /// Get the accessors
    pub fn accessors(&self) -> &[json::Accessor] {
        &self.accessors
    }

    /// Pack encoded image bytes into an untargeted view
    pub fn pack_image(&mut self, bytes: &[u8]) -> ViewIndex {
        ViewIndex(self.push_view(bytes, None))
    }

    /// Pack Vec3 positions with exact per-axis bounds
    pub fn pack_positions(&mut self, positions: &[[f32; 3]]) -> AccessorIndex {
        let view = self.push_view(
            bytemuck::cast_slice(positions),
            Some(json::buffer::Target::ArrayBuffer),
        );
        let (min, max) = compute_bounds(positions);
        self.push_accessor(
            view,
            positions.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            Some((min, max)),
        )
    }

    /// Pack Vec3 data (normals)
    pub fn pack_vec3(&mut self, data: &[[f32; 3]]) -> AccessorIndex {
        let view = self.push_view(
            bytemuck::cast_slice(data),
            Some(json::buffer::Target::ArrayBuffer),
        );
        self.push_accessor(
            view,
            data.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec3,
            None,
        )
    }

    /// Pack Vec2 data (UVs)
    pub fn pack_vec2(&mut self, data: &[[f32; 2]]) -> AccessorIndex {
        let view = self.push_view(
            bytemuck::cast_slice(data),
            Some(json::buffer::Target::ArrayBuffer),
        );
        self.push_accessor(
            view,
            data.len(),
            json::accessor::ComponentType::F32,
            json::accessor::Type::Vec2,
            None,
        )
    }

    /// Pack triangle indices, narrowed to u16 when `vertex_count` allows it
    pub fn pack_indices(
        &mut self,
        indices: &[u32],
        vertex_count: usize,
    ) -> (AccessorIndex, IndexType) {
        let index_type = IndexType::for_vertex_count(vertex_count);
        let bytes: Vec<u8> = match index_type {
            IndexType::U16 => indices
                .iter()
                .flat_map(|&idx| (idx as u16).to_le_bytes())
                .collect(),
            IndexType::U32 => indices.iter().flat_map(|idx| idx.to_le_bytes()).collect(),
        };

        let view = self.push_view(&bytes, Some(json::buffer::Target::ElementArrayBuffer));
        let accessor = self.push_accessor(
            view,
            indices.len(),
            index_type.component_type(),
            json::accessor::Type::Scalar,
            None,
        );
        (accessor, index_type)
    }

    /// Align, append `bytes` and record a view over them
    fn push_view(&mut self, bytes: &[u8], target: Option<json::buffer::Target>) -> u32 {
        align_buffer(&mut self.buffer);
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(bytes);

        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: bytes.len().into(),
            byte_offset: Some((offset as u64).into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: target.map(Valid),
        });

        self.views.len() as u32 - 1
    }

    fn push_accessor(
        &mut self,
        view: u32,
        count: usize,
        component: json::accessor::ComponentType,
        type_: json::accessor::Type,
        bounds: Option<(Vec<f32>, Vec<f32>)>,
    ) -> AccessorIndex {
        let to_json = |values: Vec<f32>| {
            json::Value::Array(values.into_iter().map(json::Value::from).collect())
        };
        let (min, max) = match bounds {
            Some((min, max)) => (Some(to_json(min)), Some(to_json(max))),
            None => (None, None),
        };

        let accessor_idx = self.accessors.len() as u32;
        self.accessors.push(json::Accessor {
            buffer_view: Some(json::Index::new(view)),
            byte_offset: Some(0u64.into()),
            count: count.into(),
            component_type: Valid(json::accessor::GenericComponentType(component)),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(type_),
            min,
            max,
            name: None,
            normalized: false,
            sparse: None,
        });

        AccessorIndex(accessor_idx)
    }
}

impl Default for BufferBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_range(builder: &BufferBuilder, view: usize) -> (u64, u64) {
        let view = &builder.views()[view];
        let offset = view.byte_offset.map(|o| o.0).unwrap_or(0);
        (offset, view.byte_length.0)
    }

    #[test]
    fn test_buffer_builder_positions() {
        let mut builder = BufferBuilder::new();
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]];
        let idx = builder.pack_positions(&positions);

        assert_eq!(idx, AccessorIndex(0));
        assert_eq!(builder.accessor_count(), 1);
        assert_eq!(builder.views().len(), 1);
        // 3 positions * 12 bytes = 36 bytes
        assert_eq!(builder.data().len(), 36);
        assert!(builder.accessors()[0].min.is_some());
    }

    #[test]
    fn test_image_padded_before_geometry() {
        let mut builder = BufferBuilder::new();
        let image = builder.pack_image(&[1, 2, 3, 4, 5]);
        builder.pack_vec2(&[[0.25, 0.75]]);

        assert_eq!(image, ViewIndex(0));
        assert_eq!(view_range(&builder, 0), (0, 5));
        assert_eq!(view_range(&builder, 1), (8, 8));
        assert_eq!(&builder.data()[5..8], &[0, 0, 0]);
        assert!(builder.views()[0].target.is_none());
    }

    #[test]
    fn test_no_trailing_padding() {
        let mut builder = BufferBuilder::new();
        builder.pack_indices(&[0, 1, 2], 3);
        // 3 indices * 2 bytes, not rounded up
        assert_eq!(builder.data().len(), 6);
    }

    #[test]
    fn test_index_type_selection() {
        assert_eq!(IndexType::for_vertex_count(65535), IndexType::U16);
        assert_eq!(IndexType::for_vertex_count(65536), IndexType::U32);

        let mut builder = BufferBuilder::new();
        let (_, small) = builder.pack_indices(&[0, 1, 2], 3);
        let (_, large) = builder.pack_indices(&[0, 70000, 2], 70001);
        assert_eq!(small, IndexType::U16);
        assert_eq!(large, IndexType::U32);

        // Second view starts on the next 4-byte boundary
        assert_eq!(view_range(&builder, 1), (8, 12));
        assert_eq!(&builder.data()[12..16], &70000u32.to_le_bytes());
    }
}
