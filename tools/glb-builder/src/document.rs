//! GLTF document construction

use crate::MeshAccessors;
use crate::buffer::ViewIndex;
use gltf_json as json;
use gltf_json::validation::Checked::Valid;
use std::collections::BTreeMap;

/// Surface parameters for a single metallic-roughness material
#[derive(Debug, Clone)]
pub struct MaterialDesc {
    pub name: String,
    pub base_color_factor: [f32; 4],
    pub base_color_texture: Option<json::Index<json::Texture>>,
    pub metallic: f32,
    pub roughness: f32,
}

/// Builder for complete GLTF documents
pub struct GltfBuilder {
    nodes: Vec<json::Node>,
    meshes: Vec<json::Mesh>,
    materials: Vec<json::Material>,
    images: Vec<json::Image>,
    samplers: Vec<json::texture::Sampler>,
    textures: Vec<json::Texture>,
    scenes: Vec<json::Scene>,
    buffer_byte_length: u64,
    buffer_uri: Option<String>,
}

impl GltfBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            meshes: Vec::new(),
            materials: Vec::new(),
            images: Vec::new(),
            samplers: Vec::new(),
            textures: Vec::new(),
            scenes: Vec::new(),
            buffer_byte_length: 0,
            buffer_uri: None,
        }
    }

    /// Set buffer byte length (required before building)
    pub fn buffer_byte_length(mut self, length: u64) -> Self {
        self.buffer_byte_length = length;
        self
    }

    /// Reference the buffer by URI instead of the GLB binary chunk
    pub fn buffer_uri(mut self, uri: impl Into<String>) -> Self {
        self.buffer_uri = Some(uri.into());
        self
    }

    /// Add an image stored in a buffer view
    pub fn add_image(mut self, name: &str, view: ViewIndex, mime_type: &str) -> Self {
        self.images.push(json::Image {
            buffer_view: Some(view.as_json_index()),
            mime_type: Some(json::image::MimeType(mime_type.to_string())),
            name: Some(name.to_string()),
            uri: None,
            extensions: Default::default(),
            extras: Default::default(),
        });
        self
    }

    /// Get the index of the last added image
    pub fn last_image_index(&self) -> Option<json::Index<json::Image>> {
        last_index(&self.images)
    }

    /// Add a texture sampling `image` with linear filtering, clamped on both axes
    pub fn add_clamped_texture(mut self, name: &str, image: json::Index<json::Image>) -> Self {
        self.samplers.push(json::texture::Sampler {
            mag_filter: Some(Valid(json::texture::MagFilter::Linear)),
            min_filter: Some(Valid(json::texture::MinFilter::Linear)),
            name: None,
            wrap_s: Valid(json::texture::WrappingMode::ClampToEdge),
            wrap_t: Valid(json::texture::WrappingMode::ClampToEdge),
            extensions: Default::default(),
            extras: Default::default(),
        });

        self.textures.push(json::Texture {
            name: Some(name.to_string()),
            sampler: Some(json::Index::new(self.samplers.len() as u32 - 1)),
            source: image,
            extensions: Default::default(),
            extras: Default::default(),
        });
        self
    }

    /// Get the index of the last added texture
    pub fn last_texture_index(&self) -> Option<json::Index<json::Texture>> {
        last_index(&self.textures)
    }

    /// Add a metallic-roughness material
    pub fn add_material(mut self, desc: &MaterialDesc) -> Self {
        let pbr = json::material::PbrMetallicRoughness {
            base_color_factor: json::material::PbrBaseColorFactor(desc.base_color_factor),
            base_color_texture: desc.base_color_texture.map(|index| json::texture::Info {
                index,
                tex_coord: 0,
                extensions: Default::default(),
                extras: Default::default(),
            }),
            metallic_factor: json::material::StrengthFactor(desc.metallic),
            roughness_factor: json::material::StrengthFactor(desc.roughness),
            ..Default::default()
        };

        self.materials.push(json::Material {
            name: Some(desc.name.clone()),
            pbr_metallic_roughness: pbr,
            ..Default::default()
        });
        self
    }

    /// Get the index of the last added material
    pub fn last_material_index(&self) -> Option<json::Index<json::Material>> {
        last_index(&self.materials)
    }

    /// Add a mesh with a single triangle primitive
    pub fn add_mesh_from_accessors(
        mut self,
        name: &str,
        accessors: &MeshAccessors,
        material: Option<json::Index<json::Material>>,
    ) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            Valid(json::mesh::Semantic::Positions),
            accessors.positions.as_json_index(),
        );

        if let Some(uvs) = accessors.uvs {
            attributes.insert(
                Valid(json::mesh::Semantic::TexCoords(0)),
                uvs.as_json_index(),
            );
        }

        if let Some(normals) = accessors.normals {
            attributes.insert(
                Valid(json::mesh::Semantic::Normals),
                normals.as_json_index(),
            );
        }

        let primitive = json::mesh::Primitive {
            attributes,
            extensions: Default::default(),
            extras: Default::default(),
            indices: accessors.indices.map(|i| i.as_json_index()),
            material,
            mode: Valid(json::mesh::Mode::Triangles),
            targets: None,
        };

        self.meshes.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            primitives: vec![primitive],
            weights: None,
        });

        self
    }

    /// Get the index of the last added mesh
    pub fn last_mesh_index(&self) -> Option<json::Index<json::Mesh>> {
        last_index(&self.meshes)
    }

    /// Add a node instancing `mesh` at the origin
    pub fn add_mesh_node(mut self, name: &str, mesh: json::Index<json::Mesh>) -> Self {
        self.nodes.push(json::Node {
            camera: None,
            children: None,
            extensions: Default::default(),
            extras: Default::default(),
            matrix: None,
            mesh: Some(mesh),
            name: Some(name.to_string()),
            rotation: None,
            scale: None,
            translation: None,
            skin: None,
            weights: None,
        });
        self
    }

    /// Get the index of the last added node
    pub fn last_node_index(&self) -> Option<json::Index<json::Node>> {
        last_index(&self.nodes)
    }

    /// Add a scene
    pub fn add_scene(mut self, name: &str, root_nodes: &[json::Index<json::Node>]) -> Self {
        self.scenes.push(json::Scene {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(name.to_string()),
            nodes: root_nodes.to_vec(),
        });
        self
    }

    /// Build final GLTF Root (requires buffer views and accessors from BufferBuilder)
    pub fn build(
        self,
        buffer_views: &[json::buffer::View],
        accessors: &[json::Accessor],
        generator: &str,
    ) -> json::Root {
        let buffers = vec![json::Buffer {
            byte_length: self.buffer_byte_length.into(),
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            uri: self.buffer_uri,
        }];

        json::Root {
            accessors: accessors.to_vec(),
            animations: Vec::new(),
            asset: json::Asset {
                copyright: None,
                extensions: Default::default(),
                extras: Default::default(),
                generator: Some(generator.to_string()),
                min_version: None,
                version: "2.0".to_string(),
            },
            buffers,
            buffer_views: buffer_views.to_vec(),
            cameras: Vec::new(),
            extensions: Default::default(),
            extensions_required: Vec::new(),
            extensions_used: Vec::new(),
            extras: Default::default(),
            images: self.images,
            materials: self.materials,
            meshes: self.meshes,
            nodes: self.nodes,
            samplers: self.samplers,
            scene: if self.scenes.is_empty() {
                None
            } else {
                Some(json::Index::new(0))
            },
            scenes: self.scenes,
            skins: Vec::new(),
            textures: self.textures,
        }
    }
}

impl Default for GltfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn last_index<T>(items: &[T]) -> Option<json::Index<T>> {
    items
        .len()
        .checked_sub(1)
        .map(|last| json::Index::new(last as u32))
}
