//! Binary container encoder (badge mesh + atlas -> glTF 2.0)
//!
//! Buffer layout, in order, each section starting on a 4-byte boundary:
//! PNG atlas (optional), positions, UVs, normals, indices. The buffer has no
//! trailing padding; the GLB writer pads the binary chunk itself.

use badge_core::{ConfigError, EncodingError, MeshBuffers};
use glb_builder::json::validation::Checked::Valid;
use glb_builder::{
    BufferBuilder, GltfBuilder, MaterialDesc, MeshBuilder, assemble_glb, data_uri, json,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generator string recorded in the asset metadata
pub const GENERATOR: &str = concat!("badgesmith ", env!("CARGO_PKG_VERSION"));

pub const MATERIAL_NAME: &str = "BadgeMaterial";
pub const MESH_NAME: &str = "BadgeMesh";
pub const NODE_NAME: &str = "BadgeNode";
pub const SCENE_NAME: &str = "BadgeScene";

/// Output container flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    /// Binary glTF (JSON + BIN chunks)
    #[default]
    Glb,
    /// JSON glTF with the buffer embedded as a base64 data URI
    Gltf,
}

impl ContainerFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Glb => "glb",
            ContainerFormat::Gltf => "gltf",
        }
    }

    /// Format named by the extension of `path`, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "glb" => Some(ContainerFormat::Glb),
            "gltf" => Some(ContainerFormat::Gltf),
            _ => None,
        }
    }
}

/// Surface parameters of the single badge material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialSettings {
    pub metallic: f32,
    pub roughness: f32,
    /// Constant color used when no texture is embedded
    pub base_color: [f32; 4],
}

impl Default for MaterialSettings {
    fn default() -> Self {
        Self {
            metallic: 0.05,
            roughness: 0.85,
            base_color: [0.9, 0.9, 0.9, 1.0],
        }
    }
}

impl MaterialSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_range("material.metallic", self.metallic)?;
        unit_range("material.roughness", self.roughness)?;
        for value in self.base_color {
            unit_range("material.base_color", value)?;
        }
        Ok(())
    }
}

fn unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}

/// glTF document plus the single binary buffer it describes
#[derive(Debug, Clone)]
pub struct BinaryContainer {
    pub root: json::Root,
    pub buffer: Vec<u8>,
}

impl BinaryContainer {
    /// Check every buffer view and accessor against the buffer.
    ///
    /// # Errors
    ///
    /// Reports the first byte range outside the buffer, a misplaced image or
    /// an accessor whose size disagrees with its view.
    pub fn validate(&self) -> Result<(), EncodingError> {
        let buffer_length = self.buffer.len() as u64;
        let declared = self
            .root
            .buffers
            .first()
            .ok_or_else(|| EncodingError::Malformed("no buffer declared".into()))?
            .byte_length
            .0;
        if declared != buffer_length {
            return Err(EncodingError::Malformed(format!(
                "buffer declares {declared} bytes but holds {buffer_length}"
            )));
        }

        for view in &self.root.buffer_views {
            let (offset, length) = view_range(view);
            if offset + length > buffer_length {
                return Err(EncodingError::ByteRangeOutOfBounds {
                    offset,
                    length,
                    buffer_length,
                });
            }
        }

        self.validate_image_placement()?;

        for (index, accessor) in self.root.accessors.iter().enumerate() {
            let (Valid(type_), Valid(component)) = (&accessor.type_, &accessor.component_type)
            else {
                return Err(EncodingError::Malformed(format!(
                    "accessor {index} has an invalid type"
                )));
            };
            let view = accessor
                .buffer_view
                .and_then(|view| self.root.buffer_views.get(view.value()))
                .ok_or_else(|| EncodingError::Malformed(format!("accessor {index} has no view")))?;

            let expected = accessor.count.0 * (type_.multiplicity() * component.0.size()) as u64;
            let actual = view.byte_length.0;
            if expected != actual {
                return Err(EncodingError::AccessorSizeMismatch {
                    accessor: index,
                    expected,
                    actual,
                });
            }
        }

        let position = self
            .root
            .meshes
            .first()
            .and_then(|mesh| mesh.primitives.first())
            .and_then(|primitive| {
                primitive
                    .attributes
                    .get(&Valid(json::mesh::Semantic::Positions))
            })
            .and_then(|index| self.root.accessors.get(index.value()))
            .ok_or_else(|| EncodingError::Malformed("mesh has no POSITION accessor".into()))?;
        if position.min.is_none() || position.max.is_none() {
            return Err(EncodingError::Malformed(
                "POSITION accessor lacks min/max".into(),
            ));
        }

        Ok(())
    }

    /// Image bytes must occupy view 0 at offset 0, zero-padded up to the next view
    fn validate_image_placement(&self) -> Result<(), EncodingError> {
        let Some(image) = self.root.images.first() else {
            return Ok(());
        };
        if image.buffer_view.map(|view| view.value()) != Some(0) {
            return Err(EncodingError::MisplacedImage);
        }

        let (offset, length) = self
            .root
            .buffer_views
            .first()
            .map(view_range)
            .ok_or(EncodingError::MisplacedImage)?;
        if offset != 0 {
            return Err(EncodingError::MisplacedImage);
        }

        let padded = length.next_multiple_of(4);
        if let Some(next) = self.root.buffer_views.get(1) {
            let (next_offset, _) = view_range(next);
            if next_offset != padded {
                return Err(EncodingError::MisplacedImage);
            }
            let padding = &self.buffer[length as usize..padded as usize];
            if padding.iter().any(|&b| b != 0) {
                return Err(EncodingError::MisplacedImage);
            }
        }
        Ok(())
    }

    /// Binary glTF: 12-byte header, JSON chunk, BIN chunk
    pub fn to_glb(&self) -> Result<Vec<u8>, EncodingError> {
        assemble_glb(&self.root, &self.buffer).map_err(|e| EncodingError::Serialize(e.to_string()))
    }

    /// JSON glTF with the buffer inlined as a base64 data URI
    pub fn to_embedded_gltf(&self) -> Result<Vec<u8>, EncodingError> {
        let mut root = self.root.clone();
        if let Some(buffer) = root.buffers.first_mut() {
            buffer.uri = Some(data_uri(&self.buffer));
        }
        glb_builder::to_embedded_gltf(&root).map_err(|e| EncodingError::Serialize(e.to_string()))
    }

    pub fn to_bytes(&self, format: ContainerFormat) -> Result<Vec<u8>, EncodingError> {
        match format {
            ContainerFormat::Glb => self.to_glb(),
            ContainerFormat::Gltf => self.to_embedded_gltf(),
        }
    }
}

fn view_range(view: &json::buffer::View) -> (u64, u64) {
    let offset = view.byte_offset.map(|o| o.0).unwrap_or(0);
    (offset, view.byte_length.0)
}

/// Pack the mesh (and optional PNG atlas) into a validated container.
///
/// # Errors
///
/// Fails when the mesh streams are inconsistent or empty, or when the
/// resulting layout does not validate.
pub fn encode_container(
    mesh: &MeshBuffers,
    atlas_png: Option<&[u8]>,
    material: &MaterialSettings,
) -> Result<BinaryContainer, EncodingError> {
    mesh.validate()?;
    if mesh.is_empty() {
        return Err(EncodingError::Malformed("mesh has no vertices".into()));
    }

    let mut buffer = BufferBuilder::new();
    // Image goes first so every geometry view follows one alignment pad
    let image_view = atlas_png.map(|png| buffer.pack_image(png));
    let accessors = MeshBuilder::new()
        .positions(&mesh.positions)
        .uvs(&mesh.uvs)
        .normals(&mesh.normals)
        .indices(&mesh.indices)
        .build(&mut buffer);

    let mut gltf = GltfBuilder::new().buffer_byte_length(buffer.data().len() as u64);

    let mut texture = None;
    if let Some(view) = image_view {
        gltf = gltf.add_image("BadgeAtlas", view, "image/png");
        if let Some(image) = gltf.last_image_index() {
            gltf = gltf.add_clamped_texture("BadgeTexture", image);
            texture = gltf.last_texture_index();
        }
    }

    let base_color_factor = if texture.is_some() {
        [1.0; 4]
    } else {
        material.base_color
    };
    gltf = gltf.add_material(&MaterialDesc {
        name: MATERIAL_NAME.to_string(),
        base_color_factor,
        base_color_texture: texture,
        metallic: material.metallic,
        roughness: material.roughness,
    });

    let material_index = gltf.last_material_index();
    gltf = gltf.add_mesh_from_accessors(MESH_NAME, &accessors, material_index);
    let mesh_index = gltf
        .last_mesh_index()
        .ok_or_else(|| EncodingError::Malformed("mesh was not recorded".into()))?;
    gltf = gltf.add_mesh_node(NODE_NAME, mesh_index);
    let node_index = gltf
        .last_node_index()
        .ok_or_else(|| EncodingError::Malformed("node was not recorded".into()))?;
    let root = gltf
        .add_scene(SCENE_NAME, &[node_index])
        .build(buffer.views(), buffer.accessors(), GENERATOR);

    let container = BinaryContainer {
        root,
        buffer: buffer.into_data(),
    };
    container.validate()?;

    tracing::info!(
        "Encoded container: {} bytes buffer, {} views, {} accessors, index type {:?}",
        container.buffer.len(),
        container.root.buffer_views.len(),
        container.root.accessors.len(),
        accessors.index_type
    );

    Ok(container)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshBuffers {
        let mut mesh = MeshBuffers::new();
        let n = [0.0, 0.0, 1.0];
        let a = mesh.push_vertex([-1.0, -1.0, 0.0], [0.0, 1.0], n);
        let b = mesh.push_vertex([1.0, -1.0, 0.0], [1.0, 1.0], n);
        let c = mesh.push_vertex([1.0, 1.0, 0.0], [1.0, 0.0], n);
        let d = mesh.push_vertex([-1.0, 1.0, 0.0], [0.0, 0.0], n);
        mesh.push_triangle(a, b, c);
        mesh.push_triangle(a, c, d);
        mesh
    }

    #[test]
    fn test_untextured_layout() {
        let container =
            encode_container(&quad(), None, &MaterialSettings::default()).expect("encode");
        let root = &container.root;

        assert_eq!(root.buffer_views.len(), 4);
        assert_eq!(root.accessors.len(), 4);
        assert!(root.images.is_empty() && root.textures.is_empty());
        // 48 + 32 + 48 + 12
        assert_eq!(container.buffer.len(), 140);

        let material = &root.materials[0];
        assert_eq!(material.name.as_deref(), Some(MATERIAL_NAME));
        assert_eq!(material.pbr_metallic_roughness.base_color_factor.0, [0.9, 0.9, 0.9, 1.0]);
        assert_eq!(root.meshes[0].name.as_deref(), Some(MESH_NAME));
        assert_eq!(root.nodes[0].name.as_deref(), Some(NODE_NAME));
        assert_eq!(root.scenes[0].name.as_deref(), Some(SCENE_NAME));
        let scene_node = root.scenes[0].nodes[0].value();
        assert_eq!(root.scenes[0].nodes.len(), 1);
        assert_eq!(root.nodes[scene_node].name.as_deref(), Some(NODE_NAME));
    }

    #[test]
    fn test_textured_layout_puts_image_first() {
        let png = [0x89u8, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A];
        let container =
            encode_container(&quad(), Some(&png), &MaterialSettings::default()).expect("encode");
        let root = &container.root;

        assert_eq!(root.buffer_views.len(), 5);
        assert_eq!(view_range(&root.buffer_views[0]), (0, 7));
        assert_eq!(view_range(&root.buffer_views[1]), (8, 48));
        assert!(root.buffer_views[0].target.is_none());
        assert_eq!(container.buffer.len(), 8 + 140);
        assert_eq!(root.images[0].mime_type.as_ref().map(|m| m.0.as_str()), Some("image/png"));
        assert_eq!(root.materials[0].pbr_metallic_roughness.base_color_factor.0, [1.0; 4]);
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_view() {
        let mut container =
            encode_container(&quad(), None, &MaterialSettings::default()).expect("encode");
        container.buffer.truncate(100);
        container.root.buffers[0].byte_length = 100u64.into();
        assert!(matches!(
            container.validate(),
            Err(EncodingError::ByteRangeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_accessor_mismatch() {
        let mut container =
            encode_container(&quad(), None, &MaterialSettings::default()).expect("encode");
        container.root.accessors[0].count = 5u64.into();
        assert!(matches!(
            container.validate(),
            Err(EncodingError::AccessorSizeMismatch { accessor: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_dirty_image_padding() {
        let png = [1u8, 2, 3];
        let mut container =
            encode_container(&quad(), Some(&png), &MaterialSettings::default()).expect("encode");
        container.buffer[3] = 0xFF;
        assert_eq!(container.validate(), Err(EncodingError::MisplacedImage));
    }

    #[test]
    fn test_validate_requires_position_bounds() {
        let mut container =
            encode_container(&quad(), None, &MaterialSettings::default()).expect("encode");
        container.root.accessors[0].min = None;
        assert!(matches!(container.validate(), Err(EncodingError::Malformed(_))));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let result = encode_container(&MeshBuffers::new(), None, &MaterialSettings::default());
        assert!(matches!(result, Err(EncodingError::Malformed(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ContainerFormat::from_path(Path::new("out/badge.gltf")),
            Some(ContainerFormat::Gltf)
        );
        assert_eq!(
            ContainerFormat::from_path(Path::new("BADGE.GLB")),
            Some(ContainerFormat::Glb)
        );
        assert_eq!(ContainerFormat::from_path(Path::new("badge.obj")), None);
        assert_eq!(ContainerFormat::from_path(Path::new("badge")), None);
    }

    #[test]
    fn test_material_range_checked() {
        let material = MaterialSettings {
            roughness: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            material.validate(),
            Err(ConfigError::OutOfRange { field: "material.roughness", .. })
        ));
    }
}
