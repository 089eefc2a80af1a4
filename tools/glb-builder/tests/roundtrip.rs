//! Documents built with glb-builder must load in the gltf crate unchanged.

use glb_builder::*;

fn quad_document(buffer: &mut BufferBuilder, textured: bool) -> json::Root {
    let image = textured.then(|| buffer.pack_image(&[7u8; 10]));
    let mesh = MeshBuilder::new()
        .positions(&[
            [-1.0, -1.0, 0.0],
            [1.0, -1.0, 0.0],
            [1.0, 1.0, 0.5],
            [-1.0, 1.0, 0.0],
        ])
        .uvs(&[[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]])
        .normals(&[[0.0, 0.0, 1.0]; 4])
        .indices(&[0, 1, 2, 0, 2, 3])
        .build(buffer);

    let mut gltf = GltfBuilder::new().buffer_byte_length(buffer.data().len() as u64);
    let mut texture = None;
    if let Some(view) = image {
        gltf = gltf.add_image("Atlas", view, "image/png");
        let image_index = gltf.last_image_index().expect("image");
        gltf = gltf.add_clamped_texture("AtlasTexture", image_index);
        texture = gltf.last_texture_index();
    }

    let gltf = gltf.add_material(&MaterialDesc {
        name: "QuadMaterial".to_string(),
        base_color_factor: [1.0, 1.0, 1.0, 1.0],
        base_color_texture: texture,
        metallic: 0.0,
        roughness: 1.0,
    });
    let material = gltf.last_material_index();
    let gltf = gltf.add_mesh_from_accessors("Quad", &mesh, material);
    let mesh_index = gltf.last_mesh_index().expect("mesh");
    let gltf = gltf.add_mesh_node("QuadNode", mesh_index);
    let node = gltf.last_node_index().expect("node");
    gltf.add_scene("QuadScene", &[node])
        .build(buffer.views(), buffer.accessors(), "glb-builder tests")
}

#[test]
fn test_glb_roundtrip_through_gltf_import() {
    let mut buffer = BufferBuilder::new();
    let root = quad_document(&mut buffer, true);
    let glb = assemble_glb(&root, buffer.data()).expect("assemble");

    // The image bytes are a placeholder, so load buffers without decoding images
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(&glb).expect("parse GLB");
    let buffers = gltf::import_buffers(&document, None, blob).expect("load buffers");

    assert_eq!(document.meshes().count(), 1);
    assert_eq!(document.textures().count(), 1);
    let primitive = document
        .meshes()
        .next()
        .and_then(|mesh| mesh.primitives().next())
        .expect("primitive");

    let reader = primitive.reader(|b| Some(&buffers[b.index()]));
    let positions: Vec<[f32; 3]> = reader.read_positions().expect("positions").collect();
    assert_eq!(positions.len(), 4);
    assert_eq!(positions[2], [1.0, 1.0, 0.5]);

    let indices: Vec<u32> = reader
        .read_indices()
        .expect("indices")
        .into_u32()
        .collect();
    assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);

    let bounds = primitive.bounding_box();
    assert_eq!(bounds.min, [-1.0, -1.0, 0.0]);
    assert_eq!(bounds.max, [1.0, 1.0, 0.5]);

    let material = primitive.material();
    assert_eq!(material.name(), Some("QuadMaterial"));
    assert!(material.pbr_metallic_roughness().base_color_texture().is_some());
}

#[test]
fn test_embedded_gltf_roundtrip() {
    let mut buffer = BufferBuilder::new();
    let mut root = quad_document(&mut buffer, false);
    root.buffers[0].uri = Some(data_uri(buffer.data()));

    let bytes = to_embedded_gltf(&root).expect("serialize");
    let (document, buffers, images) = gltf::import_slice(&bytes).expect("import glTF");

    assert!(images.is_empty());
    assert_eq!(buffers[0].len(), buffer.data().len());
    assert_eq!(document.materials().count(), 1);
    assert!(
        document
            .materials()
            .next()
            .and_then(|m| m.pbr_metallic_roughness().base_color_texture())
            .is_none()
    );
}
