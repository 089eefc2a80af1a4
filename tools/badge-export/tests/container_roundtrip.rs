//! Containers written by the encoder must load back through the gltf crate.

use badge_core::BadgeConfig;
use badgesmith_export::texture::SourceImage;
use badgesmith_export::{ContainerFormat, MaterialSettings, generate};
use image::{Rgb, RgbImage};

fn small_config() -> BadgeConfig {
    let mut config = BadgeConfig::default();
    config.mesh.subdivisions = 24;
    config.texture.atlas_size = 64;
    config
}

fn photo() -> SourceImage {
    SourceImage::from_rgb(RgbImage::from_fn(48, 64, |x, y| {
        Rgb([(x * 5) as u8, (y * 4) as u8, 128])
    }))
}

type Imported = (
    gltf::Document,
    Vec<gltf::buffer::Data>,
    Vec<gltf::image::Data>,
    usize,
);

fn import(format: ContainerFormat, image: Option<&SourceImage>) -> Imported {
    let artifacts =
        generate(&small_config(), image, &MaterialSettings::default()).expect("generate");
    let bytes = artifacts.container.to_bytes(format).expect("serialize");
    let (document, buffers, images) = gltf::import_slice(&bytes).expect("import");
    (document, buffers, images, artifacts.mesh.mesh.vertex_count())
}

#[test]
fn test_glb_positions_match_recorded_bounds() {
    let (document, buffers, images, vertex_count) = import(ContainerFormat::Glb, Some(&photo()));
    assert_eq!(images.len(), 1);
    assert_eq!((images[0].width, images[0].height), (64, 64));

    let primitive = document
        .meshes()
        .next()
        .and_then(|mesh| mesh.primitives().next())
        .expect("primitive");
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
    let positions: Vec<[f32; 3]> = reader.read_positions().expect("positions").collect();
    assert_eq!(positions.len(), vertex_count);

    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in &positions {
        for axis in 0..3 {
            min[axis] = min[axis].min(p[axis]);
            max[axis] = max[axis].max(p[axis]);
        }
    }
    let bounds = primitive.bounding_box();
    assert_eq!(bounds.min, min);
    assert_eq!(bounds.max, max);

    let indices: Vec<u32> = reader
        .read_indices()
        .expect("indices")
        .into_u32()
        .collect();
    assert_eq!(indices.len() % 3, 0);
    assert!(indices.iter().all(|&i| (i as usize) < positions.len()));

    let uvs: Vec<[f32; 2]> = reader
        .read_tex_coords(0)
        .expect("uvs")
        .into_f32()
        .collect();
    assert_eq!(uvs.len(), positions.len());
    assert!(uvs.iter().flatten().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
fn test_textured_material_references_atlas() {
    let (document, _, _, _) = import(ContainerFormat::Glb, Some(&photo()));
    let material = document.materials().next().expect("material");
    let pbr = material.pbr_metallic_roughness();

    assert_eq!(material.name(), Some("BadgeMaterial"));
    assert_eq!(pbr.base_color_factor(), [1.0; 4]);
    assert_eq!(pbr.metallic_factor(), 0.05);
    assert_eq!(pbr.roughness_factor(), 0.85);

    let texture = pbr.base_color_texture().expect("texture").texture();
    assert_eq!(texture.source().index(), 0);
    assert_eq!(
        texture.sampler().wrap_s(),
        gltf::texture::WrappingMode::ClampToEdge
    );
}

#[test]
fn test_embedded_gltf_untextured() {
    let (document, buffers, images, vertex_count) = import(ContainerFormat::Gltf, None);
    assert!(images.is_empty());
    assert_eq!(buffers.len(), 1);
    assert_eq!(document.views().count(), 4);
    assert_eq!(document.accessors().count(), 4);

    let material = document.materials().next().expect("material");
    assert!(material.pbr_metallic_roughness().base_color_texture().is_none());
    assert_eq!(
        material.pbr_metallic_roughness().base_color_factor(),
        [0.9, 0.9, 0.9, 1.0]
    );

    let accessor = document.accessors().next().expect("positions accessor");
    assert_eq!(accessor.count(), vertex_count);
}

#[test]
fn test_buffer_length_is_exact_section_sum() {
    let artifacts =
        generate(&small_config(), Some(&photo()), &MaterialSettings::default()).expect("generate");
    let container = &artifacts.container;
    let mesh = &artifacts.mesh.mesh;

    let image_len = container.root.buffer_views[0].byte_length.0 as usize;
    let vertices = mesh.vertex_count();
    // 24 subdivisions stay well under 65536 vertices
    let expected =
        image_len.next_multiple_of(4) + vertices * (12 + 8 + 12) + mesh.indices.len() * 2;
    assert_eq!(container.buffer.len(), expected);
    assert_eq!(container.root.buffers[0].byte_length.0 as usize, expected);
}
