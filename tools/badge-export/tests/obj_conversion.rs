//! OBJ export from written containers.

use badge_core::BadgeConfig;
use badgesmith_export::texture::SourceImage;
use badgesmith_export::{
    ContainerFormat, MaterialSettings, ObjOptions, convert_container_to_obj, generate,
};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

fn write_container(dir: &Path, image: Option<&SourceImage>, format: ContainerFormat) -> PathBuf {
    let mut config = BadgeConfig::default();
    config.mesh.subdivisions = 12;
    config.texture.atlas_size = 32;
    let artifacts = generate(&config, image, &MaterialSettings::default()).expect("generate");

    let path = dir.join(format!("badge.{}", format.extension()));
    let bytes = artifacts.container.to_bytes(format).expect("serialize");
    std::fs::write(&path, bytes).expect("write container");
    path
}

fn parse(text: &str) -> (Vec<Vec<f32>>, Vec<[usize; 3]>) {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for line in text.lines() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => vertices.push(parts.map(|p| p.parse().expect("float")).collect()),
            Some("f") => {
                let ids: Vec<usize> = parts.map(|p| p.parse().expect("index")).collect();
                faces.push([ids[0], ids[1], ids[2]]);
            }
            _ => {}
        }
    }
    (vertices, faces)
}

#[test]
fn test_obj_with_baked_colors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let photo = SourceImage::from_rgb(RgbImage::from_pixel(20, 30, Rgb([0, 0, 255])));
    let input = write_container(dir.path(), Some(&photo), ContainerFormat::Glb);
    let output = dir.path().join("badge.obj");

    let summary =
        convert_container_to_obj(&input, &output, &ObjOptions::default()).expect("convert");
    assert!(summary.colored);

    let (vertices, faces) = parse(&std::fs::read_to_string(&output).expect("read obj"));
    assert_eq!(vertices.len(), summary.vertices);
    assert_eq!(faces.len(), summary.triangles);
    assert!(vertices.iter().all(|v| v.len() == 6));
    assert!(
        vertices
            .iter()
            .flat_map(|v| &v[3..])
            .all(|c| (0.0..=1.0).contains(c))
    );
    // White background and a blue photo: every vertex is one or the other
    assert!(vertices.iter().all(|v| v[5] > 0.9));
    assert!(vertices.iter().any(|v| v[3] < 0.1));

    // 1-based and in range
    assert!(
        faces
            .iter()
            .flatten()
            .all(|&i| i >= 1 && i <= vertices.len())
    );
}

#[test]
fn test_obj_without_colors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_container(dir.path(), None, ContainerFormat::Gltf);
    let output = dir.path().join("plain.obj");

    let options = ObjOptions {
        bake_colors: false,
        bilinear: false,
    };
    let summary = convert_container_to_obj(&input, &output, &options).expect("convert");
    assert!(!summary.colored);

    let (vertices, _) = parse(&std::fs::read_to_string(&output).expect("read obj"));
    assert!(vertices.iter().all(|v| v.len() == 3));
}

#[test]
fn test_untextured_container_skips_colors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_container(dir.path(), None, ContainerFormat::Glb);
    let output = dir.path().join("flat.obj");

    let summary =
        convert_container_to_obj(&input, &output, &ObjOptions::default()).expect("convert");
    assert!(!summary.colored);
}

#[test]
fn test_missing_container_is_import_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = convert_container_to_obj(
        &dir.path().join("nope.glb"),
        &dir.path().join("nope.obj"),
        &ObjOptions::default(),
    );
    assert!(matches!(
        result,
        Err(badgesmith_export::CollaboratorError::GltfImport { .. })
    ));
    assert!(!dir.path().join("nope.obj").exists());
}
