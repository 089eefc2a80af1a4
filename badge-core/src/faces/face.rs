//! Front and back face tessellation

use glam::{Vec2, Vec3};

use super::FaceSide;
use super::grid::FaceGrid;
use crate::config::BadgeSpec;
use crate::geometry::{chamfer_z, clamp_to_rounded_corner, edge_distance, edge_normal};
use crate::mesh::MeshBuffers;
use crate::uv::UvRegion;

/// Tessellate one face of the badge.
///
/// Lays an `(n + 1) x (n + 1)` grid over the face rectangle. Grid points inside
/// the cutout are dropped; the rest are clamped onto the corner arcs, lowered
/// by the edge chamfer and textured from their unclamped planar position.
/// A quad is triangulated only when all four of its corners survive.
///
/// # Arguments
/// * `spec` - Validated badge description
/// * `uv` - Planned UV region (shared by both faces)
/// * `subdivisions` - Grid cells per side (min 1)
/// * `side` - Which face to build; the back is mirrored in U and wound the
///   other way
pub fn build_face(
    spec: &BadgeSpec,
    uv: &UvRegion,
    subdivisions: u32,
    side: FaceSide,
) -> MeshBuffers {
    let grid = FaceGrid::new(spec, subdivisions);
    let n = grid.n();
    let is_front = side == FaceSide::Front;

    let row = n as usize + 1;
    let mut mesh = MeshBuffers::with_capacity(row * row, n as usize * n as usize * 6);
    // Grid index -> vertex index, None where the cutout removed the point
    let mut vertex_map: Vec<Option<u32>> = Vec::with_capacity(row * row);

    for j in 0..=n {
        for i in 0..=n {
            if grid.is_dropped(i, j) {
                vertex_map.push(None);
                continue;
            }

            let planar = grid.point(i, j);
            let vertex = face_vertex(spec, planar, side);
            let tex = uv.map(planar, !is_front);
            let index = mesh.push_vertex(vertex.position, tex, vertex.normal);
            vertex_map.push(Some(index));
        }
    }

    for j in 0..n as usize {
        for i in 0..n as usize {
            let corners = (
                vertex_map[j * row + i],
                vertex_map[j * row + i + 1],
                vertex_map[(j + 1) * row + i + 1],
                vertex_map[(j + 1) * row + i],
            );
            let (Some(a), Some(b), Some(c), Some(d)) = corners else {
                continue;
            };

            match side {
                FaceSide::Front => {
                    mesh.push_triangle(a, b, c);
                    mesh.push_triangle(a, c, d);
                }
                FaceSide::Back => {
                    mesh.push_triangle(a, c, b);
                    mesh.push_triangle(a, d, c);
                }
            }
        }
    }

    mesh
}

/// Position and shading normal of a face vertex
pub(crate) struct FaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Clamp a planar grid point onto the corner arcs and lower it by the chamfer.
///
/// The hole wall calls this too, so its rim matches the face bit for bit.
pub(crate) fn face_vertex(spec: &BadgeSpec, planar: Vec2, side: FaceSide) -> FaceVertex {
    let half = spec.half_extents();
    let chamfer = spec.edge_chamfer_radius;
    let is_front = side == FaceSide::Front;
    let z_base = if is_front {
        spec.half_thickness()
    } else {
        -spec.half_thickness()
    };
    let face_normal = if is_front { Vec3::Z } else { Vec3::NEG_Z };

    let p = clamp_to_rounded_corner(planar, half, spec.corner_radius);
    let d = edge_distance(p, half);
    let z = chamfer_z(z_base, d, chamfer, is_front);

    // Blend toward the edge direction inside the chamfer band
    let t = if chamfer <= 0.0 {
        1.0
    } else {
        (d / chamfer).clamp(0.0, 1.0)
    };
    let normal = (face_normal * t + edge_normal(p, half) * (1.0 - t)).normalize_or(face_normal);

    FaceVertex {
        position: [p.x, p.y, z],
        normal: normal.to_array(),
    }
}
