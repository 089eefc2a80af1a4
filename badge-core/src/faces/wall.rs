//! Side wall and hole wall extrusion

use glam::{Vec2, Vec3};

use super::FaceSide;
use super::face::face_vertex;
use super::grid::FaceGrid;
use super::outline::{grid_perimeter_outline, rounded_rect_outline};
use crate::config::{BadgeSpec, HoleSpec, MeshSettings};
use crate::geometry::{chamfer_z, edge_distance};
use crate::mesh::MeshBuffers;
use crate::uv::UvRegion;

/// Segments shorter than this are skipped
const MIN_SEGMENT_LENGTH: f32 = 1e-9;

/// Which way a wall faces relative to its counter-clockwise outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WallFacing {
    /// Away from the enclosed region (outer rim, grid cutout edges)
    Outward,
    /// Into the enclosed region (analytic hole outline)
    Inward,
}

/// Build the perimeter wall joining the chamfered rims of both faces.
///
/// Without `side_segments` the outline follows the face grid so every wall
/// rim vertex coincides with a face rim vertex.
pub fn build_side_wall(spec: &BadgeSpec, uv: &UvRegion, settings: &MeshSettings) -> MeshBuffers {
    let half = spec.half_extents();
    let outline = match settings.side_segments {
        Some(segments) => rounded_rect_outline(Vec2::ZERO, half, spec.corner_radius, segments),
        None => grid_perimeter_outline(half, spec.corner_radius, settings.subdivisions.max(1)),
    };

    extrude_outline(spec, &outline, uv.neutral, WallFacing::Outward)
}

/// Build the inner wall of the lanyard cutout.
///
/// Without `hole_segments` the wall follows the cutout the face grid actually
/// leaves: every grid edge between a surviving and a removed cell is swept
/// through the thickness, so the wall closes against both faces exactly.
/// With `hole_segments` the exact rounded outline is swept instead.
pub fn build_hole_wall(
    spec: &BadgeSpec,
    hole: &HoleSpec,
    uv: &UvRegion,
    settings: &MeshSettings,
) -> MeshBuffers {
    match settings.hole_segments {
        Some(segments) => {
            let outline = rounded_rect_outline(
                hole.center(spec.height),
                hole.half_extents(),
                hole.corner_radius,
                segments,
            );
            extrude_outline(spec, &outline, uv.neutral, WallFacing::Inward)
        }
        None => extrude_cutout(spec, &FaceGrid::new(spec, settings.subdivisions), uv.neutral),
    }
}

/// Sweep a closed outline between the front and back face heights.
///
/// Each segment becomes its own quad with a flat normal, so adjacent quads
/// do not share vertices.
fn extrude_outline(
    spec: &BadgeSpec,
    outline: &[Vec2],
    tex: [f32; 2],
    facing: WallFacing,
) -> MeshBuffers {
    let half = spec.half_extents();
    let half_t = spec.half_thickness();
    let chamfer = spec.edge_chamfer_radius;
    let rim = |p: Vec2| {
        let d = edge_distance(p, half);
        [
            p.extend(chamfer_z(half_t, d, chamfer, true)),
            p.extend(chamfer_z(-half_t, d, chamfer, false)),
        ]
    };

    let count = outline.len();
    let mut mesh = MeshBuffers::with_capacity(count * 4, count * 6);
    for k in 0..count {
        let p1 = outline[k];
        let p2 = outline[(k + 1) % count];
        push_wall_quad(&mut mesh, rim(p1), rim(p2), tex, facing);
    }

    mesh
}

/// Sweep the grid edges around the cutout, reusing the face vertex positions.
///
/// Cutout edges keep the solid on their left like the outer rim does, so
/// the cavity side is the outward side of each quad.
fn extrude_cutout(spec: &BadgeSpec, grid: &FaceGrid, tex: [f32; 2]) -> MeshBuffers {
    let rim = |p: Vec2| {
        [FaceSide::Front, FaceSide::Back]
            .map(|side| Vec3::from_array(face_vertex(spec, p, side).position))
    };

    let edges = grid.cutout_edges();
    let mut mesh = MeshBuffers::with_capacity(edges.len() * 4, edges.len() * 6);
    for (from, to) in &edges {
        let p1 = rim(grid.point(from.x, from.y));
        let p2 = rim(grid.point(to.x, to.y));
        push_wall_quad(&mut mesh, p1, p2, tex, WallFacing::Outward);
    }

    mesh
}

/// Append one flat-shaded quad between rim points `[front, back]`
fn push_wall_quad(
    mesh: &mut MeshBuffers,
    p1: [Vec3; 2],
    p2: [Vec3; 2],
    tex: [f32; 2],
    facing: WallFacing,
) {
    let tangent = p2[0].truncate() - p1[0].truncate();
    if tangent.length() <= MIN_SEGMENT_LENGTH {
        return;
    }

    // Right-hand perpendicular points outward on a CCW loop
    let outward = Vec3::new(tangent.y, -tangent.x, 0.0).normalize();
    let normal = match facing {
        WallFacing::Outward => outward,
        WallFacing::Inward => -outward,
    }
    .to_array();

    let base = mesh.push_vertex(p1[0].to_array(), tex, normal);
    mesh.push_vertex(p2[0].to_array(), tex, normal);
    mesh.push_vertex(p2[1].to_array(), tex, normal);
    mesh.push_vertex(p1[1].to_array(), tex, normal);

    match facing {
        WallFacing::Outward => {
            mesh.push_triangle(base, base + 3, base + 2);
            mesh.push_triangle(base, base + 2, base + 1);
        }
        WallFacing::Inward => {
            mesh.push_triangle(base, base + 2, base + 3);
            mesh.push_triangle(base, base + 1, base + 2);
        }
    }
}
