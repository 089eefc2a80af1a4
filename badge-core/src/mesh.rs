//! Indexed mesh streams and the assembler that merges them

use std::ops::Range;

use tracing::{debug, info};

use crate::config::BadgeConfig;
use crate::error::{BadgeError, EncodingError};
use crate::faces::{FaceSide, build_face, build_hole_wall, build_side_wall};
use crate::uv::UvRegion;

/// Four index-aligned vertex streams plus triangle indices.
///
/// Face builders append into fresh buffers; the assembled badge mesh is never
/// modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, position: [f32; 3], uv: [f32; 2], normal: [f32; 3]) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.uvs.push(uv);
        self.normals.push(normal);
        index
    }

    pub fn push_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check stream lengths and index ranges.
    ///
    /// # Errors
    ///
    /// Any violation means a builder or the assembler is broken.
    pub fn validate(&self) -> Result<(), EncodingError> {
        let vertex_count = self.positions.len();
        if self.uvs.len() != vertex_count || self.normals.len() != vertex_count {
            return Err(EncodingError::AttributeLengthMismatch {
                positions: vertex_count,
                uvs: self.uvs.len(),
                normals: self.normals.len(),
            });
        }
        if vertex_count > u32::MAX as usize {
            return Err(EncodingError::TooManyVertices(vertex_count));
        }
        if self.indices.len() % 3 != 0 {
            return Err(EncodingError::PartialTriangle(self.indices.len()));
        }
        if let Some((at, index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(EncodingError::IndexOutOfRange {
                index: *index,
                at,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Per-axis minimum and maximum over all positions
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(mut min, mut max), p| {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
            (min, max)
        }))
    }
}

/// Merge mesh parts by concatenation.
///
/// Each part's indices are offset by the number of vertices that precede it.
/// Coincident vertices across parts are kept: every seam vertex carries the
/// normal of its own face.
///
/// # Errors
///
/// Fails if the combined vertex count does not fit in `u32` indices.
pub fn assemble(parts: &[&MeshBuffers]) -> Result<MeshBuffers, EncodingError> {
    let total_vertices: usize = parts.iter().map(|m| m.positions.len()).sum();
    let total_indices: usize = parts.iter().map(|m| m.indices.len()).sum();

    if total_vertices > u32::MAX as usize {
        return Err(EncodingError::TooManyVertices(total_vertices));
    }

    let mut result = MeshBuffers::with_capacity(total_vertices, total_indices);

    for part in parts {
        let vertex_offset = result.positions.len() as u32;

        result.positions.extend_from_slice(&part.positions);
        result.uvs.extend_from_slice(&part.uvs);
        result.normals.extend_from_slice(&part.normals);
        result
            .indices
            .extend(part.indices.iter().map(|&idx| vertex_offset + idx));
    }

    Ok(result)
}

/// The four pieces of a badge, in assembly order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    FrontFace,
    BackFace,
    SideWall,
    HoleWall,
}

/// Vertex and index span of one part inside the assembled mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartRange {
    pub kind: PartKind,
    pub vertices: Range<usize>,
    pub indices: Range<usize>,
}

/// Assembled badge solid plus where each part landed
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeMesh {
    pub mesh: MeshBuffers,
    pub parts: Vec<PartRange>,
}

impl BadgeMesh {
    pub fn part(&self, kind: PartKind) -> Option<&PartRange> {
        self.parts.iter().find(|part| part.kind == kind)
    }
}

/// Build and assemble every part of the badge.
///
/// The configuration is validated before any geometry is generated. A
/// disabled hole yields an empty hole wall part.
///
/// # Errors
///
/// Returns [`BadgeError::Config`] for an invalid configuration and
/// [`BadgeError::Encoding`] if the assembled streams are inconsistent.
pub fn build_badge_mesh(config: &BadgeConfig, uv: &UvRegion) -> Result<BadgeMesh, BadgeError> {
    config.validate()?;

    let spec = &config.badge;
    let subdivisions = config.mesh.subdivisions;

    let front = build_face(spec, uv, subdivisions, FaceSide::Front);
    let back = build_face(spec, uv, subdivisions, FaceSide::Back);
    let side = build_side_wall(spec, uv, &config.mesh);
    let hole = match spec.hole() {
        Some(hole) => build_hole_wall(spec, hole, uv, &config.mesh),
        None => MeshBuffers::new(),
    };

    let pieces = [
        (PartKind::FrontFace, &front),
        (PartKind::BackFace, &back),
        (PartKind::SideWall, &side),
        (PartKind::HoleWall, &hole),
    ];

    let mut parts = Vec::with_capacity(pieces.len());
    let mut vertex_start = 0;
    let mut index_start = 0;
    for (kind, piece) in &pieces {
        let part = PartRange {
            kind: *kind,
            vertices: vertex_start..vertex_start + piece.vertex_count(),
            indices: index_start..index_start + piece.indices.len(),
        };
        debug!(
            "{:?}: {} vertices, {} triangles",
            kind,
            piece.vertex_count(),
            piece.triangle_count()
        );
        vertex_start = part.vertices.end;
        index_start = part.indices.end;
        parts.push(part);
    }

    let refs: Vec<&MeshBuffers> = pieces.iter().map(|(_, piece)| *piece).collect();
    let mesh = assemble(&refs)?;
    mesh.validate()?;

    info!(
        "Badge mesh: {} vertices, {} triangles ({} subdivisions)",
        mesh.vertex_count(),
        mesh.triangle_count(),
        subdivisions
    );

    Ok(BadgeMesh { mesh, parts })
}
