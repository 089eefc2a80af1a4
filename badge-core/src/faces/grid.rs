//! Face grid with the cutout applied
//!
//! Both faces and the default hole wall read the same grid, so the cutout
//! they see is identical point for point.

use glam::{UVec2, Vec2};

use super::outline::grid_point;
use crate::config::BadgeSpec;
use crate::geometry::point_in_rounded_hole;

/// `(n + 1) x (n + 1)` grid points over the face, with cutout points dropped
pub(crate) struct FaceGrid {
    n: u32,
    half: Vec2,
    dropped: Vec<bool>,
}

impl FaceGrid {
    pub(crate) fn new(spec: &BadgeSpec, subdivisions: u32) -> Self {
        let n = subdivisions.max(1);
        let half = spec.half_extents();
        let hole = spec.hole().map(|hole| {
            (
                hole.center(spec.height),
                Vec2::new(hole.width, hole.height),
                hole.corner_radius,
            )
        });

        let row = n as usize + 1;
        let mut dropped = Vec::with_capacity(row * row);
        for j in 0..=n {
            for i in 0..=n {
                let planar = grid_point(half, i, j, n);
                dropped.push(hole.is_some_and(|(center, size, radius)| {
                    point_in_rounded_hole(planar, center, size, radius)
                }));
            }
        }

        Self { n, half, dropped }
    }

    pub(crate) fn n(&self) -> u32 {
        self.n
    }

    /// Planar position of grid point `(i, j)`, before corner clamping
    pub(crate) fn point(&self, i: u32, j: u32) -> Vec2 {
        grid_point(self.half, i, j, self.n)
    }

    pub(crate) fn is_dropped(&self, i: u32, j: u32) -> bool {
        self.dropped[(j * (self.n + 1) + i) as usize]
    }

    /// Cell `(i, j)` is tessellated only when all four corners survive
    pub(crate) fn cell_survives(&self, i: u32, j: u32) -> bool {
        !(self.is_dropped(i, j)
            || self.is_dropped(i + 1, j)
            || self.is_dropped(i + 1, j + 1)
            || self.is_dropped(i, j + 1))
    }

    /// Grid edges separating surviving cells from removed ones.
    ///
    /// Each edge runs counter-clockwise around its surviving cell, so the
    /// solid lies on its left and the cavity on its right. Edges on the
    /// outer rim are not included.
    pub(crate) fn cutout_edges(&self) -> Vec<(UVec2, UVec2)> {
        let n = self.n;
        let mut edges = Vec::new();

        for j in 0..n {
            for i in 0..n {
                if !self.cell_survives(i, j) {
                    continue;
                }
                let (a, b, c, d) = (
                    UVec2::new(i, j),
                    UVec2::new(i + 1, j),
                    UVec2::new(i + 1, j + 1),
                    UVec2::new(i, j + 1),
                );

                if j > 0 && !self.cell_survives(i, j - 1) {
                    edges.push((a, b));
                }
                if i + 1 < n && !self.cell_survives(i + 1, j) {
                    edges.push((b, c));
                }
                if j + 1 < n && !self.cell_survives(i, j + 1) {
                    edges.push((c, d));
                }
                if i > 0 && !self.cell_survives(i - 1, j) {
                    edges.push((d, a));
                }
            }
        }

        edges
    }
}
