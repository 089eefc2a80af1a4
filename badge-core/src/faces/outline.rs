//! Closed outlines traced by the wall builders
//!
//! Both generators return counter-clockwise loops (seen from +Z) without a
//! repeated closing point.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use crate::geometry::clamp_to_rounded_corner;

/// Radii at or below this are treated as square corners
const RADIUS_EPSILON: f32 = 1e-9;

/// Planar position of grid point `(i, j)` on an `n x n` face grid.
///
/// The endpoints land exactly on `±half`, so rim points of the face grid and
/// of [`grid_perimeter_outline`] are bit-identical.
pub(crate) fn grid_point(half: Vec2, i: u32, j: u32, n: u32) -> Vec2 {
    let n = n as f32;
    Vec2::new(
        half.x * (2.0 * i as f32 / n - 1.0),
        half.y * (2.0 * j as f32 / n - 1.0),
    )
}

/// Outer rim of an `n x n` face grid, rounded at the corners.
///
/// Walks the unrounded rectangle through every grid rim point (bottom edge
/// left to right, right edge upward, top edge right to left, left edge
/// downward) and clamps each one onto the corner arcs. Returns `4n` points.
pub fn grid_perimeter_outline(half: Vec2, corner_radius: f32, n: u32) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(4 * n as usize);

    for i in 0..n {
        points.push(grid_point(half, i, 0, n));
    }
    for j in 0..n {
        points.push(grid_point(half, n, j, n));
    }
    for i in (1..=n).rev() {
        points.push(grid_point(half, i, n, n));
    }
    for j in (1..=n).rev() {
        points.push(grid_point(half, 0, j, n));
    }

    points
        .into_iter()
        .map(|p| clamp_to_rounded_corner(p, half, corner_radius))
        .collect()
}

/// Rounded rectangle as four 90 degree arcs of `segments` segments each.
///
/// Starts with the top-right arc at angle 0 and proceeds counter-clockwise.
/// Each arc contributes `segments + 1` points; consecutive arcs are joined by
/// the straight sides. A radius of (near) zero yields the four corners.
pub fn rounded_rect_outline(center: Vec2, half: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    let radius = radius.clamp(0.0, half.x.min(half.y));
    if radius <= RADIUS_EPSILON {
        return vec![
            center + Vec2::new(half.x, half.y),
            center + Vec2::new(-half.x, half.y),
            center + Vec2::new(-half.x, -half.y),
            center + Vec2::new(half.x, -half.y),
        ];
    }

    let segments = segments.max(1);
    let inner = half - Vec2::splat(radius);
    let arc_centers = [
        Vec2::new(inner.x, inner.y),
        Vec2::new(-inner.x, inner.y),
        Vec2::new(-inner.x, -inner.y),
        Vec2::new(inner.x, -inner.y),
    ];

    let mut points = Vec::with_capacity(4 * (segments as usize + 1));
    for (quadrant, arc_center) in arc_centers.iter().enumerate() {
        let start = quadrant as f32 * FRAC_PI_2;
        for step in 0..=segments {
            let angle = start + FRAC_PI_2 * step as f32 / segments as f32;
            let (sin, cos) = angle.sin_cos();
            points.push(center + *arc_center + Vec2::new(cos, sin) * radius);
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(points: &[Vec2]) -> f32 {
        let n = points.len();
        (0..n)
            .map(|k| points[k].perp_dot(points[(k + 1) % n]))
            .sum::<f32>()
            * 0.5
    }

    #[test]
    fn test_grid_point_hits_rim_exactly() {
        let half = Vec2::new(0.03, 0.045);
        assert_eq!(grid_point(half, 0, 0, 7), -half);
        assert_eq!(grid_point(half, 7, 7, 7), half);
        assert_eq!(grid_point(half, 7, 0, 7), Vec2::new(0.03, -0.045));
    }

    #[test]
    fn test_grid_perimeter_is_ccw_and_complete() {
        let half = Vec2::new(0.03, 0.045);
        let outline = grid_perimeter_outline(half, 0.004, 16);
        assert_eq!(outline.len(), 64);
        assert!(signed_area(&outline) > 0.0);

        // First point is the (clamped) bottom-left corner
        assert!(outline[0].x < 0.0 && outline[0].y < 0.0);
    }

    #[test]
    fn test_grid_perimeter_points_on_rounded_rim() {
        let half = Vec2::new(0.03, 0.045);
        let r = 0.004;
        for p in grid_perimeter_outline(half, r, 32) {
            assert!((clamp_to_rounded_corner(p, half, r) - p).length() < 1e-7);
            assert!(p.x.abs() <= half.x + 1e-7 && p.y.abs() <= half.y + 1e-7);
        }
    }

    #[test]
    fn test_rounded_rect_outline_counts_and_orientation() {
        let outline = rounded_rect_outline(Vec2::ZERO, Vec2::new(2.0, 1.0), 0.5, 4);
        assert_eq!(outline.len(), 20);
        assert!(signed_area(&outline) > 0.0);

        // Starts at angle 0 of the top-right arc
        assert!((outline[0] - Vec2::new(2.0, 0.5)).length() < 1e-6);
        // Ends at angle 360 of the bottom-right arc
        assert!((outline[19] - Vec2::new(2.0, -0.5)).length() < 1e-6);
    }

    #[test]
    fn test_rounded_rect_outline_points_on_arcs() {
        let center = Vec2::new(0.0, 0.042);
        let half = Vec2::new(0.006, 0.001);
        let r = 0.0005;
        let inner = half - Vec2::splat(r);
        for p in rounded_rect_outline(center, half, r, 16) {
            let d = (p - center).abs();
            let corner_distance = (d - inner).length();
            assert!((corner_distance - r).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zero_radius_gives_corners() {
        let center = Vec2::new(1.0, 2.0);
        let outline = rounded_rect_outline(center, Vec2::new(0.5, 0.25), 0.0, 16);
        assert_eq!(
            outline,
            vec![
                Vec2::new(1.5, 2.25),
                Vec2::new(0.5, 2.25),
                Vec2::new(0.5, 1.75),
                Vec2::new(1.5, 1.75),
            ]
        );
    }
}
