//! Geometry primitives shared by the face and wall builders
//!
//! All functions are pure and work in the face plane (badge center at the
//! origin, X to the right, Y up) or along the thickness axis (Z).

use glam::{Vec2, Vec3};

/// Project a point in one of the four corner quadrants onto the corner arc.
///
/// A point is in a corner quadrant when `|x| > half.x - r` and
/// `|y| > half.y - r`. If it lies farther than `r` from that corner's arc
/// center it is moved radially onto the arc; every other point is returned
/// unchanged.
pub fn clamp_to_rounded_corner(p: Vec2, half: Vec2, radius: f32) -> Vec2 {
    if radius <= 0.0 {
        return p;
    }

    let inner = half - Vec2::splat(radius);
    if p.x.abs() <= inner.x || p.y.abs() <= inner.y {
        return p;
    }

    let center = Vec2::new(inner.x.copysign(p.x), inner.y.copysign(p.y));
    let offset = p - center;
    let distance = offset.length();
    if distance <= radius {
        return p;
    }

    center + offset * (radius / distance)
}

/// Distance from `p` to the nearest of the four straight face edges
pub fn edge_distance(p: Vec2, half: Vec2) -> f32 {
    (half.x - p.x.abs()).min(half.y - p.y.abs())
}

/// Outward direction of the straight edge nearest to `p` (+/-X or +/-Y)
pub fn edge_normal(p: Vec2, half: Vec2) -> Vec3 {
    if half.x - p.x.abs() <= half.y - p.y.abs() {
        Vec3::new(1.0_f32.copysign(p.x), 0.0, 0.0)
    } else {
        Vec3::new(0.0, 1.0_f32.copysign(p.y), 0.0)
    }
}

/// Roll a face height down toward the rim along a quarter-circle profile.
///
/// Points at least `chamfer_radius` away from the nearest edge keep
/// `z_base`. Closer points drop by `c * (1 - sqrt(1 - (1 - d/c)^2))`, toward
/// the slab middle: down for the front face, up for the back face.
pub fn chamfer_z(z_base: f32, distance: f32, chamfer_radius: f32, is_front: bool) -> f32 {
    if chamfer_radius <= 0.0 || distance >= chamfer_radius {
        return z_base;
    }

    let f = (distance / chamfer_radius).clamp(0.0, 1.0);
    let curve = (1.0 - (1.0 - f) * (1.0 - f)).sqrt();
    let offset = chamfer_radius * (1.0 - curve);

    if is_front {
        z_base - offset
    } else {
        z_base + offset
    }
}

/// Whether `p` falls inside a rectangular hole with rounded corners.
///
/// The hole is the cross formed by its two core bands (`|dx| <= w/2 - r` or
/// `|dy| <= h/2 - r`, within the half extents) plus the four corner disks.
/// Boundaries are inclusive everywhere, so a point exactly on the outline
/// belongs to the hole.
pub fn point_in_rounded_hole(p: Vec2, center: Vec2, size: Vec2, radius: f32) -> bool {
    let half = size * 0.5;
    let d = (p - center).abs();
    if d.x > half.x || d.y > half.y {
        return false;
    }

    let radius = radius.clamp(0.0, half.x.min(half.y));
    let inner = half - Vec2::splat(radius);
    if d.x <= inner.x || d.y <= inner.y {
        return true;
    }

    (d - inner).length_squared() <= radius * radius
}
