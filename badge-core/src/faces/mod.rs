//! Face builders
//!
//! Each builder is a pure function of the validated configuration and the UV
//! plan, returning a fresh [`MeshBuffers`](crate::mesh::MeshBuffers):
//! - [`build_face`]: front or back face (grid, cutout, rounded corners,
//!   chamfer, UVs)
//! - [`build_side_wall`]: perimeter wall through the thickness
//! - [`build_hole_wall`]: inner wall of the cutout, swept along the cells the
//!   face grid removed

mod face;
mod grid;
mod outline;
mod wall;

pub use face::build_face;
pub use outline::{grid_perimeter_outline, rounded_rect_outline};
pub use wall::{build_hole_wall, build_side_wall};

/// Which of the two textured faces to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceSide {
    /// +Z face, image reads normally
    Front,
    /// -Z face, image mirrored horizontally
    Back,
}
