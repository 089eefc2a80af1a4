//! Badge configuration
//!
//! Every tunable lives in an explicit, immutable struct that is passed into the
//! builders. Defaults describe the reference badge: a 60 x 90 x 2 mm card with
//! 4 mm corners, a 1 mm edge roll and a 12 x 2 mm lanyard slot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fraction of the face that the mapped photo may cover at most
pub const MAX_FACE_COVERAGE: f32 = 0.9;

/// Lanyard cutout through the slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoleSpec {
    pub enabled: bool,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    /// Distance from the badge's bottom edge up to the hole center
    pub top_distance: f32,
}

impl Default for HoleSpec {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 0.012,
            height: 0.002,
            corner_radius: 0.0005,
            top_distance: 0.087,
        }
    }
}

impl HoleSpec {
    /// Hole center on the face for a badge of the given height
    pub fn center(&self, badge_height: f32) -> Vec2 {
        Vec2::new(0.0, self.top_distance - badge_height * 0.5)
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Physical description of the badge, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeSpec {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    pub corner_radius: f32,
    pub edge_chamfer_radius: f32,
    pub hole: HoleSpec,
}

impl Default for BadgeSpec {
    fn default() -> Self {
        Self {
            width: 0.06,
            height: 0.09,
            thickness: 0.002,
            corner_radius: 0.004,
            edge_chamfer_radius: 0.001,
            hole: HoleSpec::default(),
        }
    }
}

impl BadgeSpec {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn half_thickness(&self) -> f32 {
        self.thickness * 0.5
    }

    /// The cutout, if enabled
    pub fn hole(&self) -> Option<&HoleSpec> {
        self.hole.enabled.then_some(&self.hole)
    }

    /// Check every physical invariant the face builders rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("badge.width", self.width)?;
        positive("badge.height", self.height)?;
        positive("badge.thickness", self.thickness)?;
        non_negative("badge.corner_radius", self.corner_radius)?;
        non_negative("badge.edge_chamfer_radius", self.edge_chamfer_radius)?;

        let half_min = self.width.min(self.height) * 0.5;
        if self.corner_radius > half_min {
            return Err(ConfigError::CornerRadiusTooLarge {
                radius: self.corner_radius,
                limit: half_min,
            });
        }
        if self.edge_chamfer_radius >= half_min {
            return Err(ConfigError::ChamferExceedsFace {
                radius: self.edge_chamfer_radius,
                limit: half_min,
            });
        }
        if self.edge_chamfer_radius > self.half_thickness() {
            return Err(ConfigError::ChamferExceedsThickness {
                radius: self.edge_chamfer_radius,
                limit: self.half_thickness(),
            });
        }

        if let Some(hole) = self.hole() {
            self.validate_hole(hole)?;
        }

        Ok(())
    }

    fn validate_hole(&self, hole: &HoleSpec) -> Result<(), ConfigError> {
        positive("badge.hole.width", hole.width)?;
        positive("badge.hole.height", hole.height)?;
        non_negative("badge.hole.corner_radius", hole.corner_radius)?;
        non_negative("badge.hole.top_distance", hole.top_distance)?;

        let hole_half = hole.half_extents();
        let limit = hole_half.x.min(hole_half.y);
        if hole.corner_radius > limit {
            return Err(ConfigError::HoleRadiusTooLarge {
                radius: hole.corner_radius,
                limit,
            });
        }

        let half = self.half_extents();
        let center = hole.center(self.height);
        let min = center - hole_half;
        let max = center + hole_half;
        if min.x <= -half.x || max.x >= half.x || min.y <= -half.y || max.y >= half.y {
            return Err(ConfigError::HoleOutsideFace {
                x_min: min.x,
                x_max: max.x,
                y_min: min.y,
                y_max: max.y,
            });
        }

        // Corner squares: |x| > half.x - r and |y| > half.y - r
        let inner = half - Vec2::splat(self.corner_radius);
        let reaches_x = max.x > inner.x || min.x < -inner.x;
        let reaches_y = max.y > inner.y || min.y < -inner.y;
        if self.corner_radius > 0.0 && reaches_x && reaches_y {
            return Err(ConfigError::HoleOverlapsCorner);
        }

        Ok(())
    }
}

/// Tessellation density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Grid cells per side on the front and back faces
    pub subdivisions: u32,
    /// Segments per 90 degree arc of the hole wall. `None` follows the cutout
    /// the face grid leaves so the wall closes against both faces exactly.
    pub hole_segments: Option<u32>,
    /// Segments per 90 degree arc of the outer wall. `None` follows the face
    /// grid so the wall rim shares the face rim vertices exactly.
    pub side_segments: Option<u32>,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            subdivisions: 512,
            hole_segments: None,
            side_segments: None,
        }
    }
}

impl MeshSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("mesh.subdivisions", self.subdivisions, 1)?;
        if let Some(segments) = self.hole_segments {
            at_least("mesh.hole_segments", segments, 1)?;
        }
        if let Some(segments) = self.side_segments {
            at_least("mesh.side_segments", segments, 1)?;
        }
        Ok(())
    }
}

/// Texture atlas layout and printable photo area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    /// Square atlas resolution in pixels
    pub atlas_size: u32,
    /// Background margin kept around the photo, in texels
    pub padding: u32,
    /// Largest physical width the photo may cover (m)
    pub max_uv_width: f32,
    /// Largest physical height the photo may cover (m)
    pub max_uv_height: f32,
    /// Atlas background color (RGB)
    pub background: [u8; 3],
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            atlas_size: 512,
            padding: 4,
            max_uv_width: 0.05,
            max_uv_height: 0.075,
            background: [255, 255, 255],
        }
    }
}

impl TextureSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        at_least("texture.atlas_size", self.atlas_size, 4)?;
        at_least("texture.padding", self.padding, 1)?;
        if self.padding.saturating_mul(2) >= self.atlas_size {
            return Err(ConfigError::PaddingTooLarge {
                padding: self.padding,
                atlas_size: self.atlas_size,
            });
        }
        positive("texture.max_uv_width", self.max_uv_width)?;
        positive("texture.max_uv_height", self.max_uv_height)?;
        Ok(())
    }
}

/// Everything the core needs for one badge
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub badge: BadgeSpec,
    pub mesh: MeshSettings,
    pub texture: TextureSettings,
}

impl BadgeConfig {
    /// Validate all sections, badge first
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.badge.validate()?;
        self.mesh.validate()?;
        self.texture.validate()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn at_least(field: &'static str, value: u32, min: u32) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::TooSmall { field, value, min })
    }
}
