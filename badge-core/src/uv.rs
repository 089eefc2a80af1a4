//! UV region planning
//!
//! Decides how large the photo appears on the badge face and where it sits
//! inside the square texture atlas. The face builders consume the resulting
//! [`UvRegion`] verbatim; nothing here touches pixels.

use glam::Vec2;

use crate::config::{BadgeSpec, MAX_FACE_COVERAGE, TextureSettings};
use crate::error::ConfigError;

/// Pixel dimensions of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Where the resized photo is pasted inside the atlas, in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasPlacement {
    pub atlas_size: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Sub-rectangle of the atlas, in normalized texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureBounds {
    pub u0: f32,
    pub u1: f32,
    pub v0: f32,
    pub v1: f32,
}

/// Physical extent of the mapped photo plus its atlas layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRegion {
    pub mapped_width: f32,
    pub mapped_height: f32,
    pub texture_bounds: TextureBounds,
    pub placement: AtlasPlacement,
    /// Background sample point used outside the mapped rectangle
    pub neutral: [f32; 2],
}

impl UvRegion {
    /// Plan the mapped area and atlas placement for an image.
    ///
    /// # Errors
    ///
    /// Fails on an empty image or invalid texture settings.
    pub fn plan(
        image: ImageSize,
        spec: &BadgeSpec,
        settings: &TextureSettings,
    ) -> Result<Self, ConfigError> {
        if image.width == 0 || image.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: image.width,
                height: image.height,
            });
        }
        settings.validate()?;

        let (mapped_width, mapped_height) = mapped_extent(image, spec, settings);
        let placement = atlas_placement(image, settings);
        let size = placement.atlas_size as f32;
        let texture_bounds = TextureBounds {
            u0: placement.x as f32 / size,
            u1: (placement.x + placement.width) as f32 / size,
            v0: placement.y as f32 / size,
            v1: (placement.y + placement.height) as f32 / size,
        };
        let corner = settings.padding as f32 * 0.5 / size;

        let region = Self {
            mapped_width,
            mapped_height,
            texture_bounds,
            placement,
            neutral: [corner, corner],
        };

        tracing::debug!(
            "UV plan for {}x{}: mapped {:.4}x{:.4} m, atlas rect {}x{} at ({}, {})",
            image.width,
            image.height,
            mapped_width,
            mapped_height,
            placement.width,
            placement.height,
            placement.x,
            placement.y
        );

        Ok(region)
    }

    /// Plan for a badge without a photo: a virtual image with the face's own
    /// aspect ratio, so UVs stay well-formed.
    pub fn untextured(spec: &BadgeSpec, settings: &TextureSettings) -> Result<Self, ConfigError> {
        let height = 1000;
        let width = ((spec.width / spec.height) * height as f32).round().max(1.0) as u32;
        Self::plan(ImageSize::new(width, height), spec, settings)
    }

    /// Texture coordinate for a planar face point (before corner clamping).
    ///
    /// Points inside the mapped rectangle interpolate linearly into the
    /// texture bounds, with image rows growing downward. `mirror_u` flips the
    /// horizontal axis so the back face reads correctly when the badge is
    /// turned over. Points outside map to the neutral background texel.
    pub fn map(&self, p: Vec2, mirror_u: bool) -> [f32; 2] {
        let half = Vec2::new(self.mapped_width, self.mapped_height) * 0.5;
        if p.x.abs() > half.x || p.y.abs() > half.y {
            return self.neutral;
        }

        let s = (p.x + half.x) / self.mapped_width;
        let t = (p.y + half.y) / self.mapped_height;
        let s = if mirror_u { 1.0 - s } else { s };

        let b = &self.texture_bounds;
        [b.u0 + s * (b.u1 - b.u0), b.v1 - t * (b.v1 - b.v0)]
    }
}

/// Aspect-preserving printable size, capped by the configured maxima and by
/// [`MAX_FACE_COVERAGE`] of the face with one common scale factor.
fn mapped_extent(image: ImageSize, spec: &BadgeSpec, settings: &TextureSettings) -> (f32, f32) {
    let image_aspect = image.aspect();
    let max_aspect = settings.max_uv_width / settings.max_uv_height;

    let (width, height) = if image_aspect > max_aspect {
        (
            settings.max_uv_width,
            settings.max_uv_width * image.height as f32 / image.width as f32,
        )
    } else {
        (
            settings.max_uv_height * image.width as f32 / image.height as f32,
            settings.max_uv_height,
        )
    };

    let scale = (MAX_FACE_COVERAGE * spec.width / width)
        .min(MAX_FACE_COVERAGE * spec.height / height)
        .min(1.0);

    (width * scale, height * scale)
}

/// Fit the image into the padded atlas interior, centered, in whole pixels
fn atlas_placement(image: ImageSize, settings: &TextureSettings) -> AtlasPlacement {
    let atlas_size = settings.atlas_size;
    let inner = atlas_size - 2 * settings.padding;

    let (width, height) = if image.width >= image.height {
        let h = (inner as f64 * image.height as f64 / image.width as f64).round() as u32;
        (inner, h.clamp(1, inner))
    } else {
        let w = (inner as f64 * image.width as f64 / image.height as f64).round() as u32;
        (w.clamp(1, inner), inner)
    };

    AtlasPlacement {
        atlas_size,
        x: (atlas_size - width) / 2,
        y: (atlas_size - height) / 2,
        width,
        height,
    }
}
