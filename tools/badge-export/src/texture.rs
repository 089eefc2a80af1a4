//! Texture atlas preparation (PNG/JPG photo -> letterboxed square atlas -> PNG)

use std::io::Cursor;
use std::path::Path;

use badge_core::{AtlasPlacement, ImageSize};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};

use crate::error::CollaboratorError;

/// Decoded source photo, converted to RGB
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub pixels: RgbImage,
}

impl SourceImage {
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels,
        }
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }
}

/// Load a photo from disk (any format the `image` crate decodes)
pub fn load_source_image(path: &Path) -> Result<SourceImage, CollaboratorError> {
    let img = image::open(path).map_err(|source| CollaboratorError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let source = SourceImage::from_rgb(img.to_rgb8());
    tracing::info!(
        "Loaded image {:?}: {}x{}",
        path,
        source.width,
        source.height
    );
    Ok(source)
}

/// Paste the resized photo into a square atlas filled with `background`
pub fn build_atlas(
    source: &SourceImage,
    placement: &AtlasPlacement,
    background: [u8; 3],
) -> RgbImage {
    let size = placement.atlas_size;
    let mut atlas = RgbImage::from_pixel(size, size, Rgb(background));
    let resized = imageops::resize(
        &source.pixels,
        placement.width,
        placement.height,
        FilterType::Lanczos3,
    );
    imageops::replace(&mut atlas, &resized, placement.x as i64, placement.y as i64);

    tracing::debug!(
        "Atlas {}px: photo {}x{} at ({}, {})",
        placement.atlas_size,
        placement.width,
        placement.height,
        placement.x,
        placement.y
    );
    atlas
}

/// Encode an RGB image as PNG bytes
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, CollaboratorError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(CollaboratorError::ImageEncode)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> AtlasPlacement {
        AtlasPlacement {
            atlas_size: 32,
            x: 2,
            y: 8,
            width: 28,
            height: 16,
        }
    }

    #[test]
    fn test_atlas_keeps_background_outside_placement() {
        let source = SourceImage::from_rgb(RgbImage::from_pixel(56, 32, Rgb([200, 10, 10])));
        let atlas = build_atlas(&source, &placement(), [255, 255, 255]);

        assert_eq!(atlas.dimensions(), (32, 32));
        assert_eq!(*atlas.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*atlas.get_pixel(16, 4), Rgb([255, 255, 255]));
        assert_eq!(*atlas.get_pixel(31, 31), Rgb([255, 255, 255]));
        let Rgb([r, g, b]) = *atlas.get_pixel(16, 16);
        assert!(r > 190 && g < 20 && b < 20);
    }

    #[test]
    fn test_encode_png_roundtrip() {
        let source = SourceImage::from_rgb(RgbImage::from_pixel(4, 4, Rgb([0, 128, 255])));
        let atlas = build_atlas(&source, &placement(), [10, 20, 30]);
        let png = encode_png(&atlas).expect("encode");

        assert_eq!(&png[1..4], b"PNG");
        let decoded = image::load_from_memory(&png).expect("decode").to_rgb8();
        assert_eq!(decoded, atlas);
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let result = load_source_image(Path::new("does/not/exist.png"));
        assert!(matches!(result, Err(CollaboratorError::ImageDecode { .. })));
    }
}
