//! Container -> Wavefront OBJ conversion with optional baked vertex colors

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gltf::image::Format;

use crate::error::CollaboratorError;

/// How the OBJ is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjOptions {
    /// Sample the base-color texture into per-vertex colors
    pub bake_colors: bool,
    /// Bilinear texture lookup instead of nearest texel
    pub bilinear: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            bake_colors: true,
            bilinear: false,
        }
    }
}

/// What ended up in the OBJ file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjSummary {
    pub vertices: usize,
    pub triangles: usize,
    pub colored: bool,
}

/// Decoded texture in 8-bit RGB or RGBA
pub struct TexelGrid<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
    channels: usize,
}

impl<'a> TexelGrid<'a> {
    pub fn new(data: &'a gltf::image::Data) -> Result<Self, CollaboratorError> {
        let channels = match data.format {
            Format::R8G8B8 => 3,
            Format::R8G8B8A8 => 4,
            other => return Err(CollaboratorError::UnsupportedPixelFormat(other)),
        };
        let expected = data.width as usize * data.height as usize * channels;
        if data.width == 0 || data.height == 0 || data.pixels.len() < expected {
            return Err(CollaboratorError::MissingData("texture pixels"));
        }
        Ok(Self {
            pixels: &data.pixels,
            width: data.width,
            height: data.height,
            channels,
        })
    }

    fn texel(&self, x: u32, y: u32) -> [f32; 3] {
        let at = (y as usize * self.width as usize + x as usize) * self.channels;
        let px = &self.pixels[at..at + 3];
        [px[0], px[1], px[2]].map(|c| c as f32 / 255.0)
    }

    /// Texel containing `uv`; V = 0 is the top image row
    pub fn sample_nearest(&self, uv: [f32; 2]) -> [f32; 3] {
        let x = (uv[0] * (self.width - 1) as f32) as i64;
        let y = (uv[1] * (self.height - 1) as f32) as i64;
        self.texel(
            x.clamp(0, self.width as i64 - 1) as u32,
            y.clamp(0, self.height as i64 - 1) as u32,
        )
    }

    pub fn sample_bilinear(&self, uv: [f32; 2]) -> [f32; 3] {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let x = (uv[0] * max_x).clamp(0.0, max_x);
        let y = (uv[1] * max_y).clamp(0.0, max_y);

        let (x0, y0) = (x.floor() as u32, y.floor() as u32);
        let (x1, y1) = ((x0 + 1).min(self.width - 1), (y0 + 1).min(self.height - 1));
        let (fx, fy) = (x - x0 as f32, y - y0 as f32);

        let top = lerp3(self.texel(x0, y0), self.texel(x1, y0), fx);
        let bottom = lerp3(self.texel(x0, y1), self.texel(x1, y1), fx);
        lerp3(top, bottom, fy)
    }
}

fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [0, 1, 2].map(|i| a[i] + (b[i] - a[i]) * t)
}

/// Convert the first primitive of a GLB/glTF file into an OBJ.
///
/// # Errors
///
/// Fails when the container cannot be imported, carries no mesh data, uses
/// an unsupported texture format, or the output cannot be written.
pub fn convert_container_to_obj(
    input: &Path,
    output: &Path,
    options: &ObjOptions,
) -> Result<ObjSummary, CollaboratorError> {
    let (document, buffers, images) =
        gltf::import(input).map_err(|source| CollaboratorError::GltfImport {
            path: input.to_path_buf(),
            source,
        })?;

    let mesh = document
        .meshes()
        .next()
        .ok_or(CollaboratorError::MissingData("mesh"))?;
    let primitive = mesh
        .primitives()
        .next()
        .ok_or(CollaboratorError::MissingData("primitive"))?;
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or(CollaboratorError::MissingData("positions"))?
        .collect();
    let uvs: Option<Vec<[f32; 2]>> = reader
        .read_tex_coords(0)
        .map(|coords| coords.into_f32().collect());
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let texture = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_texture()
        .map(|info| info.texture().source().index());

    let colors = match (options.bake_colors, texture, uvs.as_deref()) {
        (true, Some(image_index), Some(uvs)) => {
            let data = images
                .get(image_index)
                .ok_or(CollaboratorError::MissingData("texture image"))?;
            let grid = TexelGrid::new(data)?;
            let colors: Vec<[f32; 3]> = uvs
                .iter()
                .map(|&uv| {
                    if options.bilinear {
                        grid.sample_bilinear(uv)
                    } else {
                        grid.sample_nearest(uv)
                    }
                })
                .collect();
            Some(colors)
        }
        (true, _, _) => {
            tracing::warn!(
                "No base-color texture with UVs in {:?}; writing OBJ without colors",
                input
            );
            None
        }
        (false, _, _) => None,
    };

    let file = File::create(output).map_err(|e| CollaboratorError::io(output, e))?;
    let mut writer = BufWriter::new(file);
    write_obj(&mut writer, &positions, colors.as_deref(), &indices)
        .and_then(|_| writer.flush())
        .map_err(|e| CollaboratorError::io(output, e))?;

    let summary = ObjSummary {
        vertices: positions.len(),
        triangles: indices.len() / 3,
        colored: colors.is_some(),
    };
    tracing::info!(
        "Wrote OBJ {:?}: {} vertices, {} faces, colors={}",
        output,
        summary.vertices,
        summary.triangles,
        summary.colored
    );
    Ok(summary)
}

/// Write `v` lines (with colors when given) followed by 1-based `f` lines
pub fn write_obj<W: Write>(
    writer: &mut W,
    positions: &[[f32; 3]],
    colors: Option<&[[f32; 3]]>,
    indices: &[u32],
) -> std::io::Result<()> {
    writeln!(writer, "# badgesmith")?;
    writeln!(
        writer,
        "# {} vertices, {} faces",
        positions.len(),
        indices.len() / 3
    )?;

    for (i, [x, y, z]) in positions.iter().enumerate() {
        match colors.and_then(|c| c.get(i)) {
            Some([r, g, b]) => {
                writeln!(writer, "v {x:.6} {y:.6} {z:.6} {r:.3} {g:.3} {b:.3}")?
            }
            None => writeln!(writer, "v {x:.6} {y:.6} {z:.6}")?,
        }
    }

    for tri in indices.chunks_exact(3) {
        writeln!(writer, "f {} {} {}", tri[0] + 1, tri[1] + 1, tri[2] + 1)?;
    }
    Ok(())
}
