//! Utility functions for GLB construction

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gltf_json as json;

/// Magic for the GLB JSON chunk ("JSON")
pub const CHUNK_JSON: u32 = 0x4E4F534A;
/// Magic for the GLB binary chunk ("BIN\0")
pub const CHUNK_BIN: u32 = 0x004E4942;

/// URI prefix for a buffer embedded in a `.gltf` file
pub const OCTET_STREAM_PREFIX: &str = "data:application/octet-stream;base64,";

/// Compute bounding box for positions
pub fn compute_bounds(positions: &[[f32; 3]]) -> (Vec<f32>, Vec<f32>) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];

    for pos in positions {
        for i in 0..3 {
            min[i] = min[i].min(pos[i]);
            max[i] = max[i].max(pos[i]);
        }
    }

    (min.to_vec(), max.to_vec())
}

/// Align buffer to 4-byte boundary
pub fn align_buffer(buffer: &mut Vec<u8>) {
    while buffer.len() % 4 != 0 {
        buffer.push(0);
    }
}

/// Base64 data URI carrying `bytes` as an octet stream
pub fn data_uri(bytes: &[u8]) -> String {
    format!("{OCTET_STREAM_PREFIX}{}", STANDARD.encode(bytes))
}

/// Serialize a document whose buffer is already embedded as a data URI
pub fn to_embedded_gltf(root: &json::Root) -> Result<Vec<u8>> {
    json::serialize::to_vec_pretty(root).context("Failed to serialize GLTF JSON")
}

/// Assemble GLB binary from JSON and buffer data
pub fn assemble_glb(root: &json::Root, buffer_data: &[u8]) -> Result<Vec<u8>> {
    let json_string = json::serialize::to_string(root).context("Failed to serialize GLTF JSON")?;
    let json_bytes = json_string.as_bytes();

    // Pad JSON to 4-byte alignment
    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let json_chunk_length = json_bytes.len() + json_padding;

    // Pad buffer to 4-byte alignment
    let buffer_padding = (4 - (buffer_data.len() % 4)) % 4;
    let buffer_chunk_length = buffer_data.len() + buffer_padding;

    // Total file length
    let total_length = 12 + 8 + json_chunk_length + 8 + buffer_chunk_length;
    let total_length_u32 =
        u32::try_from(total_length).context("GLB exceeds the 4 GiB container limit")?;

    let mut glb = Vec::with_capacity(total_length);

    // GLB header
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes()); // version
    glb.extend_from_slice(&total_length_u32.to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&(json_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    glb.extend_from_slice(json_bytes);
    glb.resize(glb.len() + json_padding, 0x20); // Space for JSON padding

    // Binary chunk
    glb.extend_from_slice(&(buffer_chunk_length as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    glb.extend_from_slice(buffer_data);
    glb.resize(glb.len() + buffer_padding, 0);

    Ok(glb)
}
