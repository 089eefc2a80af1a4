//! Error taxonomy for badge generation
//!
//! Configuration problems are caught before any geometry is built. Encoding
//! problems mean the mesh or buffer arithmetic is inconsistent and are never
//! worth retrying: the pipeline is deterministic.

/// Invariant violation in the badge, mesh or texture configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite value greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be a finite, non-negative value (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("corner radius {radius} exceeds half the smaller face dimension ({limit})")]
    CornerRadiusTooLarge { radius: f32, limit: f32 },

    #[error("edge chamfer radius {radius} must be below {limit} (half the smaller face dimension)")]
    ChamferExceedsFace { radius: f32, limit: f32 },

    #[error("edge chamfer radius {radius} exceeds half the thickness ({limit})")]
    ChamferExceedsThickness { radius: f32, limit: f32 },

    #[error("hole corner radius {radius} exceeds half the smaller hole dimension ({limit})")]
    HoleRadiusTooLarge { radius: f32, limit: f32 },

    #[error("hole spanning x {x_min}..{x_max}, y {y_min}..{y_max} does not fit inside the face")]
    HoleOutsideFace {
        x_min: f32,
        x_max: f32,
        y_min: f32,
        y_max: f32,
    },

    #[error("hole overlaps the rounded corner region")]
    HoleOverlapsCorner,

    #[error("{field} must lie in {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} must be at least {min} (got {value})")]
    TooSmall {
        field: &'static str,
        value: u32,
        min: u32,
    },

    #[error("texture padding of {padding} texels leaves no room in a {atlas_size}px atlas")]
    PaddingTooLarge { padding: u32, atlas_size: u32 },

    #[error("image dimensions must be non-zero (got {width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Inconsistent mesh streams or buffer layout
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("attribute length mismatch: {positions} positions, {uvs} uvs, {normals} normals")]
    AttributeLengthMismatch {
        positions: usize,
        uvs: usize,
        normals: usize,
    },

    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    #[error("index {index} at position {at} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        index: u32,
        at: usize,
        vertex_count: usize,
    },

    #[error("vertex count {0} does not fit in 32-bit indices")]
    TooManyVertices(usize),

    #[error("byte range {offset}+{length} lies outside the {buffer_length}-byte buffer")]
    ByteRangeOutOfBounds {
        offset: u64,
        length: u64,
        buffer_length: u64,
    },

    #[error("image data must start the buffer and end on a 4-byte boundary")]
    MisplacedImage,

    #[error("accessor {accessor} describes {expected} bytes but its view holds {actual}")]
    AccessorSizeMismatch {
        accessor: usize,
        expected: u64,
        actual: u64,
    },

    #[error("container metadata is malformed: {0}")]
    Malformed(String),

    #[error("failed to serialize container metadata: {0}")]
    Serialize(String),
}

/// Any failure raised by the badge core
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BadgeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("encoding failed: {0}")]
    Encoding(#[from] EncodingError),
}
