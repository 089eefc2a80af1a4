//! Failures in the image and mesh-interchange stages

use std::path::PathBuf;

/// A collaborator stage failed; earlier pipeline outputs are left as written
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode texture atlas: {0}")]
    ImageEncode(#[source] image::ImageError),

    #[error("failed to load glTF {path:?}: {source}")]
    GltfImport {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("container has no {0}")]
    MissingData(&'static str),

    #[error("unsupported texture pixel format {0:?}")]
    UnsupportedPixelFormat(gltf::image::Format),
}

impl CollaboratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollaboratorError::Io {
            path: path.into(),
            source,
        }
    }
}
