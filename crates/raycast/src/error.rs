//! Error types for scene loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The scene file could not be read.
    #[error("could not read scene file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a well-formed list of scene records.
    #[error("malformed scene description: {0}")]
    Syntax(#[from] serde_json::Error),

    /// A record holds a value outside of its allowed range.
    #[error("record #{index} ({kind}): invalid {field}, {reason}")]
    InvalidValue {
        index: usize,
        kind: &'static str,
        field: &'static str,
        reason: String,
    },

    /// Materials cannot redirect more light than they receive.
    #[error("record #{index} ({kind}): reflectivity + refractivity must not exceed 1, found {sum}")]
    Energy {
        index: usize,
        kind: &'static str,
        sum: f32,
    },

    /// Every scene needs a camera.
    #[error("the scene has no camera")]
    MissingCamera,
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;
