//! Render error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for render operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Rendering-specific error types
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to launch renderer '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer '{program}' exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why the vector post-processor left a file untouched
#[derive(Error, Debug, PartialEq)]
pub enum SvgError {
    #[error("no boundary polygon found")]
    MissingBoundary,

    #[error("boundary polygon has no coordinates")]
    NoCoordinates,

    #[error("invalid coordinate pair '{0}'")]
    InvalidCoordinate(String),
}
