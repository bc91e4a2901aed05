//! Error types for Kindred Core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using Kindred's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kindred core error types
///
/// Business-rule problems (dangling ids, odd names) are never errors: they
/// are reported as data by the validator and the analytics.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error means the input notation file is missing
    pub fn is_source_missing(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}
