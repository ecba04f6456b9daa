//! Error types for report aggregation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// An artifact name does not follow `<suite>-<suffix>-<test>.<ext>`
    #[error(
        "Malformed artifact name {}: expected <suite>-<suffix>-<test>, found {found} part(s)",
        .path.display()
    )]
    MalformedArtifactName { path: PathBuf, found: usize },

    /// The output directory or extension could not be turned into a search pattern
    #[error("Invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A directory entry could not be inspected while searching
    #[error("Failed to scan output directory: {0}")]
    Scan(#[from] glob::GlobError),

    #[error("Invalid success marker '{pattern}': {source}")]
    InvalidMarker {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
