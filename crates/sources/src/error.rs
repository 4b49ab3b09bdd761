//! Errors raised by reading sources and range stores

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Batch file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unknown timezone '{name}': {reason}")]
    UnknownTimezone { name: String, reason: String },
}
