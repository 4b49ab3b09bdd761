//! Reading source backed by a JSON poll-batch file

use anyhow::Result;
use log::debug;
use sensor_deck_core::{ReadingSource, SourceMetadata};
use sensor_deck_types::PollBatch;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// Read and decode one poll batch from disk
pub fn load_batch(path: &Path) -> Result<PollBatch, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Polls a file that something else keeps overwriting with the latest
/// service payload (an export, a capture, a sync job).
///
/// Each poll re-reads the whole file.
pub struct JsonFileSource {
    metadata: SourceMetadata,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            metadata: SourceMetadata {
                name: format!("JSON file {}", path.display()),
            },
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadingSource for JsonFileSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn poll(&mut self) -> Result<PollBatch> {
        let batch = load_batch(&self.path)?;
        debug!(
            "Read {} sensors from {}",
            batch.sensors.len(),
            self.path.display()
        );
        Ok(batch)
    }

    fn is_available(&self) -> bool {
        self.path.exists()
    }
}
