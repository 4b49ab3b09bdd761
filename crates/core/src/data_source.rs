//! Collaborator traits the reconciliation engine consumes

use anyhow::Result;
use sensor_deck_types::{PollBatch, RangeConfig};
use std::collections::HashMap;

/// Metadata about a reading source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Human-readable name, used in logs and failure messages
    pub name: String,
}

/// Trait for everything that can deliver poll batches.
///
/// Implementations may block (network, disk); they are driven from a worker
/// and their batches are handed to the engine through a single delivery
/// point, never from inside the engine.
pub trait ReadingSource: Send {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Fetch one complete batch of sensor metadata and samples
    fn poll(&mut self) -> Result<PollBatch>;

    /// Check if this source can currently be polled
    fn is_available(&self) -> bool {
        true
    }
}

/// Type-erased reading source for dynamic dispatch
pub type BoxedReadingSource = Box<dyn ReadingSource>;

/// Per-sensor good-band configuration, static or user edited
pub trait RangeConfigSource {
    /// Range config for a sensor, or `None` to keep whatever is in effect
    fn range_config(&self, sensor_id: &str) -> Option<RangeConfig>;
}

impl RangeConfigSource for HashMap<String, RangeConfig> {
    fn range_config(&self, sensor_id: &str) -> Option<RangeConfig> {
        self.get(sensor_id).copied()
    }
}

/// Range source that never supplies anything; every sensor uses the defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRangeConfigs;

impl RangeConfigSource for NoRangeConfigs {
    fn range_config(&self, _sensor_id: &str) -> Option<RangeConfig> {
        None
    }
}

/// Turns a UTC observation time into the text shown on a card.
///
/// The engine stores the result verbatim and never parses it back.
pub trait TimestampFormatter {
    fn format_observed(&self, observed: &str) -> String;
}

impl<F> TimestampFormatter for F
where
    F: Fn(&str) -> String,
{
    fn format_observed(&self, observed: &str) -> String {
        self(observed)
    }
}
