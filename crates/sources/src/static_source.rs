//! In-memory reading source that replays fixed batches

use anyhow::{anyhow, Result};
use sensor_deck_core::{ReadingSource, SourceMetadata};
use sensor_deck_types::PollBatch;
use std::collections::VecDeque;

/// Hands out queued batches one per poll, then keeps repeating the last one.
///
/// Useful for demos and for driving the poll worker without a network.
pub struct StaticSource {
    metadata: SourceMetadata,
    queue: VecDeque<PollBatch>,
    last: Option<PollBatch>,
}

impl StaticSource {
    pub fn new(batches: impl IntoIterator<Item = PollBatch>) -> Self {
        Self {
            metadata: SourceMetadata {
                name: "Static".to_string(),
            },
            queue: batches.into_iter().collect(),
            last: None,
        }
    }
}

impl ReadingSource for StaticSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn poll(&mut self) -> Result<PollBatch> {
        if let Some(batch) = self.queue.pop_front() {
            self.last = Some(batch.clone());
            return Ok(batch);
        }
        self.last
            .clone()
            .ok_or_else(|| anyhow!("Static source has no batches"))
    }
}
