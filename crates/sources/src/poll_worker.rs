//! Background polling with a single delivery point
//!
//! The worker owns a reading source and polls it on a fixed interval. Every
//! outcome goes through one bounded channel; the receiving side is the only
//! place that touches the registry, so the engine itself never runs
//! concurrently with a poll.

use log::{error, info, trace};
use sensor_deck_core::BoxedReadingSource;
use sensor_deck_types::PollBatch;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// What one poll produced
#[derive(Debug, Clone)]
pub enum PollEvent {
    /// A complete, parsed batch ready to ingest
    Batch(PollBatch),
    /// The poll failed; the message is for display only
    Failed(String),
}

/// Periodically polls a [`ReadingSource`](sensor_deck_core::ReadingSource)
pub struct PollWorker {
    source: BoxedReadingSource,
    interval: Duration,
}

impl PollWorker {
    pub fn new(source: BoxedReadingSource, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Spawn the worker onto the current tokio runtime.
    ///
    /// Returns the task handle and the receiving end of the delivery channel.
    /// Dropping the receiver stops the worker after its next poll.
    pub fn spawn(self, capacity: usize) -> (JoinHandle<()>, mpsc::Receiver<PollEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(self.run(tx));
        (handle, rx)
    }

    /// Poll until the receiving side goes away.
    ///
    /// The first poll happens immediately. Polls that overrun the interval
    /// delay the schedule rather than bursting to catch up.
    pub async fn run(mut self, tx: mpsc::Sender<PollEvent>) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            "Polling {} every {:?}",
            self.source.metadata().name,
            self.interval
        );

        loop {
            interval.tick().await;

            let start = Instant::now();
            let event = if self.source.is_available() {
                match self.source.poll() {
                    Ok(batch) => PollEvent::Batch(batch),
                    Err(e) => {
                        error!("Error polling {}: {:#}", self.source.metadata().name, e);
                        PollEvent::Failed(format!("{:#}", e))
                    }
                }
            } else {
                PollEvent::Failed(format!("{} is not available", self.source.metadata().name))
            };
            trace!("Poll took {:?}", start.elapsed());

            if tx.send(event).await.is_err() {
                info!("Poll receiver dropped, stopping worker");
                break;
            }
        }
    }
}
