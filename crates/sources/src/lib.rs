//! sensor-deck-sources: Reading sources and collaborators for sensor-deck.
//!
//! Everything here may touch the disk or block; the reconciliation engine in
//! `sensor-deck-core` only ever sees the batches these produce.

mod error;
mod json_file;
mod poll_worker;
mod range_store;
mod static_source;
mod timestamp;

pub use error::SourceError;
pub use json_file::{load_batch, JsonFileSource};
pub use poll_worker::{PollEvent, PollWorker};
pub use range_store::RangeStore;
pub use static_source::StaticSource;
pub use timestamp::{parse_observed, LocalTimeFormatter, DISPLAY_FORMAT};
