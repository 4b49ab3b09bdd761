//! sensor-deck-core: Reconciliation engine for the sensor-deck dashboard.
//!
//! This crate owns the live set of sensor entities and everything derived
//! from it: severity classification, favorite ordering, visibility filtering
//! and wrapping layout. It performs no I/O; readings arrive through the
//! collaborator traits in [`data_source`] and are handed in by the caller.

pub mod classifier;
pub mod data_source;
pub mod filter;
pub mod flow_layout;
pub mod ingest;
pub mod registry;
pub mod vpd;

pub use classifier::{classify, out_of_band_metrics};
pub use data_source::{
    BoxedReadingSource, NoRangeConfigs, RangeConfigSource, ReadingSource, SourceMetadata,
    TimestampFormatter,
};
pub use filter::{visible, FilterEngine};
pub use flow_layout::{layout, measure_height, FlowLayout, GridLayout, LayoutItem, LayoutResult};
pub use ingest::{ingest_batch, NO_DATA_TIMESTAMP};
pub use registry::{SensorEntity, SensorRegistry};
pub use vpd::{fahrenheit_to_celsius, saturation_vapor_pressure_kpa, vpd_kpa};

// Re-export types used in public signatures for convenience
pub use sensor_deck_types::{
    FilterState, Metric, MetricBand, PollBatch, RangeConfig, Rect, SensorReading, Severity, Size,
};
