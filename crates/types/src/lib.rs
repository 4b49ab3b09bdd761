//! sensor-deck-types: Shared data types for the sensor-deck dashboard.
//!
//! This crate contains pure data types (readings, range bands, filter state,
//! layout geometry and poll batch shapes) that are shared across all
//! sensor-deck crates. Nothing here performs I/O or owns mutable state,
//! making it suitable as a foundation layer.

pub mod batch;
pub mod filter;
pub mod geometry;
pub mod metric;
pub mod range;
pub mod reading;
pub mod severity;

// Re-export commonly used types at the crate root for convenience
pub use batch::{PollBatch, Sample, SampleSet, SensorMeta};
pub use filter::FilterState;
pub use geometry::{Point, Rect, Size};
pub use metric::{Metric, MetricInfo};
pub use range::{MetricBand, RangeConfig};
pub use reading::SensorReading;
pub use severity::Severity;
