//! Shapes of one poll cycle as delivered by the reading source

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-sensor metadata reported by the sensor service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub battery_voltage: Option<f64>,
    #[serde(default)]
    pub rssi: Option<f64>,
}

/// One timestamped sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// UTC observation time, e.g. "2025-01-19T17:40:12.000Z"
    pub observed: String,
    /// Degrees Fahrenheit
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

/// Samples grouped by sensor id, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    #[serde(default)]
    pub sensors: BTreeMap<String, Vec<Sample>>,
}

impl SampleSet {
    /// The most recent sample for a sensor, if any were delivered
    pub fn latest(&self, sensor_id: &str) -> Option<&Sample> {
        self.sensors.get(sensor_id).and_then(|samples| samples.last())
    }
}

/// Everything one poll cycle delivered.
///
/// Sensors are keyed in a `BTreeMap` so that ingestion visits them in a
/// stable order and first sightings append to the display order predictably.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollBatch {
    #[serde(default)]
    pub sensors: BTreeMap<String, SensorMeta>,
    #[serde(default)]
    pub samples: SampleSet,
}

impl PollBatch {
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
