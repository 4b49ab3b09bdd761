//! Metric metadata for the three classified environmental readings

use serde::{Deserialize, Serialize};

/// One of the environmental metrics that carries a good band and counts
/// toward severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Air temperature in degrees Fahrenheit
    Temperature,
    /// Relative humidity in percent
    Humidity,
    /// Vapor-pressure deficit in kPa
    Vpd,
}

/// Display metadata describing a single metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricInfo {
    /// Stable identifier (e.g., "temperature")
    pub id: &'static str,
    /// Card label (e.g., "TEMPERATURE")
    pub label: &'static str,
    /// Unit suffix appended to formatted values
    pub unit: &'static str,
    /// Number of decimals shown on a card
    pub decimals: usize,
}

impl Metric {
    /// All classified metrics, in card order
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::Vpd];

    /// Get display metadata for this metric
    pub fn info(&self) -> MetricInfo {
        match self {
            Metric::Temperature => MetricInfo {
                id: "temperature",
                label: "TEMPERATURE",
                unit: "°F",
                decimals: 1,
            },
            Metric::Humidity => MetricInfo {
                id: "humidity",
                label: "RELATIVE HUMIDITY",
                unit: "%",
                decimals: 1,
            },
            Metric::Vpd => MetricInfo {
                id: "vpd",
                label: "VPD",
                unit: "kPa",
                decimals: 2,
            },
        }
    }

    /// Format a value the way a card shows it (e.g., "61.3°F", "1.05kPa")
    pub fn format_value(&self, value: f64) -> String {
        let info = self.info();
        format!("{:.*}{}", info.decimals, value, info.unit)
    }
}
