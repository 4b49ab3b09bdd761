//! Sensor reading value object

use serde::{Deserialize, Serialize};

use crate::metric::Metric;
use crate::range::RangeConfig;

/// One delivery of readings for a single sensor.
///
/// Every measurement is optional; a missing field means "not reported in
/// this delivery", not "reported as zero". Values are carried as given, no
/// range validation happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: String,
    /// Temperature in degrees Fahrenheit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Vapor-pressure deficit in kPa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_voltage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<f64>,
    /// Already-localized observation time, treated as opaque text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_config: Option<RangeConfig>,
}

impl SensorReading {
    /// Create an empty reading for a sensor
    pub fn new(sensor_id: impl Into<String>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, value: f64) -> Self {
        self.temperature = Some(value);
        self
    }

    pub fn with_humidity(mut self, value: f64) -> Self {
        self.humidity = Some(value);
        self
    }

    pub fn with_vpd(mut self, value: f64) -> Self {
        self.vpd = Some(value);
        self
    }

    pub fn with_battery_voltage(mut self, value: f64) -> Self {
        self.battery_voltage = Some(value);
        self
    }

    pub fn with_signal_strength(mut self, value: f64) -> Self {
        self.signal_strength = Some(value);
        self
    }

    pub fn with_display_timestamp(mut self, value: impl Into<String>) -> Self {
        self.display_timestamp = Some(value.into());
        self
    }

    pub fn with_range_config(mut self, config: RangeConfig) -> Self {
        self.range_config = Some(config);
        self
    }

    /// Get the value of a classified metric, if reported
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Vpd => self.vpd,
        }
    }

    /// Field-by-field equality that treats two NaN measurements as equal.
    ///
    /// `PartialEq` never considers NaN equal to itself, which would make an
    /// unchanged NaN reading look like a change on every update.
    pub fn same_values(&self, other: &SensorReading) -> bool {
        fn same(a: Option<f64>, b: Option<f64>) -> bool {
            a.map(f64::to_bits) == b.map(f64::to_bits)
        }

        self.sensor_id == other.sensor_id
            && same(self.temperature, other.temperature)
            && same(self.humidity, other.humidity)
            && same(self.vpd, other.vpd)
            && same(self.battery_voltage, other.battery_voltage)
            && same(self.signal_strength, other.signal_strength)
            && self.display_timestamp == other.display_timestamp
            && self.range_config == other.range_config
    }

    /// Produce a new reading where every field present in `update` replaces
    /// the corresponding field of `self`; absent fields keep their prior value.
    ///
    /// The sensor id of `self` is kept.
    pub fn merged_with(&self, update: &SensorReading) -> SensorReading {
        SensorReading {
            sensor_id: self.sensor_id.clone(),
            temperature: update.temperature.or(self.temperature),
            humidity: update.humidity.or(self.humidity),
            vpd: update.vpd.or(self.vpd),
            battery_voltage: update.battery_voltage.or(self.battery_voltage),
            signal_strength: update.signal_strength.or(self.signal_strength),
            display_timestamp: update
                .display_timestamp
                .clone()
                .or_else(|| self.display_timestamp.clone()),
            range_config: update.range_config.or(self.range_config),
        }
    }
}
