//! Per-sensor display scales and good bands

use serde::{Deserialize, Serialize};

use crate::metric::Metric;

/// Smallest span used when a band's scale is empty or inverted
const MIN_SPAN: f64 = 1e-6;

/// Display scale and healthy sub-range for a single metric.
///
/// `min..=max` is the displayable scale, `good_min..=good_max` the band
/// considered healthy. Neither pair is validated: an inverted pair is kept
/// as given and simply never contains any value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBand {
    pub min: f64,
    pub max: f64,
    pub good_min: f64,
    pub good_max: f64,
}

impl MetricBand {
    pub const fn new(min: f64, max: f64, good_min: f64, good_max: f64) -> Self {
        Self {
            min,
            max,
            good_min,
            good_max,
        }
    }

    /// Whether `value` lies inside the inclusive good band.
    ///
    /// NaN is never in band, and neither is anything when `good_min > good_max`.
    pub fn is_good(&self, value: f64) -> bool {
        (self.good_min..=self.good_max).contains(&value)
    }

    /// Position of `value` on the display scale as a fraction in `[0, 1]`.
    ///
    /// Values beyond the scale are clamped to its ends.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        let clamped = clamp(value, self.min, self.max);
        ((clamped - self.min) / span).clamp(0.0, 1.0)
    }

    /// Start and end of the good band as fractions of the display scale
    pub fn good_fractions(&self) -> (f64, f64) {
        let span = self.span();
        let start = clamp(self.good_min, self.min, self.max);
        let end = clamp(self.good_max, self.min, self.max);
        ((start - self.min) / span, (end - self.min) / span)
    }

    fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            MIN_SPAN
        } else {
            span
        }
    }
}

/// `max(lo, min(hi, x))`, tolerant of `lo > hi` (unlike `f64::clamp`, which panics)
fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(x))
}

fn default_temperature() -> MetricBand {
    MetricBand::new(32.0, 100.0, 55.0, 65.0)
}

fn default_humidity() -> MetricBand {
    MetricBand::new(0.0, 100.0, 45.0, 65.0)
}

fn default_vpd() -> MetricBand {
    MetricBand::new(0.0, 3.0, 0.8, 1.2)
}

/// Bands for all three classified metrics of one sensor.
///
/// Missing metrics fall back to the built-in defaults when deserialized, so a
/// config file may override only the bands it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    #[serde(default = "default_temperature")]
    pub temperature: MetricBand,
    #[serde(default = "default_humidity")]
    pub humidity: MetricBand,
    #[serde(default = "default_vpd")]
    pub vpd: MetricBand,
}

impl RangeConfig {
    /// Get the band for a metric
    pub fn band(&self, metric: Metric) -> &MetricBand {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
            Metric::Vpd => &self.vpd,
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            humidity: default_humidity(),
            vpd: default_vpd(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        let config = RangeConfig::default();
        assert_eq!(config.temperature, MetricBand::new(32.0, 100.0, 55.0, 65.0));
        assert_eq!(config.humidity, MetricBand::new(0.0, 100.0, 45.0, 65.0));
        assert_eq!(config.vpd, MetricBand::new(0.0, 3.0, 0.8, 1.2));
    }

    #[test]
    fn test_good_band_is_inclusive() {
        let band = MetricBand::new(32.0, 100.0, 55.0, 65.0);
        assert!(band.is_good(55.0));
        assert!(band.is_good(65.0));
        assert!(!band.is_good(54.9));
        assert!(!band.is_good(65.1));
        assert!(!band.is_good(f64::NAN));
    }

    #[test]
    fn test_inverted_good_band_never_matches() {
        let band = MetricBand::new(0.0, 100.0, 70.0, 30.0);
        for v in [0.0, 30.0, 50.0, 70.0, 100.0] {
            assert!(!band.is_good(v));
        }
    }

    #[test]
    fn test_fraction_clamps_to_scale() {
        let band = MetricBand::new(0.0, 3.0, 0.8, 1.2);
        assert_eq!(band.fraction(-1.0), 0.0);
        assert_eq!(band.fraction(1.5), 0.5);
        assert_eq!(band.fraction(9.0), 1.0);
    }

    #[test]
    fn test_fraction_with_empty_scale_does_not_divide_by_zero() {
        let band = MetricBand::new(5.0, 5.0, 5.0, 5.0);
        assert_eq!(band.fraction(5.0), 0.0);
        assert!(band.fraction(7.0).is_finite());
    }

    #[test]
    fn test_good_fractions() {
        let band = MetricBand::new(0.0, 100.0, 45.0, 65.0);
        let (start, end) = band.good_fractions();
        assert!((start - 0.45).abs() < 1e-9);
        assert!((end - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"vpd": {"min": 0.0, "max": 2.0, "good_min": 0.4, "good_max": 0.8}}"#;
        let config: RangeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.vpd.good_max, 0.8);
        assert_eq!(config.temperature, RangeConfig::default().temperature);
    }
}
