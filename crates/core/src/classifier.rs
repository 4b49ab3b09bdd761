//! Severity classification of readings against good bands

use sensor_deck_types::{Metric, RangeConfig, SensorReading};

/// Count how many of the reported metrics fall outside their good band.
///
/// Boundaries are in band. Metrics absent from the reading contribute
/// nothing, so the result is always in `0..=3`. Inverted or otherwise
/// degenerate bands are used as given and classify every value as out of
/// band; this never fails.
pub fn classify(reading: &SensorReading, config: &RangeConfig) -> u8 {
    Metric::ALL
        .iter()
        .filter(|metric| is_out_of_band(reading, config, **metric))
        .count() as u8
}

/// The metrics of `reading` currently outside their good band, in card order
pub fn out_of_band_metrics(reading: &SensorReading, config: &RangeConfig) -> Vec<Metric> {
    Metric::ALL
        .into_iter()
        .filter(|metric| is_out_of_band(reading, config, *metric))
        .collect()
}

fn is_out_of_band(reading: &SensorReading, config: &RangeConfig, metric: Metric) -> bool {
    match reading.metric(metric) {
        Some(value) => !config.band(metric).is_good(value),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_deck_types::MetricBand;

    fn reading() -> SensorReading {
        SensorReading::new("s1")
    }

    #[test]
    fn test_temperature_outside_good_band() {
        let config = RangeConfig::default();
        assert_eq!(classify(&reading().with_temperature(70.0), &config), 1);
        assert_eq!(classify(&reading().with_temperature(60.0), &config), 0);
    }

    #[test]
    fn test_boundaries_are_in_band() {
        let config = RangeConfig::default();
        let r = reading()
            .with_temperature(55.0)
            .with_humidity(65.0)
            .with_vpd(0.8);
        assert_eq!(classify(&r, &config), 0);
    }

    #[test]
    fn test_each_metric_counts_independently() {
        let config = RangeConfig::default();
        let r = reading()
            .with_temperature(80.0)
            .with_humidity(30.0)
            .with_vpd(2.0);
        assert_eq!(classify(&r, &config), 3);

        let r = reading().with_temperature(60.0).with_humidity(70.0).with_vpd(1.5);
        assert_eq!(classify(&r, &config), 2);
    }

    #[test]
    fn test_missing_metrics_are_not_counted() {
        let config = RangeConfig::default();
        assert_eq!(classify(&reading(), &config), 0);
        assert_eq!(classify(&reading().with_battery_voltage(0.1), &config), 0);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let config = RangeConfig::default();
        let r = reading().with_temperature(71.0).with_humidity(40.0);
        assert_eq!(classify(&r, &config), classify(&r, &config));
    }

    #[test]
    fn test_custom_band_changes_result() {
        let mut config = RangeConfig::default();
        config.temperature = MetricBand::new(32.0, 100.0, 65.0, 75.0);
        assert_eq!(classify(&reading().with_temperature(70.0), &config), 0);
    }

    #[test]
    fn test_inverted_band_is_always_out() {
        let mut config = RangeConfig::default();
        config.humidity = MetricBand::new(100.0, 0.0, 65.0, 45.0);
        assert_eq!(classify(&reading().with_humidity(55.0), &config), 1);
        assert_eq!(classify(&reading().with_humidity(65.0), &config), 1);
    }

    #[test]
    fn test_out_of_band_metrics_lists_failing_metrics() {
        let config = RangeConfig::default();
        let r = reading().with_temperature(60.0).with_humidity(90.0).with_vpd(0.1);
        assert_eq!(
            out_of_band_metrics(&r, &config),
            vec![Metric::Humidity, Metric::Vpd]
        );
    }
}
