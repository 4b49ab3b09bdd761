//! Applying a delivered poll batch to the registry

use log::{debug, info};
use sensor_deck_types::{PollBatch, SensorReading};

use crate::data_source::{RangeConfigSource, TimestampFormatter};
use crate::registry::SensorRegistry;
use crate::vpd::vpd_kpa;

/// Display timestamp for a sensor that has never delivered a sample
pub const NO_DATA_TIMESTAMP: &str = "(no data)";

/// Fold one poll batch into the registry.
///
/// Every sensor in the batch metadata is upserted in ascending id order. The
/// newest sample of a sensor supplies temperature and humidity, VPD is
/// derived from them, and the observation time is rendered by `formatter`.
/// A sensor without samples keeps its last values but its timestamp becomes
/// [`NO_DATA_TIMESTAMP`], so a sensor that went quiet is visible as such.
///
/// Returns `true` if any entity changed.
pub fn ingest_batch(
    registry: &mut SensorRegistry,
    batch: &PollBatch,
    ranges: &dyn RangeConfigSource,
    formatter: &dyn TimestampFormatter,
) -> bool {
    let mut changed = false;
    let mut new_sensors = 0usize;
    let mut with_samples = 0usize;

    for (id, meta) in &batch.sensors {
        let name = meta.name.as_deref().unwrap_or(id);

        let mut reading = SensorReading::new(id.as_str());
        reading.battery_voltage = meta.battery_voltage;
        reading.signal_strength = meta.rssi;

        match batch.samples.latest(id) {
            Some(sample) => {
                with_samples += 1;
                reading = reading
                    .with_temperature(sample.temperature)
                    .with_humidity(sample.humidity)
                    .with_vpd(vpd_kpa(sample.temperature, sample.humidity))
                    .with_display_timestamp(formatter.format_observed(&sample.observed));
            }
            None => {
                reading = reading.with_display_timestamp(NO_DATA_TIMESTAMP);
            }
        }

        if !registry.contains(id) {
            new_sensors += 1;
        }
        changed |= registry.upsert(id, Some(name), &reading, ranges.range_config(id));
    }

    for id in batch
        .samples
        .sensors
        .keys()
        .filter(|id| !batch.sensors.contains_key(*id))
    {
        debug!("Ignoring samples for sensor {} missing from metadata", id);
    }

    info!(
        "Ingested batch: {} sensors ({} new, {} with samples), changed={}",
        batch.sensors.len(),
        new_sensors,
        with_samples,
        changed
    );
    changed
}
