//! Registry of live sensor entities and their display order

use log::{debug, info};
use sensor_deck_types::{Metric, RangeConfig, SensorReading, Severity};
use std::collections::HashMap;

use crate::classifier::{classify, out_of_band_metrics};

/// Display-relevant state of one tracked sensor.
///
/// Fields are private so the severity count can only ever be the result of
/// classifying the latest reading against the range config in effect.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEntity {
    id: String,
    name: String,
    reading: SensorReading,
    /// Last range config supplied for this sensor; kept across updates that omit one
    range_config: Option<RangeConfig>,
    severity_count: u8,
    favorite: bool,
}

impl SensorEntity {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            reading: SensorReading::new(id),
            range_config: None,
            severity_count: 0,
            favorite: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name shown on the card and matched by search
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latest merged reading
    pub fn reading(&self) -> &SensorReading {
        &self.reading
    }

    /// Range config in effect: the last one supplied, or the defaults
    pub fn range_config(&self) -> RangeConfig {
        self.range_config.unwrap_or_default()
    }

    /// Range config explicitly supplied for this sensor, if any
    pub fn custom_range_config(&self) -> Option<&RangeConfig> {
        self.range_config.as_ref()
    }

    /// Number of reported metrics outside their good band
    pub fn severity_count(&self) -> u8 {
        self.severity_count
    }

    pub fn severity(&self) -> Severity {
        Severity::from_count(self.severity_count)
    }

    /// Which metrics are currently out of band, for highlighting on a card
    pub fn out_of_band_metrics(&self) -> Vec<Metric> {
        out_of_band_metrics(&self.reading, &self.range_config())
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite
    }

    /// Equality for change detection; NaN readings compare equal to themselves
    fn same_state(&self, other: &SensorEntity) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.reading.same_values(&other.reading)
            && self.range_config == other.range_config
            && self.severity_count == other.severity_count
            && self.favorite == other.favorite
    }

    fn reclassify(&mut self) {
        let previous = self.severity();
        self.severity_count = classify(&self.reading, &self.range_config());
        let current = self.severity();
        if previous != current {
            debug!(
                "Sensor {} severity {} -> {}",
                self.id,
                previous.label(),
                current.label()
            );
        }
    }
}

/// Owns the canonical set of sensor entities and the order they are shown in.
///
/// Entities are created on first sighting and never removed; a sensor that
/// stops reporting keeps its last data. The display order always holds every
/// known id exactly once.
#[derive(Debug, Clone, Default)]
pub struct SensorRegistry {
    entities: HashMap<String, SensorEntity>,
    display_order: Vec<String>,
}

impl SensorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new sensor or update a known one.
    ///
    /// New sensors are appended to the end of the display order and named
    /// after their id unless a name is given. For known sensors the name is
    /// replaced only when given, only the fields present in `reading` are
    /// replaced, and the range config is replaced only when one is supplied
    /// (either as `range_config` or inside the reading). Severity is always
    /// recomputed.
    ///
    /// Returns `true` when anything about the sensor changed.
    pub fn upsert(
        &mut self,
        id: &str,
        name: Option<&str>,
        reading: &SensorReading,
        range_config: Option<RangeConfig>,
    ) -> bool {
        let created = !self.entities.contains_key(id);
        let entity = self.entities.entry(id.to_string()).or_insert_with(|| {
            info!("New sensor {} ({})", id, name.unwrap_or(id));
            SensorEntity::new(id, name.unwrap_or(id))
        });
        if created {
            self.display_order.push(id.to_string());
        }
        let before = entity.clone();

        if let Some(name) = name {
            if entity.name != name {
                entity.name = name.to_string();
            }
        }

        if let Some(config) = range_config.or(reading.range_config) {
            entity.range_config = Some(config);
        }

        let mut merged = entity.reading.merged_with(reading);
        // The entity's own field is authoritative for ranges
        merged.range_config = None;
        entity.reading = merged;

        entity.reclassify();

        created || !entity.same_state(&before)
    }

    /// Mark or unmark a sensor as favorite and move it in the display order.
    ///
    /// The sensor is taken out of the order and put back at the front when
    /// `favorite` is set, at the back otherwise; repeated toggles therefore
    /// put the most recently favorited sensor first. Unknown ids are ignored.
    ///
    /// Returns `true` when the flag or the order changed.
    pub fn set_favorite(&mut self, id: &str, favorite: bool) -> bool {
        let Some(entity) = self.entities.get_mut(id) else {
            debug!("Ignoring favorite toggle for unknown sensor {}", id);
            return false;
        };
        let flag_changed = entity.favorite != favorite;
        entity.favorite = favorite;

        let old_index = self.display_order.iter().position(|s| s == id);
        if let Some(index) = old_index {
            self.display_order.remove(index);
        }
        let new_index = if favorite {
            self.display_order.insert(0, id.to_string());
            0
        } else {
            self.display_order.push(id.to_string());
            self.display_order.len() - 1
        };
        debug!(
            "Sensor {} favorite={} moved to position {}",
            id, favorite, new_index
        );

        flag_changed || old_index != Some(new_index)
    }

    /// Entities in display order
    pub fn snapshot(&self) -> Vec<&SensorEntity> {
        self.iter().collect()
    }

    /// Iterate entities in display order
    pub fn iter(&self) -> impl Iterator<Item = &SensorEntity> + '_ {
        self.display_order
            .iter()
            .filter_map(move |id| self.entities.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&SensorEntity> {
        self.entities.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Sensor ids in display order
    pub fn display_order(&self) -> &[String] {
        &self.display_order
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_deck_types::MetricBand;

    fn registry_with(ids: &[&str]) -> SensorRegistry {
        let mut registry = SensorRegistry::new();
        for id in ids {
            registry.upsert(id, None, &SensorReading::new(*id), None);
        }
        registry
    }

    fn order(registry: &SensorRegistry) -> Vec<&str> {
        registry.display_order().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_first_sighting_appends() {
        let registry = registry_with(&["s1", "s2", "s3"]);
        assert_eq!(order(&registry), vec!["s1", "s2", "s3"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("s2").unwrap().name(), "s2");
    }

    #[test]
    fn test_upsert_known_sensor_keeps_position() {
        let mut registry = registry_with(&["s1", "s2"]);
        registry.upsert("s1", Some("Veg Tent"), &SensorReading::new("s1"), None);
        assert_eq!(order(&registry), vec!["s1", "s2"]);
        assert_eq!(registry.get("s1").unwrap().name(), "Veg Tent");
    }

    #[test]
    fn test_upsert_without_name_keeps_name() {
        let mut registry = SensorRegistry::new();
        registry.upsert("s1", Some("Clone Room"), &SensorReading::new("s1"), None);
        registry.upsert("s1", None, &SensorReading::new("s1").with_vpd(1.0), None);
        assert_eq!(registry.get("s1").unwrap().name(), "Clone Room");
    }

    #[test]
    fn test_upsert_merges_partial_readings() {
        let mut registry = SensorRegistry::new();
        let first = SensorReading::new("s1")
            .with_temperature(60.0)
            .with_humidity(50.0)
            .with_battery_voltage(3.0);
        registry.upsert("s1", None, &first, None);
        registry.upsert("s1", None, &SensorReading::new("s1").with_humidity(55.0), None);

        let reading = registry.get("s1").unwrap().reading();
        assert_eq!(reading.temperature, Some(60.0));
        assert_eq!(reading.humidity, Some(55.0));
        assert_eq!(reading.battery_voltage, Some(3.0));
    }

    #[test]
    fn test_severity_recomputed_on_upsert() {
        let mut registry = SensorRegistry::new();
        registry.upsert("s1", None, &SensorReading::new("s1").with_temperature(60.0), None);
        assert_eq!(registry.get("s1").unwrap().severity_count(), 0);

        registry.upsert("s1", None, &SensorReading::new("s1").with_humidity(90.0), None);
        assert_eq!(registry.get("s1").unwrap().severity(), Severity::Minor);

        registry.upsert("s1", None, &SensorReading::new("s1").with_temperature(90.0), None);
        assert_eq!(registry.get("s1").unwrap().severity_count(), 2);
        assert_eq!(registry.get("s1").unwrap().severity(), Severity::Major);
    }

    #[test]
    fn test_range_config_is_sticky() {
        let mut registry = SensorRegistry::new();
        let mut warm = RangeConfig::default();
        warm.temperature = MetricBand::new(32.0, 100.0, 70.0, 80.0);

        let reading = SensorReading::new("s1").with_temperature(75.0);
        registry.upsert("s1", None, &reading, Some(warm));
        assert_eq!(registry.get("s1").unwrap().severity_count(), 0);

        // Later update without a config keeps the custom band
        registry.upsert("s1", None, &SensorReading::new("s1").with_temperature(72.0), None);
        let entity = registry.get("s1").unwrap();
        assert_eq!(entity.custom_range_config(), Some(&warm));
        assert_eq!(entity.severity_count(), 0);
    }

    #[test]
    fn test_range_config_inside_reading_is_applied() {
        let mut registry = SensorRegistry::new();
        let mut config = RangeConfig::default();
        config.vpd = MetricBand::new(0.0, 3.0, 1.3, 1.6);
        let reading = SensorReading::new("s1").with_vpd(1.0).with_range_config(config);
        registry.upsert("s1", None, &reading, None);

        let entity = registry.get("s1").unwrap();
        assert_eq!(entity.range_config(), config);
        assert_eq!(entity.out_of_band_metrics(), vec![Metric::Vpd]);
        assert!(entity.reading().range_config.is_none());
    }

    #[test]
    fn test_upsert_reports_changes() {
        let mut registry = SensorRegistry::new();
        let reading = SensorReading::new("s1").with_temperature(60.0);
        assert!(registry.upsert("s1", None, &reading, None));
        assert!(!registry.upsert("s1", None, &reading, None));
        assert!(registry.upsert("s1", Some("Renamed"), &reading, None));
    }

    #[test]
    fn test_identical_nan_upsert_is_not_a_change() {
        let mut registry = SensorRegistry::new();
        let reading = SensorReading::new("s1").with_temperature(f64::NAN);
        assert!(registry.upsert("s1", None, &reading, None));
        assert!(!registry.upsert("s1", None, &reading, None));
        // NaN stays out of band
        assert_eq!(registry.get("s1").unwrap().severity_count(), 1);
        assert!(registry.upsert("s1", None, &SensorReading::new("s1").with_temperature(60.0), None));
    }

    #[test]
    fn test_favorite_order_is_most_recent_first() {
        let mut registry = registry_with(&["s1", "s2", "s3"]);
        registry.set_favorite("s3", true);
        registry.set_favorite("s1", true);
        assert_eq!(order(&registry), vec!["s1", "s3", "s2"]);
    }

    #[test]
    fn test_unfavorite_moves_to_back() {
        let mut registry = registry_with(&["s1", "s2", "s3"]);
        registry.set_favorite("s3", true);
        registry.set_favorite("s1", true);
        registry.set_favorite("s1", false);
        assert_eq!(order(&registry), vec!["s3", "s2", "s1"]);
        assert!(!registry.get("s1").unwrap().is_favorite());
        assert!(registry.get("s3").unwrap().is_favorite());
    }

    #[test]
    fn test_favorite_unknown_sensor_is_noop() {
        let mut registry = registry_with(&["s1"]);
        assert!(!registry.set_favorite("missing", true));
        assert_eq!(order(&registry), vec!["s1"]);
    }

    #[test]
    fn test_set_favorite_reports_changes() {
        let mut registry = registry_with(&["s1", "s2"]);
        assert!(registry.set_favorite("s2", true));
        // Already favorite and already first
        assert!(!registry.set_favorite("s2", true));
        assert!(registry.set_favorite("s2", false));
        assert!(!registry.set_favorite("s2", false));
    }

    #[test]
    fn test_snapshot_follows_display_order() {
        let mut registry = registry_with(&["a", "b", "c"]);
        registry.set_favorite("c", true);
        let snapshot = registry.snapshot();
        let ids: Vec<&str> = snapshot.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_display_order_has_no_duplicates() {
        let mut registry = registry_with(&["a", "b"]);
        registry.upsert("a", None, &SensorReading::new("a"), None);
        registry.set_favorite("b", true);
        registry.set_favorite("b", true);
        registry.set_favorite("a", false);
        let mut ids = order(&registry);
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
