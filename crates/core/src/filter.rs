//! Visibility filtering over the ordered entity set

use sensor_deck_types::{FilterState, Severity};

use crate::registry::SensorEntity;

/// A compiled [`FilterState`].
///
/// The search text is normalized once up front so that matching a large
/// entity set does not re-trim and re-lowercase it per entity.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    needle: String,
    hide_non_favorites: bool,
    show_minor: bool,
    show_major: bool,
}

impl FilterEngine {
    pub fn new(state: &FilterState) -> Self {
        Self {
            needle: state.normalized_search(),
            hide_non_favorites: state.hide_non_favorites,
            show_minor: state.show_minor,
            show_major: state.show_major,
        }
    }

    /// Whether an entity passes every active filter.
    ///
    /// Healthy sensors are never hidden by the minor/major toggles, only by
    /// the search text or the favorites-only switch.
    pub fn passes(&self, entity: &SensorEntity) -> bool {
        self.matches_search(entity.name())
            && self.passes_favorite(entity)
            && self.passes_severity(entity)
    }

    /// Keep the entities that pass, in their given order
    pub fn visible<'a, I>(&self, entities: I) -> Vec<&'a SensorEntity>
    where
        I: IntoIterator<Item = &'a SensorEntity>,
    {
        entities.into_iter().filter(|e| self.passes(e)).collect()
    }

    fn matches_search(&self, name: &str) -> bool {
        self.needle.is_empty() || name.to_lowercase().contains(&self.needle)
    }

    fn passes_favorite(&self, entity: &SensorEntity) -> bool {
        !self.hide_non_favorites || entity.is_favorite()
    }

    fn passes_severity(&self, entity: &SensorEntity) -> bool {
        match entity.severity() {
            Severity::Healthy => true,
            Severity::Minor => self.show_minor,
            Severity::Major => self.show_major,
        }
    }
}

/// Filter `entities` by `state`, preserving order
pub fn visible<'a, I>(entities: I, state: &FilterState) -> Vec<&'a SensorEntity>
where
    I: IntoIterator<Item = &'a SensorEntity>,
{
    FilterEngine::new(state).visible(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SensorRegistry;
    use sensor_deck_types::SensorReading;

    /// healthy "Flower Tent", minor "Veg Tent", major "Clone Room"
    fn registry() -> SensorRegistry {
        let mut registry = SensorRegistry::new();
        registry.upsert(
            "a",
            Some("Flower Tent"),
            &SensorReading::new("a").with_temperature(60.0).with_humidity(50.0),
            None,
        );
        registry.upsert(
            "b",
            Some("Veg Tent"),
            &SensorReading::new("b").with_temperature(70.0).with_humidity(50.0),
            None,
        );
        registry.upsert(
            "c",
            Some("Clone Room"),
            &SensorReading::new("c").with_temperature(70.0).with_humidity(90.0),
            None,
        );
        registry
    }

    fn ids<'a>(entities: &[&'a SensorEntity]) -> Vec<&'a str> {
        entities.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn test_default_state_keeps_everything_in_order() {
        let mut registry = registry();
        registry.set_favorite("c", true);
        let shown = visible(registry.iter(), &FilterState::default());
        assert_eq!(ids(&shown), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_healthy_and_major_favorite_with_defaults() {
        let mut registry = SensorRegistry::new();
        registry.upsert("A", None, &SensorReading::new("A").with_temperature(60.0), None);
        registry.upsert(
            "B",
            None,
            &SensorReading::new("B").with_temperature(90.0).with_vpd(2.5),
            None,
        );
        registry.set_favorite("B", true);
        registry.set_favorite("B", false);
        registry.set_favorite("B", true);
        let snapshot: Vec<&SensorEntity> = vec![
            registry.get("A").unwrap(),
            registry.get("B").unwrap(),
        ];
        let shown = visible(snapshot, &FilterState::default());
        assert_eq!(ids(&shown), vec!["A", "B"]);
    }

    #[test]
    fn test_search_matches_display_name_not_id() {
        let registry = registry();
        let state = FilterState {
            search_text: "c".to_string(),
            ..Default::default()
        };
        // Only "Clone Room" contains a "c"
        assert_eq!(ids(&visible(registry.iter(), &state)), vec!["c"]);

        let state = FilterState {
            search_text: "b".to_string(),
            ..Default::default()
        };
        // id "b" belongs to "Veg Tent", which has no "b" in its name
        assert!(visible(registry.iter(), &state).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let registry = registry();
        let state = FilterState {
            search_text: "  TENT ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&visible(registry.iter(), &state)), vec!["a", "b"]);
    }

    #[test]
    fn test_search_without_match_hides_healthy_sensor() {
        let registry = registry();
        let state = FilterState {
            search_text: "basement".to_string(),
            ..Default::default()
        };
        assert!(visible(registry.iter(), &state).is_empty());
    }

    #[test]
    fn test_favorites_only() {
        let mut registry = registry();
        registry.set_favorite("b", true);
        let state = FilterState {
            hide_non_favorites: true,
            ..Default::default()
        };
        assert_eq!(ids(&visible(registry.iter(), &state)), vec!["b"]);
    }

    #[test]
    fn test_hide_minor() {
        let registry = registry();
        let state = FilterState {
            show_minor: false,
            ..Default::default()
        };
        assert_eq!(ids(&visible(registry.iter(), &state)), vec!["a", "c"]);

        let state = FilterState {
            show_minor: false,
            show_major: true,
            ..Default::default()
        };
        assert!(!ids(&visible(registry.iter(), &state)).contains(&"b"));
    }

    #[test]
    fn test_hide_major() {
        let registry = registry();
        let state = FilterState {
            show_major: false,
            ..Default::default()
        };
        assert_eq!(ids(&visible(registry.iter(), &state)), vec!["a", "b"]);
    }

    #[test]
    fn test_severity_toggles_never_hide_healthy() {
        let registry = registry();
        let state = FilterState {
            show_minor: false,
            show_major: false,
            ..Default::default()
        };
        assert_eq!(ids(&visible(registry.iter(), &state)), vec!["a"]);
    }

    #[test]
    fn test_filters_compose() {
        let mut registry = registry();
        registry.set_favorite("a", true);
        registry.set_favorite("c", true);
        let state = FilterState {
            search_text: "room".to_string(),
            hide_non_favorites: true,
            show_minor: true,
            show_major: false,
        };
        assert!(visible(registry.iter(), &state).is_empty());

        let state = FilterState {
            show_major: true,
            ..state
        };
        assert_eq!(ids(&visible(registry.iter(), &state)), vec!["c"]);
    }

    #[test]
    fn test_engine_passes_matches_visible() {
        let registry = registry();
        let state = FilterState {
            show_minor: false,
            ..Default::default()
        };
        let engine = FilterEngine::new(&state);
        let passing: Vec<&str> = registry
            .iter()
            .filter(|e| engine.passes(e))
            .map(|e| e.id())
            .collect();
        assert_eq!(passing, ids(&engine.visible(registry.iter())));
    }
}
