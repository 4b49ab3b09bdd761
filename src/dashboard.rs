//! Dashboard state: registry, filters and card layout in one place
//!
//! Every mutator returns whether something visible may have changed, so a
//! front end only needs to re-render (and re-run the layout) on `true`.

use log::debug;
use sensor_deck_core::{
    ingest_batch, FilterEngine, FlowLayout, GridLayout, LayoutItem, LayoutResult,
    RangeConfigSource, SensorEntity, SensorRegistry, TimestampFormatter,
};
use sensor_deck_types::{FilterState, PollBatch, RangeConfig, Rect, SensorReading, Size};

use crate::config::{AppConfig, LayoutConfig, LayoutMode};

/// A card as seen by the layout engines
#[derive(Debug, Clone, Copy)]
struct CardItem {
    size: Size,
    visible: bool,
}

impl LayoutItem for CardItem {
    fn size_hint(&self) -> Size {
        self.size
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A placed card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedCard {
    pub sensor_id: String,
    pub rect: Rect,
}

/// Positions of the visible cards in display order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardLayout {
    pub cards: Vec<PlacedCard>,
    pub total_height: i32,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    registry: SensorRegistry,
    filter: FilterState,
    layout: LayoutConfig,
    container_width: i32,
    /// Favorites requested before their sensor was first seen
    pending_favorites: Vec<String>,
}

impl Dashboard {
    pub fn new(filter: FilterState, layout: LayoutConfig) -> Self {
        Self {
            registry: SensorRegistry::new(),
            filter,
            layout,
            container_width: 0,
            pending_favorites: Vec::new(),
        }
    }

    /// Dashboard with the configured filters, layout and startup favorites
    pub fn from_config(config: &AppConfig) -> Self {
        let mut dashboard = Self::new(config.filter.clone(), config.layout);
        dashboard.request_favorites(config.favorites.iter().cloned());
        dashboard
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn container_width(&self) -> i32 {
        self.container_width
    }

    /// Favorites still waiting for their sensor to appear
    pub fn pending_favorites(&self) -> &[String] {
        &self.pending_favorites
    }

    /// Apply a poll batch
    pub fn apply_batch(
        &mut self,
        batch: &PollBatch,
        ranges: &dyn RangeConfigSource,
        formatter: &dyn TimestampFormatter,
    ) -> bool {
        let changed = ingest_batch(&mut self.registry, batch, ranges, formatter);
        self.resolve_pending_favorites() || changed
    }

    /// Insert or update a single sensor
    pub fn upsert(
        &mut self,
        id: &str,
        name: Option<&str>,
        reading: &SensorReading,
        range_config: Option<RangeConfig>,
    ) -> bool {
        let changed = self.registry.upsert(id, name, reading, range_config);
        self.resolve_pending_favorites() || changed
    }

    /// Mark or unmark a sensor as favorite.
    ///
    /// Unknown ids are ignored and return `false`; use
    /// [`request_favorites`](Self::request_favorites) for sensors that have
    /// not reported yet.
    pub fn set_favorite(&mut self, id: &str, favorite: bool) -> bool {
        if !favorite {
            self.pending_favorites.retain(|p| p != id);
        }
        self.registry.set_favorite(id, favorite)
    }

    /// Mark sensors as favorite, now or on their first sighting.
    ///
    /// The first id ends up first in display order among those applied
    /// together.
    pub fn request_favorites<I, S>(&mut self, ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            let id = id.into();
            if !self.pending_favorites.contains(&id) {
                self.pending_favorites.push(id);
            }
        }
        self.resolve_pending_favorites()
    }

    fn resolve_pending_favorites(&mut self) -> bool {
        if self.pending_favorites.is_empty() {
            return false;
        }

        let (ready, waiting): (Vec<String>, Vec<String>) = self
            .pending_favorites
            .drain(..)
            .partition(|id| self.registry.contains(id));
        self.pending_favorites = waiting;

        // Favoriting moves a card to the front, so apply in reverse
        let mut changed = false;
        for id in ready.iter().rev() {
            debug!("Applying requested favorite {}", id);
            changed |= self.registry.set_favorite(id, true);
        }
        changed
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        self.filter.set_search_text(text)
    }

    pub fn set_hide_non_favorites(&mut self, hide: bool) -> bool {
        self.filter.set_hide_non_favorites(hide)
    }

    pub fn set_show_minor(&mut self, show: bool) -> bool {
        self.filter.set_show_minor(show)
    }

    pub fn set_show_major(&mut self, show: bool) -> bool {
        self.filter.set_show_major(show)
    }

    pub fn set_container_width(&mut self, width: i32) -> bool {
        let width = width.max(0);
        if self.container_width == width {
            return false;
        }
        self.container_width = width;
        true
    }

    /// Entities passing the current filters, in display order
    pub fn visible(&self) -> Vec<&SensorEntity> {
        FilterEngine::new(&self.filter).visible(self.registry.snapshot())
    }

    /// Place the visible cards with the configured card size
    pub fn layout(&self) -> DashboardLayout {
        let card = Size::new(self.layout.card_width, self.layout.card_height);
        self.layout_with(|_| card)
    }

    /// Place the visible cards, asking `size_of` for each card's size
    pub fn layout_with<F>(&self, size_of: F) -> DashboardLayout
    where
        F: Fn(&SensorEntity) -> Size,
    {
        let engine = FilterEngine::new(&self.filter);
        let entities = self.registry.snapshot();
        let items: Vec<CardItem> = entities
            .iter()
            .map(|&entity| CardItem {
                size: size_of(entity),
                visible: engine.passes(entity),
            })
            .collect();

        let result = self.run_layout(&items);
        let cards = result
            .placed()
            .map(|(index, rect)| PlacedCard {
                sensor_id: entities[index].id().to_string(),
                rect,
            })
            .collect();

        DashboardLayout {
            cards,
            total_height: result.total_height,
        }
    }

    fn run_layout(&self, items: &[CardItem]) -> LayoutResult {
        match self.layout.mode {
            LayoutMode::Flow => FlowLayout::new(self.layout.spacing, self.layout.margin)
                .layout(items, self.container_width),
            LayoutMode::Grid { columns } => {
                GridLayout::new(columns, self.layout.spacing, self.layout.margin).layout(items)
            }
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(FilterState::default(), LayoutConfig::default())
    }
}
