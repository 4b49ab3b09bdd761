//! sensor-deck: a dashboard for wireless temperature and humidity sensors
//!
//! This library ties the workspace crates together:
//! - Configuration management
//! - The [`Dashboard`] facade over registry, filters and layout
//! - Plain-text rendering of the cards

pub mod config;
pub mod dashboard;
pub mod report;

pub use sensor_deck_core as core;
pub use sensor_deck_sources as sources;
pub use sensor_deck_types as types;

// Re-export commonly used types
pub use config::{AppConfig, LayoutConfig, LayoutMode};
pub use dashboard::{Dashboard, DashboardLayout, PlacedCard};
