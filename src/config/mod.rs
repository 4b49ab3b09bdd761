//! Configuration management

mod settings;

pub use settings::{AppConfig, LayoutConfig, LayoutMode};
