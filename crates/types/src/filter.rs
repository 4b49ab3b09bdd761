//! Dashboard visibility filter state

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// User-controlled visibility filters.
///
/// Setters return `true` when the value actually changed, so callers know
/// whether the visible set has to be recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring matched against display names
    #[serde(default)]
    pub search_text: String,
    /// Show only sensors marked as favorite
    #[serde(default)]
    pub hide_non_favorites: bool,
    /// Show sensors with exactly one metric out of band
    #[serde(default = "default_true")]
    pub show_minor: bool,
    /// Show sensors with two or more metrics out of band
    #[serde(default = "default_true")]
    pub show_major: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            hide_non_favorites: false,
            show_minor: true,
            show_major: true,
        }
    }
}

impl FilterState {
    /// Search text as it is matched: trimmed and lower-cased
    pub fn normalized_search(&self) -> String {
        self.search_text.trim().to_lowercase()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.search_text == text {
            return false;
        }
        self.search_text = text;
        true
    }

    pub fn set_hide_non_favorites(&mut self, hide: bool) -> bool {
        replace_flag(&mut self.hide_non_favorites, hide)
    }

    pub fn set_show_minor(&mut self, show: bool) -> bool {
        replace_flag(&mut self.show_minor, show)
    }

    pub fn set_show_major(&mut self, show: bool) -> bool {
        replace_flag(&mut self.show_major, show)
    }
}

fn replace_flag(flag: &mut bool, value: bool) -> bool {
    let changed = *flag != value;
    *flag = value;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_show_everything() {
        let state = FilterState::default();
        assert!(state.search_text.is_empty());
        assert!(!state.hide_non_favorites);
        assert!(state.show_minor);
        assert!(state.show_major);
    }

    #[test]
    fn test_setters_report_changes() {
        let mut state = FilterState::default();
        assert!(state.set_search_text("Tent"));
        assert!(!state.set_search_text("Tent"));
        assert!(state.set_show_minor(false));
        assert!(!state.set_show_minor(false));
        assert!(!state.set_hide_non_favorites(false));
    }

    #[test]
    fn test_normalized_search() {
        let state = FilterState {
            search_text: "  Veg Room ".to_string(),
            ..Default::default()
        };
        assert_eq!(state.normalized_search(), "veg room");
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let state: FilterState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, FilterState::default());
    }
}
