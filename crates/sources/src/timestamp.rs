//! Localized display timestamps for sensor cards

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use log::warn;
use sensor_deck_core::TimestampFormatter;

use crate::error::SourceError;

/// Card timestamp format, e.g. "01/19/2025 12:40:12 PM EST"
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p %Z";

/// Parse a service observation time as UTC.
///
/// Accepts RFC 3339 (`2025-01-19T17:40:12.000Z`, `...+00:00`) and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD HH:MM:SS` times, which are
/// taken to be UTC already.
pub fn parse_observed(observed: &str) -> Option<DateTime<Utc>> {
    let trimmed = observed.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(naive, fmt).ok())
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// Formats observation times in a fixed IANA zone, or the machine's local
/// zone when none is configured
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalTimeFormatter {
    zone: Option<Tz>,
}

impl LocalTimeFormatter {
    /// Use the machine's local timezone
    pub fn local() -> Self {
        Self { zone: None }
    }

    pub fn with_zone(zone: Tz) -> Self {
        Self { zone: Some(zone) }
    }

    /// Resolve an IANA zone name such as "America/New_York"
    pub fn from_zone_name(name: &str) -> Result<Self, SourceError> {
        name.parse::<Tz>()
            .map(Self::with_zone)
            .map_err(|e| SourceError::UnknownTimezone {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn format_utc(&self, dt: DateTime<Utc>) -> String {
        match self.zone {
            Some(zone) => dt.with_timezone(&zone).format(DISPLAY_FORMAT).to_string(),
            None => dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
        }
    }
}

impl TimestampFormatter for LocalTimeFormatter {
    fn format_observed(&self, observed: &str) -> String {
        match parse_observed(observed) {
            Some(dt) => self.format_utc(dt),
            None => {
                warn!("Unparseable observation time '{}', showing as-is", observed);
                observed.to_string()
            }
        }
    }
}
