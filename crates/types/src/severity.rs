//! Severity levels derived from out-of-band counts

use serde::{Deserialize, Serialize};

/// How urgently a sensor needs attention.
///
/// Derived from the number of metrics currently outside their good band;
/// the dashboard only distinguishes none, one, and more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Healthy,
    Minor,
    Major,
}

impl Severity {
    /// Map an out-of-band count onto a severity level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Severity::Healthy,
            1 => Severity::Minor,
            _ => Severity::Major,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Minor => "minor",
            Severity::Major => "major",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_count() {
        assert_eq!(Severity::from_count(0), Severity::Healthy);
        assert_eq!(Severity::from_count(1), Severity::Minor);
        assert_eq!(Severity::from_count(2), Severity::Major);
        assert_eq!(Severity::from_count(3), Severity::Major);
    }
}
