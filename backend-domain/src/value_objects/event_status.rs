// Event status value object

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    #[default]
    Open,
    Full,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Open => "Open",
            EventStatus::Full => "Full",
            EventStatus::Cancelled => "Cancelled",
        }
    }

    /// Case-insensitive parse; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "open" => Some(EventStatus::Open),
            "full" => Some(EventStatus::Full),
            "cancelled" | "canceled" => Some(EventStatus::Cancelled),
            _ => None,
        }
    }

    /// Status implied by participant counts. Never yields `Cancelled`.
    pub fn for_occupancy(current: u32, max: u32) -> Self {
        if current >= max {
            EventStatus::Full
        } else {
            EventStatus::Open
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_case_and_both_spellings() {
        assert_eq!(EventStatus::parse("open"), Some(EventStatus::Open));
        assert_eq!(EventStatus::parse(" FULL "), Some(EventStatus::Full));
        assert_eq!(EventStatus::parse("Canceled"), Some(EventStatus::Cancelled));
        assert_eq!(EventStatus::parse("pending"), None);
    }

    #[test]
    fn serializes_with_capitalized_names() {
        let json = serde_json::to_string(&EventStatus::Cancelled).expect("serialize");
        assert_eq!(json, "\"Cancelled\"");
    }
}
