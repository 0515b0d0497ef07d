//! Timeline event types.
//!
//! An [`Event`] is one dated milestone. Its [`EventId`] is the key markers
//! carry and the catalog is indexed by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Identifier of a timeline event.
///
/// Ids are positive integers. Markers carry them as strings, so
/// [`EventId::from_str`] accepts surrounding whitespace and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(NonZeroU32);

impl EventId {
    /// Create an id, returning `None` for zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Get the raw numeric value.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a marker attribute is not a valid event id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid event id: {0:?}")]
pub struct ParseEventIdError(pub String);

impl FromStr for EventId {
    type Err = ParseEventIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<NonZeroU32>()
            .map(Self)
            .map_err(|_| ParseEventIdError(s.to_string()))
    }
}

/// A single timeline milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Catalog key.
    pub id: EventId,
    /// Year label shown on the marker and in the dialog (free text).
    pub year: String,
    /// Headline.
    pub title: String,
    /// Rich-text body (`CommonMark`).
    pub description: String,
}

impl Event {
    /// Create a new event.
    pub fn new(
        id: EventId,
        year: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            year: year.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Marker label: year and title.
    pub fn label(&self) -> String {
        format!("{}  {}", self.year, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_rejects_zero() {
        assert!(EventId::new(0).is_none());
        assert_eq!(EventId::new(7).map(EventId::get), Some(7));
    }

    #[test]
    fn test_event_id_parse() {
        assert_eq!("2".parse::<EventId>().ok(), EventId::new(2));
        assert_eq!(" 3 ".parse::<EventId>().ok(), EventId::new(3));
        assert!("0".parse::<EventId>().is_err());
        assert!("-1".parse::<EventId>().is_err());
        assert!("two".parse::<EventId>().is_err());
        assert!("".parse::<EventId>().is_err());
    }

    #[test]
    fn test_event_id_serde_is_plain_number() {
        let id = EventId::new(4).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "4");
        let parsed: EventId = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<EventId>("0").is_err());
    }

    #[test]
    fn test_event_label() {
        let event = Event::new(EventId::new(1).unwrap(), "2014", "Start", "Body");
        assert_eq!(event.label(), "2014  Start");
    }
}
