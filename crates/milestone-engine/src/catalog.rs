//! Event catalog.
//!
//! The catalog is the immutable id -> event table behind the timeline.
//! It is built once at startup and only read afterwards. Order is
//! preserved: it is the order markers appear in on the timeline.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::event::{Event, EventId};

/// Errors that can occur when building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two events share an id.
    #[error("Duplicate event id: {0}")]
    DuplicateId(EventId),

    /// I/O error reading or writing a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing catalog JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing catalog to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// On-disk catalog layout.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    events: Vec<Event>,
}

/// Immutable, ordered table of timeline events.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    events: Vec<Event>,
    index: HashMap<EventId, usize>,
}

impl Catalog {
    /// Build a catalog, failing on the first duplicate id.
    pub fn new(events: Vec<Event>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(events.len());
        for (position, event) in events.iter().enumerate() {
            if index.insert(event.id, position).is_some() {
                return Err(CatalogError::DuplicateId(event.id));
            }
        }
        Ok(Self { events, index })
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        debug!(path = %path.display(), events = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content).map_err(CatalogError::Parse)?;
        Self::new(file.events)
    }

    /// Serialize the catalog to pretty JSON (the same layout [`Catalog::load`] reads).
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let file = CatalogFile {
            events: self.events.clone(),
        };
        serde_json::to_string_pretty(&file).map_err(CatalogError::Serialize)
    }

    /// Save the catalog to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let content = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Look up an event by id.
    ///
    /// Unknown ids return `None`; that is not an error.
    pub fn lookup(&self, id: EventId) -> Option<&Event> {
        self.index.get(&id).map(|&i| &self.events[i])
    }

    /// Look up an event from a raw marker attribute.
    ///
    /// Attributes that are not valid ids behave like unknown ids.
    pub fn lookup_marker(&self, attribute: &str) -> Option<&Event> {
        attribute.parse().ok().and_then(|id| self.lookup(id))
    }

    /// Check whether an id is a catalog key.
    pub fn contains(&self, id: EventId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of an event in marker order.
    pub fn position(&self, id: EventId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Get the event at a marker position.
    pub fn get(&self, position: usize) -> Option<&Event> {
        self.events.get(position)
    }

    /// All events in marker order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Iterate events in marker order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The built-in UC divestment history timeline.
    pub fn builtin() -> Self {
        let events = BUILTIN
            .iter()
            .zip(1u32..)
            .filter_map(|(&(year, title, description), raw)| {
                EventId::new(raw).map(|id| Event::new(id, year, title, description))
            })
            .collect();
        // Ids are generated sequentially, so they cannot collide.
        Self::new(events).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const BUILTIN: [(&str, &str, &str); 4] = [
    (
        "2014",
        "Initial Calls for Divestment",
        "Student organizations across UC campuses began organizing campaigns calling for the \
University to divest from fossil fuel companies and other controversial industries. This marked \
the beginning of a sustained movement that would grow over the following years.

Key moments included the formation of student coalitions, initial proposals to student \
government bodies, and early advocacy efforts directed at university administration and the \
Board of Regents.

These initial calls laid the groundwork for broader organizing efforts and helped establish \
divestment as a central issue for student activism across the UC system.",
    ),
    (
        "2015",
        "Student Protests",
        "Building on momentum from the previous year, students organized large-scale protests, \
demonstrations, and sit-ins to demand action on divestment. Protests took place at multiple UC \
campuses and at Board of Regents meetings.

Student activists employed various tactics including petition drives that gathered thousands \
of signatures, coordinated social media campaigns, and direct engagement with university \
officials.

The movement gained significant media attention and support from faculty members, alumni, and \
community organizations, increasing pressure on university leadership to respond to student \
demands.",
    ),
    (
        "2016",
        "Administrative Response",
        "University administrators and the Board of Regents began formally responding to student \
demands. This included establishing committees to study the feasibility of divestment, holding \
public forums, and releasing statements addressing the concerns raised by students.

While some viewed these initial responses as progress, many student activists felt the \
administration's approach was insufficient and designed to delay meaningful action rather than \
implement substantive policy changes.

This period saw continued dialogue between students and administration, with both sides \
presenting research, economic analyses, and ethical arguments to support their positions.",
    ),
    (
        "2017",
        "Policy Changes",
        "After years of sustained pressure, the University began implementing concrete policy \
changes related to investment practices. These changes represented a significant shift in how \
the UC system approached its investment portfolio.

New policies included enhanced screening processes for investments, increased transparency in \
reporting, and in some cases, actual divestment from specific industries or companies \
identified as problematic.

While activists celebrated these changes as victories resulting from their organizing efforts, \
debates continued about the scope and implementation of the new policies, with many calling for \
more comprehensive reforms.",
    ),
];
