//! milestone-engine: Headless core of the milestone timeline viewer
//!
//! This crate provides the state behind the timeline, independent of any
//! terminal:
//! - Event types and the immutable event catalog
//! - The modal controller and its open/closed state machine
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod event;
pub mod modal;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError};
pub use config::{Config, ConfigError, IconStyle};
pub use event::{Event, EventId, ParseEventIdError};
pub use modal::{DialogSlots, DismissReason, ModalController, ModalState, Transition};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
