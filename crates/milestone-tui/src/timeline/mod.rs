//! Timeline pane: the list of event markers.
//!
//! This module provides:
//! - [`TimelineState`] - Marker selection and scrolling
//! - [`TimelineWidget`] - Widget for rendering the markers

mod state;
mod widget;

pub use state::{TimelineState, MARKER_HEIGHT, SCROLL_SPEED};
pub use widget::TimelineWidget;
