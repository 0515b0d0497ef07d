//! Modal dialog lifecycle.
//!
//! [`ModalController`] owns the only mutable state of the timeline: whether
//! the event dialog is open and for which event. Opening and closing keep
//! the dialog slots, visibility flag, marker highlights and background
//! scroll lock in step with that state.
//!
//! ```text
//! Closed  --open(valid)-->  Open(id)
//! Open(x) --open(valid)-->  Open(id)   (no intermediate close)
//! Open(x) --close------->   Closed
//! any     --open(unknown)-> unchanged
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::event::{Event, EventId};

/// Modal open/closed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    /// No dialog shown.
    #[default]
    Closed,
    /// Dialog shown for the given event.
    Open(EventId),
}

impl ModalState {
    /// Check if the dialog is open.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Id of the event shown, if open.
    pub fn active_event_id(self) -> Option<EventId> {
        match self {
            Self::Open(id) => Some(id),
            Self::Closed => None,
        }
    }
}

/// How the user dismissed the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The explicit close control.
    CloseControl,
    /// A pointer action on the backdrop, outside the dialog content.
    Backdrop,
    /// The cancel (Escape) key.
    CancelKey,
}

/// Result of a controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `Closed -> Open(id)`.
    Opened(EventId),
    /// `Open(from) -> Open(to)`.
    Switched {
        /// Previously shown event.
        from: EventId,
        /// Newly shown event.
        to: EventId,
    },
    /// `Open(id) -> Closed`.
    Closed(EventId),
    /// Nothing changed.
    Ignored,
}

impl Transition {
    /// Check if the operation changed state.
    pub fn changed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Content slots of the dialog.
///
/// Slots keep their last content when the dialog is hidden; only the
/// visibility flag changes on close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogSlots {
    pub year: String,
    pub title: String,
    pub body: String,
}

impl DialogSlots {
    fn fill(&mut self, event: &Event) {
        self.year.clone_from(&event.year);
        self.title.clone_from(&event.title);
        self.body.clone_from(&event.description);
    }
}

/// Owner of the modal state and the visual state derived from it.
#[derive(Debug, Clone)]
pub struct ModalController {
    catalog: Arc<Catalog>,
    state: ModalState,
    dialog: DialogSlots,
    visible: bool,
    /// Active flag per marker, in catalog order.
    markers: Vec<bool>,
    scroll_locked: bool,
}

impl ModalController {
    /// Create a closed controller over a catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let markers = vec![false; catalog.len()];
        Self {
            catalog,
            state: ModalState::Closed,
            dialog: DialogSlots::default(),
            visible: false,
            markers,
            scroll_locked: false,
        }
    }

    /// The catalog this controller reads from.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Current state.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Check if the dialog is open.
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Id of the event shown, if open.
    pub fn active_event_id(&self) -> Option<EventId> {
        self.state.active_event_id()
    }

    /// The event shown, if open.
    pub fn active_event(&self) -> Option<&Event> {
        self.active_event_id().and_then(|id| self.catalog.lookup(id))
    }

    /// Dialog content slots.
    pub fn dialog(&self) -> &DialogSlots {
        &self.dialog
    }

    /// Dialog visibility flag.
    pub fn is_dialog_visible(&self) -> bool {
        self.visible
    }

    /// Whether background scrolling is suppressed.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Check whether the marker for `id` is highlighted.
    pub fn is_marker_active(&self, id: EventId) -> bool {
        self.catalog
            .position(id)
            .and_then(|i| self.markers.get(i).copied())
            .unwrap_or(false)
    }

    /// Marker ids with their active flags, in catalog order.
    pub fn markers(&self) -> impl Iterator<Item = (EventId, bool)> + '_ {
        self.catalog
            .iter()
            .zip(self.markers.iter())
            .map(|(event, &active)| (event.id, active))
    }

    /// Open the dialog for `id`.
    ///
    /// Unknown ids are a silent no-op: no state change and no visible effect.
    pub fn open(&mut self, id: EventId) -> Transition {
        let Some(position) = self.catalog.position(id) else {
            debug!(event_id = %id, "ignoring open for unknown event");
            return Transition::Ignored;
        };

        let previous = self.state;
        if let Some(event) = self.catalog.get(position) {
            self.dialog.fill(event);
        }
        self.state = ModalState::Open(id);
        self.visible = true;
        self.clear_markers();
        self.markers[position] = true;
        self.scroll_locked = true;

        let transition = match previous {
            ModalState::Open(from) => Transition::Switched { from, to: id },
            ModalState::Closed => Transition::Opened(id),
        };
        debug!(?transition, "modal opened");
        transition
    }

    /// Open the dialog from a raw marker attribute.
    ///
    /// Attributes that do not parse as ids are ignored like unknown ids.
    pub fn open_marker(&mut self, attribute: &str) -> Transition {
        match attribute.parse::<EventId>() {
            Ok(id) => self.open(id),
            Err(e) => {
                debug!(error = %e, "ignoring open for malformed marker id");
                Transition::Ignored
            }
        }
    }

    /// Close the dialog. Idempotent.
    pub fn close(&mut self) -> Transition {
        let previous = self.state;
        self.state = ModalState::Closed;
        self.visible = false;
        self.clear_markers();
        self.scroll_locked = false;

        match previous {
            ModalState::Open(id) => {
                debug!(event_id = %id, "modal closed");
                Transition::Closed(id)
            }
            ModalState::Closed => Transition::Ignored,
        }
    }

    /// Close the dialog in response to a user dismissal.
    ///
    /// Every reason leads to the same closed state. The cancel key does
    /// nothing while the dialog is already closed.
    pub fn dismiss(&mut self, reason: DismissReason) -> Transition {
        if reason == DismissReason::CancelKey && !self.is_open() {
            return Transition::Ignored;
        }
        debug!(?reason, "dismiss");
        self.close()
    }

    fn clear_markers(&mut self) {
        self.markers.iter_mut().for_each(|active| *active = false);
    }
}
