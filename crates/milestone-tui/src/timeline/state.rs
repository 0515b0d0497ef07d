//! Timeline selection and scrolling.
//!
//! Markers are fixed-height rows in catalog order. The selection is a
//! keyboard cursor only; it is independent of which marker is active.

/// Lines per marker (year line, title line).
pub const MARKER_HEIGHT: usize = 2;

/// Blank lines between markers.
const MARKER_GAP: usize = 1;

/// Markers scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 1;

/// Timeline pane state.
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    /// Number of markers.
    len: usize,
    /// Index of the marker under the cursor.
    selected: Option<usize>,
    /// Index of the first visible marker.
    scroll_offset: usize,
}

impl TimelineState {
    /// Create state for `len` markers, selecting the first.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            selected: (len > 0).then_some(0),
            scroll_offset: 0,
        }
    }

    /// Number of markers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if there are no markers.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the selected marker.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Index of the first visible marker.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Select a marker by index. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.selected = Some(index);
        }
    }

    /// Move selection up. Stops at the first marker.
    pub fn select_prev(&mut self) {
        if self.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Move selection down. Stops at the last marker.
    pub fn select_next(&mut self) {
        if self.is_empty() {
            return;
        }
        let last = self.len - 1;
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
    }

    /// Jump to the first marker.
    pub fn jump_to_start(&mut self) {
        if self.is_empty() {
            return;
        }
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    /// Jump to the last marker.
    pub fn jump_to_end(&mut self) {
        if self.is_empty() {
            return;
        }
        self.selected = Some(self.len - 1);
    }

    /// Move selection up by a page.
    pub fn page_up(&mut self, visible_count: usize) {
        if self.is_empty() {
            return;
        }
        let page = visible_count.max(1);
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(page)));
    }

    /// Move selection down by a page.
    pub fn page_down(&mut self, visible_count: usize) {
        if self.is_empty() {
            return;
        }
        let page = visible_count.max(1);
        let last = self.len - 1;
        self.selected = Some(self.selected.map_or(0, |i| (i + page).min(last)));
    }

    /// Scroll the view up without moving the selection.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll the view down without moving the selection.
    pub fn scroll_down(&mut self, amount: usize) {
        let max_offset = self.len.saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(max_offset);
    }

    /// Adjust `scroll_offset` so the selection is on screen.
    pub fn ensure_selection_visible(&mut self, visible_count: usize) {
        let Some(selected) = self.selected else {
            return;
        };
        if visible_count == 0 {
            return;
        }
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        }
        let last_visible = self.scroll_offset + visible_count - 1;
        if selected > last_visible {
            self.scroll_offset = selected + 1 - visible_count;
        }
    }

    /// How many markers fit in `height` lines.
    pub fn markers_per_page(height: usize) -> usize {
        (height + MARKER_GAP) / (MARKER_HEIGHT + MARKER_GAP)
    }

    /// Indices of the markers on screen.
    pub fn visible_range(&self, height: usize) -> std::ops::Range<usize> {
        let end = (self.scroll_offset + Self::markers_per_page(height)).min(self.len);
        self.scroll_offset.min(end)..end
    }

    /// Map a y offset inside the pane to a marker index.
    ///
    /// Returns `None` for gap rows and rows past the last marker.
    pub fn y_to_marker_index(&self, y: usize) -> Option<usize> {
        let stride = MARKER_HEIGHT + MARKER_GAP;
        if y % stride >= MARKER_HEIGHT {
            return None;
        }
        let index = self.scroll_offset + y / stride;
        (index < self.len).then_some(index)
    }

    /// Row offset of a visible marker inside the pane.
    pub fn marker_y(&self, index: usize) -> Option<usize> {
        index
            .checked_sub(self.scroll_offset)
            .map(|row| row * (MARKER_HEIGHT + MARKER_GAP))
    }
}
