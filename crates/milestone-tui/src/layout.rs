//! Screen geometry.
//!
//! Rendering and mouse hit-testing both derive their rectangles from the
//! functions here, so a click maps to exactly what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Minimum terminal width.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height.
pub const MIN_HEIGHT: u16 = 12;

/// Widest the dialog grows.
const DIALOG_MAX_WIDTH: u16 = 76;
/// Tallest the dialog grows.
const DIALOG_MAX_HEIGHT: u16 = 22;
/// Year line, title line, blank separator.
const DIALOG_HEADER_LINES: u16 = 3;

/// Check whether an area is too small to render the timeline.
pub fn is_too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Main screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Title bar (1 line).
    pub header: Rect,
    /// Bordered timeline pane.
    pub timeline: Rect,
    /// Key hints (1 line).
    pub footer: Rect,
}

impl ScreenLayout {
    /// Split the terminal area into header, timeline and footer.
    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        Self {
            header: chunks[0],
            timeline: chunks[1],
            footer: chunks[2],
        }
    }

    /// Area inside the timeline pane border.
    pub fn timeline_inner(&self) -> Rect {
        self.timeline.inner(Margin::new(1, 1))
    }
}

/// Dialog regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    /// The whole dialog, border included. Everything else is backdrop.
    pub dialog: Rect,
    /// The close control, drawn on the top border.
    pub close_control: Rect,
    /// Year and title rows.
    pub header: Rect,
    /// Scrollable description area.
    pub body: Rect,
}

impl DialogLayout {
    /// Center the dialog in the terminal area.
    pub fn compute(area: Rect) -> Self {
        let width = DIALOG_MAX_WIDTH.min(area.width.saturating_sub(4));
        let height = DIALOG_MAX_HEIGHT.min(area.height.saturating_sub(2));
        let dialog = centered_fixed(width, height, area);

        let close_control = Rect::new(
            (dialog.x + dialog.width).saturating_sub(5).max(dialog.x),
            dialog.y,
            3.min(dialog.width),
            1.min(dialog.height),
        );

        let inner = dialog.inner(Margin::new(2, 1));
        let header_height = DIALOG_HEADER_LINES.min(inner.height);
        let header = Rect::new(inner.x, inner.y, inner.width, header_height);
        let body = Rect::new(
            inner.x,
            inner.y + header_height,
            inner.width,
            inner.height - header_height,
        );

        Self {
            dialog,
            close_control,
            header,
            body,
        }
    }
}
