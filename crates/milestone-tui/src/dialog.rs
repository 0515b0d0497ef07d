//! Event dialog overlay.
//!
//! Draws the modal over a dimmed backdrop using the slots held by the
//! [`ModalController`]. Geometry comes from [`DialogLayout`].

use milestone_engine::ModalController;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::layout::DialogLayout;
use crate::text::{render_rich_text, truncate_to_width};
use crate::theme::{IconSet, Theme};

/// Wrapped description lines for the dialog body.
pub fn body_lines(modal: &ModalController, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    render_rich_text(&modal.dialog().body, width as usize, theme)
}

/// Largest useful body scroll offset for a terminal area.
pub fn max_body_scroll(modal: &ModalController, theme: &Theme, area: Rect) -> usize {
    let layout = DialogLayout::compute(area);
    body_lines(modal, theme, layout.body.width).len().saturating_sub(layout.body.height as usize)
}

/// Modal dialog widget. Renders nothing while the dialog is hidden.
pub struct DialogWidget<'a> {
    modal: &'a ModalController,
    theme: &'a Theme,
    icons: &'a IconSet,
    scroll: usize,
}

impl<'a> DialogWidget<'a> {
    /// Create a new dialog widget.
    pub fn new(modal: &'a ModalController, theme: &'a Theme, icons: &'a IconSet) -> Self {
        Self {
            modal,
            theme,
            icons,
            scroll: 0,
        }
    }

    /// Set the body scroll offset in lines.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }
}

impl Widget for DialogWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.modal.is_dialog_visible() {
            return;
        }

        // Backdrop
        buf.set_style(area, Style::default().add_modifier(Modifier::DIM));

        let layout = DialogLayout::compute(area);
        let slots = self.modal.dialog();
        Clear.render(layout.dialog, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused))
            .style(Style::default().bg(self.theme.surface).fg(self.theme.text));
        block.render(layout.dialog, buf);

        buf.set_string(
            layout.close_control.x,
            layout.close_control.y,
            self.icons.close_control(),
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
        );

        let header_width = layout.header.width as usize;
        let header = vec![
            Line::from(Span::styled(
                truncate_to_width(&slots.year, header_width),
                Style::default()
                    .fg(self.theme.year)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_to_width(&slots.title, header_width),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        Paragraph::new(header).render(layout.header, buf);

        let lines = body_lines(self.modal, self.theme, layout.body.width);
        let height = layout.body.height as usize;
        let scroll = self.scroll.min(lines.len().saturating_sub(height));
        let remaining = lines.len().saturating_sub(scroll + height);
        let visible: Vec<Line<'static>> = lines.into_iter().skip(scroll).take(height).collect();
        Paragraph::new(visible).render(layout.body, buf);

        if remaining > 0 {
            let more = format!(" +{remaining} more ");
            let width = u16::try_from(more.len()).unwrap_or(u16::MAX);
            let bottom = layout.dialog.y + layout.dialog.height.saturating_sub(1);
            let x = (layout.dialog.x + layout.dialog.width).saturating_sub(width + 2);
            buf.set_string(x, bottom, more, Style::default().fg(self.theme.muted));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use milestone_engine::{Catalog, Event, EventId};
    use std::sync::Arc;

    fn id(raw: u32) -> EventId {
        EventId::new(raw).unwrap()
    }

    fn render(modal: &ModalController, width: u16, height: u16, scroll: usize) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        let theme = Theme::default();
        let icons = IconSet::default();
        DialogWidget::new(modal, &theme, &icons)
            .scroll(scroll)
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_hidden_dialog_renders_nothing() {
        let modal = ModalController::new(Arc::new(Catalog::builtin()));
        let screen = render(&modal, 80, 24, 0);
        assert!(screen.trim().is_empty());
    }

    #[test]
    fn test_open_dialog_shows_slots() {
        let mut modal = ModalController::new(Arc::new(Catalog::builtin()));
        modal.open(id(2));
        let screen = render(&modal, 80, 24, 0);

        assert!(screen.contains("2015"));
        assert!(screen.contains("Student Protests"));
        assert!(screen.contains("Building on momentum"));
        assert!(screen.contains("[\u{2715}]"));
    }

    #[test]
    fn test_long_body_shows_more_indicator() {
        let mut modal = ModalController::new(Arc::new(Catalog::builtin()));
        modal.open(id(1));
        let screen = render(&modal, 40, 12, 0);
        assert!(screen.contains("more"), "{screen}");
    }

    #[test]
    fn test_scroll_reveals_later_paragraphs() {
        let catalog = Catalog::new(vec![Event::new(
            id(1),
            "1999",
            "Scrolling",
            "first\n\nsecond\n\nthird\n\nfourth\n\nfifth\n\nsixth",
        )])
        .unwrap();
        let mut modal = ModalController::new(Arc::new(catalog));
        modal.open(id(1));

        // 40x12 leaves a 5 line body
        let top = render(&modal, 40, 12, 0);
        assert!(top.contains("first"));
        assert!(!top.contains("sixth"));

        let theme = Theme::default();
        let max = max_body_scroll(&modal, &theme, Rect::new(0, 0, 40, 12));
        assert_eq!(max, 6);

        let bottom = render(&modal, 40, 12, 100);
        assert!(bottom.contains("sixth"));
        assert!(!bottom.contains("first"));
    }
}
