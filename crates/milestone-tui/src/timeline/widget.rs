//! Timeline widget for rendering markers.

use milestone_engine::{Event, ModalController};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::state::TimelineState;
use crate::text::truncate_to_width;
use crate::theme::{IconSet, Theme};

/// Timeline pane widget.
pub struct TimelineWidget<'a> {
    modal: &'a ModalController,
    state: &'a TimelineState,
    theme: &'a Theme,
    icons: &'a IconSet,
    focused: bool,
}

impl<'a> TimelineWidget<'a> {
    /// Create a new timeline widget.
    pub fn new(
        modal: &'a ModalController,
        state: &'a TimelineState,
        theme: &'a Theme,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            modal,
            state,
            theme,
            icons,
            focused: true,
        }
    }

    /// Set whether the pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn render_marker(&self, event: &Event, selected: bool, area: Rect, buf: &mut Buffer) {
        let active = self.modal.is_marker_active(event.id);

        let cursor = if selected { self.icons.cursor() } else { " " };
        let (glyph, glyph_style) = if active {
            (
                self.icons.marker_active(),
                Style::default()
                    .fg(self.theme.active_marker)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (self.icons.marker(), Style::default().fg(self.theme.muted))
        };
        let mut year_style = Style::default().fg(self.theme.year);
        let mut title_style = Style::default().fg(self.theme.text);
        if active {
            year_style = year_style.add_modifier(Modifier::BOLD);
            title_style = title_style
                .fg(self.theme.active_marker)
                .add_modifier(Modifier::BOLD);
        }

        let header = Line::from(vec![
            Span::styled(cursor, Style::default().fg(self.theme.primary)),
            Span::raw(" "),
            Span::styled(glyph, glyph_style),
            Span::raw(" "),
            Span::styled(event.year.clone(), year_style),
        ]);
        Paragraph::new(header).render(Rect::new(area.x, area.y, area.width, 1), buf);

        if area.height < 2 {
            return;
        }
        let title_width = (area.width as usize).saturating_sub(4);
        let title = Line::from(vec![
            Span::raw("  "),
            Span::styled(self.icons.rail(), Style::default().fg(self.theme.border)),
            Span::raw(" "),
            Span::styled(truncate_to_width(&event.title, title_width), title_style),
        ]);
        Paragraph::new(title).render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };
        let block = Block::default()
            .title(" Timeline ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width < 4 {
            return;
        }

        let catalog = self.modal.catalog();
        if catalog.is_empty() {
            let empty = Line::from(Span::styled(
                "No events",
                Style::default().fg(self.theme.muted),
            ));
            Paragraph::new(empty).render(
                Rect::new(inner.x + 2, inner.y + inner.height / 2, inner.width - 4, 1),
                buf,
            );
            return;
        }

        for index in self.state.visible_range(inner.height as usize) {
            let (Some(event), Some(row)) = (catalog.get(index), self.state.marker_y(index)) else {
                continue;
            };
            let y = inner.y + u16::try_from(row).unwrap_or(u16::MAX);
            let bottom = inner.y + inner.height;
            if y >= bottom {
                break;
            }
            let marker_area = Rect::new(inner.x, y, inner.width, bottom - y);
            self.render_marker(event, self.state.selected() == Some(index), marker_area, buf);
        }
    }
}
