//! The timeline screen: header, marker list, footer hints and overlays.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{render_help_overlay, render_too_small, Screen};
use crate::app::App;
use crate::dialog::DialogWidget;
use crate::layout::{is_too_small, ScreenLayout};
use crate::timeline::TimelineWidget;

/// Title shown in the header bar.
const TITLE: &str = "Milestones";

/// Main screen.
pub struct TimelineScreen;

impl TimelineScreen {
    fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
        let count = app.modal.catalog().len();
        let noun = if count == 1 { "event" } else { "events" };
        let line = Line::from(vec![
            Span::styled(
                format!(" {TITLE} "),
                Style::default()
                    .fg(app.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {count} {noun}"),
                Style::default().fg(app.theme.muted),
            ),
        ]);
        Paragraph::new(line).render(area, buf);
    }

    fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
        let icons = &app.icons;
        let hints: Vec<(String, &str)> = if app.modal.is_open() {
            vec![
                ("Esc".into(), "close"),
                (icons.arrows_horizontal().into(), "prev/next"),
                (icons.arrows_vertical().into(), "scroll"),
                ("q".into(), "quit"),
            ]
        } else {
            vec![
                (icons.arrows_vertical().into(), "select"),
                ("Enter".into(), "open"),
                ("?".into(), "help"),
                ("q".into(), "quit"),
            ]
        };

        let key_style = Style::default().fg(app.theme.primary);
        let action_style = Style::default().fg(app.theme.muted);
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, action)) in hints.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", action_style));
            }
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(format!(" {action}"), action_style));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

impl Screen for TimelineScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        if is_too_small(area) {
            render_too_small(area, buf, &app.theme);
            return;
        }

        let layout = ScreenLayout::compute(area);
        Self::render_header(app, layout.header, buf);
        TimelineWidget::new(&app.modal, &app.timeline, &app.theme, &app.icons)
            .focused(!app.modal.is_open())
            .render(layout.timeline, buf);
        Self::render_footer(app, layout.footer, buf);

        DialogWidget::new(&app.modal, &app.theme, &app.icons)
            .scroll(app.body_scroll)
            .render(area, buf);

        if app.show_help {
            render_help_overlay(area, buf, &app.theme);
        }
    }
}
