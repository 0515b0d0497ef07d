//! Screen definitions for the milestone TUI.

pub mod timeline;

use crate::app::App;
use crate::layout::centered_fixed;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let help_text = r"
  Timeline
    j/k or Up/Down    Move between events
    Enter / click     Open event
    g/G or Home/End   First/last event

  Event dialog
    Esc / x / click outside   Close
    h/l or Left/Right         Previous/next event
    j/k or wheel              Scroll text

    q                 Quit
    ?                 Toggle this help

  [Press any key to close]
";

    let width = 54.min(area.width.saturating_sub(4));
    let height = 19.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(theme.primary))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface).fg(theme.text));

    Paragraph::new(help_text)
        .block(block)
        .render(overlay_area, buf);
}

/// Render the notice shown when the terminal is below the minimum size.
pub fn render_too_small(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let text = format!(
        "Terminal too small ({}x{}). Need at least {}x{}.",
        area.width,
        area.height,
        crate::layout::MIN_WIDTH,
        crate::layout::MIN_HEIGHT
    );
    Paragraph::new(text)
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
