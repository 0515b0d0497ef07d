//! milestone-tui: Terminal UI for browsing a timeline of events
//!
//! This crate provides the TUI layer for milestone, including:
//! - Timeline of selectable event markers
//! - Modal dialog with rich-text descriptions
//! - Mouse hit-testing for markers, close control and backdrop
//! - Headless mode for testing and automation

mod app;
mod dialog;
mod event;
pub mod headless;
mod layout;
mod screens;
#[cfg(test)]
pub mod test_utils;
pub mod text;
mod theme;
mod timeline;

use std::io::{self, stdout};
use std::sync::Arc;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use milestone_engine::{Catalog, Config};
use ratatui::{backend::CrosstermBackend, Terminal};
use screens::Screen as ScreenTrait;
use tracing::{debug, info};

pub use app::{App, UiConfig};
pub use event::{Action, Event, EventHandler};
use event::{key_to_action, mouse_to_action};
pub use milestone_engine;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop over `catalog`, and restores
/// the terminal on exit.
pub async fn run_tui(catalog: Arc<Catalog>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(events = catalog.len(), "starting timeline");

    let mut app = App::new(catalog, UiConfig::from_config(config));
    let (width, height) = terminal::size()?;
    app.handle_resize(width, height);

    let mut events = EventHandler::new(config.tick_rate_ms);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            screens::timeline::TimelineScreen.render(app, area, frame.buffer_mut());
        })?;

        let Some(next) = events.next().await else {
            break;
        };

        match next {
            Event::Key(key) => app.handle_action(key_to_action(key)),
            Event::Mouse(mouse) => app.handle_action(mouse_to_action(mouse)),
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                app.handle_resize(width, height);
            }
            Event::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    info!("timeline closed");
    Ok(())
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
