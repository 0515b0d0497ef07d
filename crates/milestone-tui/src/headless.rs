//! Headless mode for the milestone TUI.
//!
//! Runs the app against a `TestBackend` instead of a real terminal.
//! Actions go in over a channel and the rendered screen comes back over a
//! `watch` channel after every frame, for automation and E2E tests.

use std::sync::Arc;
use std::time::Duration;

use milestone_engine::{Catalog, ModalState};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::app::{App, UiConfig};
use crate::event::Action;
use crate::screens::{timeline::TimelineScreen, Screen as ScreenTrait};

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Modal state after the last action.
    pub modal: ModalState,
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// Whether the TUI should quit.
    pub should_quit: bool,
    /// Whether help overlay is visible.
    pub show_help: bool,
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    action_tx: mpsc::UnboundedSender<Action>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action to the TUI.
    ///
    /// Returns `true` if the action was sent successfully.
    pub fn send_action(&self, action: Action) -> bool {
        self.action_tx.send(action).is_ok()
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition holds, or `None` on timeout.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            match tokio::time::timeout(remaining, self.state_rx.changed()).await {
                Ok(Ok(())) => {}
                _ => return None,
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    /// Wait for a specific modal state.
    pub async fn wait_for_modal(
        &mut self,
        modal: ModalState,
        timeout: Duration,
    ) -> Option<HeadlessState> {
        self.wait_for(|s| s.modal == modal, timeout).await
    }

    /// Check if the TUI has quit.
    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Terminal width.
    pub width: u16,
    /// Terminal height.
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// UI settings.
    pub ui: UiConfig,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50,
            ui: UiConfig::default(),
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background task.
///
/// # Example
///
/// ```ignore
/// let (mut handle, task) = run_tui_headless(Arc::new(Catalog::builtin()), HeadlessConfig::default());
///
/// handle.send_action(Action::Select);
/// let state = handle.wait_for_text("Initial Calls", Duration::from_secs(1)).await;
///
/// handle.send_action(Action::Quit);
/// task.await.unwrap();
/// ```
pub fn run_tui_headless(
    catalog: Arc<Catalog>,
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(catalog, config, action_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    let handle = HeadlessHandle {
        action_tx,
        state_rx,
    };

    (handle, task)
}

async fn run_headless_loop(
    catalog: Arc<Catalog>,
    config: HeadlessConfig,
    mut action_rx: mpsc::UnboundedReceiver<Action>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, config.ui);
    app.handle_resize(config.width, config.height);

    let tick_duration = Duration::from_millis(config.tick_rate_ms);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            TimelineScreen.render(&app, area, frame.buffer_mut());
        })?;

        let _ = state_tx.send(HeadlessState {
            modal: app.modal.state(),
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            break;
        }

        let action = tokio::select! {
            Some(action) = action_rx.recv() => action,
            () = tokio::time::sleep(tick_duration) => Action::None,
        };
        app.handle_action(action);
    }

    Ok(())
}

/// Convert a buffer to a string, one row per line, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let rows: Vec<String> = (area.y..area.y + area.height)
        .map(|y| {
            let row: String = (area.x..area.x + area.width)
                .filter_map(|x| buffer.cell((x, y)).map(ratatui::buffer::Cell::symbol))
                .collect();
            row.trim_end().to_string()
        })
        .collect();
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use milestone_engine::EventId;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    const WAIT: Duration = Duration::from_secs(2);

    #[test]
    fn test_headless_state_default() {
        let state = HeadlessState::default();
        assert_eq!(state.modal, ModalState::Closed);
        assert!(!state.should_quit);
        assert!(!state.show_help);
        assert!(state.screen_contents.is_empty());
    }

    #[test]
    fn test_headless_config_default() {
        let config = HeadlessConfig::default();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.tick_rate_ms, 50);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", Style::default());
        buffer.set_string(0, 1, "World", Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld");
    }

    #[tokio::test]
    async fn test_open_and_dismiss_end_to_end() {
        let (mut handle, task) =
            run_tui_headless(Arc::new(Catalog::builtin()), HeadlessConfig::default());

        assert!(handle.wait_for_text("Policy Changes", WAIT).await.is_some());

        handle.send_action(Action::Down);
        handle.send_action(Action::Select);
        let open = ModalState::Open(EventId::new(2).unwrap());
        let state = handle.wait_for_modal(open, WAIT).await.unwrap();
        assert!(state.screen_contents.contains("Building on momentum"));

        // Backdrop click
        handle.send_action(Action::Click { column: 0, row: 0 });
        let state = handle.wait_for_modal(ModalState::Closed, WAIT).await.unwrap();
        assert!(!state.screen_contents.contains("Building on momentum"));

        handle.send_action(Action::Quit);
        assert!(handle.wait_for(|s| s.should_quit, WAIT).await.is_some());
        task.await.unwrap().unwrap();
    }
}
