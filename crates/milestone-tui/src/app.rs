//! Application state and update logic for the milestone TUI.

use std::sync::Arc;

use milestone_engine::{Catalog, Config, DismissReason, ModalController, Transition};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::dialog::max_body_scroll;
use crate::event::Action;
use crate::layout::{is_too_small, DialogLayout, ScreenLayout};
use crate::theme::{IconMode, IconSet, Theme};
use crate::timeline::{TimelineState, SCROLL_SPEED};

/// UI settings resolved from config and environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    /// Glyph set.
    pub icons: IconMode,
    /// Whether colors are disabled (`NO_COLOR`).
    pub no_color: bool,
}

impl UiConfig {
    /// Resolve UI settings, respecting `NO_COLOR`.
    pub fn from_config(config: &Config) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let icons = if no_color {
            IconMode::Ascii
        } else {
            config.icons.into()
        };
        Self { icons, no_color }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            icons: IconMode::Unicode,
            no_color: false,
        }
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Modal dialog state.
    pub modal: ModalController,

    /// Marker selection and scrolling.
    pub timeline: TimelineState,

    /// Dialog body scroll offset in lines.
    pub body_scroll: usize,

    /// Theme colors.
    pub theme: Theme,

    /// Glyphs.
    pub icons: IconSet,

    /// Current terminal size.
    pub terminal_size: (u16, u16),
}

impl App {
    /// Create a new app over a catalog.
    pub fn new(catalog: Arc<Catalog>, ui: UiConfig) -> Self {
        let timeline = TimelineState::new(catalog.len());
        Self {
            should_quit: false,
            show_help: false,
            modal: ModalController::new(catalog),
            timeline,
            body_scroll: 0,
            theme: if ui.no_color {
                Theme::plain()
            } else {
                Theme::default()
            },
            icons: IconSet::new(ui.icons),
            terminal_size: (80, 24),
        }
    }

    /// Create an app over the built-in catalog with default UI settings.
    #[cfg(test)]
    pub fn new_for_test() -> Self {
        Self::new(Arc::new(Catalog::builtin()), UiConfig::default())
    }

    /// The terminal area as a rect.
    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.terminal_size.0, self.terminal_size.1)
    }

    /// Check if terminal is too small.
    pub fn is_too_small(&self) -> bool {
        is_too_small(self.area())
    }

    /// Handle terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.body_scroll = self.body_scroll.min(self.max_body_scroll());
        self.keep_selection_visible();
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        // Any input closes the help overlay; dismissals still reach an open dialog
        if self.show_help {
            self.show_help = false;
            let dismissal = matches!(
                action,
                Action::Cancel | Action::CloseControl | Action::Click { .. }
            );
            if !(dismissal && self.modal.is_open()) {
                return;
            }
        }

        match action {
            Action::Help => self.show_help = true,
            Action::Cancel => self.dismiss(DismissReason::CancelKey),
            Action::CloseControl => self.dismiss(DismissReason::CloseControl),
            Action::Select => self.open_selected(),
            Action::Click { column, row } => self.handle_click(column, row),
            Action::Left => self.step(false),
            Action::Right => self.step(true),
            _ if self.modal.is_scroll_locked() => self.scroll_body(action),
            _ => self.navigate(action),
        }
    }

    /// Open the dialog for the marker under the cursor.
    pub fn open_selected(&mut self) {
        let Some(index) = self.timeline.selected() else {
            return;
        };
        self.open_index(index);
    }

    fn open_index(&mut self, index: usize) {
        let Some(id) = self.modal.catalog().get(index).map(|event| event.id) else {
            return;
        };
        if self.modal.open(id).changed() {
            self.timeline.select(index);
            self.body_scroll = 0;
            self.keep_selection_visible();
        }
    }

    fn dismiss(&mut self, reason: DismissReason) {
        if let Transition::Closed(id) = self.modal.dismiss(reason) {
            debug!(event_id = %id, ?reason, "dialog dismissed");
            self.body_scroll = 0;
        }
    }

    /// Move to the previous/next marker; re-open the dialog if it is shown.
    fn step(&mut self, forward: bool) {
        if forward {
            self.timeline.select_next();
        } else {
            self.timeline.select_prev();
        }
        self.keep_selection_visible();
        if self.modal.is_open() {
            self.open_selected();
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        // Only the size notice is drawn
        if self.is_too_small() {
            return;
        }
        let position = Position::new(column, row);
        if self.modal.is_open() {
            let layout = DialogLayout::compute(self.area());
            if layout.close_control.contains(position) {
                self.dismiss(DismissReason::CloseControl);
            } else if !layout.dialog.contains(position) {
                self.dismiss(DismissReason::Backdrop);
            }
            return;
        }

        let inner = ScreenLayout::compute(self.area()).timeline_inner();
        if !inner.contains(position) {
            return;
        }
        if let Some(index) = self.timeline.y_to_marker_index(usize::from(row - inner.y)) {
            self.timeline.select(index);
            self.open_index(index);
        }
    }

    /// Timeline navigation while the dialog is closed.
    fn navigate(&mut self, action: Action) {
        let page = self.markers_per_page();
        match action {
            Action::Up => self.timeline.select_prev(),
            Action::Down => self.timeline.select_next(),
            Action::Top => self.timeline.jump_to_start(),
            Action::Bottom => self.timeline.jump_to_end(),
            Action::PageUp => self.timeline.page_up(page),
            Action::PageDown => self.timeline.page_down(page),
            Action::ScrollUp => {
                self.timeline.scroll_up(SCROLL_SPEED);
                return;
            }
            Action::ScrollDown => {
                self.timeline.scroll_down(SCROLL_SPEED);
                return;
            }
            _ => return,
        }
        self.keep_selection_visible();
    }

    /// Background is locked while the dialog is open; scroll its body instead.
    fn scroll_body(&mut self, action: Action) {
        let max = self.max_body_scroll();
        let page = (DialogLayout::compute(self.area()).body.height as usize).max(1);
        self.body_scroll = match action {
            Action::Up | Action::ScrollUp => self.body_scroll.saturating_sub(1),
            Action::Down | Action::ScrollDown => (self.body_scroll + 1).min(max),
            Action::PageUp => self.body_scroll.saturating_sub(page),
            Action::PageDown => (self.body_scroll + page).min(max),
            Action::Top => 0,
            Action::Bottom => max,
            _ => self.body_scroll,
        };
    }

    fn max_body_scroll(&self) -> usize {
        if self.modal.is_open() {
            max_body_scroll(&self.modal, &self.theme, self.area())
        } else {
            0
        }
    }

    fn markers_per_page(&self) -> usize {
        let inner = ScreenLayout::compute(self.area()).timeline_inner();
        TimelineState::markers_per_page(inner.height as usize)
    }

    fn keep_selection_visible(&mut self) {
        let page = self.markers_per_page();
        self.timeline.ensure_selection_visible(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milestone_engine::{Event, EventId, ModalState};

    fn id(raw: u32) -> EventId {
        EventId::new(raw).unwrap()
    }

    /// Screen row of marker `index` at 80x24 with no scrolling.
    fn marker_row(index: u16) -> u16 {
        2 + index * 3
    }

    #[test]
    fn test_new_app() {
        let app = App::new_for_test();
        assert!(!app.should_quit);
        assert!(!app.modal.is_open());
        assert_eq!(app.timeline.selected(), Some(0));
    }

    #[test]
    fn test_select_opens_dialog() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Down);
        app.handle_action(Action::Select);

        assert_eq!(app.modal.state(), ModalState::Open(id(2)));
        assert_eq!(app.modal.dialog().title, "Student Protests");
    }

    #[test]
    fn test_escape_closes_when_open() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Cancel);

        assert_eq!(app.modal.state(), ModalState::Closed);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_escape_when_closed_does_nothing() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Cancel);
        assert_eq!(app.modal.state(), ModalState::Closed);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_close_control_key() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::CloseControl);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_navigation_suppressed_while_open() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Down);
        app.handle_action(Action::Down);

        assert_eq!(app.timeline.selected(), Some(0));
        assert_eq!(app.modal.active_event_id(), Some(id(1)));
    }

    #[test]
    fn test_down_scrolls_body_while_open() {
        let mut app = App::new_for_test();
        app.handle_resize(40, 12);
        app.handle_action(Action::Select);
        app.handle_action(Action::Down);
        assert_eq!(app.body_scroll, 1);

        app.handle_action(Action::Bottom);
        assert_eq!(app.body_scroll, app.max_body_scroll());
        assert!(app.body_scroll > 1);

        app.handle_action(Action::Top);
        assert_eq!(app.body_scroll, 0);
    }

    #[test]
    fn test_right_switches_open_dialog() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Right);

        assert_eq!(app.modal.state(), ModalState::Open(id(2)));
        assert!(!app.modal.is_marker_active(id(1)));
        assert_eq!(app.timeline.selected(), Some(1));
    }

    #[test]
    fn test_right_when_closed_only_moves_cursor() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Right);
        assert!(!app.modal.is_open());
        assert_eq!(app.timeline.selected(), Some(1));
    }

    #[test]
    fn test_click_marker_opens() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Click {
            column: 10,
            row: marker_row(2) + 1,
        });

        assert_eq!(app.modal.state(), ModalState::Open(id(3)));
        assert_eq!(app.timeline.selected(), Some(2));
    }

    #[test]
    fn test_click_gap_or_border_does_nothing() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Click {
            column: 10,
            row: marker_row(0) + 2,
        });
        app.handle_action(Action::Click { column: 0, row: 2 });
        app.handle_action(Action::Click { column: 10, row: 23 });
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_click_backdrop_closes() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Click { column: 0, row: 0 });
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_click_inside_dialog_keeps_open() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Click { column: 40, row: 12 });
        assert!(app.modal.is_open());
    }

    #[test]
    fn test_click_close_control() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        let close = DialogLayout::compute(app.area()).close_control;
        app.handle_action(Action::Click {
            column: close.x + 1,
            row: close.y,
        });
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_all_dismissals_match() {
        let dismissals = [
            Action::Cancel,
            Action::CloseControl,
            Action::Click { column: 0, row: 0 },
        ];
        for dismissal in dismissals {
            let mut app = App::new_for_test();
            app.handle_action(Action::Down);
            app.handle_action(Action::Select);
            app.handle_action(Action::Down);
            app.handle_action(dismissal);

            assert_eq!(app.modal.state(), ModalState::Closed, "{dismissal:?}");
            assert!(app.modal.markers().all(|(_, active)| !active));
            assert!(!app.modal.is_scroll_locked());
            assert_eq!(app.body_scroll, 0);
        }
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Help);
        assert!(app.show_help);

        app.handle_action(Action::Select);
        assert!(!app.show_help);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_cancel_over_help_closes_dialog() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Help);
        app.handle_action(Action::Cancel);

        assert!(!app.show_help);
        assert_eq!(app.modal.state(), ModalState::Closed);
    }

    #[test]
    fn test_backdrop_click_over_help_closes_dialog() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Help);
        app.handle_action(Action::Click { column: 0, row: 0 });

        assert!(!app.show_help);
        assert_eq!(app.modal.state(), ModalState::Closed);
    }

    #[test]
    fn test_click_over_help_when_closed_only_hides_help() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Help);
        app.handle_action(Action::Click {
            column: 10,
            row: marker_row(0),
        });

        assert!(!app.show_help);
        assert_eq!(app.modal.state(), ModalState::Closed);
    }

    #[test]
    fn test_click_ignored_when_too_small() {
        let mut app = App::new_for_test();
        app.handle_resize(30, 8);
        app.handle_action(Action::Click { column: 5, row: 2 });
        assert_eq!(app.modal.state(), ModalState::Closed);

        app.handle_resize(80, 24);
        app.handle_action(Action::Select);
        app.handle_resize(30, 8);
        app.handle_action(Action::Click { column: 0, row: 0 });
        assert_eq!(app.modal.state(), ModalState::Open(id(1)));
    }

    #[test]
    fn test_quit_always_works() {
        let mut app = App::new_for_test();
        app.handle_action(Action::Select);
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_selection_scrolls_into_view() {
        let events = (1..=20)
            .map(|n| Event::new(id(n), format!("{}", 1990 + n), format!("Event {n}"), ""))
            .collect();
        let mut app = App::new(Arc::new(Catalog::new(events).unwrap()), UiConfig::default());

        app.handle_action(Action::Bottom);
        assert_eq!(app.timeline.selected(), Some(19));
        // 20 inner rows fit 7 markers
        assert_eq!(app.timeline.scroll_offset(), 13);
    }

    #[test]
    fn test_empty_catalog_select_is_noop() {
        let mut app = App::new(Arc::new(Catalog::default()), UiConfig::default());
        app.handle_action(Action::Select);
        app.handle_action(Action::Down);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_ui_config_from_config() {
        let config = Config {
            icons: milestone_engine::IconStyle::Ascii,
            ..Default::default()
        };
        assert_eq!(UiConfig::from_config(&config).icons, IconMode::Ascii);
    }
}
