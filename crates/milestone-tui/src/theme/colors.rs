//! Catppuccin Mocha color palette for the TUI.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Timeline
    pub year: Color,
    pub active_marker: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            surface: Color::Rgb(49, 50, 68),    // #313244
            overlay: Color::Rgb(69, 71, 90),    // #45475a

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            // Timeline
            year: Color::Rgb(250, 179, 135),          // #fab387 (peach)
            active_marker: Color::Rgb(166, 227, 161), // #a6e3a1 (green)

            // Borders
            border: Color::Rgb(69, 71, 90),            // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Terminal default colors only, used with `NO_COLOR`.
    pub fn plain() -> Self {
        Self {
            base: Color::Reset,
            surface: Color::Reset,
            overlay: Color::Reset,
            text: Color::Reset,
            subtext: Color::Reset,
            muted: Color::Reset,
            primary: Color::Reset,
            secondary: Color::Reset,
            year: Color::Reset,
            active_marker: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mocha_theme_creates() {
        let theme = Theme::mocha();
        assert!(matches!(theme.base, Color::Rgb(30, 30, 46)));
    }

    #[test]
    fn test_plain_theme_uses_reset() {
        let theme = Theme::plain();
        assert_eq!(theme.text, Color::Reset);
        assert_eq!(theme.border_focused, Color::Reset);
    }

    #[test]
    fn test_default_is_mocha() {
        let default = Theme::default();
        assert!(matches!(default.base, Color::Rgb(30, 30, 46)));
    }
}
