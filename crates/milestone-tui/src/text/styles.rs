//! Rich-text styling configuration.

use ratatui::style::{Modifier, Style};

use crate::theme::Theme;

/// Styles for rendering rich-text elements.
#[derive(Debug, Clone)]
pub struct RichTextStyles {
    /// Heading style (all levels).
    pub heading: Style,
    /// Inline code style.
    pub code: Style,
    /// Emphasis (italic) style.
    pub emphasis: Style,
    /// Strong (bold) style.
    pub strong: Style,
    /// Strikethrough style.
    pub strikethrough: Style,
    /// List marker (bullet/number) style.
    pub list_marker: Style,
    /// Link text style.
    pub link: Style,
    /// Blockquote style.
    pub blockquote: Style,
    /// Normal text style.
    pub text: Style,
}

impl RichTextStyles {
    /// Create styles from a theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            heading: Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(theme.secondary).bg(theme.surface),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strong: Style::default().add_modifier(Modifier::BOLD),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            list_marker: Style::default().fg(theme.muted),
            link: Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::UNDERLINED),
            blockquote: Style::default()
                .fg(theme.subtext)
                .add_modifier(Modifier::ITALIC),
            text: Style::default().fg(theme.text),
        }
    }
}

impl Default for RichTextStyles {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_theme() {
        let styles = RichTextStyles::from_theme(&Theme::default());
        assert!(styles.heading.add_modifier.contains(Modifier::BOLD));
        assert!(styles.emphasis.add_modifier.contains(Modifier::ITALIC));
        assert!(styles.link.add_modifier.contains(Modifier::UNDERLINED));
    }
}
