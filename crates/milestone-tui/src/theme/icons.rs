//! Glyphs for markers and controls, with an ASCII fallback.

use milestone_engine::IconStyle;

/// Icon mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconMode {
    /// Standard Unicode symbols.
    #[default]
    Unicode,
    /// ASCII-only fallback (also used with `NO_COLOR`).
    Ascii,
}

impl From<IconStyle> for IconMode {
    fn from(style: IconStyle) -> Self {
        match style {
            IconStyle::Unicode => Self::Unicode,
            IconStyle::Ascii => Self::Ascii,
        }
    }
}

/// Icon set based on configured mode.
#[derive(Debug, Clone, Default)]
pub struct IconSet {
    mode: IconMode,
}

impl IconSet {
    /// Create a new icon set with the specified mode.
    pub fn new(mode: IconMode) -> Self {
        Self { mode }
    }

    /// Get the current icon mode.
    pub fn mode(&self) -> IconMode {
        self.mode
    }

    pub fn marker(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25cb}", // ○
            IconMode::Ascii => "o",
        }
    }

    pub fn marker_active(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25cf}", // ●
            IconMode::Ascii => "*",
        }
    }

    pub fn cursor(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{25b8}", // ▸
            IconMode::Ascii => ">",
        }
    }

    pub fn rail(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2502}", // │
            IconMode::Ascii => "|",
        }
    }

    /// Label of the dialog's close control, always 3 cells wide.
    pub fn close_control(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "[\u{2715}]", // [✕]
            IconMode::Ascii => "[x]",
        }
    }

    pub fn arrows_vertical(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2191}\u{2193}", // ↑↓
            IconMode::Ascii => "j/k",
        }
    }

    pub fn arrows_horizontal(&self) -> &'static str {
        match self.mode {
            IconMode::Unicode => "\u{2190}\u{2192}", // ←→
            IconMode::Ascii => "h/l",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_ascii_glyphs_are_ascii() {
        let icons = IconSet::new(IconMode::Ascii);
        for glyph in [
            icons.marker(),
            icons.marker_active(),
            icons.cursor(),
            icons.rail(),
            icons.close_control(),
        ] {
            assert!(glyph.is_ascii(), "{glyph}");
        }
    }

    #[test]
    fn test_close_control_width() {
        for mode in [IconMode::Unicode, IconMode::Ascii] {
            let icons = IconSet::new(mode);
            assert_eq!(icons.close_control().width(), 3);
        }
    }

    #[test]
    fn test_from_icon_style() {
        assert_eq!(IconMode::from(IconStyle::Ascii), IconMode::Ascii);
        assert_eq!(IconMode::from(IconStyle::Unicode), IconMode::Unicode);
    }
}
