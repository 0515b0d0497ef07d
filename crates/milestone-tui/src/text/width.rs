//! Unicode-aware width and truncation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    s.width()
}

/// Truncate a string to at most `max_width` cells, ending in "..." when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut used = 0;
    let mut out: String = s
        .chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= budget
        })
        .collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width("2015"), 4);
        assert_eq!(visual_width(""), 0);
        assert_eq!(visual_width("年表"), 4);
    }

    #[test]
    fn test_no_truncation_needed() {
        assert_eq!(truncate_to_width("Student Protests", 16), "Student Protests");
        assert_eq!(truncate_to_width("Student Protests", 40), "Student Protests");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Student Protests", 10), "Student...");
    }

    #[test]
    fn test_truncate_wide_chars() {
        let result = truncate_to_width("大学の歴史年表", 7);
        assert_eq!(result, "大学...");
        assert!(visual_width(&result) <= 7);
    }

    #[test]
    fn test_truncate_very_short() {
        assert_eq!(truncate_to_width("hello", 3), "...");
        assert_eq!(truncate_to_width("hello", 0), "...");
    }
}
