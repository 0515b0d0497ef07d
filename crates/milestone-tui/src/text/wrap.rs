//! Wrapping of styled lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::visual_width;

/// Wrap lines to `width` columns, keeping span styles.
///
/// Break points come from `textwrap`; styles are re-applied by walking the
/// original characters alongside each wrapped row.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let styled: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();

    let plain: String = styled.iter().map(|(ch, _)| ch).collect();
    if visual_width(&plain) <= width {
        return vec![line];
    }

    let mut cursor = 0;
    let mut rows = Vec::new();

    for row in textwrap::wrap(&plain, width) {
        // textwrap drops the whitespace it breaks on
        while cursor < styled.len()
            && styled[cursor].0.is_whitespace()
            && !row.starts_with(styled[cursor].0)
        {
            cursor += 1;
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style: Option<Style> = None;

        for expected in row.chars() {
            let (ch, style) = styled.get(cursor).copied().unwrap_or((expected, Style::default()));
            cursor += 1;
            if run_style.is_some_and(|s| s != style) {
                spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
            }
            run_style = Some(style);
            run.push(ch);
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, run_style.unwrap_or_default()));
        }
        rows.push(Line::from(spans));
    }

    if rows.is_empty() {
        rows.push(Line::from(""));
    }
    rows
}
