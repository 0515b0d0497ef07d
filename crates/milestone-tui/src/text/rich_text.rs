//! Rich-text rendering for event descriptions.
//!
//! Descriptions are `CommonMark`. Descriptions written as raw HTML
//! paragraphs (`<p>...</p>`) are also accepted: tags are dropped and
//! block-level closers become paragraph breaks.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use super::styles::RichTextStyles;
use super::wrap::wrap_lines;
use crate::theme::Theme;

/// Render a description to styled, wrapped lines.
///
/// A `width` of 0 disables wrapping.
pub fn render_rich_text(input: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = Renderer::new(RichTextStyles::from_theme(theme));
    // Indented HTML would otherwise parse as a code block
    if input.trim_start().starts_with('<') {
        renderer.push_html(input);
    } else {
        for event in Parser::new_ext(input, options) {
            renderer.handle_event(event);
        }
    }
    renderer.finish();

    wrap_lines(renderer.lines, width)
}

/// Render a description to unstyled, wrapped text rows.
pub fn plain_text(input: &str, width: usize) -> Vec<String> {
    render_rich_text(input, width, &Theme::plain())
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

struct Renderer {
    lines: Vec<Line<'static>>,
    styles: RichTextStyles,
    style_stack: Vec<Style>,
    current: Vec<Span<'static>>,
    /// One entry per open list: `Some(n)` for ordered lists, `None` for bullets.
    lists: Vec<Option<u64>>,
    in_blockquote: bool,
}

impl Renderer {
    fn new(styles: RichTextStyles) -> Self {
        Self {
            lines: Vec::new(),
            styles,
            style_stack: Vec::new(),
            current: Vec::new(),
            lists: Vec::new(),
            in_blockquote: false,
        }
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                self.flush_line();
                self.style_stack.push(self.styles.heading);
            }
            Event::End(TagEnd::Heading(_)) => {
                self.style_stack.pop();
                self.end_block();
            }

            Event::Start(Tag::Emphasis) => self.style_stack.push(self.styles.emphasis),
            Event::Start(Tag::Strong) => self.style_stack.push(self.styles.strong),
            Event::Start(Tag::Strikethrough) => self.style_stack.push(self.styles.strikethrough),
            Event::Start(Tag::Link { .. }) => self.style_stack.push(self.styles.link),
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link) => {
                self.style_stack.pop();
            }

            Event::Start(Tag::List(start)) => {
                self.flush_line();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.end_block();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush_line();
                self.push_list_marker();
            }
            Event::End(TagEnd::Item) => self.flush_line(),

            Event::Start(Tag::BlockQuote) => {
                self.flush_line();
                self.in_blockquote = true;
            }
            Event::End(TagEnd::BlockQuote) => {
                self.in_blockquote = false;
                self.end_block();
            }

            Event::End(TagEnd::Paragraph) => {
                if self.lists.is_empty() {
                    self.end_block();
                } else {
                    self.flush_line();
                }
            }

            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.current.push(Span::styled(code.into_string(), self.styles.code)),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Html(html) | Event::InlineHtml(html) => self.push_html(&html),

            _ => {}
        }
    }

    fn push_list_marker(&mut self) {
        let depth = self.lists.len().saturating_sub(1);
        let indent = "  ".repeat(depth);
        let marker = match self.lists.last_mut() {
            Some(Some(n)) => {
                let marker = format!("{indent}{n}. ");
                *n += 1;
                marker
            }
            _ => format!("{indent}\u{2022} "),
        };
        self.current.push(Span::styled(marker, self.styles.list_marker));
    }

    fn push_text(&mut self, text: &str) {
        if self.in_blockquote && self.current.is_empty() {
            self.current
                .push(Span::styled("\u{2502} ", self.styles.blockquote));
        }
        let style = self.current_style();
        self.current.push(Span::styled(text.to_string(), style));
    }

    /// Strip tags from raw HTML, turning block closers into paragraph breaks.
    fn push_html(&mut self, html: &str) {
        let mut rest = html;
        while let Some(open) = rest.find('<') {
            self.push_html_text(&rest[..open]);
            let Some(close) = rest[open..].find('>') else {
                rest = "";
                break;
            };
            let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
            match tag.as_str() {
                "/p" | "/div" | "/h1" | "/h2" | "/h3" | "/li" => self.end_block(),
                "br" | "br/" | "br /" => self.flush_line(),
                _ => {}
            }
            rest = &rest[open + close + 1..];
        }
        self.push_html_text(rest);
    }

    fn push_html_text(&mut self, text: &str) {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            if !text.is_empty() && !self.current.is_empty() {
                self.push_text(" ");
            }
            return;
        }
        let mut decoded = decode_entities(&collapsed);
        if text.starts_with(char::is_whitespace) && !self.current.is_empty() {
            decoded.insert(0, ' ');
        }
        if text.ends_with(char::is_whitespace) {
            decoded.push(' ');
        }
        self.push_text(&decoded);
    }

    fn current_style(&self) -> Style {
        self.style_stack
            .iter()
            .fold(self.styles.text, |style, s| style.patch(*s))
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    /// Close a block: flush and leave one blank separator line.
    fn end_block(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn finish(&mut self) {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
