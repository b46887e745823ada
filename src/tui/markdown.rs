// Markdown rendering for the detail overlay
//
// Walks pulldown-cmark events once, keeping a stack of inline styles and a
// line prefix for blockquotes/list continuation, and word-wraps text into
// styled ratatui Lines. Supports headings, bold/italic/strikethrough (nested),
// inline code, fenced code blocks, ordered and bulleted lists, blockquotes,
// rules and links.

use crate::theme::Theme;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Parse markdown and convert it to wrapped Lines
///
/// Sanitizes input to remove control characters that can cause TUI artifacts.
pub fn render_markdown(markdown: &str, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let sanitized = sanitize_for_tui(markdown);
    let mut renderer = Renderer::new(width.max(10), theme);
    let options = Options::ENABLE_STRIKETHROUGH;
    for event in Parser::new_ext(&sanitized, options) {
        renderer.event(event);
    }
    renderer.finish()
}

struct Renderer<'t> {
    theme: &'t Theme,
    width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    line_width: usize,
    /// Inline styles, innermost last
    styles: Vec<Style>,
    /// Blockquote depth; each level prefixes "│ "
    quote_depth: usize,
    /// (ordered, next number) per open list
    lists: Vec<(bool, u64)>,
    /// Extra indent for wrapped list item text
    hanging: usize,
    code_block: Option<(Option<String>, String)>,
    link_url: Option<String>,
}

impl<'t> Renderer<'t> {
    fn new(width: usize, theme: &'t Theme) -> Self {
        Self {
            theme,
            width,
            lines: Vec::new(),
            spans: Vec::new(),
            line_width: 0,
            styles: vec![Style::default().fg(theme.foreground)],
            quote_depth: 0,
            lists: Vec::new(),
            hanging: 0,
            code_block: None,
            link_url: None,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.style());
        self.styles.push(next);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn event(&mut self, event: Event<'_>) {
        if let Some((_, buffer)) = self.code_block.as_mut() {
            match event {
                Event::Text(text) => {
                    buffer.push_str(&text);
                    return;
                }
                Event::End(TagEnd::CodeBlock) => {}
                _ => return,
            }
        }

        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush();
                let theme = self.theme;
                self.push_style(|_| heading_style(level, theme));
            }
            Event::End(TagEnd::Heading(_)) => {
                self.pop_style();
                self.flush();
                self.blank();
            }

            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }

            Event::Start(Tag::Strong) => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Event::Start(Tag::Emphasis) => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Event::Start(Tag::Strikethrough) => {
                self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT | Modifier::DIM))
            }
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough) => {
                self.pop_style()
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                let accent = self.theme.accent;
                self.push_style(|s| s.fg(accent).add_modifier(Modifier::UNDERLINED));
                self.link_url = Some(dest_url.to_string());
            }
            Event::End(TagEnd::Link) => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    let muted = Style::default().fg(self.theme.muted);
                    self.text(&format!(" ({})", url), muted);
                }
            }

            Event::Start(Tag::BlockQuote) => {
                self.flush();
                self.quote_depth += 1;
                let muted = self.theme.muted;
                self.push_style(|s| s.fg(muted).add_modifier(Modifier::ITALIC));
            }
            Event::End(TagEnd::BlockQuote) => {
                self.flush();
                self.pop_style();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                // Paragraph end inside the quote already left a blank line
            }

            Event::Start(Tag::List(first)) => {
                self.flush();
                self.lists.push((first.is_some(), first.unwrap_or(1)));
            }
            Event::End(TagEnd::List(_)) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.hanging = 0;
                    self.blank();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some((true, n)) => {
                        let marker = format!("{}{}. ", "  ".repeat(depth), n);
                        *n += 1;
                        marker
                    }
                    _ => format!("{}• ", "  ".repeat(depth)),
                };
                self.hanging = 0;
                self.start_line();
                let style = Style::default().fg(self.theme.muted);
                self.line_width += marker.width();
                self.hanging = marker.width();
                self.spans.push(Span::styled(marker, style));
            }
            Event::End(TagEnd::Item) => self.flush(),

            Event::Start(Tag::CodeBlock(kind)) => {
                self.flush();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                self.code_block = Some((lang, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, code)) = self.code_block.take() {
                    self.code(lang.as_deref(), &code);
                }
            }

            Event::Code(code) => {
                let style = self.style().fg(self.theme.code_inline);
                self.text(&code, style);
            }
            Event::Text(text) => {
                let style = self.style();
                self.text(&text, style);
            }
            Event::SoftBreak => {
                let style = self.style();
                self.text(" ", style);
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                let rule = "─".repeat(self.width.saturating_sub(4).max(10));
                self.lines.push(Line::from(Span::styled(
                    rule,
                    Style::default().fg(self.theme.border),
                )));
                self.blank();
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = Style::default().fg(self.theme.muted);
                self.text(&html, style);
            }
            _ => {}
        }
    }

    /// Begin a line with the quote prefix and hanging indent
    fn start_line(&mut self) {
        if self.quote_depth > 0 {
            let prefix = "│ ".repeat(self.quote_depth);
            self.line_width = prefix.width();
            self.spans.push(Span::styled(
                prefix,
                Style::default().fg(self.theme.border),
            ));
        }
        if self.hanging > 0 {
            self.line_width += self.hanging;
            self.spans.push(Span::raw(" ".repeat(self.hanging)));
        }
    }

    fn prefix_width(&self) -> usize {
        self.quote_depth * 2 + self.hanging
    }

    /// Append wrapped text in one style
    fn text(&mut self, text: &str, style: Style) {
        for (i, word) in text.split(' ').enumerate() {
            if i > 0 {
                self.word(" ", style);
            }
            if !word.is_empty() {
                self.word(word, style);
            }
        }
    }

    fn word(&mut self, word: &str, style: Style) {
        if self.spans.is_empty() {
            if word == " " {
                return;
            }
            self.start_line();
        }
        let w = word.width();
        if self.line_width + w > self.width && self.line_width > self.prefix_width() {
            self.flush();
            if word == " " {
                return;
            }
            self.start_line();
        }
        self.line_width += w;
        // Merge with the previous span when the style matches
        match self.spans.last_mut() {
            Some(last) if last.style == style && self.line_width > w => {
                let mut merged = last.content.to_string();
                merged.push_str(word);
                *last = Span::styled(merged, style);
            }
            _ => self.spans.push(Span::styled(word.to_string(), style)),
        }
    }

    fn code(&mut self, lang: Option<&str>, code: &str) {
        let frame = Style::default().fg(self.theme.border);
        let body = Style::default()
            .fg(self.theme.code_block)
            .add_modifier(Modifier::DIM);
        let label = lang.unwrap_or("code");
        self.lines.push(Line::from(Span::styled(format!("  ┌ {}", label), frame)));
        for line in code.lines() {
            self.lines.push(Line::from(vec![
                Span::styled("  │ ", frame),
                Span::styled(line.to_string(), body),
            ]));
        }
        self.lines.push(Line::from(Span::styled("  └", frame)));
        self.blank();
    }

    fn flush(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
        self.line_width = 0;
    }

    /// One blank separator line, never two in a row
    fn blank(&mut self) {
        let last_blank = self
            .lines
            .last()
            .map(|l| l.spans.iter().all(|s| s.content.trim().is_empty()))
            .unwrap_or(true);
        if !last_blank {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self
            .lines
            .last()
            .is_some_and(|l| l.spans.iter().all(|s| s.content.trim().is_empty()))
        {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_style(level: HeadingLevel, theme: &Theme) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => base.fg(theme.title).add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => base.fg(theme.accent),
        _ => base.fg(theme.highlight),
    }
}

/// Strip control characters that can cause TUI rendering artifacts
///
/// Removes carriage returns, backspace/delete, ANSI escape sequences and any
/// other ASCII control character apart from tab and newline.
fn sanitize_for_tui(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => {
                // ESC [ <params> <letter>
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            c if c.is_ascii_control() && c != '\t' && c != '\n' => {}
            _ => result.push(ch),
        }
    }

    result
}

/// Plain text of rendered lines, for assertions and clipboard previews
#[cfg(test)]
fn plain(lines: &[Line<'_>]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::timeline::dashboard_entries;

    fn theme() -> Theme {
        Theme::by_name("Nebula")
    }

    #[test]
    fn heading_then_paragraph() {
        let lines = render_markdown("# Title\n\nBody text", 40, &theme());
        assert_eq!(plain(&lines), vec!["Title", "", "Body text"]);
    }

    #[test]
    fn wraps_at_width() {
        let lines = render_markdown("one two three four five six", 10, &theme());
        let text = plain(&lines);
        assert!(text.len() >= 3, "{text:?}");
        assert!(text.iter().all(|l| l.width() <= 10), "{text:?}");
    }

    #[test]
    fn nested_bold_inside_quote_keeps_prefix() {
        let md = "> **Core Concept:** routers pick experts for each token in turn";
        let lines = render_markdown(md, 24, &theme());
        let text = plain(&lines);
        assert!(text.len() > 1);
        assert!(text.iter().all(|l| l.starts_with("│ ")), "{text:?}");
        assert!(text[0].contains("Core Concept:"));
    }

    #[test]
    fn ordered_list_numbers() {
        let lines = render_markdown("1. first\n2. second", 40, &theme());
        assert_eq!(plain(&lines), vec!["1. first", "2. second"]);
    }

    #[test]
    fn code_block_keeps_lines() {
        let md = "```python\ndef f(x):\n  return x\n```";
        let text = plain(&render_markdown(md, 40, &theme()));
        assert_eq!(text[0], "  ┌ python");
        assert_eq!(text[1], "  │ def f(x):");
        assert_eq!(text[2], "  │   return x");
    }

    #[test]
    fn link_shows_url() {
        let text = plain(&render_markdown("[docs](https://x.dev)", 40, &theme()));
        assert_eq!(text, vec!["docs (https://x.dev)"]);
    }

    #[test]
    fn strips_escape_sequences() {
        assert_eq!(sanitize_for_tui("a\x1b[31mb\rc"), "abc");
    }

    #[test]
    fn every_insight_body_renders() {
        for entry in dashboard_entries() {
            for insight in entry.insights {
                let lines = render_markdown(&insight.detail_markdown(), 60, &theme());
                assert!(!lines.is_empty(), "{} rendered nothing", insight.id);
            }
        }
    }
}
