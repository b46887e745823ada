//! Detail panel component
//!
//! The content of the insight detail overlay: a type badge, tag and title
//! header over the insight's markdown body. Rendered lines are cached per
//! width so scrolling does not re-parse the markdown every frame.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::data::Insight;
use crate::tui::markdown::render_markdown;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, ScrollKeys, Scrollable,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug)]
pub struct DetailPanel {
    insight: Insight,
    scroll: ScrollState,
    /// (width, theme name, lines)
    cache: Option<(u16, String, Vec<Line<'static>>)>,
}

impl DetailPanel {
    pub fn new(insight: Insight) -> Self {
        Self {
            insight,
            scroll: ScrollState::manual(),
            cache: None,
        }
    }

    pub fn insight(&self) -> &Insight {
        &self.insight
    }

    fn lines(&mut self, width: u16, ctx: &RenderContext) -> &[Line<'static>] {
        let stale = !matches!(
            &self.cache,
            Some((w, theme, _)) if *w == width && *theme == ctx.theme.name
        );
        if stale {
            let lines = render_markdown(&self.insight.detail_markdown(), width as usize, ctx.theme);
            self.cache = Some((width, ctx.theme.name.clone(), lines));
        }
        self.cache.as_ref().map(|(_, _, l)| l.as_slice()).unwrap_or(&[])
    }
}

impl Component for DetailPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Detail
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let badge_color = theme.insight_color(self.insight.kind);

        let title = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!(" {} ", self.insight.kind.label().to_uppercase()),
                Style::default()
                    .fg(theme.background)
                    .bg(badge_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" #{} ", self.insight.tag),
                Style::default().fg(theme.muted),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(badge_color))
            .style(Style::default().bg(theme.background))
            .title(title)
            .title_bottom(Line::from(" ↑↓ scroll · y copy · Esc close ").centered());

        f.render_widget(Clear, area);
        let inner = block.inner(area);
        f.render_widget(block, area);

        // Tiny during the opening/closing animation: frame only
        if inner.height < 3 || inner.width < 10 {
            return;
        }

        let heading = Line::from(Span::styled(
            self.insight.title.clone(),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ));
        let body_width = inner.width.saturating_sub(3);
        let mut lines = vec![heading, Line::default()];
        lines.extend(self.lines(body_width, ctx).iter().cloned());

        let viewport = inner.height as usize;
        self.scroll.update_dimensions(lines.len(), viewport);
        let (start, end) = self.scroll.visible_range();

        let text_area = Rect {
            x: inner.x + 1,
            width: inner.width.saturating_sub(2),
            ..inner
        };
        f.render_widget(Paragraph::new(lines[start..end].to_vec()), text_area);
        render_scrollbar(
            f,
            inner,
            &self.scroll,
            ScrollbarStyle::Arrows,
            Style::default().fg(badge_color),
        );
    }
}

impl Scrollable for DetailPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Copyable for DetailPanel {
    fn copy_text(&self) -> Option<String> {
        Some(self.insight.detail_markdown())
    }

    fn copy_description(&self) -> String {
        format!("\"{}\"", self.insight.title)
    }
}

impl Interactive for DetailPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key)
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓/PgUp/PgDn:scroll  g/G:top/bottom  y:copy  Esc:close")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InsightKind;
    use crossterm::event::KeyCode;

    fn panel() -> DetailPanel {
        DetailPanel::new(Insight::new(
            "x",
            InsightKind::Warning,
            "Title",
            "Short",
            "Tag",
            Some("# Heading\n\nLong body"),
        ))
    }

    #[test]
    fn copies_markdown_body() {
        assert_eq!(panel().copy_text().as_deref(), Some("# Heading\n\nLong body"));
    }

    #[test]
    fn scroll_keys_are_consumed() {
        let mut p = panel();
        assert_eq!(p.handle_key(KeyEvent::from(KeyCode::Char('G'))), Handled::Yes);
        assert_eq!(p.handle_key(KeyEvent::from(KeyCode::Char('x'))), Handled::No);
    }
}
