// Insights view - the timeline feed
//
// Entries render in their fixed timeline order: a time label and context title, the sources
// the user had open, then one card per insight. Selection is a flat index
// over every insight on the page so ↑/↓ walks across entry boundaries.

use super::{View, ViewAction};
use crate::data::{timeline, DashboardEntry, Insight};
use crate::events::AppEvent;
use crate::theme::Theme;
use crate::tui::components::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::layout::wrap_words;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, RenderContext, Scrollable, Selectable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

pub struct InsightsView {
    entries: Vec<DashboardEntry>,
    selected: usize,
    scroll: ScrollState,
    /// Line span of each card as of the last render
    card_spans: Vec<(usize, usize)>,
}

impl InsightsView {
    pub fn new() -> Self {
        Self {
            entries: timeline::dashboard_entries(),
            selected: 0,
            scroll: ScrollState::manual(),
            card_spans: Vec::new(),
        }
    }

    fn insights(&self) -> impl Iterator<Item = &Insight> {
        self.entries.iter().flat_map(|e| e.insights.iter())
    }

    pub fn selected_insight(&self) -> Option<&Insight> {
        self.insights().nth(self.selected)
    }

    /// Select the insight with `id`; false when it is not on the timeline
    pub fn select_id(&mut self, id: &str) -> bool {
        let found = self.insights().position(|i| i.id == id);
        match found {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    fn build_lines(&mut self, width: usize, theme: &Theme, focused: bool) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut spans = Vec::new();
        let mut index = 0;

        for entry in &self.entries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>5}", entry.time),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ● ", Style::default().fg(theme.border)),
                Span::styled(
                    entry.context.title.clone(),
                    Style::default()
                        .fg(theme.title)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            for source in &entry.context.sources {
                lines.push(Line::from(Span::styled(
                    format!("        {} {} ({})", source.icon.glyph(), source.title, source.url),
                    Style::default().fg(theme.muted),
                )));
            }
            lines.push(Line::default());

            for insight in &entry.insights {
                let start = lines.len();
                let selected = index == self.selected;
                let color = theme.insight_color(insight.kind);
                let rail = if selected && focused { "  ▌ " } else { "  │ " };
                let rail_style = Style::default().fg(color);

                lines.push(Line::from(vec![
                    Span::styled("      ", Style::default()),
                    Span::styled(rail, rail_style),
                    Span::styled(
                        format!(" {} ", insight.kind.label().to_uppercase()),
                        Style::default()
                            .fg(theme.background)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" #{}", insight.tag), Style::default().fg(theme.muted)),
                ]));

                let title_style = if selected {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(vec![
                    Span::raw("      "),
                    Span::styled(rail, rail_style),
                    Span::styled(insight.title.clone(), title_style),
                ]));

                for row in wrap_words(&insight.content, width.saturating_sub(10)) {
                    lines.push(Line::from(vec![
                        Span::raw("      "),
                        Span::styled(rail, rail_style),
                        Span::styled(row, Style::default().fg(theme.foreground)),
                    ]));
                }
                spans.push((start, lines.len()));
                lines.push(Line::default());
                index += 1;
            }
        }

        self.card_spans = spans;
        lines
    }
}

impl Default for InsightsView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InsightsView {
    fn id(&self) -> ComponentId {
        ComponentId::Insights
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(focused)))
            .title(Span::styled(
                " Insights Timeline ",
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let lines = self.build_lines(inner.width as usize, theme, focused);
        self.scroll.update_dimensions(lines.len(), inner.height as usize);
        if let Some(&(start, end)) = self.card_spans.get(self.selected) {
            self.scroll.ensure_visible(end.saturating_sub(1));
            self.scroll.ensure_visible(start);
        }

        let (start, end) = self.scroll.visible_range();
        f.render_widget(Paragraph::new(lines[start..end].to_vec()), inner);
        render_scrollbar(
            f,
            area,
            &self.scroll,
            ScrollbarStyle::Minimal,
            Style::default().fg(theme.border),
        );
    }
}

impl Scrollable for InsightsView {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for InsightsView {
    fn selected_index(&self) -> Option<usize> {
        Some(self.selected)
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(self.item_count().saturating_sub(1));
    }

    fn item_count(&self) -> usize {
        self.insights().count()
    }
}

impl View for InsightsView {
    fn handle_key(&mut self, key: KeyEvent, _tx: &mpsc::Sender<AppEvent>) -> ViewAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Enter => {
                return match self.selected_insight() {
                    Some(insight) => ViewAction::OpenDetail(insight.clone()),
                    None => ViewAction::Ignored,
                }
            }
            _ => return ViewAction::Ignored,
        }
        ViewAction::Consumed
    }

    fn hint(&self) -> &'static str {
        "↑↓:select  Enter:details"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(view: &mut InsightsView, code: KeyCode) -> ViewAction {
        let (tx, _rx) = mpsc::channel(1);
        view.handle_key(KeyEvent::from(code), &tx)
    }

    #[test]
    fn selection_walks_across_entries() {
        let mut view = InsightsView::new();
        assert_eq!(view.selected_insight().map(|i| i.id.as_str()), Some("i1"));
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Down);
        assert_eq!(view.selected_insight().map(|i| i.id.as_str()), Some("i3"));

        press(&mut view, KeyCode::End);
        press(&mut view, KeyCode::Down);
        assert_eq!(view.selected, view.item_count() - 1);
    }

    #[test]
    fn enter_opens_selected_insight() {
        let mut view = InsightsView::new();
        assert!(view.select_id("i2"));
        let ViewAction::OpenDetail(insight) = press(&mut view, KeyCode::Enter) else {
            panic!("expected detail");
        };
        assert_eq!(insight.id, "i2");
    }

    #[test]
    fn unknown_id_keeps_selection() {
        let mut view = InsightsView::new();
        view.select_id("i3");
        assert!(!view.select_id("nope"));
        assert_eq!(view.selected_insight().map(|i| i.id.as_str()), Some("i3"));
    }

    #[test]
    fn sources_render_with_url() {
        let mut view = InsightsView::new();
        let lines = view.build_lines(100, &Theme::default(), true);
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert!(text.iter().any(|l| l.contains("Tech Talk 2024 (youtube.com)")));
        assert_eq!(view.card_spans.len(), view.item_count());
    }
}
