// Daily Picks view - briefing, todos and the news feed
//
// Three sections, switched with ←/→:
// - Briefing: summary card with stats, Enter opens it in the detail overlay
// - Todos: Space toggles completion, the header counts what is pending
// - News: cards dealt round-robin into 1-3 columns depending on width
//
// Feed sources live here too; the "Customize Sources" modal toggles them
// through `toggle_source`. They only change the checkbox, not the feed.

use super::{View, ViewAction};
use crate::data::daily::{
    self, masonry_columns, DailySummary, FeedSource, NewsItem, NewsKind, TodoItem,
};
use crate::events::AppEvent;
use crate::theme::Theme;
use crate::tui::components::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::layout::{wrap_words, Breakpoint};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Briefing,
    Todos,
    News,
}

impl Section {
    fn next(self) -> Self {
        match self {
            Section::Briefing => Section::Todos,
            Section::Todos => Section::News,
            Section::News => Section::Briefing,
        }
    }

    fn prev(self) -> Self {
        match self {
            Section::Briefing => Section::News,
            Section::Todos => Section::Briefing,
            Section::News => Section::Todos,
        }
    }
}

pub struct DailyPicksView {
    summary: DailySummary,
    todos: Vec<TodoItem>,
    news: Vec<NewsItem>,
    sources: Vec<FeedSource>,
    section: Section,
    todo_selected: usize,
    news_scroll: ScrollState,
}

impl DailyPicksView {
    pub fn new() -> Self {
        Self {
            summary: daily::daily_summary(),
            todos: daily::todos(),
            news: daily::news_items(),
            sources: daily::feed_sources(),
            section: Section::Briefing,
            todo_selected: 0,
            news_scroll: ScrollState::manual(),
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    pub fn toggle_source(&mut self, index: usize) {
        if let Some(source) = self.sources.get_mut(index) {
            source.active = !source.active;
            tracing::debug!(source = %source.id, active = source.active, "Feed source toggled");
        }
    }

    pub fn pending_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    fn toggle_todo(&mut self) {
        if let Some(todo) = self.todos.get_mut(self.todo_selected) {
            todo.completed = !todo.completed;
        }
    }

    fn section_block(&self, title: String, section: Section, ctx: &RenderContext) -> Block<'static> {
        let active = ctx.is_focused(self.id()) && self.section == section;
        Block::default()
            .borders(Borders::ALL)
            .border_type(ctx.theme.border_type)
            .border_style(Style::default().fg(ctx.theme.panel_border(active)))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(ctx.theme.title)
                    .add_modifier(Modifier::BOLD),
            ))
    }

    fn render_briefing(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = self.section_block(" ☀ Daily Briefing ".to_string(), Section::Briefing, ctx);

        let mut stats = vec![Span::raw(" ")];
        for (label, value) in &self.summary.stats {
            stats.push(Span::styled(
                format!("{} ", value),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            stats.push(Span::styled(format!("{}   ", label), Style::default().fg(theme.muted)));
        }

        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", self.summary.date),
                Style::default().fg(theme.muted),
            )),
            Line::from(Span::styled(
                format!(" {}", self.summary.content),
                Style::default().fg(theme.foreground),
            )),
            Line::default(),
            Line::from(stats),
        ];
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
        );
    }

    fn render_todos(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let title = format!(" ✓ To-do · {} PENDING ", self.pending_count());
        let block = self.section_block(title, Section::Todos, ctx);
        let active = ctx.is_focused(self.id()) && self.section == Section::Todos;

        let lines: Vec<Line> = self
            .todos
            .iter()
            .enumerate()
            .map(|(i, todo)| {
                let check = if todo.completed { "[x]" } else { "[ ]" };
                let mut text_style = Style::default().fg(theme.foreground);
                if todo.completed {
                    text_style = text_style
                        .fg(theme.muted)
                        .add_modifier(Modifier::CROSSED_OUT);
                }
                if active && i == self.todo_selected {
                    text_style = text_style.bg(theme.selection).fg(theme.selection_fg);
                }
                Line::from(vec![
                    Span::styled(format!(" {} ", check), Style::default().fg(theme.accent)),
                    Span::styled(todo.text.clone(), text_style),
                    Span::styled(format!("  {}", todo.tag), Style::default().fg(theme.muted)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_news(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = self.section_block(" 📰 For You ".to_string(), Section::News, ctx);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let columns = Breakpoint::from_width(area.width).news_columns();
        let dealt = masonry_columns(&self.news, columns);
        let column_areas = Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns])
            .spacing(1)
            .split(inner);

        let rendered: Vec<Vec<Line<'static>>> = dealt
            .iter()
            .zip(column_areas.iter())
            .map(|(items, rect)| {
                items
                    .iter()
                    .flat_map(|item| news_card(item, rect.width as usize, theme))
                    .collect()
            })
            .collect();

        let tallest = rendered.iter().map(Vec::len).max().unwrap_or(0);
        self.news_scroll.update_dimensions(tallest, inner.height as usize);
        let offset = self.news_scroll.offset();

        for (lines, rect) in rendered.into_iter().zip(column_areas.iter()) {
            let visible: Vec<Line> = lines
                .into_iter()
                .skip(offset)
                .take(rect.height as usize)
                .collect();
            f.render_widget(Paragraph::new(visible), *rect);
        }
        render_scrollbar(
            f,
            area,
            &self.news_scroll,
            ScrollbarStyle::Minimal,
            Style::default().fg(theme.border),
        );
    }
}

impl Default for DailyPicksView {
    fn default() -> Self {
        Self::new()
    }
}

/// One news card: category and source, title, summary, then a gap
fn news_card(item: &NewsItem, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            item.category.to_uppercase(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" · {} · {}", item.source, item.time),
            Style::default().fg(theme.muted),
        ),
    ])];
    if item.kind == NewsKind::Image {
        let bar = "░".repeat(width.min(40));
        lines.push(Line::from(Span::styled(bar.clone(), Style::default().fg(theme.border))));
        lines.push(Line::from(Span::styled(bar, Style::default().fg(theme.border))));
    }
    for row in wrap_words(&item.title, width) {
        lines.push(Line::from(Span::styled(
            row,
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(summary) = &item.summary {
        for row in wrap_words(summary, width) {
            lines.push(Line::from(Span::styled(row, Style::default().fg(theme.muted))));
        }
    }
    lines.push(Line::default());
    lines
}

impl Component for DailyPicksView {
    fn id(&self) -> ComponentId {
        ComponentId::DailyPicks
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let todo_height = self.todos.len() as u16 + 2;
        let [top, news] =
            Layout::vertical([Constraint::Length(todo_height.max(8)), Constraint::Min(5)])
                .areas(area);

        if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
            let [briefing, todos] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(top);
            self.render_briefing(f, briefing, ctx);
            self.render_todos(f, todos, ctx);
        } else {
            let [briefing, todos] =
                Layout::vertical([Constraint::Min(4), Constraint::Length(todo_height)]).areas(top);
            self.render_briefing(f, briefing, ctx);
            self.render_todos(f, todos, ctx);
        }
        self.render_news(f, news, ctx);
    }
}

impl View for DailyPicksView {
    fn handle_key(&mut self, key: KeyEvent, _tx: &mpsc::Sender<AppEvent>) -> ViewAction {
        match (key.code, self.section) {
            (KeyCode::Right, _) => self.section = self.section.next(),
            (KeyCode::Left, _) => self.section = self.section.prev(),
            (KeyCode::Char('f'), _) => return ViewAction::OpenSources(self.sources.len()),

            (KeyCode::Enter, Section::Briefing) => {
                return ViewAction::OpenDetail(self.summary.to_insight())
            }

            (KeyCode::Up | KeyCode::Char('k'), Section::Todos) => {
                self.todo_selected = self.todo_selected.saturating_sub(1)
            }
            (KeyCode::Down | KeyCode::Char('j'), Section::Todos) => {
                if self.todo_selected + 1 < self.todos.len() {
                    self.todo_selected += 1;
                }
            }
            (KeyCode::Char(' ') | KeyCode::Enter, Section::Todos) => self.toggle_todo(),

            (KeyCode::Up | KeyCode::Char('k'), Section::News) => self.news_scroll.scroll_up(),
            (KeyCode::Down | KeyCode::Char('j'), Section::News) => self.news_scroll.scroll_down(),
            (KeyCode::PageUp, Section::News) => self.news_scroll.page_up(),
            (KeyCode::PageDown, Section::News) => self.news_scroll.page_down(),
            (KeyCode::Home | KeyCode::Char('g'), Section::News) => {
                self.news_scroll.scroll_to_top()
            }

            _ => return ViewAction::Ignored,
        }
        ViewAction::Consumed
    }

    fn hint(&self) -> &'static str {
        match self.section {
            Section::Briefing => "←→:section  Enter:open briefing  f:sources",
            Section::Todos => "←→:section  ↑↓:select  Space:toggle  f:sources",
            Section::News => "←→:section  ↑↓:scroll  f:sources",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::daily::DAILY_SUMMARY_ID;

    fn press(view: &mut DailyPicksView, code: KeyCode) -> ViewAction {
        let (tx, _rx) = mpsc::channel(1);
        view.handle_key(KeyEvent::from(code), &tx)
    }

    #[test]
    fn pending_count_follows_toggles() {
        let mut view = DailyPicksView::new();
        assert_eq!(view.pending_count(), 3);

        press(&mut view, KeyCode::Right);
        press(&mut view, KeyCode::Char(' '));
        assert_eq!(view.pending_count(), 2);

        // Third todo starts completed
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Down);
        press(&mut view, KeyCode::Char(' '));
        assert_eq!(view.pending_count(), 3);
    }

    #[test]
    fn briefing_opens_as_insight() {
        let mut view = DailyPicksView::new();
        let ViewAction::OpenDetail(insight) = press(&mut view, KeyCode::Enter) else {
            panic!("expected detail");
        };
        assert_eq!(insight.id, DAILY_SUMMARY_ID);
    }

    #[test]
    fn source_toggles_leave_feed_alone() {
        let mut view = DailyPicksView::new();
        assert_eq!(press(&mut view, KeyCode::Char('f')), ViewAction::OpenSources(6));

        let finance = view.sources().iter().position(|s| s.id == "finance").unwrap();
        assert!(!view.sources()[finance].active);
        view.toggle_source(finance);
        assert!(view.sources()[finance].active);
        view.toggle_source(99);

        assert_eq!(view.news.len(), 20);
    }

    #[test]
    fn sections_wrap() {
        let mut view = DailyPicksView::new();
        press(&mut view, KeyCode::Left);
        assert_eq!(view.section, Section::News);
        press(&mut view, KeyCode::Right);
        assert_eq!(view.section, Section::Briefing);
    }
}
