// Knowledge view - saved items and their category tree
//
// Left: collapsible categories plus "untagged" (toggled with `b`).
// Right: a search box and the items grouped by capture date.
// The search box takes text but does not narrow the list yet.

use super::{View, ViewAction};
use crate::data::knowledge::{self, group_by_date, Category, KnowledgeItem};
use crate::events::AppEvent;
use crate::theme::Theme;
use crate::tui::components::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::layout::{wrap_words, Breakpoint};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::collections::HashSet;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Tree,
    Items,
}

/// A visible row of the category tree
#[derive(Debug, Clone, PartialEq, Eq)]
struct TreeRow {
    id: String,
    name: String,
    depth: usize,
    /// Some(open) for groups, None for leaves
    open: Option<bool>,
}

pub struct KnowledgeView {
    categories: Vec<Category>,
    items: Vec<KnowledgeItem>,
    open: HashSet<String>,
    tree_selected: usize,
    sidebar: bool,
    pane: Pane,
    search: String,
    searching: bool,
    scroll: ScrollState,
}

impl KnowledgeView {
    pub fn new() -> Self {
        let categories = knowledge::categories();
        let open = categories
            .iter()
            .filter(|c| c.open)
            .map(|c| c.id.clone())
            .collect();
        Self {
            categories,
            items: knowledge::items(),
            open,
            tree_selected: 0,
            sidebar: true,
            pane: Pane::Items,
            search: String::new(),
            searching: false,
            scroll: ScrollState::manual(),
        }
    }

    fn tree_rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for group in &self.categories {
            let open = self.open.contains(&group.id);
            rows.push(TreeRow {
                id: group.id.clone(),
                name: group.name.clone(),
                depth: 0,
                open: Some(open),
            });
            if open {
                rows.extend(group.children.iter().map(|child| TreeRow {
                    id: child.id.clone(),
                    name: child.name.clone(),
                    depth: 1,
                    open: None,
                }));
            }
        }
        rows.push(TreeRow {
            id: "untagged".to_string(),
            name: "untagged".to_string(),
            depth: 0,
            open: None,
        });
        rows
    }

    fn toggle_selected(&mut self) {
        let rows = self.tree_rows();
        let Some(row) = rows.get(self.tree_selected) else {
            return;
        };
        if row.open.is_none() {
            return;
        }
        if !self.open.remove(&row.id) {
            self.open.insert(row.id.clone());
        }
    }

    fn render_tree(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let active = ctx.is_focused(self.id()) && self.pane == Pane::Tree;
        let lines: Vec<Line> = self
            .tree_rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let arrow = match row.open {
                    Some(true) => "▾ ",
                    Some(false) => "▸ ",
                    None => "  ",
                };
                let mut style = if row.depth == 0 {
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.muted)
                };
                if active && i == self.tree_selected {
                    style = style.fg(theme.selection_fg).bg(theme.selection);
                }
                Line::from(Span::styled(
                    format!("{}{}{}", "  ".repeat(row.depth), arrow, row.name),
                    style,
                ))
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(active)))
            .title(" Categories ");
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn item_lines(&self, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (date, items) in group_by_date(&self.items) {
            lines.push(Line::from(Span::styled(
                date.to_string(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            for item in items {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {} ", item.kind.glyph())),
                    Span::styled(
                        item.title.clone(),
                        Style::default()
                            .fg(theme.foreground)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                for row in wrap_words(&item.description, width.saturating_sub(6)) {
                    lines.push(Line::from(Span::styled(
                        format!("     {}", row),
                        Style::default().fg(theme.muted),
                    )));
                }
                let mut meta = Vec::new();
                if let Some(source) = &item.source {
                    meta.push(Span::styled(
                        format!("     {}", source),
                        Style::default().fg(theme.suggestion),
                    ));
                }
                for tag in &item.tags {
                    meta.push(Span::styled(format!("  #{}", tag), Style::default().fg(theme.muted)));
                }
                lines.push(Line::from(meta));
            }
            lines.push(Line::default());
        }
        lines
    }

    fn render_items(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let [search_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

        let search_text = if self.search.is_empty() && !self.searching {
            Span::styled("/ Search your knowledge...", Style::default().fg(theme.muted))
        } else {
            Span::styled(format!("{}▏", self.search), Style::default().fg(theme.foreground))
        };
        f.render_widget(
            Paragraph::new(Line::from(search_text)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.panel_border(focused && self.searching))),
            ),
            search_area,
        );

        let active = focused && self.pane == Pane::Items && !self.searching;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(active)))
            .title(" Knowledge Base ");
        let inner = block.inner(list_area);
        f.render_widget(block, list_area);

        let lines = self.item_lines(inner.width as usize, theme);
        self.scroll.update_dimensions(lines.len(), inner.height as usize);
        let (start, end) = self.scroll.visible_range();
        f.render_widget(Paragraph::new(lines[start..end].to_vec()), inner);
        render_scrollbar(
            f,
            list_area,
            &self.scroll,
            ScrollbarStyle::Minimal,
            Style::default().fg(theme.border),
        );
    }
}

impl Default for KnowledgeView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for KnowledgeView {
    fn id(&self) -> ComponentId {
        ComponentId::Knowledge
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let show_sidebar = self.sidebar && Breakpoint::from_width(area.width).at_least(Breakpoint::Normal);
        if show_sidebar {
            let [tree, items] =
                Layout::horizontal([Constraint::Length(24), Constraint::Min(20)]).areas(area);
            self.render_tree(f, tree, ctx);
            self.render_items(f, items, ctx);
        } else {
            self.render_items(f, area, ctx);
        }
    }
}

impl View for KnowledgeView {
    fn handle_key(&mut self, key: KeyEvent, _tx: &mpsc::Sender<AppEvent>) -> ViewAction {
        if self.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                KeyCode::Backspace => {
                    self.search.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.search.push(c)
                }
                _ => return ViewAction::Ignored,
            }
            return ViewAction::Consumed;
        }

        match (key.code, self.pane) {
            (KeyCode::Char('/'), _) => self.searching = true,
            (KeyCode::Char('b'), _) => {
                self.sidebar = !self.sidebar;
                if !self.sidebar {
                    self.pane = Pane::Items;
                }
            }
            (KeyCode::Left, _) if self.sidebar => self.pane = Pane::Tree,
            (KeyCode::Right, _) => self.pane = Pane::Items,

            (KeyCode::Up | KeyCode::Char('k'), Pane::Tree) => {
                self.tree_selected = self.tree_selected.saturating_sub(1)
            }
            (KeyCode::Down | KeyCode::Char('j'), Pane::Tree) => {
                if self.tree_selected + 1 < self.tree_rows().len() {
                    self.tree_selected += 1;
                }
            }
            (KeyCode::Enter | KeyCode::Char(' '), Pane::Tree) => self.toggle_selected(),

            (KeyCode::Up | KeyCode::Char('k'), Pane::Items) => self.scroll.scroll_up(),
            (KeyCode::Down | KeyCode::Char('j'), Pane::Items) => self.scroll.scroll_down(),
            (KeyCode::PageUp, Pane::Items) => self.scroll.page_up(),
            (KeyCode::PageDown, Pane::Items) => self.scroll.page_down(),
            _ => return ViewAction::Ignored,
        }
        ViewAction::Consumed
    }

    fn is_editing(&self) -> bool {
        self.searching
    }

    fn hint(&self) -> &'static str {
        if self.searching {
            "type to search  Enter/Esc:done"
        } else {
            "←→:pane  ↑↓:move  Enter:expand  /:search  b:sidebar"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(view: &mut KnowledgeView, code: KeyCode) -> ViewAction {
        let (tx, _rx) = mpsc::channel(1);
        view.handle_key(KeyEvent::from(code), &tx)
    }

    #[test]
    fn tree_starts_with_technology_collapsed() {
        let view = KnowledgeView::new();
        let rows = view.tree_rows();
        assert!(rows.iter().any(|r| r.id == "food"));
        assert!(!rows.iter().any(|r| r.id == "ai"));
        assert_eq!(rows.last().map(|r| r.id.as_str()), Some("untagged"));
    }

    #[test]
    fn expanding_a_group_shows_children() {
        let mut view = KnowledgeView::new();
        press(&mut view, KeyCode::Left);
        let technology = view
            .tree_rows()
            .iter()
            .position(|r| r.id == "technology")
            .unwrap();
        for _ in 0..technology {
            press(&mut view, KeyCode::Down);
        }
        press(&mut view, KeyCode::Enter);
        assert!(view.tree_rows().iter().any(|r| r.id == "ai"));
    }

    #[test]
    fn search_accepts_text_without_filtering() {
        let mut view = KnowledgeView::new();
        let before = view.item_lines(80, &Theme::default()).len();
        press(&mut view, KeyCode::Char('/'));
        assert!(view.is_editing());
        for c in "crypto".chars() {
            press(&mut view, KeyCode::Char(c));
        }
        assert_eq!(view.search, "crypto");
        assert_eq!(view.item_lines(80, &Theme::default()).len(), before);
        press(&mut view, KeyCode::Esc);
        assert!(!view.is_editing());
    }

    #[test]
    fn sidebar_toggle_returns_to_items() {
        let mut view = KnowledgeView::new();
        press(&mut view, KeyCode::Left);
        press(&mut view, KeyCode::Char('b'));
        assert!(!view.sidebar);
        assert_eq!(view.pane, Pane::Items);
        assert_eq!(press(&mut view, KeyCode::Left), ViewAction::Ignored);
    }
}
