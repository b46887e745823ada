//! Logs panel component
//!
//! Shows the tracing events captured by `TuiLogLayer`, newest at the bottom.
//! The panel holds its own handle on the shared LogBuffer, so it can render
//! and copy without App passing entries in.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Entries pulled from the buffer per frame
const VISIBLE_HISTORY: usize = 500;

pub struct LogsPanel {
    buffer: LogBuffer,
    scroll: ScrollState,

    /// Selected entry (None = following the newest)
    selected: Option<usize>,

    /// Entry count as of the last render, for bounds checks
    entry_count: usize,
}

impl LogsPanel {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            scroll: ScrollState::new(),
            selected: None,
            entry_count: 0,
        }
    }

    fn entries(&self) -> Vec<LogEntry> {
        self.buffer.recent(VISIBLE_HISTORY)
    }
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let entries = self.entries();
        let focused = ctx.is_focused(self.id());
        let theme = ctx.theme;

        self.entry_count = entries.len();
        self.scroll
            .update_dimensions(entries.len(), area.height.saturating_sub(2) as usize);
        if let Some(idx) = self.selected {
            if idx >= entries.len() {
                self.selected = entries.len().checked_sub(1);
            }
            if let Some(idx) = self.selected {
                self.scroll.ensure_visible(idx);
            }
        }

        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if focused && self.selected == Some(start + i) {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    level_style(entry.level, theme)
                };
                ListItem::new(format_entry(entry)).style(style)
            })
            .collect();

        let title = match (focused, self.selected.is_some(), self.scroll.auto_follow) {
            (true, true, _) => " System Logs [select] ",
            (_, _, true) => " System Logs ",
            _ => " System Logs [scroll] ",
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.panel_border(focused)))
                .title(title),
        );
        f.render_widget(list, area);
        render_scrollbar(
            f,
            area,
            &self.scroll,
            ScrollbarStyle::Minimal,
            Style::default().fg(theme.border),
        );
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for LogsPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index.min(self.entry_count.saturating_sub(1)));
        self.scroll.auto_follow = false;
    }

    fn item_count(&self) -> usize {
        self.entry_count
    }
}

impl Copyable for LogsPanel {
    fn copy_text(&self) -> Option<String> {
        let idx = self.selected?;
        self.entries().get(idx).map(format_entry)
    }

    fn copy_description(&self) -> String {
        "log entry".to_string()
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home => self.select_first(),
            KeyCode::End => self.select_last(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Esc => {
                // Back to following; nothing selected means the key bubbles
                if self.selected.take().is_none() {
                    return Handled::No;
                }
                self.scroll.auto_follow = true;
            }
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:select  y:copy  Esc:follow")
    }
}

fn format_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.critical)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warning),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn buffer_with(n: usize) -> LogBuffer {
        let buffer = LogBuffer::new();
        for i in 0..n {
            buffer.add(LogEntry {
                timestamp: Local::now(),
                level: LogLevel::Info,
                target: "lifecontext".into(),
                message: format!("entry {}", i),
            });
        }
        buffer
    }

    #[test]
    fn first_selection_starts_at_newest() {
        let mut panel = LogsPanel::new(buffer_with(3));
        panel.entry_count = 3;
        panel.handle_key(KeyEvent::from(KeyCode::Up));
        assert_eq!(panel.selected_index(), Some(2));
        assert!(panel.copy_text().is_some_and(|t| t.ends_with("entry 2")));
    }

    #[test]
    fn esc_returns_to_follow_then_bubbles() {
        let mut panel = LogsPanel::new(buffer_with(2));
        panel.entry_count = 2;
        panel.select(0);
        assert!(!panel.scroll.auto_follow);

        assert_eq!(panel.handle_key(KeyEvent::from(KeyCode::Esc)), Handled::Yes);
        assert!(panel.scroll.auto_follow);
        assert_eq!(panel.handle_key(KeyEvent::from(KeyCode::Esc)), Handled::No);
    }
}
