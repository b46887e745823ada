// Chat view - full-page scripted chat
//
// Starts in editing mode so typing goes straight into the input. Esc leaves
// editing (global keys work again), `i` or Enter resumes it.

use super::{View, ViewAction};
use crate::chat::{ChatSession, Role, SUGGESTIONS};
use crate::events::{AppEvent, ChatChannel};
use crate::tui::layout::wrap_words;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;
use tokio::sync::mpsc;

const GREETING: &str = "Hello, Alex";
const DISCLAIMER: &str = "LifeContext AI can make mistakes. Check important info.";

pub struct ChatView {
    session: ChatSession,
    editing: bool,
    /// Next suggestion Tab will put in the input
    suggestion: usize,
    scroll: ScrollState,
}

impl ChatView {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            session: ChatSession::new(ChatChannel::View, reply_delay),
            editing: true,
            suggestion: 0,
            scroll: ScrollState::new(),
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn on_reply(&mut self, reply: u64) -> bool {
        self.session.on_reply(reply)
    }

    fn message_lines(&self, width: usize, ctx: &RenderContext) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let mut lines = Vec::new();

        if self.session.is_empty() {
            lines.push(Line::default());
            lines.push(
                Line::from(Span::styled(
                    GREETING,
                    Style::default()
                        .fg(theme.title)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center),
            );
            lines.push(
                Line::from(Span::styled(
                    "How can I help you today?",
                    Style::default().fg(theme.muted),
                ))
                .alignment(Alignment::Center),
            );
            lines.push(Line::default());
            for (i, text) in SUGGESTIONS.iter().enumerate() {
                let style = if i == self.suggestion % SUGGESTIONS.len() {
                    Style::default().fg(theme.accent)
                } else {
                    Style::default().fg(theme.foreground)
                };
                lines.push(
                    Line::from(Span::styled(format!("  ✦ {}  ", text), style))
                        .alignment(Alignment::Center),
                );
            }
            return lines;
        }

        for message in self.session.messages() {
            let (who, color) = match message.role {
                Role::User => ("You", theme.accent),
                Role::Ai => ("✦ LifeContext", theme.analysis),
            };
            lines.push(Line::from(Span::styled(
                who,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            for row in wrap_words(&message.text, width.saturating_sub(2)) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", row),
                    Style::default().fg(theme.foreground),
                )));
            }
            lines.push(Line::default());
        }

        if self.session.is_typing() {
            lines.push(Line::from(Span::styled(
                format!("✦ typing{}", ctx.typing_dots()),
                Style::default().fg(theme.muted),
            )));
        }
        lines
    }
}

impl Component for ChatView {
    fn id(&self) -> ComponentId {
        ComponentId::Chat
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let [messages_area, input_area, footer_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let lines = self.message_lines(messages_area.width as usize, ctx);
        self.scroll
            .update_dimensions(lines.len(), messages_area.height as usize);
        let (start, end) = self.scroll.visible_range();
        f.render_widget(Paragraph::new(lines[start..end].to_vec()), messages_area);

        let input_style = if self.session.input.is_empty() {
            Style::default().fg(theme.muted)
        } else {
            Style::default().fg(theme.foreground)
        };
        let shown = if self.session.input.is_empty() {
            "Ask anything...".to_string()
        } else {
            self.session.input.clone()
        };
        let cursor = if self.editing && focused && ctx.animation_frame % 2 == 0 {
            "▏"
        } else {
            " "
        };
        let input = Paragraph::new(Line::from(vec![
            Span::styled(shown, input_style),
            Span::styled(cursor, Style::default().fg(theme.accent)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.panel_border(focused && self.editing))),
        );
        f.render_widget(input, input_area);

        f.render_widget(
            Paragraph::new(Span::styled(DISCLAIMER, Style::default().fg(theme.muted)))
                .alignment(Alignment::Center),
            footer_area,
        );
    }
}

impl View for ChatView {
    fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> ViewAction {
        if !self.editing {
            return match key.code {
                KeyCode::Char('i') | KeyCode::Enter => {
                    self.editing = true;
                    ViewAction::Consumed
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll.scroll_up();
                    ViewAction::Consumed
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll.scroll_down();
                    ViewAction::Consumed
                }
                _ => ViewAction::Ignored,
            };
        }

        match key.code {
            KeyCode::Esc => self.editing = false,
            KeyCode::Enter => {
                if self.session.submit(tx) {
                    self.scroll.auto_follow = true;
                }
            }
            KeyCode::Backspace => {
                self.session.input.pop();
            }
            KeyCode::Tab => {
                self.session.use_suggestion(self.suggestion);
                self.suggestion = (self.suggestion + 1) % SUGGESTIONS.len();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.session.input.push(c)
            }
            _ => return ViewAction::Ignored,
        }
        ViewAction::Consumed
    }

    fn is_editing(&self) -> bool {
        self.editing
    }

    fn hint(&self) -> &'static str {
        if self.editing {
            "Enter:send  Tab:suggestion  Esc:stop typing"
        } else {
            "i:type  ↑↓:scroll"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(view: &mut ChatView, tx: &mpsc::Sender<AppEvent>, code: KeyCode) -> ViewAction {
        view.handle_key(KeyEvent::from(code), tx)
    }

    #[tokio::test]
    async fn tab_cycles_suggestions_into_input() {
        let (tx, _rx) = mpsc::channel(4);
        let mut view = ChatView::new(Duration::from_millis(1500));
        press(&mut view, &tx, KeyCode::Tab);
        assert_eq!(view.session.input, SUGGESTIONS[0]);
        press(&mut view, &tx, KeyCode::Tab);
        assert_eq!(view.session.input, SUGGESTIONS[1]);
    }

    #[tokio::test]
    async fn esc_stops_editing_and_lets_keys_through() {
        let (tx, _rx) = mpsc::channel(4);
        let mut view = ChatView::new(Duration::from_millis(1500));
        assert!(view.is_editing());
        press(&mut view, &tx, KeyCode::Esc);
        assert!(!view.is_editing());
        assert_eq!(press(&mut view, &tx, KeyCode::Char('q')), ViewAction::Ignored);
        press(&mut view, &tx, KeyCode::Char('i'));
        assert!(view.is_editing());
    }

    #[tokio::test]
    async fn blank_input_does_not_send() {
        let (tx, _rx) = mpsc::channel(4);
        let mut view = ChatView::new(Duration::from_millis(1500));
        press(&mut view, &tx, KeyCode::Char(' '));
        press(&mut view, &tx, KeyCode::Enter);
        assert!(view.session().is_empty());
        assert!(!view.session().is_typing());
    }
}
