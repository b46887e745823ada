// Status bar component
//
// Bottom line: active tab, capture and notification flags, the simulated
// current page, and key hints for whatever has focus.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);
    let widget = &app.widget;
    let prefs = widget.prefs();

    let tab = app
        .active_tab()
        .map(|t| t.label())
        .unwrap_or("(none)");
    let (capture, capture_color) = if prefs.capture_enabled() {
        ("● capture", theme.action)
    } else {
        ("○ paused", theme.muted)
    };
    let notify = if prefs.notifications_enabled() {
        "🔔"
    } else {
        "🔕"
    };
    let sep = Span::styled(" │ ", Style::default().fg(theme.border));

    let mut spans = vec![
        Span::styled(
            format!(" {}", tab),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(capture, Style::default().fg(capture_color)),
        sep.clone(),
        Span::styled(notify, Style::default().fg(theme.status_bar)),
    ];

    if bp.at_least(Breakpoint::Normal) {
        let page = widget.page().host();
        let page_style = if widget.is_page_blocked() {
            Style::default()
                .fg(theme.critical)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.status_bar)
        };
        spans.push(sep.clone());
        spans.push(Span::styled(page.to_string(), page_style));
    }

    if bp.at_least(Breakpoint::Wide) {
        spans.push(sep);
        spans.push(Span::styled(
            app.focus_hint(),
            Style::default().fg(theme.muted),
        ));
    }

    let status = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(theme.status_bar))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    f.render_widget(status, area);
}
