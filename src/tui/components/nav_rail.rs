// Navigation rail component
//
// Left column listing the five tabs with their number keys. Collapses to
// glyphs on compact widths. Selection happens in App; this only draws.

use crate::tui::app::{App, Tab};
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
    let compact = Breakpoint::from_width(f.area().width) == Breakpoint::Compact;
    let active = app.active_tab();

    let mut lines = Vec::with_capacity(Tab::ALL.len() * 2 + 2);
    if !compact {
        lines.push(Line::from(Span::styled(
            " LifeContext",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::default());

    for (i, tab) in Tab::ALL.iter().enumerate() {
        let is_active = active == Some(*tab);
        let marker = if is_active { "▌" } else { " " };
        let style = if is_active {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(format!("{} ", tab.glyph()), style),
        ];
        if !compact {
            spans.push(Span::styled(format!("{:<11}", tab.label()), style));
            spans.push(Span::styled(
                format!("{}", i + 1),
                Style::default().fg(theme.muted),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    let rail = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(rail, area);
}
