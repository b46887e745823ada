// Notification panel component
//
// Stacked above the mascot while the widget has notifications to show.
// Selection is only highlighted while the panel has focus (Ctrl-n).

use crate::theme::Theme;
use crate::widget::FloatingWidget;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const WIDTH: u16 = 44;

/// Height for `count` items: two lines each plus borders
pub fn height_for(count: usize) -> u16 {
    (count as u16).saturating_mul(2).saturating_add(2)
}

/// Panel area stacked directly above `mascot`, inside `bounds`
pub fn area_above(mascot: Rect, bounds: Rect, count: usize) -> Rect {
    let width = WIDTH.min(bounds.width);
    let height = height_for(count).min(mascot.y.saturating_sub(bounds.y));
    Rect::new(
        mascot.right().saturating_sub(width).max(bounds.x),
        mascot.y.saturating_sub(height),
        width,
        height,
    )
}

pub fn render(f: &mut Frame, area: Rect, widget: &FloatingWidget, focused: bool, theme: &Theme) {
    if area.height < 3 {
        return;
    }
    let preview_width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = widget
        .notifications()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let color = match item {
                crate::widget::NotificationItem::Insight(insight) => {
                    theme.insight_color(insight.kind)
                }
                crate::widget::NotificationItem::DailySummary { .. } => theme.accent,
            };
            let selected = focused && i == widget.selected_notification();
            let title_style = if selected {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:<10}", item.label()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(item.title().to_string(), title_style),
                ]),
                Line::from(Span::styled(
                    format!("  {}", truncate(item.preview(), preview_width)),
                    Style::default().fg(theme.muted),
                )),
            ])
        })
        .collect();

    let hint = if focused {
        " ↑↓ Enter open · x dismiss · Esc "
    } else {
        " Ctrl-n to focus "
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.panel_border(focused)))
            .style(Style::default().bg(theme.background))
            .title(" Notifications ")
            .title_bottom(Line::from(hint).right_aligned()),
    );

    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

/// Cut `text` to `max` display columns, ending with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        if out.width() + 2 > max {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        let cut = truncate("a rather long preview line", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }

    #[test]
    fn panel_sits_above_mascot() {
        let bounds = Rect::new(0, 0, 100, 40);
        let mascot = Rect::new(88, 35, 11, 5);
        let area = area_above(mascot, bounds, 2);
        assert_eq!(area.bottom(), mascot.y);
        assert_eq!(area.height, 6);
        assert_eq!(area.right(), mascot.right());
    }
}
