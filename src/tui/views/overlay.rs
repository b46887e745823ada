// Modal overlay rendering
//
// Modals draw on top of everything but the toast:
// - Help: keyboard shortcuts and the active theme
// - Detail: dimmed backdrop plus the animated insight panel
// - Sources: Daily Picks feed source checkboxes
// - Widget menu: floating widget flags and commands
// - Quick chat: small chat window in the bottom-right corner

use super::{centered_rect, ActiveView};
use crate::chat::Role;
use crate::data::daily::FeedSource;
use crate::tui::layout::wrap_words;
use crate::tui::modal::{DetailOverlay, Modal};
use crate::tui::traits::{Component, RenderContext};
use crate::widget::FloatingWidget;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(
    f: &mut Frame,
    modal: &mut Modal,
    ctx: &RenderContext,
    widget: &FloatingWidget,
    view: Option<&ActiveView>,
) {
    match modal {
        Modal::Help => render_help(f, ctx),
        Modal::Detail(overlay) => render_detail(f, overlay, ctx),
        Modal::Sources { selected, .. } => render_sources(f, *selected, ctx, view),
        Modal::WidgetMenu => render_widget_menu(f, ctx, widget),
        Modal::QuickChat => render_quick_chat(f, ctx, widget),
    }
}

fn dialog<'a>(title: &'a str, footer: &'a str, ctx: &RenderContext) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(ctx.theme.border_type)
        .border_style(Style::default().fg(ctx.theme.highlight))
        .style(Style::default().bg(ctx.theme.background))
        .title(title)
        .title_bottom(Line::from(footer).centered())
}

fn render_help(f: &mut Frame, ctx: &RenderContext) {
    let theme = ctx.theme;
    let key_style = Style::default().fg(theme.accent);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled("  Views", header_style)),
        kb("1-5", "Insights, Daily Picks, Chat, Knowledge, Settings"),
        kb("Tab/S-Tab", "Next / previous view"),
        Line::raw(""),
        Line::from(Span::styled("  Navigation", header_style)),
        kb("↑/↓, j/k", "Move selection / scroll"),
        kb("Enter", "Open / edit"),
        kb("Esc", "Close / stop editing"),
        Line::raw(""),
        Line::from(Span::styled("  Floating widget", header_style)),
        kb("m", "Widget menu"),
        kb("Ctrl-n", "Focus notifications"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("y", "Copy details"),
        kb("l / L", "Toggle / focus logs"),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.name.clone(), key_style),
        ]),
    ];

    let area = centered_rect(62, lines.len() as u16 + 2, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(dialog(" Help ", " ? or Esc to close ", ctx)),
        area,
    );
}

fn render_detail(f: &mut Frame, overlay: &mut DetailOverlay, ctx: &RenderContext) {
    let screen = f.area();

    // Dim whatever is underneath
    f.buffer_mut().set_style(
        screen,
        Style::default()
            .fg(ctx.theme.muted)
            .add_modifier(Modifier::DIM),
    );

    let scale = overlay.phase.scale();
    let full_width = (screen.width as f32 * 0.8) as u16;
    let full_height = (screen.height as f32 * 0.85) as u16;
    let width = ((full_width as f32 * scale) as u16).max(4);
    let height = ((full_height as f32 * scale) as u16).max(3);
    let area = centered_rect(width, height, screen);

    overlay.panel.render(f, area, ctx);
}

fn render_sources(f: &mut Frame, selected: usize, ctx: &RenderContext, view: Option<&ActiveView>) {
    let theme = ctx.theme;
    let sources: &[FeedSource] = match view {
        Some(ActiveView::DailyPicks(daily)) => daily.sources(),
        _ => &[],
    };

    let mut lines = vec![Line::from(Span::styled(
        "  Choose which topics feed your picks",
        Style::default().fg(theme.muted),
    ))];
    lines.push(Line::raw(""));
    for (i, source) in sources.iter().enumerate() {
        let check = if source.active { "[x]" } else { "[ ]" };
        let style = if i == selected {
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection)
        } else {
            Style::default().fg(theme.foreground)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", check), Style::default().fg(theme.accent)),
            Span::styled(source.name.clone(), style),
        ]));
    }

    let area = centered_rect(44, lines.len() as u16 + 2, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(dialog(
            " Customize Sources ",
            " Space toggle · Esc close ",
            ctx,
        )),
        area,
    );
}

fn render_widget_menu(f: &mut Frame, ctx: &RenderContext, widget: &FloatingWidget) {
    let theme = ctx.theme;
    let prefs = widget.prefs();
    let on_off = |on: bool| if on { "on" } else { "off" };
    let key_style = Style::default().fg(theme.accent);
    let item = |key: &str, text: String| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {}  ", key), key_style),
            Span::styled(text, Style::default().fg(theme.foreground)),
        ])
    };

    let page_status = if widget.is_page_blocked() {
        Span::styled(" (blocked)", Style::default().fg(theme.critical))
    } else {
        Span::raw("")
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Page: ", Style::default().fg(theme.muted)),
            Span::styled(widget.page().host().to_string(), Style::default().fg(theme.foreground)),
            page_status,
        ]),
        Line::raw(""),
        item("c", format!("Capture ({})", on_off(prefs.capture_enabled()))),
        item("n", format!("Notifications ({})", on_off(prefs.notifications_enabled()))),
        item("d", "Block this domain".to_string()),
        item("u", "Block this URL".to_string()),
        item("h", "Go home".to_string()),
        item("t", "Quick chat".to_string()),
        item("i", "Test insight notification".to_string()),
        item("s", "Test summary notification".to_string()),
    ];

    if !prefs.blocked_domains().is_empty() || !prefs.blocked_urls().is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Blocked",
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )));
        for entry in prefs.blocked_domains().iter().chain(prefs.blocked_urls()) {
            lines.push(Line::from(Span::styled(
                format!("    {}", entry),
                Style::default().fg(theme.muted),
            )));
        }
    }

    let area = centered_rect(48, lines.len() as u16 + 2, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(dialog(" LifeContext ", " Esc close ", ctx)),
        area,
    );
}

fn render_quick_chat(f: &mut Frame, ctx: &RenderContext, widget: &FloatingWidget) {
    let theme = ctx.theme;
    let chat = widget.quick_chat();
    let screen = f.area();
    let width = 46.min(screen.width);
    let height = 18.min(screen.height);
    let area = Rect::new(
        screen.right().saturating_sub(width + 2),
        screen.bottom().saturating_sub(height + 3),
        width,
        height,
    )
    .intersection(screen);

    f.render_widget(Clear, area);
    let block = dialog(" ✦ Quick Chat ", " Enter send · Esc close ", ctx);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let text_width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    if chat.is_empty() {
        lines.push(Line::from(Span::styled(
            " Ask about what you are looking at.",
            Style::default().fg(theme.muted),
        )));
    }
    for message in chat.messages() {
        let (prefix, style) = match message.role {
            Role::User => ("› ", Style::default().fg(theme.accent)),
            Role::Ai => ("✦ ", Style::default().fg(theme.foreground)),
        };
        for (i, row) in wrap_words(&message.text, text_width.saturating_sub(2))
            .into_iter()
            .enumerate()
        {
            let lead = if i == 0 { prefix } else { "  " };
            lines.push(Line::from(Span::styled(format!("{}{}", lead, row), style)));
        }
    }
    if chat.is_typing() {
        lines.push(Line::from(Span::styled(
            format!("✦ {}", ctx.typing_dots()),
            Style::default().fg(theme.muted),
        )));
    }

    // Newest at the bottom; older lines fall off the top
    let history_height = inner.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(history_height);
    let history = Rect {
        height: history_height as u16,
        ..inner
    };
    f.render_widget(Paragraph::new(lines.split_off(skip)), history);

    let input = Rect {
        y: inner.bottom().saturating_sub(1),
        height: 1,
        ..inner
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(chat.input.clone(), Style::default().fg(theme.foreground)),
            Span::styled("▏", Style::default().fg(theme.accent)),
        ])),
        input,
    );
}
