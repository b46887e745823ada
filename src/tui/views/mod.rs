// Views module - screen-level rendering and input
//
// Exactly one view is mounted at a time, held by App as an ActiveView:
// - Insights: timeline of entries and insight cards
// - Daily Picks: briefing, todos and the news feed
// - Chat: scripted AI chat
// - Knowledge: category tree and saved items
// - Settings: preferences form
//
// `draw` builds the shell (nav rail, logs, status bar), renders the mounted
// view, then the floating widget, modals and toast on top.

mod chat;
mod daily_picks;
mod insights;
mod knowledge;
mod overlay;
mod settings;

pub use chat::ChatView;
pub use daily_picks::DailyPicksView;
pub use insights::InsightsView;
pub use knowledge::KnowledgeView;
pub use settings::{SettingsForm, SettingsView};

use super::app::{App, Tab};
use super::components::{mascot, nav_rail, notification_panel, status_bar};
use super::layout::Breakpoint;
use super::traits::{Component, ComponentId, RenderContext};
use crate::config::TimerConfig;
use crate::data::Insight;
use crate::events::AppEvent;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use tokio::sync::mpsc;

/// What a view asks App to do after handling a key
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Not for this view; let the key fall through
    Ignored,
    /// Handled locally
    Consumed,
    OpenDetail(Insight),
    /// Open "Customize Sources" over `n` sources
    OpenSources(usize),
    Toast(String),
}

/// A top-level screen
pub trait View: Component {
    fn handle_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>) -> ViewAction;

    /// Capturing typed text: the view sees keys before the global layer
    fn is_editing(&self) -> bool {
        false
    }

    /// Status bar key hints
    fn hint(&self) -> &'static str;
}

/// The mounted view, one variant per tab
pub enum ActiveView {
    Insights(InsightsView),
    DailyPicks(DailyPicksView),
    Chat(ChatView),
    Knowledge(KnowledgeView),
    Settings(SettingsView),
}

impl ActiveView {
    /// Fresh view state for `tab`
    pub fn mount(tab: Tab, timers: &TimerConfig) -> Self {
        match tab {
            Tab::Insights => Self::Insights(InsightsView::new()),
            Tab::DailyPicks => Self::DailyPicks(DailyPicksView::new()),
            Tab::Chat => Self::Chat(ChatView::new(timers.chat_reply())),
            Tab::Knowledge => Self::Knowledge(KnowledgeView::new()),
            Tab::Settings => Self::Settings(SettingsView::new(timers.save_flash())),
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            Self::Insights(_) => Tab::Insights,
            Self::DailyPicks(_) => Tab::DailyPicks,
            Self::Chat(_) => Tab::Chat,
            Self::Knowledge(_) => Tab::Knowledge,
            Self::Settings(_) => Tab::Settings,
        }
    }

    pub fn component_id(&self) -> ComponentId {
        self.as_view().id()
    }

    pub fn as_view(&self) -> &dyn View {
        match self {
            Self::Insights(v) => v,
            Self::DailyPicks(v) => v,
            Self::Chat(v) => v,
            Self::Knowledge(v) => v,
            Self::Settings(v) => v,
        }
    }

    pub fn as_view_mut(&mut self) -> &mut dyn View {
        match self {
            Self::Insights(v) => v,
            Self::DailyPicks(v) => v,
            Self::Chat(v) => v,
            Self::Knowledge(v) => v,
            Self::Settings(v) => v,
        }
    }
}

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let screen = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        screen,
    );

    let bp = Breakpoint::from_width(screen.width);
    let [nav_area, main] =
        Layout::horizontal([Constraint::Length(bp.nav_width()), Constraint::Min(20)]).areas(screen);

    let mut constraints = vec![Constraint::Min(5)];
    if app.show_logs {
        constraints.push(Constraint::Length(10));
    }
    constraints.push(Constraint::Length(2));
    let chunks = Layout::vertical(constraints).split(main);
    let content = chunks[0];
    let status_area = chunks[chunks.len() - 1];

    nav_rail::render(f, nav_area, app);
    status_bar::render(f, status_area, app);

    let ctx = RenderContext::new(&app.theme, app.focus, app.animation_frame);

    // Unknown tab: content stays empty, chrome stays
    if let Some(view) = app.view.as_mut() {
        view.as_view_mut().render(f, content, &ctx);
    }

    if app.show_logs {
        app.logs_panel.render(f, chunks[1], &ctx);
    }

    // Floating widget; the Chat view has its own input where the mascot would sit
    let on_chat = matches!(app.view, Some(ActiveView::Chat(_)));
    app.mascot_area = None;
    if !on_chat {
        let mascot_area = mascot::area_in(content);
        mascot::render(f, mascot_area, app.widget.face(), &app.theme);
        app.mascot_area = Some(mascot_area);
        draw_notifications(f, app, mascot_area, content, &ctx);
    } else {
        let anchor = Rect::new(content.right().saturating_sub(1), content.bottom(), 0, 0);
        draw_notifications(f, app, anchor, content, &ctx);
    }

    if let Some(modal) = app.modal.as_mut() {
        overlay::render(f, modal, &ctx, &app.widget, app.view.as_ref());
    }

    if let Some(toast) = &app.toast {
        toast.render(f, screen, &app.theme);
    }
}

fn draw_notifications(
    f: &mut Frame,
    app: &App,
    anchor: Rect,
    bounds: Rect,
    ctx: &RenderContext,
) {
    if !app.widget.notifications_visible() {
        return;
    }
    let area = notification_panel::area_above(anchor, bounds, app.widget.notifications().len());
    notification_panel::render(
        f,
        area,
        &app.widget,
        ctx.is_focused(ComponentId::Notifications),
        ctx.theme,
    );
}

/// Rect of `width` x `height` centred in `area`, clamped to it
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
