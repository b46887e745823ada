// TUI application state
//
// App is the view router. It holds the single mounted view (or none, for an
// unknown tab id), the floating widget, the modal layer and the shell state
// (theme, logs panel, toast, focus). Input routing lives in tui/mod.rs; this
// module owns the state transitions.

use super::components::{LogsPanel, Toast};
use super::modal::{Modal, WidgetCommand};
use super::traits::{ComponentId, Handled, Interactive};
use super::views::{ActiveView, ViewAction};
use crate::config::{Config, TimerConfig};
use crate::data::Insight;
use crate::events::{AppEvent, ChatChannel};
use crate::logging::LogBuffer;
use crate::page::PageContext;
use crate::prefs::Preferences;
use crate::theme::{Theme, ThemeConfig};
use crate::widget::{
    sample_insight_notifications, sample_summary_notification, FloatingWidget,
    NotificationOutcome,
};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

/// Top-level views, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Insights,
    DailyPicks,
    Chat,
    Knowledge,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Insights,
        Tab::DailyPicks,
        Tab::Chat,
        Tab::Knowledge,
        Tab::Settings,
    ];

    /// Stable identifier used by config, CLI and env
    pub fn id(&self) -> &'static str {
        match self {
            Tab::Insights => "insights",
            Tab::DailyPicks => "daily_picks",
            Tab::Chat => "chat",
            Tab::Knowledge => "knowledge",
            Tab::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Insights => "Insights",
            Tab::DailyPicks => "Daily Picks",
            Tab::Chat => "Chat",
            Tab::Knowledge => "Knowledge",
            Tab::Settings => "Settings",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Tab::Insights => "◈",
            Tab::DailyPicks => "☀",
            Tab::Chat => "✦",
            Tab::Knowledge => "▤",
            Tab::Settings => "⚙",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Tab for number key `n` (1-based)
    pub fn from_number(n: u32) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state for the TUI
pub struct App {
    /// The mounted view; None when an unknown tab id was requested
    pub(super) view: Option<ActiveView>,

    /// Where "go home" leads
    home: Tab,

    pub widget: FloatingWidget,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub theme: Theme,

    pub logs_panel: LogsPanel,
    pub show_logs: bool,

    /// Which component receives keys after the modal and global layers
    pub focus: ComponentId,

    pub animation_frame: usize,
    pub should_quit: bool,

    /// Where the mascot was last drawn, for eye tracking
    pub mascot_area: Option<Rect>,

    timers: TimerConfig,
    tx: mpsc::Sender<AppEvent>,
}

impl App {
    /// Build the app and mount the configured default tab
    ///
    /// Must be called from within a tokio runtime (timers spawn tasks).
    pub fn new(
        config: &Config,
        prefs: Preferences,
        log_buffer: LogBuffer,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let theme_config = ThemeConfig {
            use_theme_background: config.use_theme_background,
        };
        let page = PageContext::parse(&config.page_url);
        let widget = FloatingWidget::new(prefs, page, &config.timers, tx.clone());

        let mut app = Self {
            view: None,
            home: Tab::from_id(&config.default_tab).unwrap_or_default(),
            widget,
            modal: None,
            toast: None,
            theme: Theme::by_name_with_config(&config.theme, &theme_config),
            logs_panel: LogsPanel::new(log_buffer),
            show_logs: false,
            focus: ComponentId::Insights,
            animation_frame: 0,
            should_quit: false,
            mascot_area: None,
            timers: config.timers.clone(),
            tx,
        };
        app.set_active_tab_id(&config.default_tab);
        app
    }

    // ─────────────────────────────────────────────────────────────────────────
    // View routing
    // ─────────────────────────────────────────────────────────────────────────

    pub fn active_tab(&self) -> Option<Tab> {
        self.view.as_ref().map(ActiveView::tab)
    }

    pub fn view(&self) -> Option<&ActiveView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut ActiveView> {
        self.view.as_mut()
    }

    /// Mount `tab`, dropping the previous view's state
    ///
    /// Selecting the tab that is already mounted keeps its state.
    pub fn set_active_tab(&mut self, tab: Tab) {
        if self.active_tab() == Some(tab) {
            return;
        }
        tracing::debug!(tab = tab.id(), "Switching tab");
        let view = ActiveView::mount(tab, &self.timers);
        self.focus = view.component_id();
        self.view = Some(view);
    }

    /// Route by string id; unknown ids leave the content area empty
    pub fn set_active_tab_id(&mut self, id: &str) {
        match Tab::from_id(id) {
            Some(tab) => self.set_active_tab(tab),
            None => {
                tracing::warn!(tab = id, "Unknown tab id, nothing to show");
                self.view = None;
                self.focus = ComponentId::NavRail;
            }
        }
    }

    pub fn next_tab(&mut self) {
        let tab = self.active_tab().map(Tab::next).unwrap_or_default();
        self.set_active_tab(tab);
    }

    pub fn prev_tab(&mut self) {
        let tab = self.active_tab().map(Tab::prev).unwrap_or_default();
        self.set_active_tab(tab);
    }

    pub fn go_home(&mut self) {
        self.set_active_tab(self.home);
    }

    /// Focus the mounted view (or nothing when no view is mounted)
    pub fn focus_content(&mut self) {
        self.focus = self
            .view
            .as_ref()
            .map(ActiveView::component_id)
            .unwrap_or(ComponentId::NavRail);
    }

    /// The mounted view is capturing typed text
    pub fn is_editing(&self) -> bool {
        self.focus != ComponentId::Logs
            && self.focus != ComponentId::Notifications
            && self.view.as_ref().is_some_and(|v| v.as_view().is_editing())
    }

    /// Send a key to the mounted view and carry out what it asks for
    pub fn dispatch_to_view(&mut self, key: KeyEvent) -> Handled {
        let Some(view) = self.view.as_mut() else {
            return Handled::No;
        };
        match view.as_view_mut().handle_key(key, &self.tx) {
            ViewAction::Ignored => Handled::No,
            ViewAction::Consumed => Handled::Yes,
            ViewAction::OpenDetail(insight) => {
                self.open_detail(insight);
                Handled::Yes
            }
            ViewAction::OpenSources(count) => {
                self.modal = Some(Modal::sources(count));
                Handled::Yes
            }
            ViewAction::Toast(message) => {
                self.show_toast(message);
                Handled::Yes
            }
        }
    }

    /// Send a key to whatever has focus
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::Logs => self.logs_panel.handle_key(key),
            ComponentId::Notifications => self.handle_notification_key(key),
            _ => self.dispatch_to_view(key),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────────────────────

    pub fn open_detail(&mut self, insight: Insight) {
        self.modal = Some(Modal::detail(insight));
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs && self.focus == ComponentId::Logs {
            self.focus_content();
        }
    }

    /// Periodic tick: animations, overlay phases, toast expiry
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        if self.modal.as_mut().is_some_and(Modal::tick) {
            self.modal = None;
        }
        self.clear_expired_toast();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Floating widget
    // ─────────────────────────────────────────────────────────────────────────

    pub fn run_widget_command(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::ToggleCapture => {
                let on = self.widget.toggle_capture();
                self.show_toast(if on { "Capture on" } else { "Capture paused" });
            }
            WidgetCommand::ToggleNotifications => {
                let on = self.widget.toggle_notification();
                self.show_toast(if on {
                    "Notifications on"
                } else {
                    "Notifications off"
                });
            }
            WidgetCommand::BlockDomain => {
                let host = self.widget.page().host().to_string();
                if self.widget.block_current_domain() {
                    self.show_toast(format!("Blocked {}", host));
                } else {
                    self.show_toast(format!("{} already blocked", host));
                }
            }
            WidgetCommand::BlockUrl => {
                if self.widget.block_current_url() {
                    self.show_toast("Blocked this URL");
                } else {
                    self.show_toast("URL already blocked");
                }
            }
            WidgetCommand::GoHome => self.go_home(),
            WidgetCommand::OpenQuickChat => {
                self.widget.set_quick_chat_open(true);
                self.modal = Some(Modal::QuickChat);
            }
            WidgetCommand::TestInsightNotification => {
                self.show_notifications(sample_insight_notifications())
            }
            WidgetCommand::TestSummaryNotification => {
                self.show_notifications(sample_summary_notification())
            }
        }
    }

    fn show_notifications(&mut self, items: Vec<crate::widget::NotificationItem>) {
        if !self.widget.show_notification(items) {
            let reason = if self.widget.is_sleeping() {
                "Widget is asleep"
            } else {
                "Notifications are off"
            };
            self.show_toast(reason);
        }
    }

    /// Click-through on notification `index`
    pub fn open_notification(&mut self, index: usize) {
        let Some(outcome) = self.widget.click_notification(index) else {
            return;
        };
        self.focus_content();
        match outcome {
            NotificationOutcome::OpenInsight(insight) => self.open_detail(insight),
            NotificationOutcome::OpenDailyPicks => self.set_active_tab(Tab::DailyPicks),
        }
    }

    pub fn focus_notifications(&mut self) {
        if self.widget.notifications_visible() {
            self.focus = ComponentId::Notifications;
        }
    }

    fn handle_notification_key(&mut self, key: KeyEvent) -> Handled {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.widget.select_prev_notification(),
            KeyCode::Down | KeyCode::Char('j') => self.widget.select_next_notification(),
            KeyCode::Enter => {
                let index = self.widget.selected_notification();
                self.open_notification(index);
            }
            KeyCode::Char('x') => {
                let index = self.widget.selected_notification();
                self.widget.dismiss_notification(index);
            }
            KeyCode::Esc => self.focus_content(),
            _ => return Handled::No,
        }
        if !self.widget.notifications_visible() && self.focus == ComponentId::Notifications {
            self.focus_content();
        }
        Handled::Yes
    }

    /// Point the mascot's eyes at a terminal cell
    pub fn look_at(&mut self, column: u16, row: u16) {
        let Some(area) = self.mascot_area else {
            return;
        };
        let cx = area.x as i32 + area.width as i32 / 2;
        let cy = area.y as i32 + area.height as i32 / 2;
        self.widget.look_at(column as i32 - cx, row as i32 - cy);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Timer events
    // ─────────────────────────────────────────────────────────────────────────

    /// Route a timer event to the component that owns the timer
    pub fn handle_app_event(&mut self, event: AppEvent) {
        tracing::trace!(event = event.name(), "App event");
        let applied = match event {
            AppEvent::ChatReply {
                channel: ChatChannel::View,
                reply,
            } => match self.view.as_mut() {
                Some(ActiveView::Chat(chat)) => chat.on_reply(reply),
                _ => false,
            },
            AppEvent::ChatReply {
                channel: ChatChannel::Quick,
                reply,
            } => self.widget.on_quick_chat_reply(reply),
            AppEvent::NotificationDismiss { generation } => {
                let dismissed = self.widget.on_dismiss_timer(generation);
                if dismissed && self.focus == ComponentId::Notifications {
                    self.focus_content();
                }
                dismissed
            }
            AppEvent::BlinkStart { generation } => self.widget.on_blink_start(generation),
            AppEvent::BlinkEnd { generation } => self.widget.on_blink_end(generation),
            AppEvent::SaveFlashEnd { generation } => match self.view.as_mut() {
                Some(ActiveView::Settings(settings)) => settings.on_save_flash_end(generation),
                _ => false,
            },
        };
        if !applied {
            tracing::trace!(event = event.name(), "Stale event ignored");
        }
    }

    /// Key hints for the status bar
    pub fn focus_hint(&self) -> String {
        let hint = match self.focus {
            ComponentId::Logs => self.logs_panel.focus_hint(),
            ComponentId::Notifications => Some("↑↓ Enter x Esc"),
            _ => self.view.as_ref().map(|v| v.as_view().hint()),
        };
        match hint {
            Some(hint) => format!("{}  ?:help", hint),
            None => "1-5:tabs  ?:help  q:quit".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use crate::store::MemoryStore;
    use crate::tui::modal::{ModalAction, ANIMATION_STEPS};
    use crossterm::event::KeyCode;

    fn app_with_tab(tab: &str) -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let config = Config {
            default_tab: tab.to_string(),
            ..Config::default()
        };
        let prefs = Preferences::load(Box::new(MemoryStore::new()));
        (App::new(&config, prefs, LogBuffer::new(), tx), rx)
    }

    fn press(app: &mut App, code: KeyCode) -> Handled {
        app.dispatch_to_focused(KeyEvent::from(code))
    }

    #[test]
    fn tab_ids_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(Tab::from_id(tab.id()), Some(tab));
        }
        assert_eq!(Tab::from_id("timeline"), None);
        assert_eq!(Tab::from_number(2), Some(Tab::DailyPicks));
        assert_eq!(Tab::from_number(0), None);
        assert_eq!(Tab::from_number(6), None);
    }

    #[test]
    fn tabs_cycle_both_ways() {
        assert_eq!(Tab::Settings.next(), Tab::Insights);
        assert_eq!(Tab::Insights.prev(), Tab::Settings);
        assert_eq!(Tab::Chat.next(), Tab::Knowledge);
    }

    #[tokio::test]
    async fn unknown_tab_id_empties_content_only() {
        let (mut app, _rx) = app_with_tab("insights");
        assert_eq!(app.active_tab(), Some(Tab::Insights));

        app.set_active_tab_id("does-not-exist");
        assert_eq!(app.active_tab(), None);
        assert!(app.view().is_none());
        assert_eq!(press(&mut app, KeyCode::Down), Handled::No);
        // Widget chrome is untouched
        assert!(!app.widget.is_sleeping());

        app.set_active_tab_id("chat");
        assert_eq!(app.active_tab(), Some(Tab::Chat));
    }

    #[tokio::test]
    async fn unknown_default_tab_starts_empty_but_home_works() {
        let (mut app, _rx) = app_with_tab("nope");
        assert_eq!(app.active_tab(), None);
        app.run_widget_command(WidgetCommand::GoHome);
        assert_eq!(app.active_tab(), Some(Tab::Insights));
    }

    #[tokio::test]
    async fn leaving_a_tab_drops_its_state() {
        let (mut app, _rx) = app_with_tab("chat");
        for c in "hello".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        let Some(ActiveView::Chat(chat)) = app.view() else {
            panic!("chat mounted");
        };
        assert_eq!(chat.session().messages().len(), 1);

        app.set_active_tab(Tab::Knowledge);
        app.set_active_tab(Tab::Chat);
        let Some(ActiveView::Chat(chat)) = app.view() else {
            panic!("chat mounted");
        };
        assert!(chat.session().is_empty());
    }

    #[tokio::test]
    async fn detail_close_restores_originating_selection() {
        let (mut app, _rx) = app_with_tab("insights");
        let Some(ActiveView::Insights(view)) = app.view_mut() else {
            panic!("insights mounted");
        };
        assert!(view.select_id("i1"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.modal.as_ref().and_then(Modal::insight).map(|i| i.id.as_str()),
            Some("i1")
        );

        let action = app
            .modal
            .as_mut()
            .map(|m| m.handle_input(KeyEvent::from(KeyCode::Esc)));
        assert_eq!(action, Some(ModalAction::None));
        for _ in 0..ANIMATION_STEPS {
            app.tick();
        }
        assert!(app.modal.is_none());

        let Some(ActiveView::Insights(view)) = app.view() else {
            panic!("insights still mounted");
        };
        assert_eq!(view.selected_insight().map(|i| i.id.as_str()), Some("i1"));
    }

    #[tokio::test]
    async fn summary_notification_goes_to_daily_picks() {
        let (mut app, _rx) = app_with_tab("insights");
        app.run_widget_command(WidgetCommand::TestSummaryNotification);
        app.focus_notifications();
        assert_eq!(app.focus, ComponentId::Notifications);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_tab(), Some(Tab::DailyPicks));
        assert_eq!(app.focus, ComponentId::DailyPicks);
        assert!(app.widget.notifications().is_empty());
    }

    #[tokio::test]
    async fn insight_notification_opens_detail() {
        let (mut app, _rx) = app_with_tab("knowledge");
        app.run_widget_command(WidgetCommand::TestInsightNotification);
        app.open_notification(0);
        assert_eq!(
            app.modal.as_ref().and_then(Modal::insight).map(|i| i.id.as_str()),
            Some("i3")
        );
        assert_eq!(app.active_tab(), Some(Tab::Knowledge));
    }

    #[tokio::test]
    async fn notifications_suppressed_while_paused() {
        let (mut app, _rx) = app_with_tab("insights");
        app.run_widget_command(WidgetCommand::ToggleCapture);
        app.run_widget_command(WidgetCommand::TestInsightNotification);
        assert!(app.widget.notifications().is_empty());
        assert_eq!(
            app.toast.as_ref().map(|t| t.message.as_str()),
            Some("Widget is asleep")
        );
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    fn deliver_all(app: &mut App, rx: &mut mpsc::Receiver<AppEvent>) {
        while let Ok(event) = rx.try_recv() {
            app.handle_app_event(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn quick_chat_answers_every_message() {
        let (mut app, mut rx) = app_with_tab("insights");
        app.widget.quick_chat_mut().input = "hi".to_string();
        assert!(app.widget.submit_quick_chat());
        settle().await;
        tokio::time::advance(std::time::Duration::from_millis(300)).await;
        settle().await;
        app.widget.quick_chat_mut().input = "are you there".to_string();
        assert!(app.widget.submit_quick_chat());
        settle().await;

        tokio::time::advance(std::time::Duration::from_millis(1300)).await;
        settle().await;
        deliver_all(&mut app, &mut rx);
        assert_eq!(app.widget.quick_chat().messages().len(), 3);
        assert!(app.widget.quick_chat().is_typing());

        tokio::time::advance(std::time::Duration::from_millis(300)).await;
        settle().await;
        deliver_all(&mut app, &mut rx);
        let roles: Vec<Role> = app
            .widget
            .quick_chat()
            .messages()
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles, [Role::User, Role::User, Role::Ai, Role::Ai]);
        assert!(!app.widget.quick_chat().is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn chat_view_answers_every_message() {
        let (mut app, mut rx) = app_with_tab("chat");
        for text in ["first", "second"] {
            for c in text.chars() {
                app.dispatch_to_view(KeyEvent::from(KeyCode::Char(c)));
            }
            app.dispatch_to_view(KeyEvent::from(KeyCode::Enter));
            settle().await;
        }

        tokio::time::advance(std::time::Duration::from_millis(1600)).await;
        settle().await;
        deliver_all(&mut app, &mut rx);
        let Some(ActiveView::Chat(chat)) = app.view() else {
            panic!("chat mounted");
        };
        let ai = chat
            .session()
            .messages()
            .iter()
            .filter(|m| m.role == Role::Ai)
            .count();
        assert_eq!(chat.session().messages().len(), 4);
        assert_eq!(ai, 2);
        assert!(!chat.session().is_typing());
    }

    #[tokio::test]
    async fn stale_chat_reply_after_leaving_is_ignored() {
        let (mut app, _rx) = app_with_tab("insights");
        app.handle_app_event(AppEvent::ChatReply {
            channel: ChatChannel::View,
            reply: 1,
        });
        assert_eq!(app.active_tab(), Some(Tab::Insights));
    }
}
