//! Floating widget: preference toggles, notifications, mascot, quick chat
//!
//! The widget is always present over whatever view is active. It owns the
//! [`Preferences`] (loaded once, written through on every toggle) and three
//! timers: the notification auto-dismiss, the mascot blink cycle and the quick
//! chat's reply. Dropping the widget aborts all of them.
//!
//! "Sleeping" is derived, never stored: capture disabled, or the current page
//! blocked. It changes the mascot face and hides notifications.

mod mascot;
mod notification;

pub use mascot::{eye_offset, Mascot, MascotFace};
pub use notification::{
    sample_insight_notifications, sample_summary_notification, NotificationItem,
    NotificationOutcome,
};

use crate::chat::ChatSession;
use crate::config::TimerConfig;
use crate::events::{AppEvent, ChatChannel};
use crate::page::PageContext;
use crate::prefs::Preferences;
use crate::schedule::Timer;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
pub struct FloatingWidget {
    prefs: Preferences,
    page: PageContext,
    tx: mpsc::Sender<AppEvent>,

    notifications: Vec<NotificationItem>,
    selected: usize,
    dismiss_after: Duration,
    dismiss_timer: Timer,

    mascot: Mascot,

    quick_chat: ChatSession,
    quick_chat_open: bool,
}

impl FloatingWidget {
    /// Build the widget and start the blink cycle
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        prefs: Preferences,
        page: PageContext,
        timers: &TimerConfig,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let mut widget = Self {
            prefs,
            page,
            tx,
            notifications: Vec::new(),
            selected: 0,
            dismiss_after: timers.notification_dismiss(),
            dismiss_timer: Timer::new(),
            mascot: Mascot::new(timers),
            quick_chat: ChatSession::new(ChatChannel::Quick, timers.chat_reply()),
            quick_chat_open: false,
        };
        let sleeping = widget.is_sleeping();
        widget.mascot.reschedule(sleeping, &widget.tx);
        widget
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn page(&self) -> &PageContext {
        &self.page
    }

    pub fn toggle_capture(&mut self) -> bool {
        let was_sleeping = self.is_sleeping();
        let enabled = self.prefs.toggle_capture();
        self.sleep_state_changed(was_sleeping);
        enabled
    }

    pub fn toggle_notification(&mut self) -> bool {
        self.prefs.toggle_notifications()
    }

    /// Block the current page's host; false if it was already blocked
    pub fn block_current_domain(&mut self) -> bool {
        let was_sleeping = self.is_sleeping();
        let host = self.page.host().to_string();
        let added = self.prefs.block_domain(&host);
        self.sleep_state_changed(was_sleeping);
        added
    }

    /// Block the current page's URL; false if it was already blocked
    pub fn block_current_url(&mut self) -> bool {
        let was_sleeping = self.is_sleeping();
        let url = self.page.url().to_string();
        let added = self.prefs.block_url(&url);
        self.sleep_state_changed(was_sleeping);
        added
    }

    pub fn is_page_blocked(&self) -> bool {
        self.prefs.is_page_blocked(&self.page)
    }

    pub fn is_sleeping(&self) -> bool {
        !self.prefs.capture_enabled() || self.is_page_blocked()
    }

    fn sleep_state_changed(&mut self, was_sleeping: bool) {
        let sleeping = self.is_sleeping();
        if sleeping != was_sleeping {
            tracing::debug!(sleeping, "Widget sleep state changed");
            self.mascot.reschedule(sleeping, &self.tx);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the queue and (re)start the auto-dismiss window
    ///
    /// Ignored while the widget sleeps or notifications are off.
    pub fn show_notification(&mut self, items: Vec<NotificationItem>) -> bool {
        if self.is_sleeping() || !self.prefs.notifications_enabled() {
            tracing::debug!("Notification suppressed");
            return false;
        }
        if items.is_empty() {
            self.clear_notifications();
            return false;
        }

        self.notifications = items;
        self.selected = 0;
        let generation = self.dismiss_timer.schedule(self.dismiss_after, &self.tx, |generation| {
            AppEvent::NotificationDismiss { generation }
        });
        tracing::debug!(
            count = self.notifications.len(),
            generation,
            "Notifications shown"
        );
        true
    }

    pub fn notifications(&self) -> &[NotificationItem] {
        &self.notifications
    }

    /// Panel is drawn only while awake with notifications enabled
    pub fn notifications_visible(&self) -> bool {
        !self.notifications.is_empty()
            && !self.is_sleeping()
            && self.prefs.notifications_enabled()
    }

    pub fn is_dismiss_pending(&self) -> bool {
        self.dismiss_timer.is_pending()
    }

    pub fn selected_notification(&self) -> usize {
        self.selected
    }

    pub fn select_next_notification(&mut self) {
        if !self.notifications.is_empty() {
            self.selected = (self.selected + 1).min(self.notifications.len() - 1);
        }
    }

    pub fn select_prev_notification(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Click-through: cancels the timer, clears the queue, reports where to go
    pub fn click_notification(&mut self, index: usize) -> Option<NotificationOutcome> {
        if index >= self.notifications.len() {
            return None;
        }
        let item = self.notifications.swap_remove(index);
        self.clear_notifications();
        Some(item.into())
    }

    /// Remove one item; the timer stops once the queue is empty
    pub fn dismiss_notification(&mut self, index: usize) {
        if index >= self.notifications.len() {
            return;
        }
        self.notifications.remove(index);
        if self.notifications.is_empty() {
            self.clear_notifications();
        } else {
            self.selected = self.selected.min(self.notifications.len() - 1);
        }
    }

    pub fn on_dismiss_timer(&mut self, generation: u64) -> bool {
        if !self.dismiss_timer.fire(generation) {
            return false;
        }
        tracing::debug!("Notifications auto-dismissed");
        self.notifications.clear();
        self.selected = 0;
        true
    }

    fn clear_notifications(&mut self) {
        self.dismiss_timer.cancel();
        self.notifications.clear();
        self.selected = 0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mascot
    // ─────────────────────────────────────────────────────────────────────────

    pub fn face(&self) -> MascotFace {
        self.mascot.face(self.is_sleeping())
    }

    pub fn look_at(&mut self, dx: i32, dy: i32) {
        self.mascot.look_at(dx, dy);
    }

    pub fn on_blink_start(&mut self, generation: u64) -> bool {
        self.mascot.on_blink_start(generation, &self.tx)
    }

    pub fn on_blink_end(&mut self, generation: u64) -> bool {
        self.mascot.on_blink_end(generation, &self.tx)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Quick chat
    // ─────────────────────────────────────────────────────────────────────────

    pub fn quick_chat(&self) -> &ChatSession {
        &self.quick_chat
    }

    pub fn quick_chat_mut(&mut self) -> &mut ChatSession {
        &mut self.quick_chat
    }

    pub fn is_quick_chat_open(&self) -> bool {
        self.quick_chat_open
    }

    pub fn set_quick_chat_open(&mut self, open: bool) {
        self.quick_chat_open = open;
    }

    pub fn submit_quick_chat(&mut self) -> bool {
        self.quick_chat.submit(&self.tx)
    }

    pub fn on_quick_chat_reply(&mut self, reply: u64) -> bool {
        self.quick_chat.on_reply(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    fn widget(tx: mpsc::Sender<AppEvent>) -> FloatingWidget {
        let prefs = Preferences::load(Box::new(MemoryStore::new()));
        let page = PageContext::parse("https://example.com/docs");
        FloatingWidget::new(prefs, page, &TimerConfig::default(), tx)
    }

    fn dismiss_events(rx: &mut mpsc::Receiver<AppEvent>) -> Vec<u64> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::NotificationDismiss { generation } = event {
                out.push(generation);
            }
        }
        out
    }

    #[tokio::test]
    async fn blocking_domain_puts_widget_to_sleep() {
        let (tx, _rx) = mpsc::channel(16);
        let mut w = widget(tx);
        assert!(!w.is_sleeping());

        assert!(w.block_current_domain());
        assert!(!w.block_current_domain(), "second block is a no-op");
        assert_eq!(w.prefs().blocked_domains(), ["example.com".to_string()]);
        assert!(w.is_page_blocked());
        assert!(w.is_sleeping());
        assert_eq!(w.face(), MascotFace::Asleep);
    }

    #[tokio::test]
    async fn capture_off_sleeps_and_double_toggle_restores() {
        let (tx, _rx) = mpsc::channel(16);
        let mut w = widget(tx);
        assert!(!w.toggle_capture());
        assert!(w.is_sleeping());
        assert!(w.toggle_capture());
        assert!(!w.is_sleeping());
    }

    #[tokio::test]
    async fn sleeping_suppresses_notifications() {
        let (tx, _rx) = mpsc::channel(16);
        let mut w = widget(tx);
        w.toggle_capture();
        assert!(!w.show_notification(sample_insight_notifications()));
        assert!(!w.notifications_visible());
        assert!(!w.is_dismiss_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn second_show_resets_dismiss_timer() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut w = widget(tx);

        assert!(w.show_notification(sample_insight_notifications()));
        settle().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;

        assert!(w.show_notification(sample_summary_notification()));
        settle().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        settle().await;
        assert!(dismiss_events(&mut rx).is_empty(), "first window was reset");
        assert!(w.notifications_visible());

        tokio::time::advance(Duration::from_secs(6)).await;
        settle().await;
        let fired = dismiss_events(&mut rx);
        assert_eq!(fired.len(), 1, "exactly one auto-dismiss");
        assert!(w.on_dismiss_timer(fired[0]));
        assert!(w.notifications().is_empty());
    }

    #[tokio::test]
    async fn clicking_insight_opens_it_and_cancels_timer() {
        let (tx, _rx) = mpsc::channel(16);
        let mut w = widget(tx);
        w.show_notification(sample_insight_notifications());
        assert!(w.is_dismiss_pending());

        let outcome = w.click_notification(0).expect("item exists");
        let NotificationOutcome::OpenInsight(insight) = outcome else {
            panic!("expected insight outcome");
        };
        assert_eq!(insight.id, "i3");
        assert!(!w.is_dismiss_pending());
        assert!(w.notifications().is_empty());
    }

    #[tokio::test]
    async fn clicking_summary_goes_to_daily_picks() {
        let (tx, _rx) = mpsc::channel(16);
        let mut w = widget(tx);
        w.show_notification(sample_summary_notification());
        assert_eq!(
            w.click_notification(0),
            Some(NotificationOutcome::OpenDailyPicks)
        );
        assert_eq!(w.click_notification(0), None);
    }

    #[tokio::test]
    async fn dismissing_last_item_stops_timer() {
        let (tx, _rx) = mpsc::channel(16);
        let mut w = widget(tx);
        w.show_notification(sample_insight_notifications());
        w.select_next_notification();
        assert_eq!(w.selected_notification(), 1);

        w.dismiss_notification(1);
        assert_eq!(w.selected_notification(), 0);
        assert!(w.is_dismiss_pending());

        w.dismiss_notification(0);
        assert!(!w.is_dismiss_pending());
    }
}
