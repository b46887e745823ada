// Events that flow from scheduled timers back to the TUI event loop
//
// Every timer in the dashboard sends one of these when it expires. The loop
// routes each event to the component that owns the timer, which checks the
// generation (or, for chat replies, the reply id) before acting on it.

/// Which chat session a scripted reply belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatChannel {
    /// The full-page Chat view
    View,
    /// The widget's quick chat overlay
    Quick,
}

/// Main event type delivered on the app channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Scripted AI reply is due; `reply` identifies the message it answers
    ChatReply { channel: ChatChannel, reply: u64 },

    /// Notification panel auto-dismiss window elapsed
    NotificationDismiss { generation: u64 },

    /// Mascot should close its eyes
    BlinkStart { generation: u64 },

    /// Mascot blink is over
    BlinkEnd { generation: u64 },

    /// Settings "saved" confirmation should disappear
    SaveFlashEnd { generation: u64 },
}

impl AppEvent {
    /// Short name used in debug logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatReply { .. } => "chat_reply",
            Self::NotificationDismiss { .. } => "notification_dismiss",
            Self::BlinkStart { .. } => "blink_start",
            Self::BlinkEnd { .. } => "blink_end",
            Self::SaveFlashEnd { .. } => "save_flash_end",
        }
    }
}
