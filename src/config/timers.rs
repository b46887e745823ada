//! Mock delays and animation timings
//!
//! Every scheduled task in the dashboard reads its delay from here so the
//! defaults live in one place and tests can shorten them.

use serde::Deserialize;
use std::time::Duration;

/// Timer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    /// Delay before the scripted chat reply lands
    pub chat_reply_ms: u64,
    /// Notification panel auto-dismiss
    pub notification_dismiss_secs: u64,
    /// How long the settings "saved" confirmation stays up
    pub save_flash_ms: u64,
    /// Mascot blink interval range
    pub blink_min_ms: u64,
    pub blink_max_ms: u64,
    /// How long the eyes stay shut during a blink
    pub blink_duration_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            chat_reply_ms: 1500,
            notification_dismiss_secs: 15,
            save_flash_ms: 1500,
            blink_min_ms: 2000,
            blink_max_ms: 6000,
            blink_duration_ms: 150,
        }
    }
}

impl TimerConfig {
    pub fn chat_reply(&self) -> Duration {
        Duration::from_millis(self.chat_reply_ms)
    }

    pub fn notification_dismiss(&self) -> Duration {
        Duration::from_secs(self.notification_dismiss_secs)
    }

    pub fn save_flash(&self) -> Duration {
        Duration::from_millis(self.save_flash_ms)
    }

    pub fn blink_duration(&self) -> Duration {
        Duration::from_millis(self.blink_duration_ms)
    }

    /// Blink interval bounds, ordered even if the file swapped them
    pub fn blink_range(&self) -> (Duration, Duration) {
        let lo = self.blink_min_ms.min(self.blink_max_ms);
        let hi = self.blink_min_ms.max(self.blink_max_ms);
        (Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

/// Timer settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTimers {
    pub chat_reply_ms: Option<u64>,
    pub notification_dismiss_secs: Option<u64>,
    pub save_flash_ms: Option<u64>,
    pub blink_min_ms: Option<u64>,
    pub blink_max_ms: Option<u64>,
    pub blink_duration_ms: Option<u64>,
}

impl TimerConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileTimers>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            chat_reply_ms: file.chat_reply_ms.unwrap_or(defaults.chat_reply_ms),
            notification_dismiss_secs: file
                .notification_dismiss_secs
                .unwrap_or(defaults.notification_dismiss_secs),
            save_flash_ms: file.save_flash_ms.unwrap_or(defaults.save_flash_ms),
            blink_min_ms: file.blink_min_ms.unwrap_or(defaults.blink_min_ms),
            blink_max_ms: file.blink_max_ms.unwrap_or(defaults.blink_max_ms),
            blink_duration_ms: file
                .blink_duration_ms
                .unwrap_or(defaults.blink_duration_ms),
        }
    }
}
