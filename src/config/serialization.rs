//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to a commented TOML file
    pub fn to_toml(&self) -> String {
        let prefs_path = match &self.prefs_path {
            Some(path) => format!("prefs_path = {:?}", path.display().to_string()),
            None => "# prefs_path = \"~/.config/lifecontext/prefs.json\"".to_string(),
        };

        format!(
            r#"# lifecontext configuration

# Theme: Nebula, Daylight, Nord, or any .toml in ~/.config/lifecontext/themes
theme = "{theme}"

# Use theme's background color (true) or terminal's default (false)
use_theme_background = {use_bg}

# Tab shown at startup: insights, daily_picks, chat, knowledge, settings
default_tab = "{tab}"

# Page the floating widget treats as "current" for blocking and sleep
page_url = "{page}"

# Preference store (capture/notification flags, blocked lists)
{prefs_path}

# Mock delays and animation timings
[timers]
chat_reply_ms = {chat_reply}
notification_dismiss_secs = {dismiss}
save_flash_ms = {save_flash}
blink_min_ms = {blink_min}
blink_max_ms = {blink_max}
blink_duration_ms = {blink_duration}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the in-app log panel)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            theme = self.theme,
            use_bg = self.use_theme_background,
            tab = self.default_tab,
            page = self.page_url,
            prefs_path = prefs_path,
            chat_reply = self.timers.chat_reply_ms,
            dismiss = self.timers.notification_dismiss_secs,
            save_flash = self.timers.save_flash_ms,
            blink_min = self.timers.blink_min_ms,
            blink_max = self.timers.blink_max_ms,
            blink_duration = self.timers.blink_duration_ms,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
