//! Configuration for the dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/lifecontext/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! Command-line flags (`--tab`, `--page`, `--ephemeral`) are applied on top
//! by the CLI module after loading.

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod logging;
mod serialization;
mod timers;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use logging::{FileLogging, LogRotation, LoggingConfig};
pub use timers::{FileTimers, TimerConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under ~/.config
pub const APP_DIR: &str = "lifecontext";

/// Theme used when nothing else is configured
pub const DEFAULT_THEME: &str = "Nebula";

/// Page the widget pretends the user is looking at
pub const DEFAULT_PAGE_URL: &str = "https://github.com/LifeContext/Repo";

/// Tab shown at startup and by the widget's "home" shortcut
pub const DEFAULT_TAB: &str = "insights";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "Nebula", "Daylight", "Nord", or any file in the themes dir
    pub theme: String,

    /// Use theme's background color (true) or terminal's default (false)
    pub use_theme_background: bool,

    /// Tab identifier shown at startup (see `Tab::from_id`)
    pub default_tab: String,

    /// Simulated current page for the floating widget's block/sleep logic
    pub page_url: String,

    /// Override for the preference store file
    pub prefs_path: Option<PathBuf>,

    /// Keep preferences in memory only (runtime flag, never persisted)
    pub ephemeral: bool,

    /// Mock delays and animation timings
    pub timers: TimerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Model API key. Loaded for completeness; nothing in the dashboard calls a model.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            use_theme_background: true,
            default_tab: DEFAULT_TAB.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            prefs_path: None,
            ephemeral: false,
            timers: TimerConfig::default(),
            logging: LoggingConfig::default(),
            api_key: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub use_theme_background: Option<bool>,
    pub default_tab: Option<String>,
    pub page_url: Option<String>,
    pub prefs_path: Option<String>,

    /// Optional [timers] section
    pub timers: Option<FileTimers>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the app directory: ~/.config/lifecontext
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn app_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_DIR))
    }

    /// Get the config file path: ~/.config/lifecontext/config.toml
    pub fn config_path() -> Option<PathBuf> {
        Self::app_dir().map(|p| p.join("config.toml"))
    }

    /// Resolved preference store file: explicit override or ~/.config/lifecontext/prefs.json
    pub fn prefs_file(&self) -> Option<PathBuf> {
        self.prefs_path
            .clone()
            .or_else(|| Self::app_dir().map(|p| p.join("prefs.json")))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        // Config::default().to_toml() is the template
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be parsed is fatal: the process
    /// prints the parser error and exits rather than running on defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_file_config(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Run `lifecontext config --reset` to restore the defaults.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    pub(crate) fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::from_file_config(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    ///
    /// Split out of `from_env` so the precedence rules can be exercised
    /// without touching the process environment.
    pub(crate) fn from_file_config(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let theme = env("LIFECONTEXT_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let use_theme_background = file
            .use_theme_background
            .unwrap_or(defaults.use_theme_background);

        let default_tab = env("LIFECONTEXT_TAB")
            .or(file.default_tab)
            .unwrap_or(defaults.default_tab);

        let page_url = env("LIFECONTEXT_PAGE")
            .or(file.page_url)
            .unwrap_or(defaults.page_url);

        let prefs_path = env("LIFECONTEXT_PREFS")
            .or(file.prefs_path)
            .map(PathBuf::from);

        let timers = TimerConfig::from_file(file.timers);

        let mut logging = LoggingConfig::from_file(file.logging);
        if let Some(level) = env("LIFECONTEXT_LOG_LEVEL") {
            logging.level = level;
        }

        // Env only: keys never belong in a file that gets printed by `config --show`
        let api_key = env("GEMINI_API_KEY").filter(|k| !k.trim().is_empty());

        Self {
            theme,
            use_theme_background,
            default_tab,
            page_url,
            prefs_path,
            ephemeral: false,
            timers,
            logging,
            api_key,
        }
    }

    /// API key with all but the last four characters hidden
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            let visible = chars.len().saturating_sub(4);
            let tail: String = chars[visible..].iter().collect();
            format!("{}{}", "*".repeat(visible.min(8)), tail)
        })
    }
}
