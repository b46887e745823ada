//! Configuration tests
//!
//! The round-trip tests guard `to_toml()`: when a field is added to Config
//! but forgotten in the template, the parsed value falls back to the default
//! and the comparison fails.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.theme = "Nord".to_string();
    config.use_theme_background = false;
    config.default_tab = "daily_picks".to_string();
    config.page_url = "https://example.com/article".to_string();
    config.prefs_path = Some(PathBuf::from("/tmp/lc-prefs.json"));
    config.timers.chat_reply_ms = 200;
    config.timers.notification_dismiss_secs = 3;
    config.logging.level = "debug".to_string();
    config.logging.file_rotation = LogRotation::Hourly;

    let file = Config::parse_file_config(&config.to_toml()).expect("template parses");
    let reloaded = Config::from_file_config(file, no_env);

    assert_eq!(reloaded.theme, "Nord");
    assert!(!reloaded.use_theme_background);
    assert_eq!(reloaded.default_tab, "daily_picks");
    assert_eq!(reloaded.page_url, "https://example.com/article");
    assert_eq!(reloaded.prefs_path, Some(PathBuf::from("/tmp/lc-prefs.json")));
    assert_eq!(reloaded.timers, config.timers);
    assert_eq!(reloaded.logging.level, "debug");
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file_config("theme = \"Daylight\"\ndefault_tab = \"chat\"\n")
        .expect("valid toml");

    let env: HashMap<&str, &str> = [("LIFECONTEXT_THEME", "Nord"), ("LIFECONTEXT_LOG_LEVEL", "trace")]
        .into_iter()
        .collect();
    let config = Config::from_file_config(file, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.theme, "Nord");
    assert_eq!(config.default_tab, "chat");
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = Config::parse_file_config("").expect("empty toml is valid");
    let config = Config::from_file_config(file, no_env);
    let defaults = Config::default();

    assert_eq!(config.theme, defaults.theme);
    assert_eq!(config.default_tab, DEFAULT_TAB);
    assert_eq!(config.page_url, DEFAULT_PAGE_URL);
    assert_eq!(config.timers, TimerConfig::default());
    assert!(config.api_key.is_none());
}

#[test]
fn test_partial_timers_section() {
    let file = Config::parse_file_config("[timers]\nchat_reply_ms = 10\n").expect("valid toml");
    let config = Config::from_file_config(file, no_env);

    assert_eq!(config.timers.chat_reply_ms, 10);
    assert_eq!(config.timers.notification_dismiss_secs, 15);
}

#[test]
fn test_invalid_file_is_an_error() {
    assert!(Config::parse_file_config("theme = Nebula").is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Misc
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_api_key_is_masked() {
    let env: HashMap<&str, &str> = [("GEMINI_API_KEY", "abcdefghijkl1234")].into_iter().collect();
    let config = Config::from_file_config(FileConfig::default(), |key| {
        env.get(key).map(|v| v.to_string())
    });

    let masked = config.masked_api_key().expect("key present");
    assert!(masked.ends_with("1234"));
    assert!(!masked.contains("abcd"));
}

#[test]
fn test_blank_api_key_is_ignored() {
    let config = Config::from_file_config(FileConfig::default(), |key| {
        (key == "GEMINI_API_KEY").then(|| "   ".to_string())
    });
    assert!(config.api_key.is_none());
}

#[test]
fn test_blink_range_is_ordered() {
    let timers = TimerConfig {
        blink_min_ms: 5000,
        blink_max_ms: 1000,
        ..TimerConfig::default()
    };
    let (lo, hi) = timers.blink_range();
    assert!(lo <= hi);
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}
