// CLI module - command-line argument parsing and handlers
//
// Running without a subcommand starts the dashboard; the flags override
// the loaded configuration for this run only.
//
// Subcommands:
// - config --show|--path|--reset|--edit
// - prefs --show|--path|--reset

use crate::config::{Config, VERSION};
use crate::prefs::{Preferences, ALL_KEYS};
use crate::store::{FileStore, KeyValueStore};
use crate::theme::Theme;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// LifeContext - personal insight dashboard for the terminal
#[derive(Parser)]
#[command(name = "lifecontext")]
#[command(version = VERSION)]
#[command(about = "Personal insight dashboard for the terminal", long_about = None)]
pub struct Cli {
    /// Tab to open at startup (insights, daily_picks, chat, knowledge, settings)
    #[arg(long)]
    pub tab: Option<String>,

    /// Page URL the floating widget treats as current
    #[arg(long)]
    pub page: Option<String>,

    /// Keep preferences in memory; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,
    },

    /// Inspect or clear the persisted widget preferences
    Prefs {
        /// Print stored preference values
        #[arg(long)]
        show: bool,

        /// Show preference file path
        #[arg(long)]
        path: bool,

        /// Remove every stored preference
        #[arg(long)]
        reset: bool,
    },
}

/// Options that shape a dashboard run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub tab: Option<String>,
    pub page: Option<String>,
    pub ephemeral: bool,
}

impl RunOptions {
    /// Layer the flags over the loaded configuration
    pub fn apply(self, config: &mut Config) {
        if let Some(tab) = self.tab {
            config.default_tab = tab;
        }
        if let Some(page) = self.page {
            config.page_url = page;
        }
        config.ephemeral = self.ephemeral;
    }
}

/// Parse arguments and run any subcommand.
///
/// Returns `None` when a subcommand was handled (exit after), otherwise the
/// options for starting the dashboard.
pub fn handle_cli() -> Option<RunOptions> {
    dispatch(Cli::parse())
}

fn dispatch(cli: Cli) -> Option<RunOptions> {
    match cli.command {
        Some(Commands::Config {
            show,
            path,
            reset,
            edit,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if edit {
                handle_config_edit();
            } else {
                println!("Usage: lifecontext config [--show|--path|--reset|--edit]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
            }
            None
        }
        Some(Commands::Prefs { show, path, reset }) => {
            if path {
                handle_prefs_path();
            } else if show {
                handle_prefs_show();
            } else if reset {
                handle_prefs_reset();
            } else {
                println!("Usage: lifecontext prefs [--show|--path|--reset]");
                println!();
                println!("Options:");
                println!("  --show    Print stored preference values");
                println!("  --path    Show preference file path");
                println!("  --reset   Remove every stored preference");
            }
            None
        }
        None => Some(RunOptions {
            tab: cli.tab,
            page: cli.page,
            ephemeral: cli.ephemeral,
        }),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    if std::io::stderr().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => fail("Could not determine config path"),
    }
}

fn handle_config_show() {
    let config = Config::from_env();
    print!("{}", render_config(&config));
    println!();
    println!("# Available themes: {}", Theme::list_available().join(", "));

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

/// Effective configuration as printed by `config --show`
fn render_config(config: &Config) -> String {
    let prefs = config
        .prefs_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let api_key = config
        .masked_api_key()
        .unwrap_or_else(|| "(not set)".to_string());
    let timers = &config.timers;
    let logging = &config.logging;

    let mut out = String::new();
    out.push_str("# Effective configuration (env > file > defaults)\n\n");
    out.push_str(&format!("theme = {:?}\n", config.theme));
    out.push_str(&format!("use_theme_background = {}\n", config.use_theme_background));
    out.push_str(&format!("default_tab = {:?}\n", config.default_tab));
    out.push_str(&format!("page_url = {:?}\n", config.page_url));
    out.push_str(&format!("prefs_path = {:?}\n", prefs));
    out.push_str(&format!("api_key = {:?}\n", api_key));
    out.push_str("\n[timers]\n");
    out.push_str(&format!("chat_reply_ms = {}\n", timers.chat_reply_ms));
    out.push_str(&format!(
        "notification_dismiss_secs = {}\n",
        timers.notification_dismiss_secs
    ));
    out.push_str(&format!("save_flash_ms = {}\n", timers.save_flash_ms));
    out.push_str(&format!("blink_min_ms = {}\n", timers.blink_min_ms));
    out.push_str(&format!("blink_max_ms = {}\n", timers.blink_max_ms));
    out.push_str(&format!("blink_duration_ms = {}\n", timers.blink_duration_ms));
    out.push_str("\n[logging]\n");
    out.push_str(&format!("level = {:?}\n", logging.level));
    out.push_str(&format!("file_enabled = {}\n", logging.file_enabled));
    out.push_str(&format!("file_dir = {:?}\n", logging.file_dir.display().to_string()));
    out.push_str(&format!("file_rotation = {:?}\n", logging.file_rotation.as_str()));
    out.push_str(&format!("file_prefix = {:?}\n", logging.file_prefix));
    out
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        fail("Could not determine config path");
    };

    if path.exists()
        && !confirm(&format!(
            "Config file exists at {}. Overwrite?",
            path.display()
        ))
    {
        println!("Aborted.");
        return;
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            fail(&format!("Creating directory: {}", e));
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        fail(&format!("Writing config: {}", e));
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_edit() {
    let Some(path) = Config::config_path() else {
        fail("Could not determine config path");
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    match Command::new(&editor).arg(&path).status() {
        Ok(s) if s.success() => {}
        Ok(s) => {
            eprintln!("Editor exited with status: {}", s);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to launch editor '{}': {}", editor, e);
            eprintln!("Set $EDITOR environment variable to your preferred editor");
            std::process::exit(1);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// prefs
// ─────────────────────────────────────────────────────────────────────────────

fn open_prefs_store() -> FileStore {
    match Config::from_env().prefs_file() {
        Some(path) => FileStore::open(path),
        None => fail("Could not determine preference file path"),
    }
}

fn handle_prefs_path() {
    match Config::from_env().prefs_file() {
        Some(path) => println!("{}", path.display()),
        None => fail("Could not determine preference file path"),
    }
}

fn handle_prefs_show() {
    let store = open_prefs_store();
    match render_prefs(&store) {
        Ok(text) => print!("{}", text),
        Err(e) => fail(&format!("{:#}", e)),
    }
    println!();
    println!("# Source: {}", store.path().display());
}

/// Every known key with its stored value, then any foreign keys
fn render_prefs(store: &dyn KeyValueStore) -> anyhow::Result<String> {
    let mut out = String::new();
    for key in ALL_KEYS {
        match store.get(key)? {
            Some(value) => out.push_str(&format!("{} = {}\n", key, value)),
            None => out.push_str(&format!("{} = (default)\n", key)),
        }
    }
    for (key, value) in store.entries()? {
        if !ALL_KEYS.contains(&key.as_str()) {
            out.push_str(&format!("# unknown: {} = {}\n", key, value));
        }
    }
    Ok(out)
}

fn handle_prefs_reset() {
    let store = open_prefs_store();
    let path = store.path().to_path_buf();
    if !path.exists() {
        println!("Nothing stored at {}", path.display());
        return;
    }
    if !confirm(&format!("Clear preferences in {}?", path.display())) {
        println!("Aborted.");
        return;
    }

    Preferences::load(Box::new(store)).reset();
    println!("Preferences cleared: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn bare_invocation_returns_run_options() {
        let cli = Cli::parse_from(["lifecontext", "--tab", "chat", "--ephemeral"]);
        let options = dispatch(cli).expect("run options");
        assert_eq!(options.tab.as_deref(), Some("chat"));
        assert!(options.ephemeral);
        assert_eq!(options.page, None);
    }

    #[test]
    fn run_options_override_config() {
        let mut config = Config::default();
        RunOptions {
            tab: Some("settings".to_string()),
            page: Some("https://example.com/a".to_string()),
            ephemeral: true,
        }
        .apply(&mut config);
        assert_eq!(config.default_tab, "settings");
        assert_eq!(config.page_url, "https://example.com/a");
        assert!(config.ephemeral);

        // Absent flags leave the loaded values alone
        let mut config = Config::default();
        RunOptions::default().apply(&mut config);
        assert_eq!(config.default_tab, "insights");
    }

    #[test]
    fn subcommands_parse() {
        let cli = Cli::parse_from(["lifecontext", "prefs", "--path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Prefs { path: true, .. })
        ));
        let cli = Cli::parse_from(["lifecontext", "config", "--show"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config { show: true, .. })
        ));
    }

    #[test]
    fn config_show_masks_api_key() {
        let config = Config {
            api_key: Some("secret-key-1234".to_string()),
            ..Config::default()
        };
        let text = render_config(&config);
        assert!(text.contains("1234"));
        assert!(!text.contains("secret"));
        assert!(text.contains("[timers]"));
        assert!(text.contains("chat_reply_ms = 1500"));
    }

    #[test]
    fn prefs_show_lists_defaults_and_unknown_keys() {
        let mut store = MemoryStore::new();
        store.set("capture_enabled", "false").unwrap();
        store.set("legacy", "1").unwrap();
        let text = render_prefs(&store).unwrap();
        assert!(text.contains("capture_enabled = false"));
        assert!(text.contains("notifications_enabled = (default)"));
        assert!(text.contains("# unknown: legacy = 1"));
    }
}
