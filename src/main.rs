// LifeContext - personal insight dashboard for the terminal
//
// Everything on screen is mock content: an insight timeline, daily picks,
// a scripted chat, a knowledge base and a settings form. The only state
// that outlives a run is the floating widget's preference flags.
//
// Architecture:
// - TUI (ratatui): view router, navigation rail, views, overlays
// - Floating widget: capture/notification flags, blocked lists, notifications
// - Store: key-value persistence behind a trait (JSON file or memory)
// - Schedule: cancellable timers that post events back to the UI loop
// - Event system: one mpsc channel from timers into the UI loop

mod chat;
mod cli;
mod config;
mod data;
mod events;
mod logging;
mod page;
mod prefs;
mod schedule;
mod store;
mod theme;
mod tui;
mod widget;

use anyhow::Result;
use config::{Config, LogRotation, LoggingConfig, VERSION};
use logging::{LogBuffer, TuiLogLayer};
use prefs::Preferences;
use store::{FileStore, KeyValueStore, MemoryStore};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Subcommands (config, prefs) run and exit
    let Some(options) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Extract bundled themes on first run
    theme::ensure_themes_extracted();

    let mut config = Config::from_env();
    options.apply(&mut config);

    // Logs go to the in-app panel; stdout belongs to the terminal UI.
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let _file_guard = init_tracing(&config.logging, &log_buffer);

    tracing::info!(
        version = VERSION,
        tab = %config.default_tab,
        page = %config.page_url,
        ephemeral = config.ephemeral,
        "LifeContext starting"
    );
    if config.api_key.is_some() {
        tracing::debug!("API key present (unused)");
    }

    let prefs = Preferences::load(open_store(&config));

    tui::run_tui(config, prefs, log_buffer).await
}

/// Install the global subscriber
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(logging: &LoggingConfig, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("lifecontext={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()));

    if !logging.file_enabled {
        registry.init();
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        registry.init();
        return None;
    }

    let file_appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread; JSON lines for later parsing
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    registry
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    Some(guard)
}

/// Preference store for this run: memory when ephemeral, else the JSON file
fn open_store(config: &Config) -> Box<dyn KeyValueStore> {
    if config.ephemeral {
        tracing::info!("Ephemeral run, preferences stay in memory");
        return Box::new(MemoryStore::new());
    }
    match config.prefs_file() {
        Some(path) => Box::new(FileStore::open(path)),
        None => {
            tracing::warn!("No home directory, preferences stay in memory");
            Box::new(MemoryStore::new())
        }
    }
}
