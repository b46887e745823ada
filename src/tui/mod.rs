// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, ticks, timer events)
// - Rendering the UI
// - Layered key dispatch: Modal → editing view → Global → focused component

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod markdown;
pub mod modal;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::prefs::Preferences;
use anyhow::{Context, Result};
use app::{App, Tab};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::{ComponentId, Copyable, Handled, Interactive};
use views::ActiveView;

/// Capacity of the timer event channel
const EVENT_CHANNEL_SIZE: usize = 256;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(config: Config, prefs: Preferences, log_buffer: LogBuffer) -> Result<()> {
    let (tx, mut event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
    let mut app = App::new(&config, prefs, log_buffer, tx);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keys, mouse)
/// 2. The tick interval (animations, toast expiry)
/// 3. Timer events (chat replies, blinks, auto-dismiss, save flash)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => app.tick(),

            Some(event) = event_rx.recv() => app.handle_app_event(event),
        }

        if app.should_quit {
            tracing::info!("Quitting");
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, key) {
        return;
    }

    // Layer 2: a view capturing text sees keys before the global shortcuts
    if app.is_editing() && app.dispatch_to_view(key).was_handled() {
        return;
    }

    // Layer 3: Global keys
    if handle_global_keys(app, key) {
        return;
    }

    // Layer 4: Focused component
    if app.dispatch_to_focused(key) == Handled::No && key.code == KeyCode::Esc {
        // Nothing to clear: step focus back to the content
        app.focus_content();
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    let scroll = match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.look_at(mouse.column, mouse.row);
            return;
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let on_mascot = app.mascot_area.is_some_and(|area| {
                area.contains(ratatui::layout::Position::new(mouse.column, mouse.row))
            });
            if on_mascot && app.modal.is_none() {
                app.modal = Some(Modal::WidgetMenu);
            }
            return;
        }
        MouseEventKind::ScrollUp => KeyCode::Up,
        MouseEventKind::ScrollDown => KeyCode::Down,
        _ => return,
    };

    let key = KeyEvent::new(scroll, KeyModifiers::NONE);
    match app.modal.as_mut() {
        Some(Modal::Detail(overlay)) => {
            overlay.panel.handle_key(key);
        }
        Some(_) => {}
        None => {
            app.dispatch_to_focused(key);
        }
    }
}

/// Handle modal input - returns true if modal absorbed the input
fn handle_modal_input(app: &mut App, key: KeyEvent) -> bool {
    let Some(modal) = app.modal.as_mut() else {
        return false;
    };

    match modal.handle_input(key) {
        ModalAction::None => {}
        ModalAction::Close => {
            if matches!(modal, Modal::QuickChat) {
                app.widget.set_quick_chat_open(false);
            }
            app.modal = None;
        }
        ModalAction::Copy { text, description } => copy(app, &text, &description),
        ModalAction::ToggleSource(index) => {
            if let Some(ActiveView::DailyPicks(daily)) = app.view_mut() {
                daily.toggle_source(index);
            }
        }
        ModalAction::Widget(command) => {
            app.modal = None;
            app.run_widget_command(command);
        }
        ModalAction::QuickChatInput(c) => app.widget.quick_chat_mut().input.push(c),
        ModalAction::QuickChatBackspace => {
            app.widget.quick_chat_mut().input.pop();
        }
        ModalAction::QuickChatSubmit => {
            app.widget.submit_quick_chat();
        }
    }

    true
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => {
                app.focus_notifications();
                true
            }
            _ => false,
        };
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(Modal::Help),
        KeyCode::Char('m') => app.modal = Some(Modal::WidgetMenu),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Char('L') => {
            if !app.show_logs {
                app.toggle_logs();
            }
            app.focus = ComponentId::Logs;
        }
        KeyCode::Char('y') if app.focus == ComponentId::Logs => {
            if let Some(text) = app.logs_panel.copy_text() {
                let description = app.logs_panel.copy_description();
                copy(app, &text, &description);
            }
        }
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(tab) = c.to_digit(10).and_then(Tab::from_number) {
                app.set_active_tab(tab);
            }
        }
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        _ => return false,
    }
    true
}

fn copy(app: &mut App, text: &str, description: &str) {
    match clipboard::copy_to_clipboard(text) {
        Ok(()) => app.show_toast(format!("✓ Copied {}", description)),
        Err(e) => {
            tracing::warn!(error = %e, "Clipboard copy failed");
            app.show_toast("✗ Failed to copy");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn app() -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let prefs = Preferences::load(Box::new(MemoryStore::new()));
        (App::new(&Config::default(), prefs, LogBuffer::new(), tx), rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::from(code));
    }

    #[tokio::test]
    async fn number_keys_switch_tabs() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.active_tab(), Some(Tab::Knowledge));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab(), Some(Tab::Settings));
    }

    #[tokio::test]
    async fn typing_in_chat_does_not_trigger_globals() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('1'));
        assert!(!app.should_quit);
        assert_eq!(app.active_tab(), Some(Tab::Chat));
        let Some(ActiveView::Chat(chat)) = app.view() else {
            panic!("chat mounted");
        };
        assert_eq!(chat.session().input, "q1");

        // Leaving edit mode hands keys back to the global layer
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.active_tab(), Some(Tab::Insights));
    }

    #[tokio::test]
    async fn modal_absorbs_keys() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab(), Some(Tab::Insights));
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
    }

    #[tokio::test]
    async fn widget_menu_runs_command_and_closes() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('c'));
        assert!(app.modal.is_none());
        assert!(!app.widget.prefs().capture_enabled());
        assert!(app.widget.is_sleeping());
    }

    #[tokio::test]
    async fn quick_chat_collects_input() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('t'));
        assert!(matches!(app.modal, Some(Modal::QuickChat)));
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.widget.quick_chat().messages().len(), 1);
        assert!(app.widget.quick_chat().is_typing());

        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(!app.widget.is_quick_chat_open());
    }

    #[tokio::test]
    async fn sources_modal_toggles_daily_source() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('f'));
        assert!(matches!(app.modal, Some(Modal::Sources { .. })));
        press(&mut app, KeyCode::Char(' '));
        let Some(ActiveView::DailyPicks(daily)) = app.view() else {
            panic!("daily picks mounted");
        };
        assert!(!daily.sources()[0].active);
    }
}
