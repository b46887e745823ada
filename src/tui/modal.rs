// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App holds Option<Modal>; while one is open it receives every key, and App
// executes whatever ModalAction comes back.

use crate::data::Insight;
use crate::tui::components::DetailPanel;
use crate::tui::traits::{Copyable, Interactive};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Ticks the detail overlay takes to grow to full size (and to shrink back)
pub const ANIMATION_STEPS: u8 = 3;

/// Widget menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetCommand {
    ToggleCapture,
    ToggleNotifications,
    BlockDomain,
    BlockUrl,
    GoHome,
    OpenQuickChat,
    TestInsightNotification,
    TestSummaryNotification,
}

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    /// Input consumed, nothing for App to do
    None,
    /// Remove the modal
    Close,
    /// Put text on the clipboard; description goes into the toast
    Copy { text: String, description: String },
    /// Flip a Daily Picks feed source
    ToggleSource(usize),
    /// Run a widget menu command (the menu closes)
    Widget(WidgetCommand),
    /// Quick chat input editing
    QuickChatInput(char),
    QuickChatBackspace,
    QuickChatSubmit,
}

/// Open/close animation of the detail overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Growing; step out of ANIMATION_STEPS
    Opening(u8),
    Open,
    /// Shrinking; removed once it reaches zero
    Closing(u8),
}

impl Phase {
    /// Panel size as a fraction of its full size
    pub fn scale(&self) -> f32 {
        match self {
            Phase::Opening(step) | Phase::Closing(step) => *step as f32 / ANIMATION_STEPS as f32,
            Phase::Open => 1.0,
        }
    }
}

/// Insight detail overlay: the panel plus its animation phase
#[derive(Debug)]
pub struct DetailOverlay {
    pub panel: DetailPanel,
    pub phase: Phase,
}

impl DetailOverlay {
    pub fn new(insight: Insight) -> Self {
        tracing::debug!(id = %insight.id, "Detail overlay opening");
        Self {
            panel: DetailPanel::new(insight),
            phase: Phase::Opening(1),
        }
    }

    /// Start closing from the current size
    pub fn close(&mut self) {
        self.phase = match self.phase {
            Phase::Opening(step) => Phase::Closing(step),
            Phase::Open => Phase::Closing(ANIMATION_STEPS - 1),
            closing => closing,
        };
    }

    /// Advance the animation; true once the overlay has fully closed
    pub fn tick(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Opening(step) if step + 1 >= ANIMATION_STEPS => Phase::Open,
            Phase::Opening(step) => Phase::Opening(step + 1),
            Phase::Open => Phase::Open,
            Phase::Closing(step) => Phase::Closing(step.saturating_sub(1)),
        };
        self.phase == Phase::Closing(0)
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.phase, Phase::Closing(_))
    }
}

/// Available modal types
#[derive(Debug)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Long-form view of one insight
    Detail(Box<DetailOverlay>),
    /// Daily Picks "Customize Sources"
    Sources { selected: usize, count: usize },
    /// Floating widget quick actions
    WidgetMenu,
    /// Floating quick chat backed by the widget's session
    QuickChat,
}

impl Modal {
    pub fn detail(insight: Insight) -> Self {
        Modal::Detail(Box::new(DetailOverlay::new(insight)))
    }

    pub fn sources(count: usize) -> Self {
        Modal::Sources { selected: 0, count }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyEvent) -> ModalAction {
        match self {
            Modal::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },

            Modal::Detail(overlay) => {
                // Closing swallows everything until it is gone
                if overlay.is_closing() {
                    return ModalAction::None;
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        overlay.close();
                        ModalAction::None
                    }
                    KeyCode::Char('y') => match overlay.panel.copy_text() {
                        Some(text) => ModalAction::Copy {
                            text,
                            description: overlay.panel.copy_description(),
                        },
                        None => ModalAction::None,
                    },
                    _ => {
                        overlay.panel.handle_key(key);
                        ModalAction::None
                    }
                }
            }

            Modal::Sources { selected, count } => match key.code {
                KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => {
                    *selected = selected.saturating_sub(1);
                    ModalAction::None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if *selected + 1 < *count {
                        *selected += 1;
                    }
                    ModalAction::None
                }
                KeyCode::Enter | KeyCode::Char(' ') => ModalAction::ToggleSource(*selected),
                _ => ModalAction::None,
            },

            Modal::WidgetMenu => {
                let command = match key.code {
                    KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => {
                        return ModalAction::Close
                    }
                    KeyCode::Char('c') => WidgetCommand::ToggleCapture,
                    KeyCode::Char('n') => WidgetCommand::ToggleNotifications,
                    KeyCode::Char('d') => WidgetCommand::BlockDomain,
                    KeyCode::Char('u') => WidgetCommand::BlockUrl,
                    KeyCode::Char('h') => WidgetCommand::GoHome,
                    KeyCode::Char('t') => WidgetCommand::OpenQuickChat,
                    KeyCode::Char('i') => WidgetCommand::TestInsightNotification,
                    KeyCode::Char('s') => WidgetCommand::TestSummaryNotification,
                    _ => return ModalAction::None,
                };
                ModalAction::Widget(command)
            }

            Modal::QuickChat => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => ModalAction::QuickChatSubmit,
                KeyCode::Backspace => ModalAction::QuickChatBackspace,
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    ModalAction::QuickChatInput(c)
                }
                _ => ModalAction::None,
            },
        }
    }

    /// Advance animations; true when the modal should be removed
    pub fn tick(&mut self) -> bool {
        match self {
            Modal::Detail(overlay) => overlay.tick(),
            _ => false,
        }
    }

    /// The insight shown, if this is a detail overlay
    pub fn insight(&self) -> Option<&Insight> {
        match self {
            Modal::Detail(overlay) => Some(overlay.panel.insight()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{timeline, find_insight};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn i1() -> Insight {
        let entries = timeline::dashboard_entries();
        find_insight(&entries, "i1").cloned().expect("i1")
    }

    #[test]
    fn detail_opens_then_closes_over_ticks() {
        let mut modal = Modal::detail(i1());
        let Modal::Detail(ref overlay) = modal else {
            unreachable!()
        };
        assert_eq!(overlay.phase, Phase::Opening(1));

        assert!(!modal.tick());
        assert!(!modal.tick());
        let Modal::Detail(ref overlay) = modal else {
            unreachable!()
        };
        assert_eq!(overlay.phase, Phase::Open);

        assert_eq!(modal.handle_input(key(KeyCode::Esc)), ModalAction::None);
        assert!(!modal.tick());
        assert!(modal.tick(), "fully closed");
    }

    #[test]
    fn closing_detail_ignores_input() {
        let mut modal = Modal::detail(i1());
        modal.handle_input(key(KeyCode::Esc));
        assert_eq!(modal.handle_input(key(KeyCode::Char('y'))), ModalAction::None);
    }

    #[test]
    fn detail_copy_returns_markdown() {
        let mut modal = Modal::detail(i1());
        let ModalAction::Copy { text, .. } = modal.handle_input(key(KeyCode::Char('y'))) else {
            panic!("expected copy");
        };
        assert_eq!(text, i1().detail_markdown());
    }

    #[test]
    fn sources_selection_is_bounded() {
        let mut modal = Modal::sources(2);
        modal.handle_input(key(KeyCode::Down));
        modal.handle_input(key(KeyCode::Down));
        assert_eq!(
            modal.handle_input(key(KeyCode::Char(' '))),
            ModalAction::ToggleSource(1)
        );
        assert_eq!(modal.handle_input(key(KeyCode::Char('f'))), ModalAction::Close);
    }

    #[test]
    fn widget_menu_maps_keys() {
        let mut modal = Modal::WidgetMenu;
        assert_eq!(
            modal.handle_input(key(KeyCode::Char('d'))),
            ModalAction::Widget(WidgetCommand::BlockDomain)
        );
        assert_eq!(modal.handle_input(key(KeyCode::Char('z'))), ModalAction::None);
    }

    #[test]
    fn quick_chat_takes_text() {
        let mut modal = Modal::QuickChat;
        assert_eq!(
            modal.handle_input(key(KeyCode::Char('q'))),
            ModalAction::QuickChatInput('q')
        );
        assert_eq!(modal.handle_input(key(KeyCode::Enter)), ModalAction::QuickChatSubmit);
    }
}
