//! Interactive trait for components that handle keyboard input

use super::{Component, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};

/// Whether a component consumed a key
///
/// `No` lets the key bubble up to App's fallback handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Components that take keyboard input while focused
///
/// ```text
/// KeyEvent → Modal → Global keys → focused component → Handled::No → dropped
/// ```
pub trait Interactive: Component {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Key hints shown in the status bar while focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}

/// Standard scroll keys for anything Interactive and Scrollable
pub trait ScrollKeys: Interactive + Scrollable {
    /// Up/Down/j/k, PageUp/PageDown, Home/End and g/G
    fn handle_scroll_keys(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}

impl<T: Interactive + Scrollable> ScrollKeys for T {}
