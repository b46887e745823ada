//! Scrollable and Selectable traits
//!
//! Components own a `ScrollState` and expose it here; the default methods
//! give every scrollable panel the same key behaviour.

use super::Component;
use crate::tui::scroll::ScrollState;

/// Components with more content than fits their viewport
pub trait Scrollable: Component {
    fn scroll_state(&self) -> &ScrollState;

    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }
}

/// Scrollable content made of selectable items
///
/// A text body scrolls without selecting, hence the separate trait.
pub trait Selectable: Scrollable {
    fn selected_index(&self) -> Option<usize>;

    fn select(&mut self, index: usize);

    fn item_count(&self) -> usize;

    /// Move down one item, selecting the first when nothing is selected
    fn select_next(&mut self) {
        match self.selected_index() {
            Some(current) if current + 1 < self.item_count() => self.select(current + 1),
            Some(_) => {}
            None if self.item_count() > 0 => self.select(0),
            None => {}
        }
    }

    /// Move up one item, selecting the last when nothing is selected
    fn select_previous(&mut self) {
        match self.selected_index() {
            Some(current) if current > 0 => self.select(current - 1),
            Some(_) => {}
            None if self.item_count() > 0 => self.select(self.item_count() - 1),
            None => {}
        }
    }

    fn select_first(&mut self) {
        if self.item_count() > 0 {
            self.select(0);
        }
    }

    fn select_last(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.select(count - 1);
        }
    }
}
