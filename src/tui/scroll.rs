// Scroll state shared by every scrollable panel and view
//
// Each component owns its ScrollState; App never tracks offsets itself.
// Render code calls `update_dimensions` once per frame with the content and
// viewport sizes, input code moves the offset.
//
// Two modes:
// - auto-follow: new content keeps the view pinned to the bottom (logs)
// - manual: offset stays where the user left it (views, detail overlay)

/// Scroll state for a single panel
///
/// Owns position, content size and viewport size.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Line/item index at the top of the viewport
    offset: usize,

    /// Total number of lines/items in content
    total: usize,

    /// Number of lines/items visible in the viewport
    viewport: usize,

    /// Keep the view at the bottom as content grows
    /// Scrolling up disables it; reaching the bottom re-enables it
    pub auto_follow: bool,

    /// Built with `manual()`: reaching the bottom never re-arms following
    manual: bool,
}

impl ScrollState {
    /// Scroll state with auto-follow enabled
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
            manual: false,
        }
    }

    /// Scroll state that never follows (manual scroll)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            manual: true,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Move the offset the minimum amount needed to show `index`
    pub fn ensure_visible(&mut self, index: usize) {
        if index < self.offset {
            self.offset = index;
        } else if self.viewport > 0 && index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
    }

    /// Scroll up by one unit
    /// Disables auto-follow (user took control)
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one unit
    pub fn scroll_down(&mut self) {
        // Dimensions unknown until the first render; render clamps
        if self.total == 0 || self.offset < self.max_offset() {
            self.offset += 1;
        }

        if self.total > 0 && self.offset >= self.max_offset() && !self.manual {
            self.auto_follow = true;
        }
    }

    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
        if !self.manual {
            self.auto_follow = true;
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible range as (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset.min(self.total);
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Content overflows the viewport
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);
        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);

        scroll.scroll_to_bottom();
        assert!(scroll.auto_follow);
        assert_eq!(scroll.offset(), 15);
    }

    #[test]
    fn manual_mode_stays_put() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);
        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn ensure_visible_moves_minimally() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(50, 10);

        scroll.ensure_visible(12);
        assert_eq!(scroll.offset(), 3);
        assert_eq!(scroll.visible_range(), (3, 13));

        scroll.ensure_visible(5);
        assert_eq!(scroll.offset(), 3, "already visible");

        scroll.ensure_visible(1);
        assert_eq!(scroll.offset(), 1);
    }
}
