//! Scrollbar rendering over a `ScrollState`

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Visual style for the scrollbar
#[derive(Debug, Clone, Copy, Default)]
pub enum ScrollbarStyle {
    /// Arrows at top and bottom (↑ ↓)
    Arrows,
    /// Thumb only
    #[default]
    Minimal,
}

/// Draw a vertical scrollbar on the right edge of `area`
///
/// Nothing is drawn when the content fits.
pub fn render_scrollbar(
    f: &mut Frame,
    area: Rect,
    scroll: &ScrollState,
    style: ScrollbarStyle,
    thumb: Style,
) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let (begin, end) = match style {
        ScrollbarStyle::Arrows => (Some("↑"), Some("↓")),
        ScrollbarStyle::Minimal => (None, None),
    };
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(begin)
        .end_symbol(end)
        .thumb_style(thumb);

    // ScrollbarState wants the scrollable distance, not the content length
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut state);
}
