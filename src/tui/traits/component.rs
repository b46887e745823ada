//! Core component trait
//!
//! Every drawable element implements `Component`: identity plus rendering.

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identity of a drawable element
///
/// Used for focus tracking and input routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Left navigation rail (non-focusable)
    NavRail,
    /// Insights timeline view
    Insights,
    /// Daily Picks view
    DailyPicks,
    /// Chat mock view
    Chat,
    /// Knowledge base view
    Knowledge,
    /// Settings form view
    Settings,
    /// Insight detail overlay
    Detail,
    /// System logs panel
    Logs,
    /// Widget notification panel
    Notifications,
    /// Floating mascot (non-focusable)
    Mascot,
    /// Status bar (non-focusable)
    StatusBar,
}

/// Read-only context handed to components while drawing
///
/// Components see the theme, who has focus and the animation frame; they
/// never get the App itself.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,

    /// Which component currently receives input
    pub focus: ComponentId,

    /// Advances once per tick (typing dots, cursor blink)
    pub animation_frame: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, focus: ComponentId, animation_frame: usize) -> Self {
        Self {
            theme,
            focus,
            animation_frame,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Animated dots for the typing indicator
    pub fn typing_dots(&self) -> &'static str {
        const DOTS: [&str; 4] = ["", ".", "..", "..."];
        DOTS[self.animation_frame % DOTS.len()]
    }
}

/// Base trait for all UI components
///
/// Rendering takes `&mut self` so a component can sync its scroll state with
/// the viewport it was given.
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Draw into `area`
    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
