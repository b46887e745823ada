//! Component trait system for the dashboard
//!
//! App routes input and owns the mounted view; what each panel draws and how
//! it scrolls, selects or copies is declared through these traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         App                                 │
//! │   (view router: active tab, modal layer, floating widget)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!         ┌──────────────┬─────┴────────┬──────────────┐
//!         ▼              ▼              ▼              ▼
//!    ┌─────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!    │  Views  │   │  Detail  │   │   Logs   │   │  Notif.  │
//!    └─────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] / [`Selectable`] - scroll and selection over a ScrollState
//! - [`Copyable`] - clipboard content
//! - [`Interactive`] - keyboard input that may bubble up

mod component;
mod copyable;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use copyable::Copyable;
pub use interactive::{Handled, Interactive, ScrollKeys};
pub use scrollable::{Scrollable, Selectable};
