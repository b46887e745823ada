// Components module - reusable UI building blocks
//
// Shell components drawn around every view:
// - Nav rail: tab list on the left
// - Status bar: flags, page and key hints
// - Logs panel: captured tracing output (toggle with `l`)
// - Mascot + notification panel: the floating widget
// - Toast: short-lived confirmations
//
// The detail panel is the body of the insight overlay.

pub mod detail_panel;
pub mod logs_panel;
pub mod mascot;
pub mod nav_rail;
pub mod notification_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod toast;

pub use detail_panel::DetailPanel;
pub use logs_panel::LogsPanel;
pub use toast::Toast;
