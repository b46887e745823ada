//! Copyable trait for components that provide clipboard content

use super::Component;

/// Components whose content can be copied with `y`
pub trait Copyable: Component {
    /// Text for the clipboard; `None` when there is nothing to copy
    fn copy_text(&self) -> Option<String>;

    /// What was copied, for the toast message
    fn copy_description(&self) -> String {
        format!("{:?}", self.id()).to_lowercase()
    }
}
