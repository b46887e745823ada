//! System clipboard access for the detail overlay's copy action
//!
//! Uses `arboard`; a fresh handle per copy so nothing is held between uses.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Copy text to the system clipboard
///
/// Fails on headless Linux (no display server) or when access is denied.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    tracing::debug!(bytes = text.len(), "Copied to clipboard");
    Ok(())
}
