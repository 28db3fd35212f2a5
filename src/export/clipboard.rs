//! Clipboard Operations
//!
//! Copies exported JSON (or preview HTML) to the system clipboard using the
//! arboard crate.

use crate::error::{Error, Result};
use arboard::Clipboard;
use log::info;

/// Copy plain text to clipboard.
pub fn copy_text_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;

    clipboard
        .set_text(text)
        .map_err(|e| Error::Clipboard(e.to_string()))?;

    info!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Copy HTML with a plain text fallback.
///
/// Rich-paste targets get the HTML; everything else gets `plain_text`.
pub fn copy_html_with_fallback(html: &str, plain_text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;

    clipboard
        .set_html(html, Some(plain_text))
        .map_err(|e| Error::Clipboard(e.to_string()))?;

    info!("Copied {} bytes of HTML to clipboard", html.len());
    Ok(())
}
