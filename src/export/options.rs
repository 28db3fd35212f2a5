//! Export formats
//!
//! The builder exports the active document as indented JSON (to a file or
//! the clipboard) or as a standalone HTML page of its preview.

use crate::document::DocumentVariant;
use serde::{Deserialize, Serialize};

/// File names start with this stem, then the variant tag.
pub const FILE_STEM: &str = "discord-embed";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// 2-space indented JSON written to `discord-embed-<variant>.json`
    #[default]
    JsonFile,
    /// The same JSON placed on the system clipboard
    JsonClipboard,
    /// Standalone HTML page of the preview
    HtmlFile,
}

impl ExportFormat {
    /// Get the display label for this format.
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::JsonFile => "Export JSON",
            ExportFormat::JsonClipboard => "Copy JSON",
            ExportFormat::HtmlFile => "Export preview as HTML",
        }
    }

    /// Get the file extension for this format (if applicable).
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ExportFormat::JsonFile => Some("json"),
            ExportFormat::JsonClipboard => None,
            ExportFormat::HtmlFile => Some("html"),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ExportFormat::JsonFile => "💾",
            ExportFormat::JsonClipboard => "📋",
            ExportFormat::HtmlFile => "🌐",
        }
    }

    /// File name for `variant`, or `None` for clipboard export.
    pub fn file_name(&self, variant: DocumentVariant) -> Option<String> {
        self.extension()
            .map(|ext| format!("{}-{}.{}", FILE_STEM, variant.tag(), ext))
    }

    /// Get all available export formats.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::JsonFile,
            ExportFormat::JsonClipboard,
            ExportFormat::HtmlFile,
        ]
    }
}
