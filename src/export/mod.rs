//! Document Export Module
//!
//! Exports the active document as indented JSON to a file or the clipboard,
//! and the rendered preview as a standalone HTML page.
//!
//! # Architecture
//!
//! - `options.rs` - Export formats and file naming
//! - `json.rs` - JSON serialization, parsing and file export
//! - `html.rs` - Standalone preview page generation
//! - `clipboard.rs` - Platform clipboard operations

pub mod clipboard;
pub mod html;
pub mod json;
pub mod options;

pub use clipboard::{copy_html_with_fallback, copy_text_to_clipboard};
pub use html::{export_html_file, generate_html_document};
pub use json::{export_file_name, export_json_file, from_json, to_pretty_json};
pub use options::ExportFormat;
