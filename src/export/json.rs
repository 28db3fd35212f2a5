//! JSON export and import
//!
//! Documents are written with serde_json's pretty printer (2-space indent)
//! so the exported file matches what the editor's JSON pane shows.

use super::options::ExportFormat;
use crate::document::DocumentVariant;
use crate::error::{Error, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize a document as 2-space indented JSON.
pub fn to_pretty_json<T: Serialize>(doc: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse a whole document from JSON text.
///
/// On failure the error carries serde_json's message verbatim.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let doc = serde_json::from_str(text)?;
    debug!("Parsed {} bytes of document JSON", text.len());
    Ok(doc)
}

/// `discord-embed-<variant>.json`
pub fn export_file_name(variant: DocumentVariant) -> String {
    format!("{}-{}.json", super::options::FILE_STEM, variant.tag())
}

/// Write `contents` to `dir/<file_name>`, creating `dir` if needed.
pub(crate) fn write_export_file(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);

    fs::create_dir_all(dir).map_err(|e| Error::FileWrite {
        path: dir.to_path_buf(),
        source: e,
    })?;
    fs::write(&path, contents).map_err(|e| Error::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    info!("Exported {}", path.display());
    Ok(path)
}

/// Export a document as JSON into `dir`, returning the written path.
pub fn export_json_file<T: Serialize>(
    dir: &Path,
    variant: DocumentVariant,
    doc: &T,
) -> Result<PathBuf> {
    let json = to_pretty_json(doc)?;
    let file_name = ExportFormat::JsonFile
        .file_name(variant)
        .unwrap_or_else(|| export_file_name(variant));
    write_export_file(dir, &file_name, &json)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
