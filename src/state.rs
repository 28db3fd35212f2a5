//! Editing session state for the embed builder
//!
//! This module contains [`EditorState`], which owns both documents, tracks
//! which one is active, keeps the JSON pane in sync with the form and
//! carries the user-facing notices a host shows in its status area.

use crate::config::{load_config, save_config_silent, Settings};
use crate::document::{
    sample_components, CharacterBudget, ComponentDocument, DocumentVariant, EditError,
    EmbedDocument,
};
use crate::error::Result;
use crate::export::{self, copy_text_to_clipboard, export_json_file, from_json, to_pretty_json};
use crate::markdown::RenderOptions;
use crate::preview::PreviewRenderer;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Editor State
// ─────────────────────────────────────────────────────────────────────────────

/// Central editing session.
///
/// Both documents live for the whole session; switching tabs only changes
/// which one the JSON pane, preview and exports address.
///
/// # Example
///
/// ```ignore
/// let mut state = EditorState::with_settings(Settings::default());
/// state.embed_mut().set_title("Release notes");
/// let html = state.preview_html();
/// ```
#[derive(Debug)]
pub struct EditorState {
    /// User settings (loaded from config)
    pub settings: Settings,
    /// Document the editor is showing
    variant: DocumentVariant,
    embed: EmbedDocument,
    components: ComponentDocument,
    /// Preview renderer built from the current settings
    preview: PreviewRenderer,
    /// Parser message from the last rejected JSON edit
    json_error: Option<String>,
    /// Last refused action, shown until cleared
    notice: Option<String>,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl EditorState {
    /// Create a session with settings loaded from the config file.
    pub fn new() -> Self {
        let settings = load_config();
        info!("EditorState initialized with settings");
        debug!(
            "Default variant: {:?}, highlight: {}",
            settings.default_variant, settings.highlight_code
        );
        Self::with_settings(settings)
    }

    /// Create a session with explicit settings (nothing is read from disk).
    pub fn with_settings(settings: Settings) -> Self {
        let preview = build_preview(&settings);
        Self {
            variant: settings.default_variant,
            embed: EmbedDocument::sample(),
            components: sample_components(),
            preview,
            json_error: None,
            notice: None,
            settings_dirty: false,
            settings,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Variant
    // ─────────────────────────────────────────────────────────────────────────

    pub fn variant(&self) -> DocumentVariant {
        self.variant
    }

    /// Switch the active document. A pending JSON error belongs to the old
    /// pane and is dropped.
    pub fn set_variant(&mut self, variant: DocumentVariant) {
        if self.variant != variant {
            debug!("Switching to {}", variant.label());
            self.variant = variant;
            self.json_error = None;
        }
    }

    /// Flip between v1 and v2.
    pub fn toggle_variant(&mut self) {
        self.set_variant(self.variant.toggle());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Documents
    // ─────────────────────────────────────────────────────────────────────────

    pub fn embed(&self) -> &EmbedDocument {
        &self.embed
    }

    pub fn embed_mut(&mut self) -> &mut EmbedDocument {
        &mut self.embed
    }

    pub fn components(&self) -> &ComponentDocument {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentDocument {
        &mut self.components
    }

    /// Replace the v1 document with an empty one.
    pub fn clear_embed(&mut self) {
        self.embed = EmbedDocument::default();
    }

    /// Replace the v2 document with an empty one.
    pub fn clear_components(&mut self) {
        self.components = ComponentDocument::default();
    }

    /// Add a field, recording a notice when the cap refuses it.
    pub fn add_field(&mut self) -> Option<usize> {
        let result = self.embed.add_field();
        self.record(result)
    }

    /// Add a button, recording a notice when the cap refuses it.
    pub fn add_button(&mut self) -> Option<usize> {
        let result = self.embed.add_button();
        self.record(result)
    }

    /// Run a document edit, turning a refusal into a notice.
    ///
    /// Returns the edit's value on success.
    pub fn apply_edit<T, F>(&mut self, edit: F) -> Option<T>
    where
        F: FnOnce(&mut EmbedDocument, &mut ComponentDocument) -> std::result::Result<T, EditError>,
    {
        let result = edit(&mut self.embed, &mut self.components);
        self.record(result)
    }

    fn record<T>(&mut self, result: std::result::Result<T, EditError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Edit refused: {:?}", e);
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // JSON Pane
    // ─────────────────────────────────────────────────────────────────────────

    /// Indented JSON of the active document.
    pub fn json_text(&self) -> Result<String> {
        match self.variant {
            DocumentVariant::V1 => to_pretty_json(&self.embed),
            DocumentVariant::V2 => to_pretty_json(&self.components),
        }
    }

    /// Replace the active document with the parsed JSON text.
    ///
    /// On failure the document is left untouched and the parser message is
    /// kept in [`json_error`](Self::json_error) until the next valid edit.
    pub fn apply_json_text(&mut self, text: &str) -> Result<()> {
        let parsed = match self.variant {
            DocumentVariant::V1 => from_json::<EmbedDocument>(text).map(|doc| self.embed = doc),
            DocumentVariant::V2 => {
                from_json::<ComponentDocument>(text).map(|doc| self.components = doc)
            }
        };

        match parsed {
            Ok(()) => {
                self.json_error = None;
                Ok(())
            }
            Err(e) => {
                debug!("Rejected JSON edit: {}", e);
                self.json_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn json_error(&self) -> Option<&str> {
        self.json_error.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────

    /// Preview HTML of the active document.
    pub fn preview_html(&self) -> String {
        self.preview.render(self.variant, &self.embed, &self.components)
    }

    /// Character budget of the v1 document.
    pub fn budget(&self) -> CharacterBudget {
        self.embed.budget()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Export the active document as JSON into the configured export dir.
    pub fn export_json(&mut self) -> Result<PathBuf> {
        let dir = self.settings.resolved_export_dir();
        self.export_json_to(&dir)
    }

    /// Export the active document as JSON into `dir`.
    pub fn export_json_to(&mut self, dir: &Path) -> Result<PathBuf> {
        let written = match self.variant {
            DocumentVariant::V1 => export_json_file(dir, self.variant, &self.embed),
            DocumentVariant::V2 => export_json_file(dir, self.variant, &self.components),
        };
        self.finish_export(written)
    }

    /// Export the preview as a standalone HTML page into `dir`.
    pub fn export_preview_html_to(&mut self, dir: &Path) -> Result<PathBuf> {
        let title = self.embed.title.clone();
        let fragment = self.preview_html();
        let written = export::export_html_file(dir, self.variant, &fragment, title.as_deref());
        self.finish_export(written)
    }

    /// Export the preview page into the configured export dir.
    pub fn export_preview_html(&mut self) -> Result<PathBuf> {
        let dir = self.settings.resolved_export_dir();
        self.export_preview_html_to(&dir)
    }

    fn finish_export(&mut self, written: Result<PathBuf>) -> Result<PathBuf> {
        match written {
            Ok(path) => {
                self.settings.add_recent_export(path.clone());
                self.settings_dirty = true;
                self.notice = Some(format!("Exported {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                warn!("Export failed: {}", e);
                self.notice = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Copy the active document's JSON to the system clipboard.
    pub fn copy_json_to_clipboard(&mut self) -> Result<()> {
        let json = self.json_text()?;
        let copied = copy_text_to_clipboard(&json);
        self.notice = Some(match &copied {
            Ok(()) => "JSON copied to clipboard".to_string(),
            Err(e) => e.to_string(),
        });
        copied
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────────────────────

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Modify settings and rebuild the preview renderer.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings.sanitize();
        self.preview = build_preview(&self.settings);
        self.settings_dirty = true;
    }

    pub fn settings_dirty(&self) -> bool {
        self.settings_dirty
    }

    /// Save settings to the config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if !self.settings_dirty {
            return false;
        }
        let saved = save_config_silent(&self.settings);
        if saved {
            self.settings_dirty = false;
        }
        saved
    }

    /// Save settings to an explicit config file if modified.
    pub fn save_settings_to(&mut self, path: &Path) -> Result<()> {
        crate::config::save_config_to(&self.settings, path)?;
        self.settings_dirty = false;
        Ok(())
    }
}

fn build_preview(settings: &Settings) -> PreviewRenderer {
    PreviewRenderer::new(RenderOptions::from(settings)).with_bot_name(settings.bot_name.clone())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from;
    use crate::document::limits::MAX_FIELDS;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    fn state() -> EditorState {
        EditorState::with_settings(Settings {
            highlight_code: false,
            ..Settings::default()
        })
    }

    #[test]
    fn test_starts_on_default_variant() {
        let state = EditorState::with_settings(Settings {
            default_variant: DocumentVariant::V2,
            ..Settings::default()
        });
        assert_eq!(state.variant(), DocumentVariant::V2);
        assert!(!state.components().containers.is_empty());
    }

    #[test]
    fn test_json_text_follows_variant() {
        let mut state = state();
        state.embed_mut().set_title("Hello");
        assert!(state.json_text().unwrap().contains("\"title\": \"Hello\""));

        state.toggle_variant();
        assert!(state.json_text().unwrap().contains("\"containers\""));
    }

    #[test]
    fn test_apply_json_replaces_document() {
        let mut state = state();
        state
            .apply_json_text(r#"{"title": "From JSON", "fields": []}"#)
            .unwrap();
        assert_eq!(state.embed().title.as_deref(), Some("From JSON"));
        assert!(state.json_error().is_none());
    }

    #[test]
    fn test_invalid_json_keeps_document() {
        let mut state = state();
        let before = state.embed().clone();

        let err = state.apply_json_text("{ \"title\": ").unwrap_err();
        assert!(matches!(err, Error::DocumentParse { .. }));
        assert_eq!(state.embed(), &before);
        assert_eq!(state.json_error(), Some(err.to_string().as_str()));

        state.apply_json_text("{}").unwrap();
        assert!(state.json_error().is_none());
    }

    #[test]
    fn test_switching_variant_drops_json_error() {
        let mut state = state();
        let _ = state.apply_json_text("nope");
        assert!(state.json_error().is_some());
        state.set_variant(DocumentVariant::V2);
        assert!(state.json_error().is_none());
    }

    #[test]
    fn test_field_cap_records_notice() {
        let mut state = state();
        state.clear_embed();
        for _ in 0..MAX_FIELDS {
            assert!(state.add_field().is_some());
        }
        assert!(state.notice().is_none());

        assert_eq!(state.add_field(), None);
        assert_eq!(state.embed().fields.len(), MAX_FIELDS);
        assert!(state.notice().unwrap().contains("at most 25"));

        state.clear_notice();
        assert!(state.notice().is_none());
    }

    #[test]
    fn test_apply_edit_records_refusal() {
        let mut state = state();
        state.clear_components();
        let removed = state.apply_edit(|_, components| components.remove_container(3));
        assert!(removed.is_none());
        assert!(state.notice().is_some());
    }

    #[test]
    fn test_preview_uses_bot_name() {
        let state = EditorState::with_settings(Settings {
            bot_name: "Release Bot".to_string(),
            ..Settings::default()
        });
        assert!(state.preview_html().contains("Release Bot"));
    }

    #[test]
    fn test_update_settings_rebuilds_preview() {
        let mut state = state();
        state.update_settings(|s| s.bot_name = "Changed".to_string());
        assert!(state.settings_dirty());
        assert!(state.preview_html().contains("Changed"));
    }

    #[test]
    fn test_export_json_records_recent() {
        let dir = TempDir::new().unwrap();
        let mut state = state();

        let path = state.export_json_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "discord-embed-v1.json");
        assert_eq!(state.settings.recent_exports.first(), Some(&path));
        assert!(state.settings_dirty());

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, state.json_text().unwrap());
    }

    #[test]
    fn test_export_preview_html() {
        let dir = TempDir::new().unwrap();
        let mut state = state();
        state.set_variant(DocumentVariant::V2);

        let path = state.export_preview_html_to(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "discord-embed-v2.html");
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_save_settings_to_clears_dirty() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.json");
        let mut state = state();
        state.update_settings(|s| s.default_variant = DocumentVariant::V2);

        state.save_settings_to(&config).unwrap();
        assert!(!state.settings_dirty());
        assert_eq!(
            load_config_from(&config).unwrap().default_variant,
            DocumentVariant::V2
        );
    }
}
