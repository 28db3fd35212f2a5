//! Settings for the embed builder
//!
//! This module defines the user preferences that persist across sessions.
//! All fields carry serde defaults so a partial or older config file still
//! loads.

use crate::document::DocumentVariant;
use crate::markdown::DEFAULT_THEME;
use crate::preview::DEFAULT_BOT_NAME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────────────────────
    /// Highlight tagged code fences
    pub highlight_code: bool,

    /// syntect theme used for highlighted fences
    pub highlight_theme: String,

    /// Name shown in the message header of the v1 preview
    pub bot_name: String,

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────
    /// Tab opened when a session starts
    pub default_variant: DocumentVariant,

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────
    /// Directory exports are written to (None = downloads folder)
    pub export_dir: Option<PathBuf>,

    /// Recently exported files, most recent first
    pub recent_exports: Vec<PathBuf>,

    /// Maximum number of recent exports to remember
    pub max_recent_exports: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            highlight_code: true,
            highlight_theme: DEFAULT_THEME.to_string(),
            bot_name: DEFAULT_BOT_NAME.to_string(),
            default_variant: DocumentVariant::V1,
            export_dir: None,
            recent_exports: Vec::new(),
            max_recent_exports: 10,
        }
    }
}

impl Settings {
    /// Maximum allowed value for `max_recent_exports`.
    pub const MAX_RECENT_EXPORTS: usize = 100;

    /// Record an exported file.
    ///
    /// If the path is already listed it moves to the front. The list is
    /// trimmed to `max_recent_exports`.
    pub fn add_recent_export(&mut self, path: PathBuf) {
        self.recent_exports.retain(|p| p != &path);
        self.recent_exports.insert(0, path);
        self.recent_exports.truncate(self.max_recent_exports);
    }

    /// Where exports go: the configured directory, else the downloads
    /// folder, else the current directory.
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Repair values a hand-edited config file may have broken.
    pub fn sanitize(&mut self) {
        if self.highlight_theme.trim().is_empty() {
            self.highlight_theme = DEFAULT_THEME.to_string();
        }

        if self.bot_name.trim().is_empty() {
            self.bot_name = DEFAULT_BOT_NAME.to_string();
        }

        if self.max_recent_exports == 0 {
            self.max_recent_exports = 10;
        } else if self.max_recent_exports > Self::MAX_RECENT_EXPORTS {
            self.max_recent_exports = Self::MAX_RECENT_EXPORTS;
        }

        let mut seen = Vec::with_capacity(self.recent_exports.len());
        self.recent_exports.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(p.clone());
                true
            }
        });
        self.recent_exports.truncate(self.max_recent_exports);

        if self
            .export_dir
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            self.export_dir = None;
        }
    }

    /// Parse settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert!(settings.highlight_code);
        assert_eq!(settings.highlight_theme, "base16-ocean.dark");
        assert_eq!(settings.default_variant, DocumentVariant::V1);
        assert!(settings.export_dir.is_none());
        assert!(settings.recent_exports.is_empty());
        assert_eq!(settings.max_recent_exports, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_variant": "v2"}"#).unwrap();
        assert_eq!(settings.default_variant, DocumentVariant::V2);
        assert!(settings.highlight_code);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let result = serde_json::from_str::<Settings>(r#"{"future_feature": true}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn test_wrong_types_fail() {
        assert!(serde_json::from_str::<Settings>(r#"{"highlight_code": "yes"}"#).is_err());
        assert!(serde_json::from_str::<Settings>(r#"{"default_variant": "v3"}"#).is_err());
    }

    #[test]
    fn test_add_recent_export_moves_to_front() {
        let mut settings = Settings::default();
        settings.add_recent_export(PathBuf::from("/a.json"));
        settings.add_recent_export(PathBuf::from("/b.json"));
        settings.add_recent_export(PathBuf::from("/a.json"));

        assert_eq!(
            settings.recent_exports,
            vec![PathBuf::from("/a.json"), PathBuf::from("/b.json")]
        );
    }

    #[test]
    fn test_recent_exports_are_capped() {
        let mut settings = Settings::default();
        for i in 0..15 {
            settings.add_recent_export(PathBuf::from(format!("/{}.json", i)));
        }
        assert_eq!(settings.recent_exports.len(), 10);
        assert_eq!(settings.recent_exports[0], PathBuf::from("/14.json"));
    }

    #[test]
    fn test_sanitize_repairs_values() {
        let mut settings = Settings {
            highlight_theme: "  ".to_string(),
            bot_name: String::new(),
            max_recent_exports: 0,
            export_dir: Some(PathBuf::new()),
            recent_exports: vec![PathBuf::from("/x"), PathBuf::from("/x")],
            ..Settings::default()
        };
        settings.sanitize();

        assert_eq!(settings.highlight_theme, DEFAULT_THEME);
        assert_eq!(settings.bot_name, DEFAULT_BOT_NAME);
        assert_eq!(settings.max_recent_exports, 10);
        assert!(settings.export_dir.is_none());
        assert_eq!(settings.recent_exports.len(), 1);
    }

    #[test]
    fn test_from_json_sanitized_clamps() {
        let settings = Settings::from_json_sanitized(r#"{"max_recent_exports": 5000}"#).unwrap();
        assert_eq!(settings.max_recent_exports, Settings::MAX_RECENT_EXPORTS);
    }

    #[test]
    fn test_resolved_export_dir_prefers_configured() {
        let settings = Settings {
            export_dir: Some(PathBuf::from("/tmp/exports")),
            ..Settings::default()
        };
        assert_eq!(settings.resolved_export_dir(), PathBuf::from("/tmp/exports"));
    }
}
