//! Syntax Highlighting Module
//!
//! This module integrates syntect for fenced code block highlighting in
//! the preview. Highlighted code is emitted as HTML spans with inline
//! foreground colors; the block background comes from the preview's own
//! `<pre>` style.
//!
//! # Example
//! ```ignore
//! use crate::markdown::syntax::get_highlighter;
//!
//! let html = get_highlighter().highlight_to_html("fn main() {}", "rust", "base16-ocean.dark");
//! ```

use log::{debug, warn};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Default theme name from syntect's built-in themes
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Fallback theme if the configured theme is not found
pub const FALLBACK_THEME: &str = "base16-ocean.dark";

// ─────────────────────────────────────────────────────────────────────────────
// Syntax Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Syntax highlighter that caches syntect sets for performance.
///
/// This struct holds the loaded SyntaxSet and ThemeSet, which are expensive
/// to load and should be reused across highlighting operations.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter with default syntax and theme sets.
    pub fn new() -> Self {
        debug!("Loading syntect syntax and theme sets");
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "Loaded {} syntaxes and {} themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );
        Self {
            syntax_set,
            theme_set,
        }
    }

    /// Get available theme names, sorted.
    pub fn available_themes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.theme_set.themes.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn has_theme(&self, name: &str) -> bool {
        self.theme_set.themes.contains_key(name)
    }

    /// Get a theme by name, falling back to the default theme.
    pub fn get_theme(&self, name: &str) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(name)
            .or_else(|| self.theme_set.themes.get(FALLBACK_THEME))
    }

    /// Whether a fence tag resolves to a known syntax.
    pub fn knows_language(&self, language: &str) -> bool {
        self.find_syntax_for_language(language).is_some()
    }

    /// Highlight `code` as `language` into HTML spans.
    ///
    /// Returns `None` when the language is unknown, the theme is missing,
    /// or syntect fails on any line; callers fall back to escaped text.
    pub fn highlight_to_html(&self, code: &str, language: &str, theme_name: &str) -> Option<String> {
        let Some(syntax) = self.find_syntax_for_language(language) else {
            debug!("No syntax found for language: {}", language);
            return None;
        };
        let theme = self.get_theme(theme_name)?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut html = String::with_capacity(code.len() * 4);

        for line in LinesWithEndings::from(code) {
            let ranges = match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => ranges,
                Err(e) => {
                    warn!("Failed to highlight {} line: {}", language, e);
                    return None;
                }
            };
            match styled_line_to_highlighted_html(&ranges[..], IncludeBackground::No) {
                Ok(line_html) => html.push_str(&line_html),
                Err(e) => {
                    warn!("Failed to convert highlighted {} line: {}", language, e);
                    return None;
                }
            }
        }

        Some(html)
    }

    /// Find syntax definition for a fence tag.
    ///
    /// Tries a table of common aliases, then the tag as a file extension,
    /// then a case-insensitive match on the syntax name.
    fn find_syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        if language.is_empty() {
            return None;
        }

        let lang_lower = language.to_lowercase();

        let extension = match lang_lower.as_str() {
            "rust" => "rs",
            "python" => "py",
            "javascript" | "node" => "js",
            "typescript" => "ts",
            "cpp" | "cxx" => "cpp",
            "csharp" | "cs" => "cs",
            "golang" => "go",
            "ruby" => "rb",
            "htm" => "html",
            "yml" => "yaml",
            "markdown" => "md",
            "shell" | "bash" | "zsh" => "sh",
            "perl" => "pl",
            "haskell" => "hs",
            "elixir" => "ex",
            "erlang" => "erl",
            "clojure" => "clj",
            "patch" => "diff",
            other => other,
        };

        if let Some(syntax) = self.syntax_set.find_syntax_by_extension(extension) {
            return Some(syntax);
        }

        self.syntax_set
            .syntaxes()
            .iter()
            .find(|syntax| syntax.name.to_lowercase() == lang_lower)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Highlighter Instance
// ─────────────────────────────────────────────────────────────────────────────

/// Global syntax highlighter, lazily initialized on first access.
static HIGHLIGHTER: OnceLock<SyntaxHighlighter> = OnceLock::new();

/// Get or create the global syntax highlighter.
pub fn get_highlighter() -> &'static SyntaxHighlighter {
    HIGHLIGHTER.get_or_init(SyntaxHighlighter::new)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
