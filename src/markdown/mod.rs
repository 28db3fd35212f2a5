//! Markdown preview rendering
//!
//! Renders the chat platform's restricted markdown dialect to an HTML
//! fragment. This is deliberately not CommonMark: emphasis follows regex
//! precedence, headings stop at level 3, `-# ` marks subtext and mentions
//! render as fixed placeholders.
//!
//! The pipeline runs in a fixed order:
//!
//! 1. fenced code blocks are rendered and swapped for placeholder tokens
//! 2. inline rules rewrite spans on the whole text
//! 3. a block pass walks the lines, emitting lists, quotes, headings and
//!    subtext, restoring code blocks as it goes and placing `<br>` only
//!    between plain lines
//!
//! # Example
//! ```ignore
//! use embed_builder::markdown::render;
//!
//! let html = render("**Strong**\n- item");
//! ```

mod blocks;
mod fence;
mod inline;
pub mod styles;
pub mod syntax;

pub use blocks::{classify, LineKind};
pub use fence::{extract_code_blocks, CodeBlockArena};
pub use inline::apply_inline_rules;
pub use styles::html_escape;
pub use syntax::{get_highlighter, SyntaxHighlighter, DEFAULT_THEME};

use crate::config::Settings;
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Renderer knobs taken from the persisted settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Highlight tagged code fences with syntect
    pub highlight_code: bool,
    /// syntect theme name for highlighted fences
    pub highlight_theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            highlight_code: true,
            highlight_theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl From<&Settings> for RenderOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            highlight_code: settings.highlight_code,
            highlight_theme: settings.highlight_theme.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderer
// ─────────────────────────────────────────────────────────────────────────────

/// Markdown-to-HTML renderer for preview slots.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `text` to an HTML fragment. Empty input renders to `""`.
    pub fn render(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let normalized;
        let text = if text.contains('\r') {
            normalized = text.replace("\r\n", "\n");
            normalized.as_str()
        } else {
            text
        };

        let (text, arena) = fence::extract_code_blocks(text, &self.options);
        let text = inline::apply_inline_rules(&text);
        let html = blocks::render_blocks(&text, &arena);

        debug!(
            "Rendered {} bytes of markdown to {} bytes of HTML",
            text.len(),
            html.len()
        );
        html
    }
}

/// Render with default options.
pub fn render(text: &str) -> String {
    MarkdownRenderer::default().render(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::styles::{LIST_ITEM_STYLE, LIST_OPEN, QUOTE_OPEN};
    use super::*;

    fn plain_renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(RenderOptions {
            highlight_code: false,
            ..RenderOptions::default()
        })
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_prose_is_unchanged() {
        assert_eq!(render("hello world"), "hello world");
        assert_eq!(render("just, plain. text!"), "just, plain. text!");
    }

    #[test]
    fn test_bold_then_list() {
        let html = render("**Strong**\n- item");
        assert_eq!(
            html,
            format!(
                "<strong>Strong</strong>{}<li style=\"{}\">item</li></ul>",
                LIST_OPEN, LIST_ITEM_STYLE
            )
        );
    }

    #[test]
    fn test_code_fence_is_verbatim() {
        let html = plain_renderer().render("```\n**not bold**\n- not a list\n> not a quote\n<b>\n```");
        assert!(html.starts_with("<pre"));
        assert!(html.contains("**not bold**\n- not a list\n&gt; not a quote\n&lt;b&gt;"));
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("<ul"));
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn test_code_fence_between_lines_has_no_breaks() {
        let html = plain_renderer().render("before\n```\ncode\n```\nafter");
        assert!(html.starts_with("before<pre"));
        assert!(html.ends_with("</pre>after"));
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn test_inline_rules_do_not_touch_code() {
        let html = plain_renderer().render("```\n||x|| <@1> https://a.b\n```");
        assert!(!html.contains("spoiler"));
        assert!(!html.contains("@User"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_lists_are_balanced() {
        for input in [
            "- a",
            "- a\n  - b\n    - c",
            "    - deep",
            "- a\n  - b\n- c\n  - d\ntext",
            "- a\n> quote\n- b",
        ] {
            let html = render(input);
            assert_eq!(
                html.matches("<ul").count(),
                html.matches("</ul>").count(),
                "unbalanced for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_quote_closes_list_first() {
        let html = render("- a\n> q");
        let close = html.find("</ul>").unwrap();
        let open = html.find(QUOTE_OPEN).unwrap();
        assert!(close < open);
    }

    #[test]
    fn test_heading_precedence() {
        let html = render("### three");
        assert!(html.starts_with("<h3 "));
        assert!(html.contains(">three</h3>"));

        let h1 = render("# a");
        let h2 = render("## a");
        let h3 = render("### a");
        assert_ne!(h1, h2);
        assert_ne!(h2, h3);
        assert!(!h3.contains("<h1"));
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(render("> a\r\n> b"), format!("{}a<br>b</div>", QUOTE_OPEN));
    }

    #[test]
    fn test_inline_inside_blocks() {
        let html = render("# **big**\n- _it_");
        assert!(html.contains("><strong>big</strong></h1>"));
        assert!(html.contains("><em>it</em></li>"));
    }

    #[test]
    fn test_sample_description_renders_everything() {
        let doc = crate::document::EmbedDocument::sample();
        let html = render(doc.description.as_deref().unwrap_or_default());

        for needle in [
            "<pre",
            QUOTE_OPEN,
            "<em>Emphasis</em>",
            "<em>emphasis</em>",
            "<strong>Strong</strong>",
            "<u>Underline</u>",
            "<del>Strikethrough</del>",
            "class=\"spoiler\"",
            ">@User<",
            ">#channel<",
            ">@role<",
            ">@here<",
            ">@everyone<",
            "<h1 ",
            "<h2 ",
            "<h3 ",
        ] {
            assert!(html.contains(needle), "missing {:?}", needle);
        }
        assert_eq!(html.matches("<ul").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 2);
        assert!(!html.contains("<br><ul"));
        assert!(!html.contains("</ul><br>"));
        assert!(!html.contains("<br><pre"));
    }

    #[test]
    fn test_render_options_from_settings() {
        let settings = Settings {
            highlight_code: false,
            ..Settings::default()
        };
        let options = RenderOptions::from(&settings);
        assert!(!options.highlight_code);
        assert_eq!(options.highlight_theme, settings.highlight_theme);
    }
}
