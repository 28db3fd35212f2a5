//! Code fence extraction
//!
//! Fenced blocks are pulled out of the text before any other rule runs and
//! replaced by numbered placeholder tokens. The rendered `<pre>` HTML waits
//! in a [`CodeBlockArena`] until the block pass emits the line holding the
//! token, so neither inline rules nor block markers ever see code contents.

use super::styles::{html_escape, CODE_STYLE, PRE_STYLE};
use super::syntax::get_highlighter;
use super::RenderOptions;
use log::{debug, warn};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Delimits placeholder tokens. Private-use, stripped from user input.
pub(crate) const TOKEN_MARK: char = '\u{E000}';

/// Stand-in for [`TOKEN_MARK`] when it appears in user input.
const MARK_REPLACEMENT: &str = "\u{FFFD}";

fn fence_regex() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| match Regex::new(r"(?s)```([A-Za-z0-9_]+)?\n(.+?)```") {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Code fence pattern failed to compile: {}", e);
                None
            }
        })
        .as_ref()
}

fn token_regex() -> Option<&'static Regex> {
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN
        .get_or_init(|| match Regex::new("\u{E000}CODEBLOCK([0-9]+)\u{E000}") {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Placeholder pattern failed to compile: {}", e);
                None
            }
        })
        .as_ref()
}

fn token(index: usize) -> String {
    format!("{mark}CODEBLOCK{index}{mark}", mark = TOKEN_MARK, index = index)
}

// ─────────────────────────────────────────────────────────────────────────────
// Arena
// ─────────────────────────────────────────────────────────────────────────────

/// Rendered code blocks, addressed by their placeholder number.
#[derive(Debug, Default)]
pub struct CodeBlockArena {
    blocks: Vec<String>,
}

impl CodeBlockArena {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn push(&mut self, html: String) -> String {
        let placeholder = token(self.blocks.len());
        self.blocks.push(html);
        placeholder
    }

    /// Replace every placeholder in `line` with its stored HTML.
    ///
    /// A token with no stored block is emitted as escaped literal text.
    pub fn restore(&self, line: &str) -> String {
        if self.blocks.is_empty() || !line.contains(TOKEN_MARK) {
            return line.to_string();
        }
        let Some(re) = token_regex() else {
            return html_escape(line);
        };

        re.replace_all(line, |caps: &Captures| {
            let block = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| self.blocks.get(i));
            match block {
                Some(html) => html.clone(),
                None => {
                    warn!("Unmatched code block placeholder {:?}", &caps[0]);
                    html_escape(&caps[0])
                }
            }
        })
        .into_owned()
    }
}

/// Whether a line begins with a placeholder token.
pub(crate) fn starts_with_token(line: &str) -> bool {
    line.starts_with(TOKEN_MARK)
}

/// Whether a line ends with a placeholder token.
pub(crate) fn ends_with_token(line: &str) -> bool {
    line.ends_with(TOKEN_MARK)
}

// ─────────────────────────────────────────────────────────────────────────────
// Extraction
// ─────────────────────────────────────────────────────────────────────────────

/// Render one fenced block to `<pre><code>` HTML.
fn render_code_block(lang: Option<&str>, code: &str, options: &RenderOptions) -> String {
    let code = code.trim();

    let highlighted = match lang {
        Some(lang) if options.highlight_code => {
            get_highlighter().highlight_to_html(code, lang, &options.highlight_theme)
        }
        _ => None,
    };

    let body = highlighted.unwrap_or_else(|| html_escape(code));
    format!(
        "<pre style=\"{}\"><code style=\"{}\">{}</code></pre>",
        PRE_STYLE, CODE_STYLE, body
    )
}

/// Swap every fenced block in `text` for a placeholder token.
///
/// Returns the rewritten text and the arena holding the rendered blocks.
pub fn extract_code_blocks(text: &str, options: &RenderOptions) -> (String, CodeBlockArena) {
    let mut arena = CodeBlockArena::default();

    let sanitized;
    let text = if text.contains(TOKEN_MARK) {
        sanitized = text.replace(TOKEN_MARK, MARK_REPLACEMENT);
        sanitized.as_str()
    } else {
        text
    };

    let Some(re) = fence_regex() else {
        return (text.to_string(), arena);
    };

    let replaced = re.replace_all(text, |caps: &Captures| {
        let lang = caps.get(1).map(|m| m.as_str());
        let code = caps.get(2).map_or("", |m| m.as_str());
        arena.push(render_code_block(lang, code, options))
    });
    let replaced = replaced.into_owned();

    if !arena.is_empty() {
        debug!("Extracted {} code block(s)", arena.len());
    }
    (replaced, arena)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
