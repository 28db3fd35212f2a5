//! Inline span substitution
//!
//! An ordered table of regex rewrites. Order is significant: longer
//! delimiters run before their prefixes (`***` before `**` before `*`,
//! double backticks before single ones) and the autolink rule runs last so
//! it can skip URLs already sitting inside an `href`. No pattern crosses a
//! line break.

use super::styles::{INLINE_CODE_STYLE, LINK_STYLE, MENTION_STYLE, SPOILER_OPEN};
use log::warn;
use regex::Regex;
use std::sync::OnceLock;

/// One compiled rewrite.
pub struct InlineRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: String,
}

impl InlineRule {
    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

fn mention(label: &str) -> String {
    format!("<span style=\"{}\">{}</span>", MENTION_STYLE, label)
}

fn inline_code() -> String {
    format!("<code style=\"{}\">${{1}}</code>", INLINE_CODE_STYLE)
}

/// `(name, pattern, replacement)` in application order.
fn rule_sources() -> Vec<(&'static str, &'static str, String)> {
    vec![
        (
            "bold_italic",
            r"\*\*\*(.+?)\*\*\*",
            "<strong><em>${1}</em></strong>".to_string(),
        ),
        ("bold", r"\*\*(.+?)\*\*", "<strong>${1}</strong>".to_string()),
        ("underline", r"__(.+?)__", "<u>${1}</u>".to_string()),
        ("italic_star", r"\*(.+?)\*", "<em>${1}</em>".to_string()),
        ("italic_underscore", r"_(.+?)_", "<em>${1}</em>".to_string()),
        ("strikethrough", r"~~(.+?)~~", "<del>${1}</del>".to_string()),
        (
            "spoiler",
            r"\|\|(.+?)\|\|",
            format!("{}${{1}}</span>", SPOILER_OPEN),
        ),
        ("user_mention", r"<@!?[0-9]+>", mention("@User")),
        ("channel_mention", r"<#[0-9]+>", mention("#channel")),
        ("role_mention", r"<@&[0-9]+>", mention("@role")),
        (
            "everyone_mention",
            r"(^|[ \t\n])(@here|@everyone)",
            format!("${{1}}<span style=\"{}\">${{2}}</span>", MENTION_STYLE),
        ),
        ("double_code", r"``(.+?)``", inline_code()),
        ("code", r"`(.+?)`", inline_code()),
        (
            "link",
            r"\[(.+?)\]\((.+?)\)",
            format!(
                "<a href=\"${{2}}\" target=\"_blank\" style=\"{}\">${{1}}</a>",
                LINK_STYLE
            ),
        ),
        (
            "autolink",
            r#"(^|[^"'>])(https?://[^\s<]+)"#,
            format!(
                "${{1}}<a href=\"${{2}}\" target=\"_blank\" style=\"{}\">${{2}}</a>",
                LINK_STYLE
            ),
        ),
    ]
}

/// The compiled rule table, built once. A rule that fails to compile is
/// logged and left out.
pub fn inline_rules() -> &'static [InlineRule] {
    static RULES: OnceLock<Vec<InlineRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        rule_sources()
            .into_iter()
            .filter_map(|(name, pattern, replacement)| match Regex::new(pattern) {
                Ok(pattern) => Some(InlineRule {
                    name,
                    pattern,
                    replacement,
                }),
                Err(e) => {
                    warn!("Inline rule '{}' failed to compile: {}", name, e);
                    None
                }
            })
            .collect()
    })
}

/// Apply every inline rule, in order, to the whole text.
pub fn apply_inline_rules(text: &str) -> String {
    inline_rules()
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
