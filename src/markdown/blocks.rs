//! Block structure pass
//!
//! A single left-to-right walk over the lines of inline-rendered text. The
//! only state is the current list depth (`-1` when no list is open) and
//! whether a quote is open. Each emitted piece records whether it is glued
//! to its neighbours; a `<br>` is only placed between two unglued sides, so
//! block boundaries never collect stray breaks.

use super::fence::{ends_with_token, starts_with_token, CodeBlockArena};
use super::styles::{heading_style, LIST_ITEM_STYLE, LIST_OPEN, QUOTE_OPEN, SUBTEXT_STYLE};

// ─────────────────────────────────────────────────────────────────────────────
// Line Classification
// ─────────────────────────────────────────────────────────────────────────────

/// What a single source line is, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `>` with an optional single whitespace character
    Quote(&'a str),
    /// `# `, `## ` or `### ` with non-empty text
    Heading { level: u8, text: &'a str },
    /// `-# ` with non-empty text
    Subtext(&'a str),
    /// Whitespace, `- `, non-empty text
    ListItem { depth: isize, text: &'a str },
    Plain(&'a str),
}

/// Strip `prefix` and require something after it.
fn non_empty_after<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix).filter(|rest| !rest.is_empty())
}

fn as_list_item(line: &str) -> Option<(isize, &str)> {
    let rest = line.trim_start();
    let indent = line[..line.len() - rest.len()].chars().count();
    let text = non_empty_after(rest, "- ")?;
    // Integer division: one stray space still counts as depth 0
    Some(((indent / 2) as isize, text))
}

pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(rest) = line.strip_prefix('>') {
        let mut chars = rest.chars();
        let text = match chars.next() {
            Some(c) if c.is_whitespace() => chars.as_str(),
            _ => rest,
        };
        return LineKind::Quote(text);
    }

    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(text) = non_empty_after(line, prefix) {
            return LineKind::Heading { level, text };
        }
    }

    if let Some(text) = non_empty_after(line, "-# ") {
        return LineKind::Subtext(text);
    }

    match as_list_item(line) {
        Some((depth, text)) => LineKind::ListItem { depth, text },
        None => LineKind::Plain(line),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Segments
// ─────────────────────────────────────────────────────────────────────────────

/// One emitted piece of output.
#[derive(Debug, Clone)]
struct Segment {
    html: String,
    glue_before: bool,
    glue_after: bool,
}

impl Segment {
    /// Structural markup: never separated by a line break.
    fn block(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            glue_before: true,
            glue_after: true,
        }
    }

    /// A text line. A code block at either edge glues that side.
    fn text(raw: &str, arena: &CodeBlockArena) -> Self {
        Self {
            html: arena.restore(raw),
            glue_before: starts_with_token(raw),
            glue_after: ends_with_token(raw),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Builder
// ─────────────────────────────────────────────────────────────────────────────

struct BlockBuilder<'a> {
    arena: &'a CodeBlockArena,
    list_depth: isize,
    in_quote: bool,
    segments: Vec<Segment>,
}

impl<'a> BlockBuilder<'a> {
    fn new(arena: &'a CodeBlockArena) -> Self {
        Self {
            arena,
            list_depth: -1,
            in_quote: false,
            segments: Vec::new(),
        }
    }

    fn push_block(&mut self, html: impl Into<String>) {
        self.segments.push(Segment::block(html));
    }

    /// Close open lists down to (but not including) `depth`.
    fn close_lists_to(&mut self, depth: isize) {
        while self.list_depth > depth {
            self.push_block("</ul>");
            self.list_depth -= 1;
        }
    }

    fn close_all_lists(&mut self) {
        self.close_lists_to(-1);
    }

    fn close_quote(&mut self) {
        if self.in_quote {
            self.push_block("</div>");
            self.in_quote = false;
        }
    }

    fn line(&mut self, line: &str) {
        let kind = classify(line);

        if let LineKind::Quote(text) = kind {
            self.close_all_lists();
            if !self.in_quote {
                self.push_block(QUOTE_OPEN);
                self.in_quote = true;
            }
            self.segments.push(Segment::text(text, self.arena));
            return;
        }
        self.close_quote();

        match kind {
            LineKind::Heading { level, text } => {
                self.close_all_lists();
                let html = format!(
                    "<h{level} style=\"{style}\">{text}</h{level}>",
                    level = level,
                    style = heading_style(level),
                    text = self.arena.restore(text)
                );
                self.push_block(html);
            }
            LineKind::Subtext(text) => {
                self.close_all_lists();
                let html = format!(
                    "<div style=\"{}\">{}</div>",
                    SUBTEXT_STYLE,
                    self.arena.restore(text)
                );
                self.push_block(html);
            }
            LineKind::ListItem { depth, text } => {
                while self.list_depth < depth {
                    self.push_block(LIST_OPEN);
                    self.list_depth += 1;
                }
                self.close_lists_to(depth);
                let html = format!(
                    "<li style=\"{}\">{}</li>",
                    LIST_ITEM_STYLE,
                    self.arena.restore(text)
                );
                self.push_block(html);
            }
            LineKind::Plain(text) => {
                self.close_all_lists();
                self.segments.push(Segment::text(text, self.arena));
            }
            LineKind::Quote(_) => {}
        }
    }

    fn finish(mut self) -> String {
        self.close_all_lists();
        self.close_quote();

        let mut out = String::new();
        let mut prev_glued = true;
        for segment in &self.segments {
            if !prev_glued && !segment.glue_before {
                out.push_str("<br>");
            }
            out.push_str(&segment.html);
            prev_glued = segment.glue_after;
        }
        out
    }
}

/// Run the block pass over inline-rendered `text`, restoring code blocks
/// from `arena` as each line is emitted.
pub fn render_blocks(text: &str, arena: &CodeBlockArena) -> String {
    let mut builder = BlockBuilder::new(arena);
    for line in text.split('\n') {
        builder.line(line);
    }
    builder.finish()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(text: &str) -> String {
        render_blocks(text, &CodeBlockArena::default())
    }

    fn li(text: &str) -> String {
        format!("<li style=\"{}\">{}</li>", LIST_ITEM_STYLE, text)
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("> q"), LineKind::Quote("q"));
        assert_eq!(classify(">q"), LineKind::Quote("q"));
        assert_eq!(classify(">"), LineKind::Quote(""));
        assert_eq!(classify("### a"), LineKind::Heading { level: 3, text: "a" });
        assert_eq!(classify("## a"), LineKind::Heading { level: 2, text: "a" });
        assert_eq!(classify("# a"), LineKind::Heading { level: 1, text: "a" });
        assert_eq!(classify("#### a"), LineKind::Plain("#### a"));
        assert_eq!(classify("# "), LineKind::Plain("# "));
        assert_eq!(classify("-# small"), LineKind::Subtext("small"));
        assert_eq!(classify("- a"), LineKind::ListItem { depth: 0, text: "a" });
        assert_eq!(classify("-a"), LineKind::Plain("-a"));
    }

    #[test]
    fn test_list_depth_bucketing() {
        assert_eq!(classify(" - a"), LineKind::ListItem { depth: 0, text: "a" });
        assert_eq!(classify("  - a"), LineKind::ListItem { depth: 1, text: "a" });
        assert_eq!(classify("   - a"), LineKind::ListItem { depth: 1, text: "a" });
        assert_eq!(classify("    - a"), LineKind::ListItem { depth: 2, text: "a" });
    }

    #[test]
    fn test_plain_lines_get_breaks() {
        assert_eq!(blocks("a\nb"), "a<br>b");
        assert_eq!(blocks("a\n\nb"), "a<br><br>b");
    }

    #[test]
    fn test_nested_lists_balance() {
        let html = blocks("- a\n  - b\n  - c\n- d");
        assert_eq!(
            html,
            format!(
                "{open}{a}{open}{b}{c}</ul>{d}</ul>",
                open = LIST_OPEN,
                a = li("a"),
                b = li("b"),
                c = li("c"),
                d = li("d")
            )
        );
    }

    #[test]
    fn test_jumping_two_levels_opens_two_lists() {
        let html = blocks("    - deep\nafter");
        assert_eq!(html.matches("<ul").count(), 3);
        assert_eq!(html.matches("</ul>").count(), 3);
        assert!(html.ends_with("</ul>after"));
    }

    #[test]
    fn test_quote_closes_list() {
        let html = blocks("- a\n> q");
        assert_eq!(
            html,
            format!("{}{}</ul>{}q</div>", LIST_OPEN, li("a"), QUOTE_OPEN)
        );
    }

    #[test]
    fn test_quote_lines_share_one_block() {
        let html = blocks("> one\n> two\nout");
        assert_eq!(html, format!("{}one<br>two</div>out", QUOTE_OPEN));
    }

    #[test]
    fn test_headings_and_subtext_have_no_breaks() {
        let html = blocks("x\n# A\n## B\n### C\n-# s\ny");
        assert!(!html.contains("<br>"));
        assert!(html.contains("<h1 "));
        assert!(html.contains("<h2 "));
        assert!(html.contains("<h3 "));
        assert!(html.contains(&format!("<div style=\"{}\">s</div>", SUBTEXT_STYLE)));
    }

    #[test]
    fn test_heading_closes_list() {
        let html = blocks("- a\n  - b\n# H");
        let close_pos = html.rfind("</ul>").unwrap();
        let heading_pos = html.find("<h1").unwrap();
        assert!(close_pos < heading_pos);
        assert_eq!(html.matches("<ul").count(), html.matches("</ul>").count());
    }

    #[test]
    fn test_end_of_input_closes_list_then_quote() {
        let html = blocks("> q");
        assert!(html.ends_with("q</div>"));
        let html = blocks("- a\n  - b");
        assert!(html.ends_with("</ul></ul>"));
    }
}
