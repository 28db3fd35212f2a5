//! Inline styles of the rendered preview
//!
//! The preview is pasted into host pages without a stylesheet, so every
//! element carries its look in a `style` attribute.

/// Mention pills (`@User`, `#channel`, `@role`, `@here`).
pub const MENTION_STYLE: &str = "background-color: rgba(88, 101, 242, 0.3); color: #dee0fc; \
padding: 0 2px; border-radius: 3px; font-weight: 500; cursor: pointer;";

/// Hidden spoiler text, revealed on click.
pub const SPOILER_OPEN: &str = "<span class=\"spoiler\" style=\"background-color: #202225; \
color: #202225; padding: 0 2px; border-radius: 3px; cursor: pointer;\" \
onclick=\"this.style.color='#dcddde'; this.style.backgroundColor='rgb(54, 57, 63)';\">";

pub const INLINE_CODE_STYLE: &str = "background-color: #2f3136; padding: 2px 4px; \
border-radius: 3px; font-family: monospace; font-size: 85%;";

pub const LINK_STYLE: &str = "color: #00b0f4; text-decoration: none;";

pub const PRE_STYLE: &str = "background-color: #3f4146; padding: 8px; border-radius: 4px; \
margin: 8px 0; overflow-x: auto;";

pub const CODE_STYLE: &str = "background: transparent; padding: 0;";

pub const QUOTE_OPEN: &str =
    "<div style=\"border-left: 4px solid #4e5058; padding-left: 12px; margin: 4px 0;\">";

pub const H1_STYLE: &str = "font-size: 24px; font-weight: 600; margin: 8px 0 4px 0;";
pub const H2_STYLE: &str = "font-size: 20px; font-weight: 600; margin: 8px 0 4px 0;";
pub const H3_STYLE: &str = "font-size: 16px; font-weight: 600; margin: 8px 0 4px 0;";

pub const SUBTEXT_STYLE: &str = "font-size: 12px; color: #b9bbbe; margin: 4px 0;";

pub const LIST_OPEN: &str =
    "<ul style=\"margin: 4px 0; padding-left: 20px; list-style-type: disc;\">";

pub const LIST_ITEM_STYLE: &str = "margin: 2px 0;";

/// Heading style for levels 1 to 3.
pub fn heading_style(level: u8) -> &'static str {
    match level {
        1 => H1_STYLE,
        2 => H2_STYLE,
        _ => H3_STYLE,
    }
}

/// HTML-escape a string for text and attribute positions.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
