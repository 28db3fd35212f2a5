//! Small HTML builders shared by the embed and component previews

use crate::document::ButtonStyle;
use crate::markdown::styles::LINK_STYLE;
use crate::markdown::html_escape;
use chrono::DateTime;

/// Broken images hide themselves instead of showing a placeholder icon.
const IMG_ONERROR: &str = "this.style.display='none'";

const BUTTON_BASE_STYLE: &str = "padding: 2px 16px; min-height: 32px; border-radius: 3px; \
font-weight: 500; font-size: 14px; border: none; text-decoration: none; \
display: inline-flex; align-items: center; justify-content: center; color: #ffffff;";

const EXTERNAL_LINK_ICON: &str = "<svg width=\"16\" height=\"16\" viewBox=\"0 0 16 16\" \
fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\" stroke-linecap=\"round\" \
stroke-linejoin=\"round\" style=\"margin-inline-start: 8px;\">\
<path d=\"M11 2H14V5M14 2L9 7\"/>\
<path d=\"M14 9V13C14 13.5 13.5 14 13 14H3C2.5 14 2 13.5 2 13V3C2 2.5 2.5 2 3 2H7\"/></svg>";

/// `<img>` that hides itself when the source fails to load.
pub fn image(src: &str, alt: &str, style: &str) -> String {
    format!(
        "<img src=\"{}\" alt=\"{}\" style=\"{}\" onerror=\"{}\">",
        html_escape(src),
        html_escape(alt),
        style,
        IMG_ONERROR
    )
}

/// Anchor with the preview's link color. `text` must already be HTML.
pub fn link(href: &str, text: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" style=\"{}\">{}</a>",
        html_escape(href),
        LINK_STYLE,
        text
    )
}

/// A button the way the client paints it.
///
/// Link buttons with a URL become anchors carrying the external-link icon.
/// An empty label shows `Link` or `Button` depending on the style.
pub fn button(label: &str, style: ButtonStyle, url: Option<&str>, disabled: bool) -> String {
    let css = format!(
        "{} background-color: {}; cursor: {}; opacity: {};",
        BUTTON_BASE_STYLE,
        style.background(),
        if disabled { "not-allowed" } else { "pointer" },
        if disabled { "0.5" } else { "1" }
    );

    let url = url.filter(|u| !u.trim().is_empty());
    match url {
        Some(url) if style.is_link() => {
            let label = if label.is_empty() { "Link" } else { label };
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" style=\"{}\">{}{}</a>",
                html_escape(url),
                css,
                html_escape(label),
                EXTERNAL_LINK_ICON
            )
        }
        _ => {
            let label = if label.is_empty() { "Button" } else { label };
            format!(
                "<button style=\"{}\"{}>{}</button>",
                css,
                if disabled { " disabled" } else { "" },
                html_escape(label)
            )
        }
    }
}

/// Format an ISO-8601 timestamp like `Jan 5, 2024 3:07 PM`, in the
/// timestamp's own UTC offset. Unparseable input is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%b %-d, %Y %-I:%M %p").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
