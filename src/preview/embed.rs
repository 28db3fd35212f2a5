//! Preview of a v1 embed message
//!
//! Message header, markdown content, the embed card (author, title,
//! description, fields, image, thumbnail, footer) and the button rows.

use super::html::{button, format_timestamp, image, link};
use crate::document::limits::BUTTONS_PER_ROW;
use crate::document::{EmbedButton, EmbedDocument, EmbedField};
use crate::markdown::{html_escape, MarkdownRenderer};
use chrono::Local;

/// Left border when the embed has no color.
pub const DEFAULT_BORDER: &str = "#202225";

const EMBED_STYLE: &str = "background-color: #2f3136; border-radius: 4px; padding: 16px; \
color: #dcddde; font-family: Whitney, 'Helvetica Neue', Helvetica, Arial, sans-serif; \
position: relative;";

/// `#rrggbb` border for the embed card.
///
/// Color 0 (black) falls back to the default border, as the client does.
pub fn border_color(doc: &EmbedDocument) -> String {
    match doc.color {
        Some(color) if color.value() != 0 => color.to_hex(),
        _ => DEFAULT_BORDER.to_string(),
    }
}

fn header(bot_name: &str) -> String {
    format!(
        "<div style=\"display: flex; align-items: center; margin-bottom: 2px;\">\
<span style=\"color: #ffffff; font-weight: 500; font-size: 16px; margin-right: 6px;\">{}</span>\
<span style=\"background-color: #5865f2; color: #ffffff; font-size: 10px; font-weight: 500; \
padding: 2px 4px; border-radius: 3px; text-transform: uppercase;\">BOT</span>\
<span style=\"color: #a3a6aa; font-size: 12px; margin-left: 6px;\">{}</span></div>",
        html_escape(bot_name),
        Local::now().format("%-I:%M %p")
    )
}

fn author(doc: &EmbedDocument) -> Option<String> {
    let author = doc.author.as_ref().filter(|a| !a.name.is_empty())?;

    let icon = author
        .icon_url
        .as_deref()
        .map(|src| {
            image(
                src,
                "author",
                "width: 24px; height: 24px; border-radius: 50%; margin-right: 8px;",
            )
        })
        .unwrap_or_default();
    let name = html_escape(&author.name);
    let name = match author.url.as_deref() {
        Some(url) => link(url, &name),
        None => format!("<span>{}</span>", name),
    };

    Some(format!(
        "<div style=\"display: flex; align-items: center; margin-bottom: 8px; font-size: 12px; \
font-weight: 600;\">{}{}</div>",
        icon, name
    ))
}

fn title(doc: &EmbedDocument) -> Option<String> {
    let title = doc.title.as_deref().filter(|t| !t.is_empty())?;
    let text = html_escape(title);
    let text = match doc.url.as_deref() {
        Some(url) => link(url, &text),
        None => text,
    };
    Some(format!(
        "<div style=\"margin-bottom: 8px; font-size: 16px; font-weight: 600;\">{}</div>",
        text
    ))
}

fn field(field: &EmbedField, md: &MarkdownRenderer) -> String {
    format!(
        "<div style=\"grid-column: {}; font-size: 14px;\">\
<div style=\"font-weight: 600; margin-bottom: 4px;\">{}</div>\
<div style=\"line-height: 1.375;\">{}</div></div>",
        if field.inline { "auto" } else { "1 / -1" },
        html_escape(&field.name),
        md.render(&field.value)
    )
}

fn fields(doc: &EmbedDocument, md: &MarkdownRenderer) -> Option<String> {
    if doc.fields.is_empty() {
        return None;
    }
    let inner: String = doc.fields.iter().map(|f| field(f, md)).collect();
    Some(format!(
        "<div class=\"fields\" style=\"display: grid; grid-template-columns: \
repeat(auto-fill, minmax(150px, 1fr)); gap: 8px; margin-bottom: 8px;\">{}</div>",
        inner
    ))
}

fn footer(doc: &EmbedDocument) -> Option<String> {
    let text = doc
        .footer
        .as_ref()
        .map(|f| f.text.as_str())
        .filter(|t| !t.is_empty());
    let timestamp = doc
        .timestamp
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(format_timestamp);
    if text.is_none() && timestamp.is_none() {
        return None;
    }

    let icon = doc
        .footer
        .as_ref()
        .and_then(|f| f.icon_url.as_deref())
        .map(|src| {
            image(
                src,
                "footer",
                "width: 20px; height: 20px; border-radius: 50%; margin-right: 8px;",
            )
        })
        .unwrap_or_default();

    let line = match (text, timestamp) {
        (Some(text), Some(ts)) => format!("{} • {}", html_escape(text), html_escape(&ts)),
        (Some(text), None) => html_escape(text),
        (None, Some(ts)) => html_escape(&ts),
        (None, None) => String::new(),
    };

    Some(format!(
        "<div style=\"display: flex; align-items: center; font-size: 12px; margin-top: 8px; \
color: #b9bbbe;\">{}<span>{}</span></div>",
        icon, line
    ))
}

/// The embed card on its own.
pub fn embed_card(doc: &EmbedDocument, md: &MarkdownRenderer) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(url) = doc.thumbnail.as_ref().map(|t| t.url.as_str()).filter(|u| !u.is_empty()) {
        parts.push(image(
            url,
            "thumbnail",
            "position: absolute; top: 16px; right: 16px; width: 80px; height: 80px; \
object-fit: cover; border-radius: 8px;",
        ));
    }
    parts.extend(author(doc));
    parts.extend(title(doc));
    if let Some(description) = doc.description.as_deref().filter(|d| !d.is_empty()) {
        parts.push(format!(
            "<div style=\"margin-bottom: 8px; font-size: 14px; line-height: 1.375;\">{}</div>",
            md.render(description)
        ));
    }
    parts.extend(fields(doc, md));
    if let Some(url) = doc.image.as_ref().map(|i| i.url.as_str()).filter(|u| !u.is_empty()) {
        parts.push(image(
            url,
            "embed image",
            "margin-top: 16px; max-width: 400px; width: 100%; border-radius: 4px; display: block;",
        ));
    }
    parts.extend(footer(doc));

    format!(
        "<div class=\"embed-preview\" style=\"{} border-left: 4px solid {};\">{}</div>",
        EMBED_STYLE,
        border_color(doc),
        parts.concat()
    )
}

/// Buttons laid out in rows of five.
pub fn button_rows(buttons: &[EmbedButton]) -> Option<String> {
    if buttons.is_empty() {
        return None;
    }
    let rows: Vec<String> = buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            let inner: String = row
                .iter()
                .map(|b| button(&b.label, b.style, b.url.as_deref(), b.disabled))
                .collect();
            format!("<div style=\"display: flex; gap: 8px;\">{}</div>", inner)
        })
        .collect();
    Some(format!(
        "<div style=\"margin-top: 8px; display: flex; flex-direction: column; gap: 8px;\">{}</div>",
        rows.concat()
    ))
}

/// The whole message: header, content, embed card and buttons.
pub fn message(doc: &EmbedDocument, md: &MarkdownRenderer, bot_name: &str) -> String {
    let content = doc
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| {
            format!(
                "<div style=\"color: #dcddde; font-size: 16px; line-height: 1.375; \
margin-bottom: 4px; word-wrap: break-word;\">{}</div>",
                md.render(c)
            )
        })
        .unwrap_or_default();

    format!(
        "<div class=\"message\" style=\"max-width: 576px; min-width: 0;\">{}{}{}{}</div>",
        header(bot_name),
        content,
        embed_card(doc, md),
        button_rows(&doc.buttons).unwrap_or_default()
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
