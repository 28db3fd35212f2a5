//! Preview of a v2 component tree

use super::embed::DEFAULT_BORDER;
use super::html::{button, image};
use crate::document::{
    Accessory, ActionRowItem, Component, ComponentDocument, Container, MediaItem, Section,
};
use crate::markdown::{html_escape, MarkdownRenderer};

/// Shown when the document has no containers yet.
pub const EMPTY_NOTICE: &str = "Add a container to see the preview";

const SPOILER_ATTRS: &str =
    "style=\"filter: blur(8px); cursor: pointer;\" onclick=\"this.style.filter='none'\"";

fn spoiler_wrap(html: String, spoiler: bool) -> String {
    if spoiler {
        format!("<div class=\"spoiler\" {}>{}</div>", SPOILER_ATTRS, html)
    } else {
        html
    }
}

fn text_block(content: &str, md: &MarkdownRenderer) -> String {
    format!(
        "<div style=\"font-size: 14px; line-height: 1.375;\">{}</div>",
        md.render(content)
    )
}

fn accessory(accessory: &Accessory) -> String {
    match accessory {
        Accessory::Button(b) => button(&b.label, b.style, b.url.as_deref(), b.disabled),
        Accessory::Thumbnail(t) if t.media.url.is_empty() => String::new(),
        Accessory::Thumbnail(t) => image(
            &t.media.url,
            t.description.as_deref().unwrap_or("thumbnail"),
            "width: 80px; height: 80px; object-fit: cover; border-radius: 8px;",
        ),
    }
}

fn section(section: &Section, md: &MarkdownRenderer) -> String {
    let texts: String = section
        .components
        .iter()
        .map(|t| text_block(t.content(), md))
        .collect();
    let side = section
        .accessory
        .as_ref()
        .map(|a| format!("<div style=\"flex-shrink: 0;\">{}</div>", accessory(a)))
        .unwrap_or_default();
    format!(
        "<div style=\"display: flex; gap: 12px; align-items: flex-start;\">\
<div style=\"flex: 1; min-width: 0;\">{}</div>{}</div>",
        texts, side
    )
}

fn media_item(item: &MediaItem) -> String {
    if item.media.url.is_empty() {
        return String::new();
    }
    let img = image(
        &item.media.url,
        item.description.as_deref().unwrap_or("media"),
        "width: 100%; border-radius: 4px; display: block;",
    );
    spoiler_wrap(img, item.spoiler)
}

fn component(component: &Component, md: &MarkdownRenderer) -> String {
    match component {
        Component::Section(s) => section(s, md),
        Component::TextDisplay(t) => text_block(&t.content, md),
        Component::MediaGallery(g) => {
            let items: String = g.items.iter().map(media_item).collect();
            format!(
                "<div style=\"display: grid; grid-template-columns: repeat(auto-fill, \
minmax(120px, 1fr)); gap: 4px;\">{}</div>",
                items
            )
        }
        Component::Separator(s) => {
            let margin = if s.spacing >= 2 { 16 } else { 8 };
            format!(
                "<hr style=\"border: none; border-top: 1px solid #4e5058; margin: {}px 0;\">",
                margin
            )
        }
        Component::File(f) => format!(
            "<div style=\"background-color: #2b2d31; border: 1px solid #1e1f22; \
border-radius: 4px; padding: 10px; color: #00b0f4; font-size: 14px;\">📄 {}</div>",
            html_escape(&f.filename)
        ),
        Component::ActionRow(row) => {
            let buttons: String = row
                .components
                .iter()
                .map(|item| match item {
                    ActionRowItem::Button(b) => {
                        button(&b.label, b.style, b.url.as_deref(), b.disabled)
                    }
                })
                .collect();
            format!(
                "<div style=\"display: flex; flex-wrap: wrap; gap: 8px;\">{}</div>",
                buttons
            )
        }
    }
}

/// One container card.
pub fn container(container: &Container, md: &MarkdownRenderer) -> String {
    let border = container
        .accent()
        .map(|c| c.to_hex())
        .unwrap_or_else(|| DEFAULT_BORDER.to_string());
    let inner: String = container
        .components
        .iter()
        .map(|c| component(c, md))
        .collect();
    let card = format!(
        "<div class=\"container\" style=\"background-color: #2f3136; border-left: 4px solid {}; \
border-radius: 8px; padding: 16px; color: #dcddde; display: flex; flex-direction: column; \
gap: 8px;\">{}</div>",
        border, inner
    );
    spoiler_wrap(card, container.spoiler)
}

/// The whole tree, containers stacked vertically.
pub fn component_tree(doc: &ComponentDocument, md: &MarkdownRenderer) -> String {
    if doc.containers.is_empty() {
        return format!(
            "<div style=\"color: rgba(255, 255, 255, 0.6); text-align: center; padding: 32px;\">{}</div>",
            EMPTY_NOTICE
        );
    }
    let cards: String = doc
        .containers
        .iter()
        .map(|c| format!("<div style=\"margin-bottom: 16px;\">{}</div>", container(c, md)))
        .collect();
    format!("<div class=\"components\">{}</div>", cards)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
