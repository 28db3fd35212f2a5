//! Live preview of the document being edited
//!
//! Turns either document variant into an HTML fragment styled like the chat
//! client. Markdown slots go through [`MarkdownRenderer`]; plain-text slots
//! (titles, names, labels) are escaped.

mod components;
mod embed;
pub mod html;

pub use components::{component_tree, container, EMPTY_NOTICE};
pub use embed::{border_color, button_rows, embed_card, message, DEFAULT_BORDER};

use crate::document::{ComponentDocument, DocumentVariant, EmbedDocument};
use crate::markdown::{MarkdownRenderer, RenderOptions};

/// Name shown in the message header.
pub const DEFAULT_BOT_NAME: &str = "Embed Bot";

/// Renders documents to preview HTML.
#[derive(Debug, Clone)]
pub struct PreviewRenderer {
    markdown: MarkdownRenderer,
    bot_name: String,
}

impl Default for PreviewRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl PreviewRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            markdown: MarkdownRenderer::new(options),
            bot_name: DEFAULT_BOT_NAME.to_string(),
        }
    }

    pub fn with_bot_name(mut self, name: impl Into<String>) -> Self {
        self.bot_name = name.into();
        self
    }

    pub fn markdown(&self) -> &MarkdownRenderer {
        &self.markdown
    }

    /// Message preview for a v1 document.
    pub fn render_embed(&self, doc: &EmbedDocument) -> String {
        message(doc, &self.markdown, &self.bot_name)
    }

    /// Container preview for a v2 document.
    pub fn render_components(&self, doc: &ComponentDocument) -> String {
        component_tree(doc, &self.markdown)
    }

    /// Preview of whichever document `variant` selects.
    pub fn render(
        &self,
        variant: DocumentVariant,
        embed: &EmbedDocument,
        components: &ComponentDocument,
    ) -> String {
        match variant {
            DocumentVariant::V1 => self.render_embed(embed),
            DocumentVariant::V2 => self.render_components(components),
        }
    }
}
