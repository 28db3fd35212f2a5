//! Embed Builder
//!
//! Core of a visual editor for chat-platform embed messages: the v1 embed
//! and v2 component document models, a markdown-to-HTML renderer that
//! follows the chat client's rules, a message preview and JSON/HTML export.

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod logging;
pub mod markdown;
pub mod preview;
pub mod state;
pub mod string_utils;

pub use config::Settings;
pub use document::{ComponentDocument, DocumentVariant, EditError, EmbedDocument};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use markdown::{render, MarkdownRenderer, RenderOptions};
pub use preview::PreviewRenderer;
pub use state::EditorState;
