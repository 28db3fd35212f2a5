//! Document model for the embed builder
//!
//! Two document shapes are edited side by side:
//!
//! - [`EmbedDocument`] (v1): a single rich embed plus message content and buttons
//! - [`ComponentDocument`] (v2): a tree of layout containers and components
//!
//! Both are plain serde data. Mutations go through methods that enforce the
//! hard caps and refuse out-of-range indices with an [`EditError`], leaving
//! the document unchanged.

mod button;
pub mod color;
mod components;
mod embed;
pub mod limits;

pub use button::{ButtonStyle, ButtonStyleError};
pub use color::{parse_hex_input, Color, ColorInputError, ColorRangeError};
pub use components::{
    Accessory, AccessoryKind, ActionRow, ActionRowItem, Button, Component, ComponentDocument,
    ComponentKind, Container, FileComponent, MediaGallery, MediaItem, Section, SectionText,
    Separator, TextDisplay, Thumbnail, UnfurledMedia, sample_components,
};
pub use embed::{EmbedAuthor, EmbedButton, EmbedDocument, EmbedField, EmbedFooter, EmbedMedia};
pub use limits::{CharacterBudget, LimitViolation};

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Document Variant
// ─────────────────────────────────────────────────────────────────────────────

/// Which document shape the editor is working on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentVariant {
    /// Classic embed
    #[default]
    V1,
    /// Component container tree
    V2,
}

impl DocumentVariant {
    /// Short tag used in file names (`v1`, `v2`).
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentVariant::V1 => "v1",
            DocumentVariant::V2 => "v2",
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentVariant::V1 => "Component v1",
            DocumentVariant::V2 => "Component v2",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            DocumentVariant::V1 => DocumentVariant::V2,
            DocumentVariant::V2 => DocumentVariant::V1,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Edit Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Capped collections of the v1 document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Fields,
    Buttons,
}

impl Collection {
    pub fn label(&self) -> &'static str {
        match self {
            Collection::Fields => "fields",
            Collection::Buttons => "buttons",
        }
    }
}

/// A refused mutation. The document is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// Insertion into a list that already holds `limit` entries.
    CapReached { collection: Collection, limit: usize },
    /// An index that does not address an existing node.
    IndexOutOfRange {
        target: &'static str,
        index: usize,
        len: usize,
    },
    /// A section-only operation aimed at another component type.
    NotASection { container: usize, component: usize },
    /// An accessory operation on a section without an accessory.
    NoAccessory { container: usize, component: usize },
    /// A button-only (or thumbnail-only) edit aimed at the other accessory kind.
    AccessoryMismatch {
        container: usize,
        component: usize,
        expected: AccessoryKind,
    },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::CapReached { collection, limit } => write!(
                f,
                "You can add at most {limit} {name}. Remove unused {name} or consider \
                 sending them in a separate message.",
                limit = limit,
                name = collection.label()
            ),
            EditError::IndexOutOfRange { target, index, len } => {
                write!(f, "{} {} does not exist (there are {})", target, index, len)
            }
            EditError::NotASection {
                container,
                component,
            } => write!(
                f,
                "component {} in container {} is not a section",
                component, container
            ),
            EditError::NoAccessory {
                container,
                component,
            } => write!(
                f,
                "section {} in container {} has no accessory",
                component, container
            ),
            EditError::AccessoryMismatch {
                container,
                component,
                expected,
            } => write!(
                f,
                "accessory of section {} in container {} is not a {}",
                component,
                container,
                expected.tag()
            ),
        }
    }
}

impl std::error::Error for EditError {}

/// Bounds-check `index` against `len`.
pub(crate) fn check_index(target: &'static str, index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::IndexOutOfRange { target, index, len })
    }
}
