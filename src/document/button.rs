//! Button styles shared by v1 message buttons and v2 components

use serde::{Deserialize, Serialize};
use std::fmt;

/// A style number outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyleError(pub u8);

impl fmt::Display for ButtonStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown button style {} (expected 1 to 5)", self.0)
    }
}

impl std::error::Error for ButtonStyleError {}

/// Button style, stored in documents as its platform number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ButtonStyle {
    #[default]
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    /// Opens `url` instead of sending an interaction
    Link = 5,
}

impl ButtonStyle {
    /// Display label used in style pickers.
    pub fn label(&self) -> &'static str {
        match self {
            ButtonStyle::Primary => "Primary (blue)",
            ButtonStyle::Secondary => "Secondary (gray)",
            ButtonStyle::Success => "Success (green)",
            ButtonStyle::Danger => "Danger (red)",
            ButtonStyle::Link => "Link",
        }
    }

    /// Background color the client paints this style with.
    pub fn background(&self) -> &'static str {
        match self {
            ButtonStyle::Primary => "#5865f2",
            ButtonStyle::Secondary | ButtonStyle::Link => "#4e5058",
            ButtonStyle::Success => "#248046",
            ButtonStyle::Danger => "#da373c",
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, ButtonStyle::Link)
    }

    /// Get all styles in picker order.
    pub fn all() -> &'static [ButtonStyle] {
        &[
            ButtonStyle::Primary,
            ButtonStyle::Secondary,
            ButtonStyle::Success,
            ButtonStyle::Danger,
            ButtonStyle::Link,
        ]
    }
}

impl TryFrom<u8> for ButtonStyle {
    type Error = ButtonStyleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ButtonStyle::Primary),
            2 => Ok(ButtonStyle::Secondary),
            3 => Ok(ButtonStyle::Success),
            4 => Ok(ButtonStyle::Danger),
            5 => Ok(ButtonStyle::Link),
            other => Err(ButtonStyleError(other)),
        }
    }
}

impl From<ButtonStyle> for u8 {
    fn from(style: ButtonStyle) -> Self {
        style as u8
    }
}
