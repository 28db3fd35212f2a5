//! Embed accent colors
//!
//! Colors live in the 24-bit RGB integer domain `0..=0xFFFFFF`. The JSON
//! document stores them as plain integers; the editor shows and accepts
//! them as `#rrggbb` text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest representable color (`#ffffff`).
pub const MAX_COLOR: u32 = 0xFF_FF_FF;

/// Maximum number of hex digits accepted by the color text input.
pub const HEX_DIGITS: usize = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// An integer outside `0..=16777215` was offered as a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRangeError(pub i64);

impl fmt::Display for ColorRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "color {} is out of range (expected 0 to {})",
            self.0, MAX_COLOR
        )
    }
}

impl std::error::Error for ColorRangeError {}

/// A keystroke in the hex color input was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorInputError {
    /// A character that is not a hex digit
    InvalidCharacter(char),
    /// More than six hex digits
    TooLong(usize),
    /// Fewer than six hex digits where a complete color is required
    Incomplete(usize),
}

impl fmt::Display for ColorInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorInputError::InvalidCharacter(c) => {
                write!(f, "'{}' is not a hexadecimal digit", c)
            }
            ColorInputError::TooLong(len) => write!(
                f,
                "hex color has {} digits, at most {} are allowed",
                len, HEX_DIGITS
            ),
            ColorInputError::Incomplete(len) => {
                write!(f, "hex color has only {} of {} digits", len, HEX_DIGITS)
            }
        }
    }
}

impl std::error::Error for ColorInputError {}

// ─────────────────────────────────────────────────────────────────────────────
// Color
// ─────────────────────────────────────────────────────────────────────────────

/// A range-checked 24-bit RGB color.
///
/// Deserialization goes through [`TryFrom<i64>`], so a document carrying a
/// negative or oversized color is rejected when it is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Color(u32);

impl Color {
    /// The platform's "blurple", used as the default container accent.
    pub const BLURPLE: Color = Color(0x58_65_F2);

    /// Create a color from any integer, rejecting values outside the RGB domain.
    pub fn new(value: i64) -> Result<Self, ColorRangeError> {
        Self::try_from(value)
    }

    /// The integer value in `0..=16777215`.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Lowercase `#rrggbb` form, zero padded.
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0)
    }

    /// Parse a complete color string: exactly six hex digits, `#` optional.
    pub fn from_hex(text: &str) -> Result<Self, ColorInputError> {
        let color = parse_hex_input(text)?;
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() < HEX_DIGITS {
            return Err(ColorInputError::Incomplete(digits.len()));
        }
        Ok(color)
    }
}

impl TryFrom<i64> for Color {
    type Error = ColorRangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=MAX_COLOR as i64).contains(&value) {
            Ok(Color(value as u32))
        } else {
            Err(ColorRangeError(value))
        }
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text Input
// ─────────────────────────────────────────────────────────────────────────────

/// Interpret the current contents of the hex color text box.
///
/// Accepts zero to six hex digits with an optional leading `#`. Partial
/// input is tolerated and converted as-is (`"fff"` is `0x000fff`, an empty
/// box is black). Anything else is refused so the previous value stays.
pub fn parse_hex_input(text: &str) -> Result<Color, ColorInputError> {
    let digits = text.strip_prefix('#').unwrap_or(text);

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorInputError::InvalidCharacter(bad));
    }
    if digits.len() > HEX_DIGITS {
        return Err(ColorInputError::TooLong(digits.len()));
    }
    if digits.is_empty() {
        return Ok(Color(0));
    }

    // At most six ASCII hex digits, always fits
    u32::from_str_radix(digits, 16)
        .map(Color)
        .map_err(|_| ColorInputError::TooLong(digits.len()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_hex() {
        let color = Color::new(5814783).unwrap();
        let hex = color.to_hex();
        assert_eq!(hex, "#58b9ff");
        assert_eq!(parse_hex_input(&hex).unwrap().value(), 5814783);
        assert_eq!(Color::from_hex(&hex).unwrap().value(), 5814783);
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(Color::new(0).unwrap().to_hex(), "#000000");
        assert_eq!(Color::new(16777215).unwrap().to_hex(), "#ffffff");
        assert_eq!(Color::new(-1), Err(ColorRangeError(-1)));
        assert_eq!(Color::new(16777216), Err(ColorRangeError(16777216)));
    }

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(Color::new(0xff).unwrap().to_hex(), "#0000ff");
    }

    #[test]
    fn test_input_accepts_with_and_without_hash() {
        assert_eq!(parse_hex_input("#5865F2").unwrap(), Color::BLURPLE);
        assert_eq!(parse_hex_input("5865f2").unwrap(), Color::BLURPLE);
    }

    #[test]
    fn test_input_tolerates_partial_values() {
        assert_eq!(parse_hex_input("").unwrap().value(), 0);
        assert_eq!(parse_hex_input("#").unwrap().value(), 0);
        assert_eq!(parse_hex_input("fff").unwrap().value(), 0xfff);
    }

    #[test]
    fn test_input_rejects_bad_keystrokes() {
        assert_eq!(
            parse_hex_input("#12345g"),
            Err(ColorInputError::InvalidCharacter('g'))
        );
        assert_eq!(
            parse_hex_input("1234567"),
            Err(ColorInputError::TooLong(7))
        );
    }

    #[test]
    fn test_from_hex_requires_full_value() {
        assert_eq!(Color::from_hex("#fff"), Err(ColorInputError::Incomplete(3)));
        assert_eq!(
            Color::from_hex("#zzzzzz"),
            Err(ColorInputError::InvalidCharacter('z'))
        );
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let ok: Color = serde_json::from_str("5814783").unwrap();
        assert_eq!(ok.value(), 5814783);
        assert_eq!(serde_json::to_string(&ok).unwrap(), "5814783");

        assert!(serde_json::from_str::<Color>("-5").is_err());
        assert!(serde_json::from_str::<Color>("16777216").is_err());
    }
}
