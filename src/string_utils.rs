//! UTF-8 Safe String Utilities
//!
//! Length limits on embed text are counted in characters, not bytes.
//! Characters like `ø`, `中`, `🎉` are multi-byte in UTF-8, so cutting a
//! string at a character limit must first map that limit to a byte offset
//! on a character boundary.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::truncate_chars;
//!
//! let title = "Hei på deg";
//! assert_eq!(truncate_chars(title, 5), "Hei p");
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Counting
// ─────────────────────────────────────────────────────────────────────────────

/// Number of characters (Unicode scalar values) in `s`.
#[inline]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Character count of an optional string, treating `None` as empty.
#[inline]
pub fn opt_char_count(s: Option<&str>) -> usize {
    s.map(char_count).unwrap_or(0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Convert a character index to a byte index.
///
/// Returns the string length if `char_index` is beyond the string.
pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Truncation
// ─────────────────────────────────────────────────────────────────────────────

/// Slice `s` down to at most `max_chars` characters.
///
/// Never splits a multi-byte character.
#[inline]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    &s[..char_index_to_byte_index(s, max_chars)]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_ascii_and_multibyte() {
        assert_eq!(char_count(""), 0);
        assert_eq!(char_count("Hello"), 5);
        assert_eq!(char_count("Hei på deg"), 10);
        assert_eq!(char_count("世界🎉"), 3);
    }

    #[test]
    fn test_opt_char_count() {
        assert_eq!(opt_char_count(None), 0);
        assert_eq!(opt_char_count(Some("abc")), 3);
    }

    #[test]
    fn test_char_index_to_byte_index() {
        let s = "Hei på deg";
        assert_eq!(char_index_to_byte_index(s, 0), 0);
        assert_eq!(char_index_to_byte_index(s, 5), 5); // 'å' starts at byte 5
        assert_eq!(char_index_to_byte_index(s, 6), 7); // after 2-byte 'å'
        assert_eq!(char_index_to_byte_index(s, 100), s.len());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Hello", 10), "Hello");
        assert_eq!(truncate_chars("Hello", 3), "Hel");
        assert_eq!(truncate_chars("Hei på deg", 6), "Hei på");
        assert_eq!(truncate_chars("🎉🎉🎉", 2), "🎉🎉");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
