//! Platform content limits and the advisory character budget
//!
//! Limits are counted in characters. Only the list-length caps are enforced
//! (at the mutation boundary, see [`super::EditError::CapReached`]); every
//! other limit is reported as data so the editor can warn without blocking.

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const CONTENT_MAX: usize = 2000;
pub const TITLE_MAX: usize = 256;
pub const DESCRIPTION_MAX: usize = 4096;
pub const AUTHOR_NAME_MAX: usize = 256;
pub const FOOTER_TEXT_MAX: usize = 2048;
pub const FIELD_NAME_MAX: usize = 256;
pub const FIELD_VALUE_MAX: usize = 1024;
pub const BUTTON_LABEL_MAX: usize = 80;

/// Hard cap on embed fields.
pub const MAX_FIELDS: usize = 25;

/// Hard cap on message buttons.
pub const MAX_BUTTONS: usize = 25;

/// Buttons are laid out in rows of this many.
pub const BUTTONS_PER_ROW: usize = 5;

/// Soft limit on the summed length of all embed text.
pub const EMBED_CHARACTER_BUDGET: usize = 6000;

// ─────────────────────────────────────────────────────────────────────────────
// Character Budget
// ─────────────────────────────────────────────────────────────────────────────

/// Result of the advisory character budget check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterBudget {
    /// Sum of title, description, author name, footer text, field names and values
    pub total: usize,
    /// The budget the total is compared against
    pub limit: usize,
    /// `total > limit`
    pub over_limit: bool,
}

impl CharacterBudget {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            limit: EMBED_CHARACTER_BUDGET,
            over_limit: total > EMBED_CHARACTER_BUDGET,
        }
    }

    /// Status line shown above the form, e.g. `"Total characters: 120 / 6000"`.
    pub fn summary(&self) -> String {
        format!("Total characters: {} / {}", self.total, self.limit)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Violations
// ─────────────────────────────────────────────────────────────────────────────

/// One advisory limit violation found by `validate()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitViolation {
    /// A text slot exceeds its character limit.
    TooLong {
        field: String,
        len: usize,
        max: usize,
    },
    /// A list holds more entries than the platform accepts.
    TooMany {
        collection: &'static str,
        len: usize,
        max: usize,
    },
    /// A link-style button has no URL.
    MissingButtonUrl { index: usize },
    /// The embed as a whole exceeds the character budget.
    OverBudget { total: usize, limit: usize },
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitViolation::TooLong { field, len, max } => {
                write!(f, "{} is {} characters long (limit {})", field, len, max)
            }
            LimitViolation::TooMany {
                collection,
                len,
                max,
            } => write!(f, "{} has {} entries (limit {})", collection, len, max),
            LimitViolation::MissingButtonUrl { index } => {
                write!(f, "buttons[{}] is a link button without a URL", index)
            }
            LimitViolation::OverBudget { total, limit } => write!(
                f,
                "embed text totals {} characters (budget {})",
                total, limit
            ),
        }
    }
}

/// Push a `TooLong` violation when `len > max`.
pub(crate) fn check_len(
    violations: &mut Vec<LimitViolation>,
    field: impl Into<String>,
    len: usize,
    max: usize,
) {
    if len > max {
        violations.push(LimitViolation::TooLong {
            field: field.into(),
            len,
            max,
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_boundary() {
        assert!(!CharacterBudget::new(6000).over_limit);
        assert!(CharacterBudget::new(6001).over_limit);
        assert_eq!(CharacterBudget::new(10).limit, 6000);
    }

    #[test]
    fn test_budget_summary() {
        assert_eq!(
            CharacterBudget::new(42).summary(),
            "Total characters: 42 / 6000"
        );
    }

    #[test]
    fn test_check_len_only_reports_overflow() {
        let mut violations = Vec::new();
        check_len(&mut violations, "title", 256, TITLE_MAX);
        assert!(violations.is_empty());

        check_len(&mut violations, "title", 257, TITLE_MAX);
        assert_eq!(
            violations,
            vec![LimitViolation::TooLong {
                field: "title".to_string(),
                len: 257,
                max: 256
            }]
        );
    }

    #[test]
    fn test_violation_display() {
        let v = LimitViolation::MissingButtonUrl { index: 2 };
        assert_eq!(v.to_string(), "buttons[2] is a link button without a URL");
    }
}
