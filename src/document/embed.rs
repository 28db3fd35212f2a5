//! The v1 embed document
//!
//! An [`EmbedDocument`] is the JSON payload the editor builds: message
//! content, one embed (title, description, fields, media, author, footer)
//! and up to 25 buttons. Form setters clamp text to the slot's character
//! limit the way a length-limited input would; documents imported from JSON
//! are kept as written and only reported on by [`EmbedDocument::validate`].

use super::limits::{
    check_len, CharacterBudget, LimitViolation, AUTHOR_NAME_MAX, BUTTON_LABEL_MAX, CONTENT_MAX,
    DESCRIPTION_MAX, FIELD_NAME_MAX, FIELD_VALUE_MAX, FOOTER_TEXT_MAX, MAX_BUTTONS, MAX_FIELDS,
    TITLE_MAX,
};
use super::{check_index, ButtonStyle, Collection, Color, ColorInputError, EditError};
use crate::string_utils::{char_count, opt_char_count, truncate_chars};
use chrono::{SecondsFormat, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Nested Parts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmbedAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmbedFooter {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Image or thumbnail slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmbedMedia {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    /// Markdown
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmbedButton {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub style: ButtonStyle,
    /// Required when `style` is [`ButtonStyle::Link`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// EmbedDocument
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmbedDocument {
    /// Plain message text shown above the embed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link applied to the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// ISO-8601
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    #[serde(default)]
    pub buttons: Vec<EmbedButton>,
}

/// Description of the starter document, touching every markdown construct.
const SAMPLE_DESCRIPTION: &str = "This is an example description. Markdown works too!\n\
\n\
https://example.com\n\
> Block Quotes\n\
```\n\
Code Blocks\n\
```\n\
*Emphasis* or _emphasis_\n\
`Inline code` or ``inline code``\n\
[Links](https://example.com)\n\
<@123>, <@!123>, <#123>, <@&123>, @here, @everyone mentions\n\
||Spoilers||\n\
~~Strikethrough~~\n\
**Strong**\n\
__Underline__\n\
- list1\n  - option1\n  - option2\n\
- list2\n\
# Title size\n\
## subtitle size\n\
### topic size\n\
-# subtext size";

/// `Some(text)` clamped to `max` characters, or `None` for an empty input.
fn text_slot(value: &str, max: usize) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(truncate_chars(value, max).to_string())
    }
}

fn url_slot(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Current time in the `2024-01-31T12:00:00.000Z` form.
pub(crate) fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl EmbedDocument {
    /// The document a fresh editor session starts with.
    pub fn sample() -> Self {
        Self {
            content: Some("Check out this awesome embed!".to_string()),
            title: Some("Sample Embed".to_string()),
            description: Some(SAMPLE_DESCRIPTION.to_string()),
            color: Some(Color::new(5814783).unwrap_or(Color::BLURPLE)),
            fields: vec![
                EmbedField {
                    name: "Field 1".to_string(),
                    value: "Value 1".to_string(),
                    inline: true,
                },
                EmbedField {
                    name: "Field 2".to_string(),
                    value: "Value 2".to_string(),
                    inline: true,
                },
            ],
            footer: Some(EmbedFooter {
                text: "Footer text".to_string(),
                icon_url: None,
            }),
            timestamp: Some(now_iso8601()),
            buttons: vec![
                EmbedButton {
                    label: "Primary".to_string(),
                    ..EmbedButton::default()
                },
                EmbedButton {
                    label: "Visit Website".to_string(),
                    style: ButtonStyle::Link,
                    url: Some("https://example.com".to_string()),
                    disabled: false,
                },
            ],
            ..Self::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Limits
    // ─────────────────────────────────────────────────────────────────────────

    /// Sum of the text counted against the embed character budget.
    ///
    /// Message `content` and button labels are not part of the embed and
    /// are not counted.
    pub fn character_count(&self) -> usize {
        let fields: usize = self
            .fields
            .iter()
            .map(|f| char_count(&f.name) + char_count(&f.value))
            .sum();

        opt_char_count(self.title.as_deref())
            + opt_char_count(self.description.as_deref())
            + opt_char_count(self.author.as_ref().map(|a| a.name.as_str()))
            + opt_char_count(self.footer.as_ref().map(|f| f.text.as_str()))
            + fields
    }

    /// Advisory budget check; never blocks anything.
    pub fn budget(&self) -> CharacterBudget {
        CharacterBudget::new(self.character_count())
    }

    /// Collect every limit the document currently breaks.
    pub fn validate(&self) -> Vec<LimitViolation> {
        let mut violations = Vec::new();

        check_len(
            &mut violations,
            "content",
            opt_char_count(self.content.as_deref()),
            CONTENT_MAX,
        );
        check_len(
            &mut violations,
            "title",
            opt_char_count(self.title.as_deref()),
            TITLE_MAX,
        );
        check_len(
            &mut violations,
            "description",
            opt_char_count(self.description.as_deref()),
            DESCRIPTION_MAX,
        );
        if let Some(author) = &self.author {
            check_len(
                &mut violations,
                "author.name",
                char_count(&author.name),
                AUTHOR_NAME_MAX,
            );
        }
        if let Some(footer) = &self.footer {
            check_len(
                &mut violations,
                "footer.text",
                char_count(&footer.text),
                FOOTER_TEXT_MAX,
            );
        }

        if self.fields.len() > MAX_FIELDS {
            violations.push(LimitViolation::TooMany {
                collection: Collection::Fields.label(),
                len: self.fields.len(),
                max: MAX_FIELDS,
            });
        }
        for (i, field) in self.fields.iter().enumerate() {
            check_len(
                &mut violations,
                format!("fields[{}].name", i),
                char_count(&field.name),
                FIELD_NAME_MAX,
            );
            check_len(
                &mut violations,
                format!("fields[{}].value", i),
                char_count(&field.value),
                FIELD_VALUE_MAX,
            );
        }

        if self.buttons.len() > MAX_BUTTONS {
            violations.push(LimitViolation::TooMany {
                collection: Collection::Buttons.label(),
                len: self.buttons.len(),
                max: MAX_BUTTONS,
            });
        }
        for (i, button) in self.buttons.iter().enumerate() {
            check_len(
                &mut violations,
                format!("buttons[{}].label", i),
                char_count(&button.label),
                BUTTON_LABEL_MAX,
            );
            let has_url = button.url.as_deref().is_some_and(|u| !u.trim().is_empty());
            if button.style.is_link() && !has_url {
                violations.push(LimitViolation::MissingButtonUrl { index: i });
            }
        }

        let budget = self.budget();
        if budget.over_limit {
            violations.push(LimitViolation::OverBudget {
                total: budget.total,
                limit: budget.limit,
            });
        }

        violations
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text Slots
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_content(&mut self, value: &str) {
        self.content = text_slot(value, CONTENT_MAX);
    }

    pub fn set_title(&mut self, value: &str) {
        self.title = text_slot(value, TITLE_MAX);
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = text_slot(value, DESCRIPTION_MAX);
    }

    pub fn set_url(&mut self, value: &str) {
        self.url = url_slot(value);
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Apply the hex color text box. A refused keystroke keeps the old color.
    pub fn set_color_input(&mut self, text: &str) -> Result<Color, ColorInputError> {
        let color = super::parse_hex_input(text)?;
        self.color = Some(color);
        Ok(color)
    }

    /// Set or clear the timestamp; an empty string clears it.
    pub fn set_timestamp(&mut self, value: &str) {
        self.timestamp = url_slot(value);
    }

    pub fn set_timestamp_now(&mut self) {
        self.timestamp = Some(now_iso8601());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Author / Footer / Media
    // ─────────────────────────────────────────────────────────────────────────

    /// The author block, created on first access.
    pub fn author_mut(&mut self) -> &mut EmbedAuthor {
        self.author.get_or_insert_with(EmbedAuthor::default)
    }

    pub fn set_author_name(&mut self, value: &str) {
        self.author_mut().name = truncate_chars(value, AUTHOR_NAME_MAX).to_string();
    }

    pub fn set_author_url(&mut self, value: &str) {
        self.author_mut().url = url_slot(value);
    }

    pub fn set_author_icon_url(&mut self, value: &str) {
        self.author_mut().icon_url = url_slot(value);
    }

    /// The footer block, created on first access.
    pub fn footer_mut(&mut self) -> &mut EmbedFooter {
        self.footer.get_or_insert_with(EmbedFooter::default)
    }

    pub fn set_footer_text(&mut self, value: &str) {
        self.footer_mut().text = truncate_chars(value, FOOTER_TEXT_MAX).to_string();
    }

    pub fn set_footer_icon_url(&mut self, value: &str) {
        self.footer_mut().icon_url = url_slot(value);
    }

    pub fn set_image_url(&mut self, value: &str) {
        self.image = url_slot(value).map(|url| EmbedMedia { url });
    }

    pub fn set_thumbnail_url(&mut self, value: &str) {
        self.thumbnail = url_slot(value).map(|url| EmbedMedia { url });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fields
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an empty field. Refused once 25 fields exist.
    pub fn add_field(&mut self) -> Result<usize, EditError> {
        if self.fields.len() >= MAX_FIELDS {
            debug!("Refusing field insertion at cap {}", MAX_FIELDS);
            return Err(EditError::CapReached {
                collection: Collection::Fields,
                limit: MAX_FIELDS,
            });
        }
        self.fields.push(EmbedField::default());
        Ok(self.fields.len() - 1)
    }

    /// Whether another field can be added.
    pub fn can_add_field(&self) -> bool {
        self.fields.len() < MAX_FIELDS
    }

    pub fn field_mut(&mut self, index: usize) -> Result<&mut EmbedField, EditError> {
        check_index("field", index, self.fields.len())?;
        Ok(&mut self.fields[index])
    }

    pub fn set_field_name(&mut self, index: usize, value: &str) -> Result<(), EditError> {
        self.field_mut(index)?.name = truncate_chars(value, FIELD_NAME_MAX).to_string();
        Ok(())
    }

    pub fn set_field_value(&mut self, index: usize, value: &str) -> Result<(), EditError> {
        self.field_mut(index)?.value = truncate_chars(value, FIELD_VALUE_MAX).to_string();
        Ok(())
    }

    pub fn set_field_inline(&mut self, index: usize, inline: bool) -> Result<(), EditError> {
        self.field_mut(index)?.inline = inline;
        Ok(())
    }

    pub fn remove_field(&mut self, index: usize) -> Result<EmbedField, EditError> {
        check_index("field", index, self.fields.len())?;
        Ok(self.fields.remove(index))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Buttons
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a primary button with an empty label. Refused once 25 buttons exist.
    pub fn add_button(&mut self) -> Result<usize, EditError> {
        if self.buttons.len() >= MAX_BUTTONS {
            debug!("Refusing button insertion at cap {}", MAX_BUTTONS);
            return Err(EditError::CapReached {
                collection: Collection::Buttons,
                limit: MAX_BUTTONS,
            });
        }
        self.buttons.push(EmbedButton::default());
        Ok(self.buttons.len() - 1)
    }

    pub fn can_add_button(&self) -> bool {
        self.buttons.len() < MAX_BUTTONS
    }

    pub fn button_mut(&mut self, index: usize) -> Result<&mut EmbedButton, EditError> {
        check_index("button", index, self.buttons.len())?;
        Ok(&mut self.buttons[index])
    }

    pub fn set_button_label(&mut self, index: usize, value: &str) -> Result<(), EditError> {
        self.button_mut(index)?.label = truncate_chars(value, BUTTON_LABEL_MAX).to_string();
        Ok(())
    }

    pub fn set_button_style(&mut self, index: usize, style: ButtonStyle) -> Result<(), EditError> {
        self.button_mut(index)?.style = style;
        Ok(())
    }

    pub fn set_button_url(&mut self, index: usize, value: &str) -> Result<(), EditError> {
        self.button_mut(index)?.url = url_slot(value);
        Ok(())
    }

    pub fn set_button_disabled(&mut self, index: usize, disabled: bool) -> Result<(), EditError> {
        self.button_mut(index)?.disabled = disabled;
        Ok(())
    }

    pub fn remove_button(&mut self, index: usize) -> Result<EmbedButton, EditError> {
        check_index("button", index, self.buttons.len())?;
        Ok(self.buttons.remove(index))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn full_of_fields() -> EmbedDocument {
        let mut doc = EmbedDocument::default();
        for _ in 0..MAX_FIELDS {
            doc.add_field().unwrap();
        }
        doc
    }

    #[test]
    fn test_twenty_sixth_field_is_refused() {
        let mut doc = full_of_fields();
        assert_eq!(doc.fields.len(), 25);
        assert!(!doc.can_add_field());

        let err = doc.add_field().unwrap_err();
        assert_eq!(
            err,
            EditError::CapReached {
                collection: Collection::Fields,
                limit: 25
            }
        );
        assert_eq!(doc.fields.len(), 25);
    }

    #[test]
    fn test_twenty_sixth_button_is_refused() {
        let mut doc = EmbedDocument::default();
        for i in 0..MAX_BUTTONS {
            assert_eq!(doc.add_button().unwrap(), i);
        }
        assert!(matches!(
            doc.add_button(),
            Err(EditError::CapReached {
                collection: Collection::Buttons,
                ..
            })
        ));
        assert_eq!(doc.buttons.len(), 25);
    }

    #[test]
    fn test_removing_makes_room_again() {
        let mut doc = full_of_fields();
        doc.remove_field(0).unwrap();
        assert_eq!(doc.add_field().unwrap(), 24);
    }

    #[test]
    fn test_field_edits_by_index() {
        let mut doc = EmbedDocument::default();
        let i = doc.add_field().unwrap();
        doc.set_field_name(i, "Name").unwrap();
        doc.set_field_value(i, "**Value**").unwrap();
        doc.set_field_inline(i, true).unwrap();

        assert_eq!(
            doc.fields[0],
            EmbedField {
                name: "Name".to_string(),
                value: "**Value**".to_string(),
                inline: true
            }
        );
        assert!(doc.set_field_name(3, "x").is_err());
        assert!(doc.remove_field(1).is_err());
        assert_eq!(doc.fields.len(), 1);
    }

    #[test]
    fn test_setters_clamp_to_limits() {
        let mut doc = EmbedDocument::default();
        doc.set_title(&"t".repeat(300));
        assert_eq!(doc.title.as_deref().map(char_count), Some(TITLE_MAX));

        let i = doc.add_button().unwrap();
        doc.set_button_label(i, &"🎉".repeat(100)).unwrap();
        assert_eq!(char_count(&doc.buttons[i].label), BUTTON_LABEL_MAX);

        doc.set_title("");
        assert!(doc.title.is_none());
    }

    #[test]
    fn test_character_budget_counts_embed_text_only() {
        let mut doc = EmbedDocument::default();
        doc.set_content("not counted");
        doc.set_title("abc"); // 3
        doc.set_description("defg"); // 4
        doc.set_author_name("hi"); // 2
        doc.set_footer_text("foot"); // 4
        let i = doc.add_field().unwrap();
        doc.set_field_name(i, "n").unwrap(); // 1
        doc.set_field_value(i, "vv").unwrap(); // 2

        let budget = doc.budget();
        assert_eq!(budget.total, 16);
        assert!(!budget.over_limit);
    }

    #[test]
    fn test_over_budget_is_advisory() {
        let mut doc = EmbedDocument::default();
        doc.description = Some("d".repeat(4000));
        for _ in 0..3 {
            let i = doc.add_field().unwrap();
            doc.set_field_value(i, &"v".repeat(1000)).unwrap();
        }

        let budget = doc.budget();
        assert_eq!(budget.total, 7000);
        assert!(budget.over_limit);
        // Mutation still works
        assert!(doc.add_field().is_ok());
        assert!(doc
            .validate()
            .contains(&LimitViolation::OverBudget {
                total: 7000,
                limit: 6000
            }));
    }

    #[test]
    fn test_validate_reports_imported_overflow() {
        let json = format!(
            r#"{{"title": "{}", "buttons": [{{"label": "Go", "style": 5}}]}}"#,
            "x".repeat(257)
        );
        let doc: EmbedDocument = serde_json::from_str(&json).unwrap();
        let violations = doc.validate();

        assert!(violations.contains(&LimitViolation::TooLong {
            field: "title".to_string(),
            len: 257,
            max: 256
        }));
        assert!(violations.contains(&LimitViolation::MissingButtonUrl { index: 0 }));
    }

    #[test]
    fn test_sample_is_valid() {
        let doc = EmbedDocument::sample();
        assert!(doc.validate().is_empty());
        assert_eq!(doc.color.map(Color::value), Some(5814783));
        assert_eq!(doc.fields.len(), 2);
        assert_eq!(doc.buttons[1].style, ButtonStyle::Link);
    }

    #[test]
    fn test_color_input_keeps_previous_on_bad_keystroke() {
        let mut doc = EmbedDocument::default();
        doc.set_color_input("#58b9ff").unwrap();
        assert!(doc.set_color_input("#58b9fz").is_err());
        assert_eq!(doc.color.map(Color::value), Some(5814783));
    }

    #[test]
    fn test_json_shape() {
        let mut doc = EmbedDocument::default();
        doc.set_title("Hello");
        doc.set_color(Color::new(255).ok());
        doc.set_image_url("https://example.com/a.png");

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["color"], 255);
        assert_eq!(json["image"]["url"], "https://example.com/a.png");
        assert!(json.get("description").is_none());
        assert_eq!(json["fields"], serde_json::json!([]));
    }

    #[test]
    fn test_out_of_range_color_fails_to_parse() {
        let result = serde_json::from_str::<EmbedDocument>(r#"{"color": 16777216}"#);
        assert!(result.is_err());
        let result = serde_json::from_str::<EmbedDocument>(r#"{"color": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_nested_setters_create_blocks() {
        let mut doc = EmbedDocument::default();
        doc.set_author_icon_url("https://example.com/icon.png");
        doc.set_footer_icon_url(" ");

        let author = doc.author.as_ref().unwrap();
        assert_eq!(author.name, "");
        assert_eq!(author.icon_url.as_deref(), Some("https://example.com/icon.png"));
        assert_eq!(doc.footer.as_ref().unwrap().icon_url, None);
    }
}
