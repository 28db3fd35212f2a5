//! The v2 component document
//!
//! A [`ComponentDocument`] is a strict tree: containers own components,
//! sections own their text leaves and an optional accessory. Every
//! mutation addresses a node by explicit indices and is refused with an
//! [`EditError`] when an index does not resolve.

use super::embed::now_iso8601;
use super::{check_index, ButtonStyle, Color, EditError};
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Leaves
// ─────────────────────────────────────────────────────────────────────────────

/// A media reference (`{"url": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnfurledMedia {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Button {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub style: ButtonStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub media: UnfurledMedia,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Text leaf nested inside a section.
///
/// Serialized with the tag `"TextDisplay"`; the snake_case spelling used by
/// top-level components is accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SectionText {
    #[serde(rename = "TextDisplay", alias = "text_display")]
    TextDisplay {
        #[serde(default)]
        content: String,
    },
}

impl SectionText {
    pub fn new(content: impl Into<String>) -> Self {
        SectionText::TextDisplay {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            SectionText::TextDisplay { content } => content,
        }
    }
}

impl Default for SectionText {
    fn default() -> Self {
        SectionText::new("Text content")
    }
}

/// Section accessory, shown to the right of the section text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Accessory {
    Button(Button),
    Thumbnail(Thumbnail),
}

impl Accessory {
    pub fn kind(&self) -> AccessoryKind {
        match self {
            Accessory::Button(_) => AccessoryKind::Button,
            Accessory::Thumbnail(_) => AccessoryKind::Thumbnail,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryKind {
    Button,
    Thumbnail,
}

impl AccessoryKind {
    pub fn tag(&self) -> &'static str {
        match self {
            AccessoryKind::Button => "button",
            AccessoryKind::Thumbnail => "thumbnail",
        }
    }

    /// Fresh accessory of this kind. Buttons get a time-based `custom_id`.
    pub fn default_accessory(&self) -> Accessory {
        match self {
            AccessoryKind::Button => Accessory::Button(Button {
                label: "Button".to_string(),
                style: ButtonStyle::Primary,
                custom_id: Some(format!("btn_{}", Utc::now().timestamp_millis())),
                ..Button::default()
            }),
            AccessoryKind::Thumbnail => Accessory::Thumbnail(Thumbnail::default()),
        }
    }
}

/// Entry of an action row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionRowItem {
    Button(Button),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(default)]
    pub media: UnfurledMedia,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub spoiler: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Components
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub components: Vec<SectionText>,
    #[serde(default)]
    pub accessory: Option<Accessory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaGallery {
    #[serde(default)]
    pub items: Vec<MediaItem>,
}

fn default_spacing() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separator {
    /// 1 = small gap, 2 = large gap
    #[serde(default = "default_spacing")]
    pub spacing: u8,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextDisplay {
    /// Markdown
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileComponent {
    #[serde(default)]
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionRow {
    #[serde(default)]
    pub components: Vec<ActionRowItem>,
}

/// A node directly inside a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Section(Section),
    MediaGallery(MediaGallery),
    Separator(Separator),
    TextDisplay(TextDisplay),
    File(FileComponent),
    ActionRow(ActionRow),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Section(_) => ComponentKind::Section,
            Component::MediaGallery(_) => ComponentKind::MediaGallery,
            Component::Separator(_) => ComponentKind::Separator,
            Component::TextDisplay(_) => ComponentKind::TextDisplay,
            Component::File(_) => ComponentKind::File,
            Component::ActionRow(_) => ComponentKind::ActionRow,
        }
    }
}

/// Component types offered by the "add component" picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Section,
    MediaGallery,
    Separator,
    TextDisplay,
    File,
    ActionRow,
}

impl ComponentKind {
    /// JSON `type` tag.
    pub fn tag(&self) -> &'static str {
        match self {
            ComponentKind::Section => "section",
            ComponentKind::MediaGallery => "media_gallery",
            ComponentKind::Separator => "separator",
            ComponentKind::TextDisplay => "text_display",
            ComponentKind::File => "file",
            ComponentKind::ActionRow => "action_row",
        }
    }

    /// Picker label.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Section => "SectionComponents",
            ComponentKind::MediaGallery => "MediaGalleryComponents",
            ComponentKind::Separator => "SeparatorComponents",
            ComponentKind::TextDisplay => "TextDisplayComponents",
            ComponentKind::File => "FileComponents",
            ComponentKind::ActionRow => "ActionRowComponents",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.tag() == tag)
    }

    /// The payload a newly inserted component of this kind starts with.
    pub fn default_component(&self) -> Component {
        match self {
            ComponentKind::Section => Component::Section(Section::default()),
            ComponentKind::MediaGallery => Component::MediaGallery(MediaGallery::default()),
            ComponentKind::Separator => Component::Separator(Separator::default()),
            ComponentKind::TextDisplay => Component::TextDisplay(TextDisplay {
                content: "Text content".to_string(),
            }),
            ComponentKind::File => Component::File(FileComponent {
                filename: "file.txt".to_string(),
            }),
            ComponentKind::ActionRow => Component::ActionRow(ActionRow::default()),
        }
    }

    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::Section,
            ComponentKind::MediaGallery,
            ComponentKind::Separator,
            ComponentKind::TextDisplay,
            ComponentKind::File,
            ComponentKind::ActionRow,
        ]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Containers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub components: Vec<Component>,
    /// Accent color as `#rrggbb`
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub spoiler: bool,
}

impl Container {
    /// The accent color, if it parses as a complete hex value.
    pub fn accent(&self) -> Option<Color> {
        self.color
            .as_deref()
            .and_then(|hex| Color::from_hex(hex).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentDocument {
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl ComponentDocument {
    // ─────────────────────────────────────────────────────────────────────────
    // Container Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an empty container and return its index.
    pub fn add_container(&mut self) -> usize {
        self.containers.push(Container::default());
        self.containers.len() - 1
    }

    pub fn remove_container(&mut self, container: usize) -> Result<Container, EditError> {
        check_index("container", container, self.containers.len())?;
        Ok(self.containers.remove(container))
    }

    pub fn container_mut(&mut self, container: usize) -> Result<&mut Container, EditError> {
        check_index("container", container, self.containers.len())?;
        Ok(&mut self.containers[container])
    }

    pub fn set_container_color(
        &mut self,
        container: usize,
        color: Option<Color>,
    ) -> Result<(), EditError> {
        self.container_mut(container)?.color = color.map(Color::to_hex);
        Ok(())
    }

    pub fn set_container_spoiler(&mut self, container: usize, spoiler: bool) -> Result<(), EditError> {
        self.container_mut(container)?.spoiler = spoiler;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Component Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a component with its default payload and return its index.
    pub fn add_component(
        &mut self,
        container: usize,
        kind: ComponentKind,
    ) -> Result<usize, EditError> {
        let target = self.container_mut(container)?;
        target.components.push(kind.default_component());
        debug!("Added {} to container {}", kind.tag(), container);
        Ok(target.components.len() - 1)
    }

    pub fn remove_component(
        &mut self,
        container: usize,
        component: usize,
    ) -> Result<Component, EditError> {
        let target = self.container_mut(container)?;
        check_index("component", component, target.components.len())?;
        Ok(target.components.remove(component))
    }

    pub fn component_mut(
        &mut self,
        container: usize,
        component: usize,
    ) -> Result<&mut Component, EditError> {
        let target = self.container_mut(container)?;
        check_index("component", component, target.components.len())?;
        Ok(&mut target.components[component])
    }

    /// The section at the given position, refusing other component types.
    pub fn section_mut(
        &mut self,
        container: usize,
        component: usize,
    ) -> Result<&mut Section, EditError> {
        match self.component_mut(container, component)? {
            Component::Section(section) => Ok(section),
            _ => Err(EditError::NotASection {
                container,
                component,
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Section Text
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_text_display(&mut self, container: usize, component: usize) -> Result<usize, EditError> {
        let section = self.section_mut(container, component)?;
        section.components.push(SectionText::default());
        Ok(section.components.len() - 1)
    }

    pub fn remove_text_display(
        &mut self,
        container: usize,
        component: usize,
        text: usize,
    ) -> Result<SectionText, EditError> {
        let section = self.section_mut(container, component)?;
        check_index("text display", text, section.components.len())?;
        Ok(section.components.remove(text))
    }

    pub fn update_text_display(
        &mut self,
        container: usize,
        component: usize,
        text: usize,
        content: &str,
    ) -> Result<(), EditError> {
        let section = self.section_mut(container, component)?;
        check_index("text display", text, section.components.len())?;
        section.components[text] = SectionText::new(content);
        Ok(())
    }

    /// Move the text leaf at `from` so it ends up at `to`.
    pub fn reorder_text_displays(
        &mut self,
        container: usize,
        component: usize,
        from: usize,
        to: usize,
    ) -> Result<(), EditError> {
        let section = self.section_mut(container, component)?;
        let len = section.components.len();
        check_index("text display", from, len)?;
        check_index("text display", to, len)?;
        let moved = section.components.remove(from);
        section.components.insert(to, moved);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessory
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach a fresh accessory of `kind`, replacing any existing one.
    pub fn set_accessory(
        &mut self,
        container: usize,
        component: usize,
        kind: AccessoryKind,
    ) -> Result<(), EditError> {
        self.section_mut(container, component)?.accessory = Some(kind.default_accessory());
        Ok(())
    }

    pub fn remove_accessory(
        &mut self,
        container: usize,
        component: usize,
    ) -> Result<Option<Accessory>, EditError> {
        Ok(self.section_mut(container, component)?.accessory.take())
    }

    pub fn accessory_mut(
        &mut self,
        container: usize,
        component: usize,
    ) -> Result<&mut Accessory, EditError> {
        self.section_mut(container, component)?
            .accessory
            .as_mut()
            .ok_or(EditError::NoAccessory {
                container,
                component,
            })
    }

    fn accessory_button_mut(
        &mut self,
        container: usize,
        component: usize,
    ) -> Result<&mut Button, EditError> {
        match self.accessory_mut(container, component)? {
            Accessory::Button(button) => Ok(button),
            Accessory::Thumbnail(_) => Err(EditError::AccessoryMismatch {
                container,
                component,
                expected: AccessoryKind::Button,
            }),
        }
    }

    pub fn set_accessory_label(
        &mut self,
        container: usize,
        component: usize,
        label: &str,
    ) -> Result<(), EditError> {
        self.accessory_button_mut(container, component)?.label = label.to_string();
        Ok(())
    }

    pub fn set_accessory_style(
        &mut self,
        container: usize,
        component: usize,
        style: ButtonStyle,
    ) -> Result<(), EditError> {
        self.accessory_button_mut(container, component)?.style = style;
        Ok(())
    }

    pub fn set_accessory_custom_id(
        &mut self,
        container: usize,
        component: usize,
        custom_id: &str,
    ) -> Result<(), EditError> {
        let custom_id = custom_id.trim();
        self.accessory_button_mut(container, component)?.custom_id =
            (!custom_id.is_empty()).then(|| custom_id.to_string());
        Ok(())
    }

    pub fn set_accessory_media_url(
        &mut self,
        container: usize,
        component: usize,
        url: &str,
    ) -> Result<(), EditError> {
        match self.accessory_mut(container, component)? {
            Accessory::Thumbnail(thumbnail) => {
                thumbnail.media.url = url.to_string();
                Ok(())
            }
            Accessory::Button(_) => Err(EditError::AccessoryMismatch {
                container,
                component,
                expected: AccessoryKind::Thumbnail,
            }),
        }
    }

    /// Total number of components across all containers.
    pub fn component_count(&self) -> usize {
        self.containers.iter().map(|c| c.components.len()).sum()
    }
}

/// Starter v2 document: one blurple container with a section.
pub fn sample_components() -> ComponentDocument {
    ComponentDocument {
        containers: vec![Container {
            components: vec![
                Component::Section(Section {
                    components: vec![SectionText::new("## Welcome\nEdit this **section**.")],
                    accessory: None,
                }),
                Component::Separator(Separator::default()),
                Component::TextDisplay(TextDisplay {
                    content: format!("-# Created {}", now_iso8601()),
                }),
            ],
            color: Some(Color::BLURPLE.to_hex()),
            spoiler: false,
        }],
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_section() -> ComponentDocument {
        let mut doc = ComponentDocument::default();
        let c = doc.add_container();
        doc.add_component(c, ComponentKind::Section).unwrap();
        doc
    }

    #[test]
    fn test_default_payloads_serialize_like_the_platform() {
        let mut doc = ComponentDocument::default();
        let c = doc.add_container();
        for kind in ComponentKind::all() {
            doc.add_component(c, *kind).unwrap();
        }

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            json!({
                "containers": [{
                    "components": [
                        {"type": "section", "components": [], "accessory": null},
                        {"type": "media_gallery", "items": []},
                        {"type": "separator", "spacing": 1},
                        {"type": "text_display", "content": "Text content"},
                        {"type": "file", "filename": "file.txt"},
                        {"type": "action_row", "components": []}
                    ],
                    "color": null,
                    "spoiler": false
                }]
            })
        );
    }

    #[test]
    fn test_section_text_uses_pascal_tag() {
        let mut doc = doc_with_section();
        doc.add_text_display(0, 0).unwrap();
        let json = serde_json::to_value(&doc.containers[0].components[0]).unwrap();
        assert_eq!(
            json["components"][0],
            json!({"type": "TextDisplay", "content": "Text content"})
        );

        let parsed: SectionText =
            serde_json::from_str(r#"{"type": "text_display", "content": "hi"}"#).unwrap();
        assert_eq!(parsed.content(), "hi");
    }

    #[test]
    fn test_out_of_range_indices_are_refused() {
        let mut doc = doc_with_section();
        let before = doc.clone();

        assert!(doc.remove_container(1).is_err());
        assert!(doc.add_component(3, ComponentKind::File).is_err());
        assert!(doc.remove_component(0, 1).is_err());
        assert!(doc.remove_text_display(0, 0, 0).is_err());
        assert!(doc.set_accessory(0, 5, AccessoryKind::Button).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_section_ops_refuse_other_components() {
        let mut doc = ComponentDocument::default();
        let c = doc.add_container();
        doc.add_component(c, ComponentKind::Separator).unwrap();

        assert_eq!(
            doc.add_text_display(0, 0),
            Err(EditError::NotASection {
                container: 0,
                component: 0
            })
        );
    }

    #[test]
    fn test_text_display_edit_and_reorder() {
        let mut doc = doc_with_section();
        for _ in 0..3 {
            doc.add_text_display(0, 0).unwrap();
        }
        doc.update_text_display(0, 0, 0, "a").unwrap();
        doc.update_text_display(0, 0, 1, "b").unwrap();
        doc.update_text_display(0, 0, 2, "c").unwrap();

        doc.reorder_text_displays(0, 0, 0, 2).unwrap();
        let section = doc.section_mut(0, 0).unwrap();
        let order: Vec<&str> = section.components.iter().map(|t| t.content()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);

        assert!(doc.reorder_text_displays(0, 0, 0, 3).is_err());
        let removed = doc.remove_text_display(0, 0, 2).unwrap();
        assert_eq!(removed.content(), "a");
    }

    #[test]
    fn test_accessory_lifecycle() {
        let mut doc = doc_with_section();
        assert_eq!(
            doc.set_accessory_label(0, 0, "x"),
            Err(EditError::NoAccessory {
                container: 0,
                component: 0
            })
        );

        doc.set_accessory(0, 0, AccessoryKind::Button).unwrap();
        match doc.accessory_mut(0, 0).unwrap() {
            Accessory::Button(button) => {
                assert_eq!(button.label, "Button");
                assert!(button
                    .custom_id
                    .as_deref()
                    .is_some_and(|id| id.starts_with("btn_")));
            }
            other => panic!("expected button, got {:?}", other),
        }

        doc.set_accessory_label(0, 0, "Go").unwrap();
        doc.set_accessory_style(0, 0, ButtonStyle::Danger).unwrap();
        assert!(doc.set_accessory_media_url(0, 0, "https://x").is_err());

        doc.set_accessory(0, 0, AccessoryKind::Thumbnail).unwrap();
        doc.set_accessory_media_url(0, 0, "https://example.com/t.png")
            .unwrap();
        let json = serde_json::to_value(&doc.containers[0].components[0]).unwrap();
        assert_eq!(
            json["accessory"],
            json!({"type": "thumbnail", "media": {"url": "https://example.com/t.png"}})
        );

        let removed = doc.remove_accessory(0, 0).unwrap();
        assert_eq!(removed.map(|a| a.kind()), Some(AccessoryKind::Thumbnail));
    }

    #[test]
    fn test_container_color_and_spoiler() {
        let mut doc = ComponentDocument::default();
        let c = doc.add_container();
        doc.set_container_color(c, Some(Color::BLURPLE)).unwrap();
        doc.set_container_spoiler(c, true).unwrap();

        assert_eq!(doc.containers[0].color.as_deref(), Some("#5865f2"));
        assert_eq!(doc.containers[0].accent(), Some(Color::BLURPLE));
        assert!(doc.containers[0].spoiler);

        doc.set_container_color(c, None).unwrap();
        assert_eq!(doc.containers[0].accent(), None);
    }

    #[test]
    fn test_unknown_component_type_fails_to_parse() {
        let json = r#"{"containers": [{"components": [{"type": "select_menu"}]}]}"#;
        assert!(serde_json::from_str::<ComponentDocument>(json).is_err());
    }

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in ComponentKind::all() {
            assert_eq!(ComponentKind::from_tag(kind.tag()), Some(*kind));
            assert_eq!(kind.default_component().kind(), *kind);
        }
        assert_eq!(ComponentKind::from_tag("button"), None);
    }

    #[test]
    fn test_sample_components() {
        let doc = sample_components();
        assert_eq!(doc.containers.len(), 1);
        assert_eq!(doc.component_count(), 3);
    }
}
