//! Presentational field kinds. They render but never collect a value, so the
//! default (always valid) validator applies.

use serde_json::{Value, json};

use crate::field::descriptor::{FieldDescriptor, PaletteEntry, PropertySpec};
use crate::field::instance::{Attributes, FieldInstance};
use crate::field::kind::FieldType;

static TITLE_PROPERTIES: [PropertySpec; 1] = [PropertySpec::text("title", "Title", 1, 50)];
static PARAGRAPH_PROPERTIES: [PropertySpec; 1] = [PropertySpec::text("text", "Text", 1, 500)];
static SPACER_PROPERTIES: [PropertySpec; 1] =
    [PropertySpec::integer("height", "Height (px)", 5, 200)];

fn single(key: &str, value: Value) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(key.into(), value);
    attributes
}

fn heading(instance: &FieldInstance, size: &str) -> Value {
    json!({
        "type": "TextBlock",
        "id": instance.id(),
        "text": instance.attr_str("title").unwrap_or_default(),
        "size": size,
        "weight": "Bolder",
        "wrap": true,
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TitleFieldDescriptor;

impl FieldDescriptor for TitleFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::TitleField
    }

    fn default_attributes(&self) -> Attributes {
        single("title", json!("Title field"))
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &TITLE_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "heading-1",
            label: "Title field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        json!({
            "id": instance.id(),
            "type": instance.kind(),
            "label": "Title field",
            "title": instance.attr_str("title").unwrap_or_default(),
        })
    }

    fn render_runtime(&self, instance: &FieldInstance, _value: Option<&str>, _invalid: bool) -> Value {
        heading(instance, "Large")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleFieldDescriptor;

impl FieldDescriptor for SubtitleFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::SubtitleField
    }

    fn default_attributes(&self) -> Attributes {
        single("title", json!("Subtitle field"))
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &TITLE_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "heading-2",
            label: "Subtitle field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        json!({
            "id": instance.id(),
            "type": instance.kind(),
            "label": "Subtitle field",
            "title": instance.attr_str("title").unwrap_or_default(),
        })
    }

    fn render_runtime(&self, instance: &FieldInstance, _value: Option<&str>, _invalid: bool) -> Value {
        heading(instance, "Medium")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphFieldDescriptor;

impl FieldDescriptor for ParagraphFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::ParagraphField
    }

    fn default_attributes(&self) -> Attributes {
        single("text", json!("Text here"))
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &PARAGRAPH_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "pilcrow",
            label: "Paragraph field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        json!({
            "id": instance.id(),
            "type": instance.kind(),
            "label": "Paragraph field",
            "text": instance.attr_str("text").unwrap_or_default(),
        })
    }

    fn render_runtime(&self, instance: &FieldInstance, _value: Option<&str>, _invalid: bool) -> Value {
        json!({
            "type": "TextBlock",
            "id": instance.id(),
            "text": instance.attr_str("text").unwrap_or_default(),
            "wrap": true,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DividerFieldDescriptor;

impl FieldDescriptor for DividerFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::DividerField
    }

    fn default_attributes(&self) -> Attributes {
        Attributes::new()
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &[]
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "separator-horizontal",
            label: "Divider field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        json!({
            "id": instance.id(),
            "type": instance.kind(),
            "label": "Divider field",
        })
    }

    fn render_runtime(&self, instance: &FieldInstance, _value: Option<&str>, _invalid: bool) -> Value {
        json!({
            "type": "Container",
            "id": instance.id(),
            "separator": true,
            "items": [],
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpacerFieldDescriptor;

impl SpacerFieldDescriptor {
    fn height(instance: &FieldInstance) -> i64 {
        instance.attr_i64("height").unwrap_or(20)
    }
}

impl FieldDescriptor for SpacerFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::SpacerField
    }

    fn default_attributes(&self) -> Attributes {
        single("height", json!(20))
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &SPACER_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "separator-vertical",
            label: "Spacer field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        json!({
            "id": instance.id(),
            "type": instance.kind(),
            "label": "Spacer field",
            "height": Self::height(instance),
        })
    }

    fn render_runtime(&self, instance: &FieldInstance, _value: Option<&str>, _invalid: bool) -> Value {
        json!({
            "type": "Container",
            "id": instance.id(),
            "minHeight": format!("{}px", Self::height(instance)),
            "items": [],
        })
    }
}
