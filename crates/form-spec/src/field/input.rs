//! Data-entry field kinds: every one of them contributes a value to a submission.

use serde_json::{Map, Value, json};

use crate::field::descriptor::{FieldDescriptor, PaletteEntry, PropertySpec};
use crate::field::instance::{Attributes, FieldInstance};
use crate::field::kind::FieldType;

const DEFAULT_HELPER: &str = "Helper text";
const DEFAULT_PLACEHOLDER: &str = "value here...";

const LABEL: PropertySpec = PropertySpec::text("label", "Label", 1, 50);
const HELPER_TEXT: PropertySpec = PropertySpec::text("helperText", "Helper text", 0, 200);
const REQUIRED: PropertySpec = PropertySpec::flag("required", "Required");
const PLACEHOLDER: PropertySpec = PropertySpec::text("placeholder", "Placeholder", 0, 50);

static TEXT_PROPERTIES: [PropertySpec; 4] = [LABEL, HELPER_TEXT, REQUIRED, PLACEHOLDER];
static TEXTAREA_PROPERTIES: [PropertySpec; 5] = [
    LABEL,
    HELPER_TEXT,
    REQUIRED,
    PLACEHOLDER,
    PropertySpec::integer("rows", "Rows", 2, 10),
];
static SELECT_PROPERTIES: [PropertySpec; 5] = [
    LABEL,
    HELPER_TEXT,
    REQUIRED,
    PLACEHOLDER,
    PropertySpec::options("options", "Options"),
];
static BASIC_PROPERTIES: [PropertySpec; 3] = [LABEL, HELPER_TEXT, REQUIRED];

fn base_attributes(label: &str, helper: &str, placeholder: bool) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert("label".into(), json!(label));
    attributes.insert("helperText".into(), json!(helper));
    attributes.insert("required".into(), json!(false));
    if placeholder {
        attributes.insert("placeholder".into(), json!(DEFAULT_PLACEHOLDER));
    }
    attributes
}

/// Canvas preview: a disabled input with its label, marker and helper text.
fn designer_node(instance: &FieldInstance) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("id".into(), json!(instance.id()));
    map.insert("type".into(), json!(instance.kind()));
    map.insert("label".into(), json!(instance.attr_str("label").unwrap_or_default()));
    map.insert("required".into(), json!(instance.is_required()));
    if let Some(helper) = instance.attr_str("helperText")
        && !helper.is_empty()
    {
        map.insert("helperText".into(), json!(helper));
    }
    if let Some(placeholder) = instance.attr_str("placeholder") {
        map.insert("placeholder".into(), json!(placeholder));
    }
    map.insert("readOnly".into(), json!(true));
    map
}

fn runtime_node(
    input_type: &str,
    instance: &FieldInstance,
    value: Option<&str>,
    invalid: bool,
) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), json!(input_type));
    map.insert("id".into(), json!(instance.id()));
    map.insert("label".into(), json!(instance.attr_str("label").unwrap_or_default()));
    map.insert("isRequired".into(), json!(instance.is_required()));
    if let Some(placeholder) = instance.attr_str("placeholder") {
        map.insert("placeholder".into(), json!(placeholder));
    }
    if let Some(helper) = instance.attr_str("helperText")
        && !helper.is_empty()
    {
        map.insert("helperText".into(), json!(helper));
    }
    if let Some(value) = value {
        map.insert("value".into(), json!(value));
    }
    map.insert("invalid".into(), json!(invalid));
    if invalid {
        map.insert("errorMessage".into(), json!("This field is required"));
    }
    map
}

fn has_value(instance: &FieldInstance, raw: &str) -> bool {
    !instance.is_required() || !raw.is_empty()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextFieldDescriptor;

impl FieldDescriptor for TextFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::TextField
    }

    fn default_attributes(&self) -> Attributes {
        base_attributes("Text field", DEFAULT_HELPER, true)
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &TEXT_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "text-cursor",
            label: "Text Field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        Value::Object(designer_node(instance))
    }

    fn render_runtime(&self, instance: &FieldInstance, value: Option<&str>, invalid: bool) -> Value {
        Value::Object(runtime_node("Input.Text", instance, value, invalid))
    }

    fn validate(&self, instance: &FieldInstance, raw: &str) -> bool {
        has_value(instance, raw)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextareaFieldDescriptor;

impl FieldDescriptor for TextareaFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::TextareaField
    }

    fn default_attributes(&self) -> Attributes {
        let mut attributes = base_attributes("Textarea field", DEFAULT_HELPER, true);
        attributes.insert("rows".into(), json!(3));
        attributes
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &TEXTAREA_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "text-paragraph",
            label: "TextArea",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        let mut map = designer_node(instance);
        map.insert("rows".into(), json!(instance.attr_i64("rows").unwrap_or(3)));
        Value::Object(map)
    }

    fn render_runtime(&self, instance: &FieldInstance, value: Option<&str>, invalid: bool) -> Value {
        let mut map = runtime_node("Input.Text", instance, value, invalid);
        map.insert("isMultiline".into(), json!(true));
        map.insert("rows".into(), json!(instance.attr_i64("rows").unwrap_or(3)));
        Value::Object(map)
    }

    fn validate(&self, instance: &FieldInstance, raw: &str) -> bool {
        has_value(instance, raw)
    }
}

/// Number input. Submitted text is only checked for presence, not parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberFieldDescriptor;

impl FieldDescriptor for NumberFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::NumberField
    }

    fn default_attributes(&self) -> Attributes {
        base_attributes("Number field", DEFAULT_HELPER, true)
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &TEXT_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "hash",
            label: "Number Field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        Value::Object(designer_node(instance))
    }

    fn render_runtime(&self, instance: &FieldInstance, value: Option<&str>, invalid: bool) -> Value {
        Value::Object(runtime_node("Input.Number", instance, value, invalid))
    }

    fn validate(&self, instance: &FieldInstance, raw: &str) -> bool {
        has_value(instance, raw)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateFieldDescriptor;

impl FieldDescriptor for DateFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::DateField
    }

    fn default_attributes(&self) -> Attributes {
        base_attributes("Date field", "Pick a Date", false)
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &BASIC_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "calendar",
            label: "Date Field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        let mut map = designer_node(instance);
        map.insert("placeholder".into(), json!("Pick a date"));
        Value::Object(map)
    }

    fn render_runtime(&self, instance: &FieldInstance, value: Option<&str>, invalid: bool) -> Value {
        Value::Object(runtime_node("Input.Date", instance, value, invalid))
    }

    fn validate(&self, instance: &FieldInstance, raw: &str) -> bool {
        has_value(instance, raw)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectFieldDescriptor;

impl FieldDescriptor for SelectFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::SelectField
    }

    fn default_attributes(&self) -> Attributes {
        let mut attributes = base_attributes("Select field", DEFAULT_HELPER, true);
        attributes.insert("options".into(), json!([]));
        attributes
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &SELECT_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "list-select",
            label: "Select Field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        let mut map = designer_node(instance);
        map.insert("options".into(), json!(instance.attr_strings("options")));
        Value::Object(map)
    }

    fn render_runtime(&self, instance: &FieldInstance, value: Option<&str>, invalid: bool) -> Value {
        let mut map = runtime_node("Input.ChoiceSet", instance, value, invalid);
        map.insert("style".into(), json!("compact"));
        let choices = instance
            .attr_strings("options")
            .into_iter()
            .map(|option| json!({"title": option, "value": option}))
            .collect::<Vec<_>>();
        map.insert("choices".into(), Value::Array(choices));
        Value::Object(map)
    }

    fn validate(&self, instance: &FieldInstance, raw: &str) -> bool {
        has_value(instance, raw)
    }
}

/// Single checkbox. A required checkbox must be ticked, i.e. submit `"true"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxFieldDescriptor;

impl FieldDescriptor for CheckboxFieldDescriptor {
    fn kind(&self) -> FieldType {
        FieldType::CheckboxField
    }

    fn default_attributes(&self) -> Attributes {
        base_attributes("Checkbox field", DEFAULT_HELPER, false)
    }

    fn properties(&self) -> &'static [PropertySpec] {
        &BASIC_PROPERTIES
    }

    fn palette(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            icon: "check-square",
            label: "CheckBox Field",
        }
    }

    fn render_designer(&self, instance: &FieldInstance) -> Value {
        Value::Object(designer_node(instance))
    }

    fn render_runtime(&self, instance: &FieldInstance, value: Option<&str>, invalid: bool) -> Value {
        let checked = value == Some("true");
        let mut map = runtime_node("Input.Toggle", instance, None, invalid);
        map.insert(
            "title".into(),
            json!(instance.attr_str("label").unwrap_or_default()),
        );
        map.insert("valueOn".into(), json!("true"));
        map.insert("valueOff".into(), json!("false"));
        map.insert("value".into(), json!(if checked { "true" } else { "false" }));
        Value::Object(map)
    }

    fn validate(&self, instance: &FieldInstance, raw: &str) -> bool {
        !instance.is_required() || raw == "true"
    }
}
