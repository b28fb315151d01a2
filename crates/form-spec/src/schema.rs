use schemars::schema_for;
use serde_json::{Map, Value};

use crate::document::Document;
use crate::field::{FieldInstance, FieldType};

/// JSON Schema for the value map a submission to `document` may carry.
///
/// Only data-entry elements appear. Every value is a string; required fields
/// must be non-empty and a required checkbox must be `"true"`.
pub fn submission_schema(document: &Document) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for element in document.elements() {
        if !element.kind().collects_value() {
            continue;
        }
        properties.insert(element.id().to_string(), value_schema(element));
        if element.is_required() {
            required.push(Value::String(element.id().to_string()));
        }
    }

    let mut root = Map::new();
    root.insert(
        "$schema".into(),
        Value::String("https://json-schema.org/draft/2020-12/schema".into()),
    );
    root.insert("type".into(), Value::String("object".into()));
    root.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        root.insert("required".into(), Value::Array(required));
    }

    Value::Object(root)
}

/// JSON Schema of persisted form content: the ordered element array.
pub fn content_schema() -> Value {
    schema_for!(Vec<FieldInstance>).to_value()
}

fn value_schema(element: &FieldInstance) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("string".into()));
    if let Some(label) = element.attr_str("label") {
        schema.insert("title".into(), Value::String(label.to_string()));
    }
    if let Some(helper) = element.attr_str("helperText")
        && !helper.is_empty()
    {
        schema.insert("description".into(), Value::String(helper.to_string()));
    }

    match element.kind() {
        FieldType::CheckboxField => {
            let allowed: &[&str] = if element.is_required() {
                &["true"]
            } else {
                &["true", "false"]
            };
            schema.insert(
                "enum".into(),
                Value::Array(allowed.iter().map(|v| Value::String(v.to_string())).collect()),
            );
        }
        FieldType::SelectField => {
            let options = element.attr_strings("options");
            if !options.is_empty() {
                schema.insert(
                    "enum".into(),
                    Value::Array(options.into_iter().map(Value::String).collect()),
                );
            }
        }
        _ => {}
    }

    if element.is_required() && element.kind() != FieldType::CheckboxField {
        schema.insert("minLength".into(), Value::Number(1.into()));
    }

    Value::Object(schema)
}
