use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::field::kind::FieldType;

/// Free-form attribute bag owned by one instance.
pub type Attributes = Map<String, Value>;

/// One placed field inside a form.
///
/// Serialized as `{"id", "type", "extraAttributes"}`, which is also the shape
/// stored in persisted form content. The id and type never change after
/// construction; attributes are replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldInstance {
    id: String,
    #[serde(rename = "type")]
    kind: FieldType,
    #[serde(
        rename = "extraAttributes",
        default,
        skip_serializing_if = "Map::is_empty"
    )]
    attributes: Attributes,
}

impl FieldInstance {
    pub fn new(id: impl Into<String>, kind: FieldType, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            kind,
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> FieldType {
        self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Same id and type, new attribute bag.
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        Self {
            id: self.id.clone(),
            kind: self.kind,
            attributes,
        }
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        self.attributes.get(key).and_then(Value::as_bool)
    }

    pub fn attr_i64(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).and_then(Value::as_i64)
    }

    pub fn attr_strings(&self, key: &str) -> Vec<String> {
        self.attributes
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Missing `required` reads as optional.
    pub fn is_required(&self) -> bool {
        self.attr_bool("required").unwrap_or(false)
    }

    /// Human caption: label for inputs, title or text for layout elements.
    pub fn caption(&self) -> Option<&str> {
        self.attr_str("label")
            .or_else(|| self.attr_str("title"))
            .or_else(|| self.attr_str("text"))
    }
}

/// Source of fresh element ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs, used by the interactive designer.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("field")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
