use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::field::instance::{Attributes, FieldInstance};
use crate::field::kind::{FieldCategory, FieldType};

/// Behaviour shared by every instance of one field kind.
///
/// Implementations are stateless and live for the whole program; the registry
/// hands them out as `&'static dyn FieldDescriptor`.
pub trait FieldDescriptor: Send + Sync {
    fn kind(&self) -> FieldType;

    /// Attributes a freshly dropped element starts with.
    fn default_attributes(&self) -> Attributes;

    /// Editable attributes, in editor order.
    fn properties(&self) -> &'static [PropertySpec];

    fn palette(&self) -> PaletteEntry;

    /// Read-only preview node shown on the designer canvas.
    fn render_designer(&self, instance: &FieldInstance) -> Value;

    /// Interactive node shown to a respondent.
    fn render_runtime(&self, instance: &FieldInstance, value: Option<&str>, invalid: bool) -> Value;

    fn construct(&self, id: &str) -> FieldInstance {
        FieldInstance::new(id, self.kind(), self.default_attributes())
    }

    /// Whether `raw` is an acceptable submitted value for `instance`.
    fn validate(&self, _instance: &FieldInstance, _raw: &str) -> bool {
        true
    }

    /// Properties-editor surface: one node per editable attribute.
    fn render_properties(&self, instance: &FieldInstance) -> Value {
        let properties: Vec<Value> = self
            .properties()
            .iter()
            .map(|spec| spec.render(instance.attributes().get(spec.key)))
            .collect();
        let mut node = json!({
            "id": instance.id(),
            "type": instance.kind(),
            "properties": properties,
        });
        if self.properties().is_empty()
            && let Some(map) = node.as_object_mut()
        {
            map.insert("message".into(), json!("No properties for this element"));
        }
        node
    }

    /// Merges `patch` over the current attributes and checks every constraint.
    ///
    /// On error the input instance is left as it was; on success the returned
    /// instance keeps the id and type.
    fn apply_properties(
        &self,
        instance: &FieldInstance,
        patch: &Map<String, Value>,
    ) -> Result<FieldInstance, PropertyError> {
        let specs = self.properties();
        let mut merged = instance.attributes().clone();
        for (key, value) in patch {
            if !specs.iter().any(|spec| spec.key == key.as_str()) {
                return Err(PropertyError::UnknownProperty { key: key.clone() });
            }
            merged.insert(key.clone(), value.clone());
        }
        for spec in specs {
            if let Some(value) = merged.get(spec.key) {
                spec.check(value)?;
            }
        }
        Ok(instance.with_attributes(merged))
    }
}

/// One entry in the designer's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub kind: FieldType,
    pub icon: &'static str,
    pub label: &'static str,
}

impl PaletteEntry {
    pub fn category(&self) -> FieldCategory {
        self.kind.category()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Text { min_len: usize, max_len: usize },
    Flag,
    Integer { min: i64, max: i64 },
    Options,
}

/// Constraint attached to one editable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: PropertyKind,
}

impl PropertySpec {
    pub const fn text(key: &'static str, label: &'static str, min_len: usize, max_len: usize) -> Self {
        Self {
            key,
            label,
            kind: PropertyKind::Text { min_len, max_len },
        }
    }

    pub const fn flag(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: PropertyKind::Flag,
        }
    }

    pub const fn integer(key: &'static str, label: &'static str, min: i64, max: i64) -> Self {
        Self {
            key,
            label,
            kind: PropertyKind::Integer { min, max },
        }
    }

    pub const fn options(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: PropertyKind::Options,
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), PropertyError> {
        let key = self.key.to_string();
        match self.kind {
            PropertyKind::Text { min_len, max_len } => {
                let text = value.as_str().ok_or(PropertyError::InvalidType {
                    key: key.clone(),
                    expected: "string",
                })?;
                let len = text.chars().count();
                if len < min_len {
                    return Err(PropertyError::TooShort { key, min: min_len });
                }
                if len > max_len {
                    return Err(PropertyError::TooLong { key, max: max_len });
                }
                Ok(())
            }
            PropertyKind::Flag => value.as_bool().map(|_| ()).ok_or(PropertyError::InvalidType {
                key,
                expected: "boolean",
            }),
            PropertyKind::Integer { min, max } => {
                let number = value.as_i64().ok_or(PropertyError::InvalidType {
                    key: key.clone(),
                    expected: "integer",
                })?;
                if !(min..=max).contains(&number) {
                    return Err(PropertyError::OutOfRange {
                        key,
                        min,
                        max,
                        value: number,
                    });
                }
                Ok(())
            }
            PropertyKind::Options => {
                let valid = value
                    .as_array()
                    .is_some_and(|items| items.iter().all(Value::is_string));
                if valid {
                    Ok(())
                } else {
                    Err(PropertyError::InvalidType {
                        key,
                        expected: "array of strings",
                    })
                }
            }
        }
    }

    /// Parses a textual value (as typed on a command line) into the JSON the
    /// attribute stores. Constraints are checked separately by [`check`](Self::check).
    pub fn parse_value(&self, raw: &str) -> Result<Value, PropertyError> {
        match self.kind {
            PropertyKind::Text { .. } => Ok(Value::String(raw.to_string())),
            PropertyKind::Flag => match raw.trim() {
                "true" | "yes" | "on" => Ok(Value::Bool(true)),
                "false" | "no" | "off" => Ok(Value::Bool(false)),
                _ => Err(PropertyError::InvalidType {
                    key: self.key.to_string(),
                    expected: "boolean",
                }),
            },
            PropertyKind::Integer { .. } => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| PropertyError::InvalidType {
                    key: self.key.to_string(),
                    expected: "integer",
                }),
            PropertyKind::Options => {
                let trimmed = raw.trim();
                if trimmed.starts_with('[') {
                    let parsed: Value =
                        serde_json::from_str(trimmed).map_err(|_| PropertyError::InvalidType {
                            key: self.key.to_string(),
                            expected: "array of strings",
                        })?;
                    self.check(&parsed)?;
                    return Ok(parsed);
                }
                Ok(Value::Array(
                    trimmed
                        .split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(|item| Value::String(item.to_string()))
                        .collect(),
                ))
            }
        }
    }

    fn render(&self, current: Option<&Value>) -> Value {
        let mut node = json!({
            "key": self.key,
            "label": self.label,
            "value": current.cloned().unwrap_or(Value::Null),
        });
        let extra = match self.kind {
            PropertyKind::Text { min_len, max_len } => {
                json!({"input": "text", "minLength": min_len, "maxLength": max_len})
            }
            PropertyKind::Flag => json!({"input": "switch"}),
            PropertyKind::Integer { min, max } => {
                json!({"input": "slider", "min": min, "max": max})
            }
            PropertyKind::Options => json!({"input": "list"}),
        };
        if let (Some(map), Value::Object(extra)) = (node.as_object_mut(), extra) {
            map.extend(extra);
        }
        node
    }
}

/// Rejected property edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("'{key}' is not an editable property of this element")]
    UnknownProperty { key: String },
    #[error("'{key}' must be a {expected}")]
    InvalidType { key: String, expected: &'static str },
    #[error("'{key}' must be at least {min} characters")]
    TooShort { key: String, min: usize },
    #[error("'{key}' must be at most {max} characters")]
    TooLong { key: String, max: usize },
    #[error("'{key}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        min: i64,
        max: i64,
        value: i64,
    },
}

impl PropertyError {
    pub fn key(&self) -> &str {
        match self {
            PropertyError::UnknownProperty { key }
            | PropertyError::InvalidType { key, .. }
            | PropertyError::TooShort { key, .. }
            | PropertyError::TooLong { key, .. }
            | PropertyError::OutOfRange { key, .. } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_length_counts_chars() {
        let spec = PropertySpec::text("label", "Label", 1, 3);
        assert!(spec.check(&json!("äöü")).is_ok());
        assert_eq!(
            spec.check(&json!("")),
            Err(PropertyError::TooShort {
                key: "label".into(),
                min: 1
            })
        );
        assert!(matches!(
            spec.check(&json!("abcd")),
            Err(PropertyError::TooLong { max: 3, .. })
        ));
        assert!(matches!(
            spec.check(&json!(12)),
            Err(PropertyError::InvalidType { .. })
        ));
    }

    #[test]
    fn integer_range_is_inclusive() {
        let spec = PropertySpec::integer("rows", "Rows", 2, 10);
        assert!(spec.check(&json!(2)).is_ok());
        assert!(spec.check(&json!(10)).is_ok());
        assert!(matches!(
            spec.check(&json!(11)),
            Err(PropertyError::OutOfRange { value: 11, .. })
        ));
    }

    #[test]
    fn parse_value_handles_each_kind() {
        assert_eq!(
            PropertySpec::flag("required", "Required").parse_value("yes"),
            Ok(json!(true))
        );
        assert_eq!(
            PropertySpec::integer("height", "Height", 5, 200).parse_value(" 40 "),
            Ok(json!(40))
        );
        assert_eq!(
            PropertySpec::options("options", "Options").parse_value("red, green,,blue"),
            Ok(json!(["red", "green", "blue"]))
        );
        assert_eq!(
            PropertySpec::options("options", "Options").parse_value(r#"["a, b"]"#),
            Ok(json!(["a, b"]))
        );
        assert!(
            PropertySpec::integer("height", "Height", 5, 200)
                .parse_value("tall")
                .is_err()
        );
    }
}
