use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::instance::FieldInstance;
use crate::field::registry::lookup;

/// Closed set of field kinds a form can contain.
///
/// The serialized tag is the value persisted inside form content, so renaming
/// a variant is a storage format change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    TitleField,
    SubtitleField,
    ParagraphField,
    DividerField,
    SpacerField,
    TextField,
    NumberField,
    TextareaField,
    DateField,
    SelectField,
    CheckboxField,
}

/// Palette grouping of field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    /// Presentational elements that never carry a value.
    Layout,
    /// Elements that collect a value on submission.
    Input,
}

impl FieldType {
    /// Every kind, in palette order.
    pub const ALL: [FieldType; 11] = [
        FieldType::TitleField,
        FieldType::SubtitleField,
        FieldType::ParagraphField,
        FieldType::DividerField,
        FieldType::SpacerField,
        FieldType::TextField,
        FieldType::NumberField,
        FieldType::TextareaField,
        FieldType::DateField,
        FieldType::SelectField,
        FieldType::CheckboxField,
    ];

    pub fn category(self) -> FieldCategory {
        match self {
            FieldType::TitleField
            | FieldType::SubtitleField
            | FieldType::ParagraphField
            | FieldType::DividerField
            | FieldType::SpacerField => FieldCategory::Layout,
            FieldType::TextField
            | FieldType::NumberField
            | FieldType::TextareaField
            | FieldType::DateField
            | FieldType::SelectField
            | FieldType::CheckboxField => FieldCategory::Input,
        }
    }

    /// Whether elements of this kind show up as submission columns.
    pub fn collects_value(self) -> bool {
        self.category() == FieldCategory::Input
    }

    /// Tag used in persisted content, e.g. `TEXT_FIELD`.
    pub fn wire_tag(self) -> &'static str {
        match self {
            FieldType::TitleField => "TITLE_FIELD",
            FieldType::SubtitleField => "SUBTITLE_FIELD",
            FieldType::ParagraphField => "PARAGRAPH_FIELD",
            FieldType::DividerField => "DIVIDER_FIELD",
            FieldType::SpacerField => "SPACER_FIELD",
            FieldType::TextField => "TEXT_FIELD",
            FieldType::NumberField => "NUMBER_FIELD",
            FieldType::TextareaField => "TEXTAREA_FIELD",
            FieldType::DateField => "DATE_FIELD",
            FieldType::SelectField => "SELECT_FIELD",
            FieldType::CheckboxField => "CHECKBOX_FIELD",
        }
    }

    /// Command-line spelling, e.g. `text-field`.
    pub fn cli_name(self) -> String {
        self.wire_tag().to_ascii_lowercase().replace('_', "-")
    }

    /// Builds a fresh instance of this kind through its registered descriptor.
    pub fn construct(self, id: &str) -> FieldInstance {
        lookup(self).construct(id)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    /// Accepts the wire tag (`TEXT_FIELD`) or the CLI spelling (`text-field`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase().replace('-', "_");
        FieldType::ALL
            .into_iter()
            .find(|kind| kind.wire_tag() == normalized)
            .ok_or_else(|| UnknownFieldType(raw.to_string()))
    }
}
