use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::document::Document;
use crate::field::lookup;

/// Submitted values keyed by element id. Absent keys read as `""`.
pub type Values = BTreeMap<String, String>;

/// Ids of every element whose submitted value fails its kind's validator.
pub fn validate_all(document: &Document, values: &Values) -> BTreeSet<String> {
    document
        .elements()
        .iter()
        .filter(|element| {
            let raw = values.get(element.id()).map(String::as_str).unwrap_or("");
            !lookup(element.kind()).validate(element, raw)
        })
        .map(|element| element.id().to_string())
        .collect()
}

/// Outcome of checking one submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionCheck {
    pub invalid: BTreeSet<String>,
}

impl SubmissionCheck {
    pub fn run(document: &Document, values: &Values) -> Self {
        Self {
            invalid: validate_all(document, values),
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.invalid.is_empty()
    }

    pub fn is_invalid(&self, id: &str) -> bool {
        self.invalid.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use serde_json::{Map, json};

    fn required(kind: FieldType, id: &str) -> crate::field::FieldInstance {
        let instance = kind.construct(id);
        let mut patch = Map::new();
        patch.insert("required".into(), json!(true));
        lookup(kind).apply_properties(&instance, &patch).unwrap()
    }

    #[test]
    fn empty_document_is_submittable() {
        let check = SubmissionCheck::run(&Document::new(), &Values::new());
        assert!(check.is_submittable());
    }

    #[test]
    fn missing_required_values_are_reported() {
        let mut doc = Document::new();
        doc.insert(FieldType::TitleField.construct("title"), 0).unwrap();
        doc.insert(required(FieldType::TextField, "name"), 1).unwrap();
        doc.insert(FieldType::TextField.construct("nick"), 2).unwrap();
        doc.insert(required(FieldType::CheckboxField, "tos"), 3).unwrap();

        let mut values = Values::new();
        values.insert("tos".into(), "false".into());
        let invalid = validate_all(&doc, &values);
        assert_eq!(
            invalid.into_iter().collect::<Vec<_>>(),
            vec!["name".to_string(), "tos".to_string()]
        );

        values.insert("name".into(), "Ada".into());
        values.insert("tos".into(), "true".into());
        let check = SubmissionCheck::run(&doc, &values);
        assert!(check.is_submittable());
        assert!(!check.is_invalid("name"));
    }
}
