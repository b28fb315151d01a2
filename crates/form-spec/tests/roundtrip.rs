use std::collections::BTreeMap;

use form_spec::{Document, FieldType, SubmissionCheck, validate_all};
use serde_json::Value;

const CONTACT_FORM: &str = include_str!("fixtures/contact_form.json");

#[test]
fn persisted_content_round_trips() {
    let doc = Document::from_json(CONTACT_FORM).expect("fixture loads");
    assert_eq!(doc.len(), 7);
    assert_eq!(doc.selected(), None);

    let encoded = doc.to_json().expect("serializes");
    let reloaded = Document::from_json(&encoded).expect("reloads");
    assert_eq!(reloaded.elements(), doc.elements());

    let original: Value = serde_json::from_str(CONTACT_FORM).expect("fixture is json");
    let written: Value = serde_json::from_str(&encoded).expect("output is json");
    assert_eq!(written, original);
}

#[test]
fn fixture_kinds_are_in_order() {
    let doc = Document::from_json(CONTACT_FORM).expect("fixture loads");
    let kinds: Vec<FieldType> = doc.elements().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        [
            FieldType::TitleField,
            FieldType::ParagraphField,
            FieldType::TextField,
            FieldType::SelectField,
            FieldType::DividerField,
            FieldType::DateField,
            FieldType::CheckboxField,
        ]
    );
}

#[test]
fn required_fields_gate_submission() {
    let doc = Document::from_json(CONTACT_FORM).expect("fixture loads");

    let empty = BTreeMap::new();
    let invalid = validate_all(&doc, &empty);
    assert_eq!(
        invalid.iter().map(String::as_str).collect::<Vec<_>>(),
        ["consent", "name"]
    );

    let values = BTreeMap::from([
        ("name".to_string(), "x".to_string()),
        ("consent".to_string(), "true".to_string()),
    ]);
    assert!(SubmissionCheck::run(&doc, &values).is_submittable());
}

#[test]
fn single_required_text_field() {
    let mut doc = Document::new();
    let field = FieldType::TextField.construct("q");
    let mut attributes = field.attributes().clone();
    attributes.insert("required".into(), Value::Bool(true));
    doc.insert(field.with_attributes(attributes), 0)
        .expect("insert");

    assert!(validate_all(&doc, &BTreeMap::new()).contains("q"));
    let values = BTreeMap::from([("q".to_string(), "x".to_string())]);
    assert!(validate_all(&doc, &values).is_empty());
}
