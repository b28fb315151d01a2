//! JSON UI views of a document plus a plain-text summary.
//!
//! Every element is rendered through its kind's descriptor, so the views never
//! match on field kinds themselves.

use std::collections::BTreeSet;

use serde_json::{Value, json};

use crate::document::Document;
use crate::field::lookup;
use crate::validate::Values;

/// Designer canvas: read-only previews in document order plus the selection.
pub fn designer_view(document: &Document) -> Value {
    let elements = document
        .elements()
        .iter()
        .map(|element| {
            let mut node = lookup(element.kind()).render_designer(element);
            if let Some(map) = node.as_object_mut() {
                map.insert(
                    "selected".into(),
                    Value::Bool(document.selected() == Some(element.id())),
                );
            }
            node
        })
        .collect::<Vec<_>>();

    json!({
        "elements": elements,
        "selected": document.selected(),
    })
}

/// Public submission page as an Adaptive Card v1.3 payload.
///
/// `values` pre-fills inputs and `invalid` marks the elements that failed the
/// last submit attempt.
pub fn runtime_view(document: &Document, values: &Values, invalid: &BTreeSet<String>) -> Value {
    let body = document
        .elements()
        .iter()
        .map(|element| {
            lookup(element.kind()).render_runtime(
                element,
                values.get(element.id()).map(String::as_str),
                invalid.contains(element.id()),
            )
        })
        .collect::<Vec<_>>();

    json!({
        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
        "type": "AdaptiveCard",
        "version": "1.3",
        "body": body,
        "actions": [{
            "type": "Action.Submit",
            "title": "Submit",
            "data": { "formcraft": { "mode": "submit" } },
        }],
    })
}

/// Properties editor for the selected element, if any.
pub fn properties_view(document: &Document) -> Option<Value> {
    document
        .selected_element()
        .map(|element| lookup(element.kind()).render_properties(element))
}

pub fn render_text(document: &Document) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Elements: {}", document.len()));
    if document.is_empty() {
        lines.push("Drop fields here".to_string());
    }
    for (index, element) in document.elements().iter().enumerate() {
        let marker = if document.selected() == Some(element.id()) {
            '>'
        } else {
            ' '
        };
        let mut entry = format!(
            "{marker}{:>3}. {} [{}]",
            index + 1,
            element.id(),
            element.kind()
        );
        if let Some(caption) = element.caption() {
            entry.push_str(&format!(" {caption}"));
        }
        if element.is_required() {
            entry.push('*');
        }
        lines.push(entry);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.insert(FieldType::TitleField.construct("t"), 0).unwrap();
        doc.insert(FieldType::TextField.construct("name"), 1).unwrap();
        doc
    }

    #[test]
    fn designer_view_marks_selection() {
        let mut doc = sample();
        doc.select(Some("name")).unwrap();
        let view = designer_view(&doc);
        assert_eq!(view["selected"], "name");
        assert_eq!(view["elements"][0]["selected"], false);
        assert_eq!(view["elements"][1]["selected"], true);
        assert_eq!(view["elements"][1]["readOnly"], true);
    }

    #[test]
    fn runtime_view_prefills_and_flags() {
        let doc = sample();
        let mut values = Values::new();
        values.insert("name".into(), "Ada".into());
        let invalid = BTreeSet::from(["name".to_string()]);
        let card = runtime_view(&doc, &values, &invalid);
        assert_eq!(card["type"], "AdaptiveCard");
        assert_eq!(card["body"][0]["type"], "TextBlock");
        assert_eq!(card["body"][1]["value"], "Ada");
        assert_eq!(card["body"][1]["invalid"], true);
        assert_eq!(card["actions"][0]["data"]["formcraft"]["mode"], "submit");
    }

    #[test]
    fn properties_view_follows_selection() {
        let mut doc = sample();
        assert!(properties_view(&doc).is_none());
        doc.select(Some("t")).unwrap();
        let view = properties_view(&doc).unwrap();
        assert_eq!(view["properties"][0]["key"], "title");
    }

    #[test]
    fn text_lists_elements() {
        let mut doc = sample();
        doc.select(Some("name")).unwrap();
        let text = render_text(&doc);
        assert!(text.contains("  1. t [TITLE_FIELD] Title field"));
        assert!(text.contains(">  2. name [TEXT_FIELD] Text field"));
        assert_eq!(render_text(&Document::new()), "Elements: 0\nDrop fields here");
    }
}
