use std::collections::{BTreeMap, BTreeSet};

use form_spec::{
    Document, FieldType, designer_view, lookup, properties_view, render_text, runtime_view,
};
use insta::assert_json_snapshot;
use serde_json::{Map, json};

fn small_form() -> Document {
    let mut doc = Document::new();
    doc.insert(FieldType::TitleField.construct("t1"), 0)
        .expect("insert title");
    let name = FieldType::TextField.construct("name");
    let mut patch = Map::new();
    patch.insert("label".into(), json!("Full name"));
    patch.insert("required".into(), json!(true));
    let name = lookup(FieldType::TextField)
        .apply_properties(&name, &patch)
        .expect("valid patch");
    doc.insert(name, 1).expect("insert name");
    doc.select(Some("name")).expect("select");
    doc
}

#[test]
fn designer_view_snapshot() {
    let view = designer_view(&small_form());
    insta::with_settings!({ sort_maps => true }, {
        assert_json_snapshot!("designer_view", view);
    });
}

#[test]
fn runtime_view_is_an_adaptive_card() {
    let doc = small_form();
    let card = runtime_view(&doc, &BTreeMap::new(), &BTreeSet::new());
    assert_eq!(card["version"], "1.3");
    let body = card["body"].as_array().expect("body array");
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["size"], "Large");
    assert_eq!(body[1]["type"], "Input.Text");
    assert_eq!(body[1]["isRequired"], true);
    assert!(body[1].get("value").is_none());
    assert_eq!(card["actions"][0]["type"], "Action.Submit");
}

#[test]
fn properties_view_lists_constraints() {
    let view = properties_view(&small_form()).expect("selection exists");
    let properties = view["properties"].as_array().expect("properties");
    let keys: Vec<_> = properties.iter().map(|p| p["key"].clone()).collect();
    assert_eq!(
        keys,
        [json!("label"), json!("helperText"), json!("required"), json!("placeholder")]
    );
    assert_eq!(properties[0]["maxLength"], 50);
    assert_eq!(properties[0]["value"], "Full name");
    assert_eq!(properties[2]["input"], "switch");
}

#[test]
fn text_summary_marks_required_and_selected() {
    let text = render_text(&small_form());
    assert_eq!(
        text,
        "Elements: 2\n   1. t1 [TITLE_FIELD] Title field\n>  2. name [TEXT_FIELD] Full name*"
    );
}
