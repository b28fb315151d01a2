use std::collections::BTreeSet;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::field::{FieldInstance, FieldType};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("an element with id '{0}' already exists")]
    DuplicateId(String),
    #[error("no element with id '{0}'")]
    NotFound(String),
    #[error("replacement carries id '{found}' but targets '{expected}'")]
    IdMismatch { expected: String, found: String },
    #[error("element '{id}' is a {from} and cannot become a {to}")]
    TypeChanged {
        id: String,
        from: FieldType,
        to: FieldType,
    },
    #[error("invalid form content: {0}")]
    InvalidContent(#[from] serde_json::Error),
}

/// Ordered field instances plus the designer's selection.
///
/// Element ids are unique and `selected`, when set, always names an element
/// that is present. Every mutation goes through a method that keeps both true.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<FieldInstance>,
    selected: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrates a document from persisted content (an ordered JSON array of
    /// instances). Nothing is selected afterwards.
    pub fn from_json(content: &str) -> Result<Self, DocumentError> {
        let elements: Vec<FieldInstance> = serde_json::from_str(content)?;
        Self::from_elements(elements)
    }

    pub fn from_elements(elements: Vec<FieldInstance>) -> Result<Self, DocumentError> {
        let mut seen = BTreeSet::new();
        for element in &elements {
            if !seen.insert(element.id()) {
                return Err(DocumentError::DuplicateId(element.id().to_string()));
            }
        }
        Ok(Self {
            elements,
            selected: None,
        })
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&self.elements)?)
    }

    pub fn to_value(&self) -> Result<Value, DocumentError> {
        Ok(serde_json::to_value(&self.elements)?)
    }

    pub fn elements(&self) -> &[FieldInstance] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FieldInstance> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_element(&self) -> Option<&FieldInstance> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Inserts at `index`, clamped to `[0, len]`, and returns where it landed.
    pub fn insert(&mut self, instance: FieldInstance, index: usize) -> Result<usize, DocumentError> {
        if self.contains(instance.id()) {
            return Err(DocumentError::DuplicateId(instance.id().to_string()));
        }
        let at = index.min(self.elements.len());
        debug!(id = instance.id(), kind = %instance.kind(), index = at, "insert element");
        self.elements.insert(at, instance);
        Ok(at)
    }

    /// Removes `id` if present, clearing the selection when it pointed there.
    pub fn remove(&mut self, id: &str) -> Option<FieldInstance> {
        let index = self.index_of(id)?;
        let removed = self.elements.remove(index);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        debug!(id, index, "remove element");
        Some(removed)
    }

    /// Replaces the element `id` in place. The replacement must keep the same
    /// id and type.
    pub fn update(&mut self, id: &str, instance: FieldInstance) -> Result<(), DocumentError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        if instance.id() != id {
            return Err(DocumentError::IdMismatch {
                expected: id.to_string(),
                found: instance.id().to_string(),
            });
        }
        let current = self.elements[index].kind();
        if instance.kind() != current {
            return Err(DocumentError::TypeChanged {
                id: id.to_string(),
                from: current,
                to: instance.kind(),
            });
        }
        debug!(id, index, "update element");
        self.elements[index] = instance;
        Ok(())
    }

    /// Selects `id`, or clears the selection with `None`.
    pub fn select(&mut self, id: Option<&str>) -> Result<(), DocumentError> {
        match id {
            None => self.selected = None,
            Some(id) if self.contains(id) => self.selected = Some(id.to_string()),
            Some(id) => return Err(DocumentError::NotFound(id.to_string())),
        }
        Ok(())
    }

    /// Moves `id` to `to_index` in the list as it looks after the element has
    /// been taken out. The index is clamped and the selection is kept.
    pub fn move_to(&mut self, id: &str, to_index: usize) -> Result<usize, DocumentError> {
        let from = self
            .index_of(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        let element = self.elements.remove(from);
        let at = to_index.min(self.elements.len());
        self.elements.insert(at, element);
        debug!(id, from, to = at, "move element");
        Ok(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(doc: &Document) -> Vec<&str> {
        doc.elements().iter().map(FieldInstance::id).collect()
    }

    fn abc() -> Document {
        let mut doc = Document::new();
        for id in ["a", "b", "c"] {
            doc.insert(FieldType::TextField.construct(id), usize::MAX)
                .unwrap();
        }
        doc
    }

    #[test]
    fn insert_clamps_and_reports_index() {
        let mut doc = abc();
        assert_eq!(doc.insert(FieldType::TitleField.construct("t"), 99).unwrap(), 3);
        assert_eq!(doc.insert(FieldType::TitleField.construct("u"), 0).unwrap(), 0);
        assert_eq!(ids(&doc), ["u", "a", "b", "c", "t"]);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut doc = abc();
        let err = doc
            .insert(FieldType::TitleField.construct("b"), 0)
            .unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateId(id) if id == "b"));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn remove_clears_matching_selection_only() {
        let mut doc = abc();
        doc.select(Some("b")).unwrap();
        assert!(doc.remove("a").is_some());
        assert_eq!(doc.selected(), Some("b"));
        assert!(doc.remove("b").is_some());
        assert_eq!(doc.selected(), None);
        assert!(doc.remove("missing").is_none());
        assert_eq!(ids(&doc), ["c"]);
    }

    #[test]
    fn update_enforces_identity() {
        let mut doc = abc();
        let err = doc
            .update("a", FieldType::TextField.construct("b"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::IdMismatch { .. }));
        let err = doc
            .update("a", FieldType::NumberField.construct("a"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::TypeChanged { .. }));
        let err = doc
            .update("zz", FieldType::TextField.construct("zz"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }

    #[test]
    fn update_replaces_in_place() {
        let mut doc = abc();
        let current = doc.get("b").unwrap().clone();
        let mut attributes = current.attributes().clone();
        attributes.insert("label".into(), "Email".into());
        doc.update("b", current.with_attributes(attributes)).unwrap();
        assert_eq!(doc.index_of("b"), Some(1));
        assert_eq!(doc.get("b").unwrap().attr_str("label"), Some("Email"));
    }

    #[test]
    fn select_requires_existing_element() {
        let mut doc = abc();
        doc.select(Some("a")).unwrap();
        assert!(doc.select(Some("nope")).is_err());
        assert_eq!(doc.selected(), Some("a"));
        assert_eq!(doc.selected_element().map(FieldInstance::id), Some("a"));
        doc.select(None).unwrap();
        assert!(doc.selected_element().is_none());
    }

    #[test]
    fn move_keeps_selection() {
        let mut doc = abc();
        doc.select(Some("a")).unwrap();
        assert_eq!(doc.move_to("a", 10).unwrap(), 2);
        assert_eq!(ids(&doc), ["b", "c", "a"]);
        assert_eq!(doc.selected(), Some("a"));
    }

    #[test]
    fn from_json_rejects_duplicates() {
        let raw = r#"[{"id":"x","type":"TEXT_FIELD"},{"id":"x","type":"DIVIDER_FIELD"}]"#;
        assert!(matches!(
            Document::from_json(raw),
            Err(DocumentError::DuplicateId(_))
        ));
        assert!(matches!(
            Document::from_json("{\"not\":\"a list\"}"),
            Err(DocumentError::InvalidContent(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let doc = abc();
        let restored = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(restored.elements(), doc.elements());
    }
}
