//! Turns a finished drag gesture into a document command.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::command::{Command, CommandOutcome};
use crate::document::{Document, DocumentError};
use crate::field::{FieldType, IdGenerator};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum DragSource {
    /// A palette button; dropping it creates a new element of that kind.
    Palette(FieldType),
    /// An element already on the canvas, by id.
    Element(String),
}

/// Where the pointer was released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "value", rename_all = "snake_case")]
pub enum DropTarget {
    /// The canvas area below the last element (or the empty canvas).
    EmptyArea,
    /// Upper half of an element: drop before it.
    TopHalf(String),
    /// Lower half of an element: drop after it.
    BottomHalf(String),
}

#[derive(Debug, Error)]
pub enum DragError {
    #[error("drop target element '{0}' not found")]
    TargetNotFound(String),
    #[error("dragged element '{0}' not found")]
    SourceNotFound(String),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Classifies a drop without touching the document.
///
/// Returns `Ok(None)` when the gesture is a no-op: nothing dragged, released
/// outside any target, or an element dropped onto itself. Indices are read
/// from the list before the dragged element is taken out, and a fresh id is
/// only drawn for palette drops whose target resolved.
pub fn classify_drop(
    document: &Document,
    active: Option<&DragSource>,
    over: Option<&DropTarget>,
    ids: &mut dyn IdGenerator,
) -> Result<Option<Command>, DragError> {
    let (Some(active), Some(over)) = (active, over) else {
        return Ok(None);
    };

    match active {
        DragSource::Palette(kind) => {
            let index = target_index(document, over)?;
            let instance = kind.construct(&ids.next_id());
            Ok(Some(Command::insert(instance, index)))
        }
        DragSource::Element(id) => {
            if !document.contains(id) {
                return Err(DragError::SourceNotFound(id.clone()));
            }
            let over_id = match over {
                DropTarget::EmptyArea => None,
                DropTarget::TopHalf(over_id) | DropTarget::BottomHalf(over_id) => Some(over_id),
            };
            if over_id == Some(id) {
                return Ok(None);
            }
            let index = target_index(document, over)?;
            Ok(Some(Command::move_to(id.clone(), index)))
        }
    }
}

/// Classifies and applies a drop. The document is unchanged on error.
pub fn apply_drop(
    document: &mut Document,
    active: Option<&DragSource>,
    over: Option<&DropTarget>,
    ids: &mut dyn IdGenerator,
) -> Result<Option<CommandOutcome>, DragError> {
    let command = match classify_drop(document, active, over, ids) {
        Ok(Some(command)) => command,
        Ok(None) => {
            debug!(?active, ?over, "drop ignored");
            return Ok(None);
        }
        Err(err) => {
            warn!(?active, ?over, error = %err, "drop abandoned");
            return Err(err);
        }
    };
    Ok(Some(document.apply(command)?))
}

fn target_index(document: &Document, over: &DropTarget) -> Result<usize, DragError> {
    let resolve = |id: &str| {
        document
            .index_of(id)
            .ok_or_else(|| DragError::TargetNotFound(id.to_string()))
    };
    match over {
        DropTarget::EmptyArea => Ok(document.len()),
        DropTarget::TopHalf(id) => resolve(id),
        DropTarget::BottomHalf(id) => resolve(id).map(|index| index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::SequentialIds;

    fn doc_of(ids: &[&str]) -> Document {
        let mut doc = Document::new();
        for id in ids {
            doc.insert(FieldType::TextField.construct(id), usize::MAX)
                .unwrap();
        }
        doc
    }

    #[test]
    fn missing_side_is_a_no_op() {
        let doc = doc_of(&["a"]);
        let mut ids = SequentialIds::default();
        let source = DragSource::Palette(FieldType::TextField);
        assert!(
            classify_drop(&doc, Some(&source), None, &mut ids)
                .unwrap()
                .is_none()
        );
        assert!(
            classify_drop(&doc, None, Some(&DropTarget::EmptyArea), &mut ids)
                .unwrap()
                .is_none()
        );
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn palette_drop_on_bottom_half_inserts_after() {
        let doc = doc_of(&["a", "b"]);
        let mut ids = SequentialIds::new("n");
        let command = classify_drop(
            &doc,
            Some(&DragSource::Palette(FieldType::DateField)),
            Some(&DropTarget::BottomHalf("a".into())),
            &mut ids,
        )
        .unwrap()
        .unwrap();
        match command {
            Command::Insert(insert) => {
                assert_eq!(insert.index, 1);
                assert_eq!(insert.instance.id(), "n-1");
                assert_eq!(insert.instance.kind(), FieldType::DateField);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn unknown_target_draws_no_id() {
        let doc = doc_of(&["a"]);
        let mut ids = SequentialIds::default();
        let err = classify_drop(
            &doc,
            Some(&DragSource::Palette(FieldType::TextField)),
            Some(&DropTarget::TopHalf("ghost".into())),
            &mut ids,
        )
        .unwrap_err();
        assert!(matches!(err, DragError::TargetNotFound(id) if id == "ghost"));
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn element_onto_itself_is_ignored() {
        let doc = doc_of(&["a", "b"]);
        let mut ids = SequentialIds::default();
        let result = classify_drop(
            &doc,
            Some(&DragSource::Element("b".into())),
            Some(&DropTarget::TopHalf("b".into())),
            &mut ids,
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn unknown_source_is_reported() {
        let doc = doc_of(&["a"]);
        let mut ids = SequentialIds::default();
        let err = classify_drop(
            &doc,
            Some(&DragSource::Element("zz".into())),
            Some(&DropTarget::EmptyArea),
            &mut ids,
        )
        .unwrap_err();
        assert!(matches!(err, DragError::SourceNotFound(_)));
    }
}
