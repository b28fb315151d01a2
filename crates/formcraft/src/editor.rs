//! Owner-side editing of one form: the designer state plus its store handle.

use std::sync::Arc;

use form_spec::{
    Command, CommandOutcome, Document, DocumentError, DragError, DragSource, DropTarget,
    FieldInstance, IdGenerator, PropertyError, UuidGenerator, apply_drop, lookup,
};
use form_store::{FormId, FormRecord, FormStore, ShareToken, StoreError, UserId};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Drag(#[from] DragError),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("form {0} is published; the designer is read-only")]
    Published(FormId),
    #[error("no element with id '{0}'")]
    UnknownElement(String),
}

/// One open form. Local edits only reach the store through [`save`](Self::save).
pub struct EditorSession {
    store: Arc<dyn FormStore>,
    owner: UserId,
    record: FormRecord,
    document: Document,
    ids: Box<dyn IdGenerator + Send>,
}

impl EditorSession {
    pub async fn open(
        store: Arc<dyn FormStore>,
        owner: UserId,
        id: FormId,
    ) -> Result<Self, EditorError> {
        let record = store.load_form(&owner, id).await?;
        let document = Document::from_json(&record.content)?;
        Ok(Self {
            store,
            owner,
            record,
            document,
            ids: Box::new(UuidGenerator),
        })
    }

    /// Replaces the id source used for palette drops.
    pub fn with_ids(mut self, ids: impl IdGenerator + Send + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn is_published(&self) -> bool {
        self.record.published
    }

    fn ensure_editable(&self) -> Result<(), EditorError> {
        if self.record.published {
            warn!(form = %self.record.id, "edit rejected on published form");
            return Err(EditorError::Published(self.record.id));
        }
        Ok(())
    }

    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, EditorError> {
        if !matches!(command, Command::Select(_)) {
            self.ensure_editable()?;
        }
        Ok(self.document.apply(command)?)
    }

    pub fn handle_drop(
        &mut self,
        active: Option<&DragSource>,
        over: Option<&DropTarget>,
    ) -> Result<Option<CommandOutcome>, EditorError> {
        self.ensure_editable()?;
        Ok(apply_drop(&mut self.document, active, over, self.ids.as_mut())?)
    }

    pub fn remove(&mut self, id: &str) -> Result<Option<FieldInstance>, EditorError> {
        match self.apply(Command::remove(id))? {
            CommandOutcome::Removed(removed) => Ok(removed),
            _ => Ok(None),
        }
    }

    pub fn select(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        self.apply(Command::select(id.map(str::to_string)))?;
        Ok(())
    }

    /// Runs the element's properties editor with `patch` and stores the result.
    pub fn set_properties(
        &mut self,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<&FieldInstance, EditorError> {
        self.ensure_editable()?;
        let current = self
            .document
            .get(id)
            .ok_or_else(|| EditorError::UnknownElement(id.to_string()))?;
        let updated = lookup(current.kind()).apply_properties(current, patch)?;
        self.document.apply(Command::update(updated))?;
        self.document
            .get(id)
            .ok_or_else(|| EditorError::UnknownElement(id.to_string()))
    }

    /// Parses `key=value` style edits against the element's property specs.
    pub fn parse_patch(
        &self,
        id: &str,
        pairs: &[(String, String)],
    ) -> Result<Map<String, Value>, EditorError> {
        let element = self
            .document
            .get(id)
            .ok_or_else(|| EditorError::UnknownElement(id.to_string()))?;
        let specs = lookup(element.kind()).properties();
        let mut patch = Map::new();
        for (key, raw) in pairs {
            let spec = specs
                .iter()
                .find(|spec| spec.key == key.as_str())
                .ok_or_else(|| PropertyError::UnknownProperty { key: key.clone() })?;
            patch.insert(key.clone(), spec.parse_value(raw)?);
        }
        Ok(patch)
    }

    /// Sends the full document to the store. On failure local state is kept.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let content = self.document.to_json()?;
        self.store
            .save_form(&self.owner, self.record.id, content.clone())
            .await?;
        self.record.content = content;
        info!(form = %self.record.id, elements = self.document.len(), "design saved");
        Ok(())
    }

    /// Publishes the form. The designer is read-only afterwards.
    pub async fn publish(&mut self) -> Result<ShareToken, EditorError> {
        let token = self
            .store
            .publish_form(&self.owner, self.record.id)
            .await?;
        self.record.published = true;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_spec::{FieldType, SequentialIds};
    use form_store::{MemoryFormStore, NewForm};
    use serde_json::json;

    async fn session() -> (Arc<dyn FormStore>, EditorSession) {
        let store: Arc<dyn FormStore> = Arc::new(MemoryFormStore::default());
        let owner = UserId::new("alice");
        let id = store
            .create_form(&owner, NewForm::new("Feedback", ""))
            .await
            .unwrap();
        let session = EditorSession::open(store.clone(), owner, id)
            .await
            .unwrap()
            .with_ids(SequentialIds::new("el"));
        (store, session)
    }

    #[tokio::test]
    async fn drop_edit_and_save() {
        let (store, mut session) = session().await;
        session
            .handle_drop(
                Some(&DragSource::Palette(FieldType::TextField)),
                Some(&DropTarget::EmptyArea),
            )
            .unwrap();
        let patch = session
            .parse_patch(
                "el-1",
                &[
                    ("label".into(), "Email".into()),
                    ("required".into(), "true".into()),
                ],
            )
            .unwrap();
        let updated = session.set_properties("el-1", &patch).unwrap();
        assert!(updated.is_required());
        session.save().await.unwrap();

        let record = store
            .load_form(&UserId::new("alice"), session.record().id)
            .await
            .unwrap();
        let reloaded = Document::from_json(&record.content).unwrap();
        assert_eq!(reloaded.elements(), session.document().elements());
    }

    #[tokio::test]
    async fn rejected_property_keeps_element() {
        let (_, mut session) = session().await;
        session
            .handle_drop(
                Some(&DragSource::Palette(FieldType::SpacerField)),
                Some(&DropTarget::EmptyArea),
            )
            .unwrap();
        let before = session.document().clone();
        let mut patch = Map::new();
        patch.insert("height".into(), json!(999));
        assert!(matches!(
            session.set_properties("el-1", &patch),
            Err(EditorError::Property(PropertyError::OutOfRange { .. }))
        ));
        assert_eq!(session.document(), &before);
    }

    #[tokio::test]
    async fn published_form_is_read_only() {
        let (_, mut session) = session().await;
        session.publish().await.unwrap();
        let err = session
            .handle_drop(
                Some(&DragSource::Palette(FieldType::TextField)),
                Some(&DropTarget::EmptyArea),
            )
            .unwrap_err();
        assert!(matches!(err, EditorError::Published(_)));
        assert!(session.document().is_empty());
        assert!(matches!(session.save().await, Err(EditorError::Published(_))));
    }
}
