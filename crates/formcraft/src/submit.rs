//! Respondent side: load a published form by share token, collect values and
//! submit them once they pass validation.

use std::collections::BTreeSet;
use std::sync::Arc;

use form_spec::{Document, DocumentError, SubmissionCheck, Values, runtime_view};
use form_store::{FormStore, ShareToken, StoreError, SubmissionId};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{} field(s) need attention: {}", .0.len(), join(.0))]
    Invalid(BTreeSet<String>),
    #[error("this form was already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Content(#[from] DocumentError),
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn join(ids: &BTreeSet<String>) -> String {
    ids.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub struct SubmissionSession {
    store: Arc<dyn FormStore>,
    token: ShareToken,
    document: Document,
    values: Values,
    invalid: BTreeSet<String>,
    submitted: Option<SubmissionId>,
}

impl SubmissionSession {
    /// Opens the public page of a form and counts one visit. Drafts open too
    /// but refuse to submit.
    pub async fn visit(store: Arc<dyn FormStore>, token: ShareToken) -> Result<Self, SubmitError> {
        let content = store.record_visit(&token).await?;
        let document = Document::from_json(&content)?;
        debug!(%token, elements = document.len(), "form visited");
        Ok(Self {
            store,
            token,
            document,
            values: Values::new(),
            invalid: BTreeSet::new(),
            submitted: None,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Ids that failed the last submit attempt.
    pub fn invalid(&self) -> &BTreeSet<String> {
        &self.invalid
    }

    pub fn submitted(&self) -> Option<SubmissionId> {
        self.submitted
    }

    pub fn set_value(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn extend_values(&mut self, values: impl IntoIterator<Item = (String, String)>) {
        self.values.extend(values);
    }

    /// Adaptive Card for the current values and validation marks.
    pub fn view(&self) -> Value {
        runtime_view(&self.document, &self.values, &self.invalid)
    }

    /// Validates every element and only then hands the values to the store.
    pub async fn submit(&mut self) -> Result<SubmissionId, SubmitError> {
        if self.submitted.is_some() {
            return Err(SubmitError::AlreadySubmitted);
        }
        let check = SubmissionCheck::run(&self.document, &self.values);
        if !check.is_submittable() {
            self.invalid = check.invalid.clone();
            return Err(SubmitError::Invalid(check.invalid));
        }
        self.invalid.clear();
        let content = serde_json::to_string(&self.values)?;
        let id = self.store.submit_form(&self.token, content).await?;
        self.submitted = Some(id);
        info!(token = %self.token, submission = %id, "form submitted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_spec::FieldType;
    use form_store::{MemoryFormStore, NewForm, UserId};
    use serde_json::json;

    async fn published_form() -> (Arc<dyn FormStore>, UserId, form_store::FormId, ShareToken) {
        let store: Arc<dyn FormStore> = Arc::new(MemoryFormStore::default());
        let owner = UserId::new("owner");
        let id = store
            .create_form(&owner, NewForm::new("Signup", ""))
            .await
            .unwrap();
        let field = FieldType::TextField.construct("email");
        let mut attributes = field.attributes().clone();
        attributes.insert("required".into(), json!(true));
        let mut doc = Document::new();
        doc.insert(field.with_attributes(attributes), 0).unwrap();
        store
            .save_form(&owner, id, doc.to_json().unwrap())
            .await
            .unwrap();
        let token = store.publish_form(&owner, id).await.unwrap();
        (store, owner, id, token)
    }

    #[tokio::test]
    async fn invalid_values_never_reach_the_store() {
        let (store, owner, id, token) = published_form().await;
        let mut session = SubmissionSession::visit(store.clone(), token).await.unwrap();

        let err = session.submit().await.unwrap_err();
        assert!(matches!(&err, SubmitError::Invalid(ids) if ids.contains("email")));
        assert!(session.invalid().contains("email"));
        assert_eq!(session.view()["body"][0]["invalid"], true);

        let (record, submissions) = store.form_with_submissions(&owner, id).await.unwrap();
        assert_eq!(record.visits, 1);
        assert_eq!(record.submissions, 0);
        assert!(submissions.is_empty());
    }

    #[tokio::test]
    async fn valid_values_are_stored_once() {
        let (store, owner, id, token) = published_form().await;
        let mut session = SubmissionSession::visit(store.clone(), token).await.unwrap();
        session.set_value("email", "ada@example.com");
        session.submit().await.unwrap();
        assert!(session.invalid().is_empty());
        assert!(matches!(
            session.submit().await,
            Err(SubmitError::AlreadySubmitted)
        ));

        let (_, submissions) = store.form_with_submissions(&owner, id).await.unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].content, r#"{"email":"ada@example.com"}"#);
    }
}
