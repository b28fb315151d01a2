use async_trait::async_trait;
use form_spec::FormStats;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::StoreError;
use crate::model::{
    FormId, FormRecord, FormSummary, NewForm, ShareToken, SubmissionId, SubmissionRecord, UserId,
};
use crate::state::StoreState;
use crate::{DEFAULT_PAGE_SIZE, FormStore};

/// Process-local store. Concurrent saves are last-write-wins.
#[derive(Debug)]
pub struct MemoryFormStore {
    state: RwLock<StoreState>,
    page_size: usize,
}

impl Default for MemoryFormStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl MemoryFormStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            page_size,
        }
    }
}

#[async_trait]
impl FormStore for MemoryFormStore {
    async fn create_form(&self, owner: &UserId, form: NewForm) -> Result<FormId, StoreError> {
        let id = self
            .state
            .write()
            .await
            .create_form(owner, form, OffsetDateTime::now_utc())?;
        info!(%owner, form = %id, "form created");
        Ok(id)
    }

    async fn list_forms(&self, owner: &UserId) -> Result<Vec<FormSummary>, StoreError> {
        Ok(self.state.read().await.list_forms(owner, self.page_size))
    }

    async fn load_form(&self, owner: &UserId, id: FormId) -> Result<FormRecord, StoreError> {
        self.state.read().await.form(owner, id).cloned()
    }

    async fn save_form(&self, owner: &UserId, id: FormId, content: String) -> Result<(), StoreError> {
        self.state.write().await.save_form(owner, id, content)?;
        info!(%owner, form = %id, "form saved");
        Ok(())
    }

    async fn publish_form(&self, owner: &UserId, id: FormId) -> Result<ShareToken, StoreError> {
        let token = self.state.write().await.publish_form(owner, id)?;
        info!(%owner, form = %id, "form published");
        Ok(token)
    }

    async fn record_visit(&self, token: &ShareToken) -> Result<String, StoreError> {
        self.state.write().await.record_visit(token)
    }

    async fn submit_form(&self, token: &ShareToken, content: String) -> Result<SubmissionId, StoreError> {
        let id = self
            .state
            .write()
            .await
            .submit_form(token, content, OffsetDateTime::now_utc())?;
        info!(submission = %id, "submission stored");
        Ok(id)
    }

    async fn form_with_submissions(
        &self,
        owner: &UserId,
        id: FormId,
    ) -> Result<(FormRecord, Vec<SubmissionRecord>), StoreError> {
        self.state.read().await.form_with_submissions(owner, id)
    }

    async fn stats(&self, owner: &UserId) -> Result<FormStats, StoreError> {
        Ok(self.state.read().await.stats(owner))
    }
}
