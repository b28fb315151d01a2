use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use form_spec::FormStats;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::model::{
    FormId, FormRecord, FormSummary, NewForm, ShareToken, SubmissionId, SubmissionRecord, UserId,
};
use crate::state::StoreState;
use crate::{DEFAULT_PAGE_SIZE, FormStore};

const STORE_FILE: &str = "forms.json";

/// Store backed by a single JSON file inside a data directory.
///
/// Every call reads the file, and mutating calls write it back through a
/// temporary file and a rename. Calls within one process are serialized.
#[derive(Debug)]
pub struct FsFormStore {
    path: PathBuf,
    page_size: usize,
    lock: Mutex<()>,
}

impl FsFormStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::with_page_size(data_dir, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(data_dir: impl AsRef<Path>, page_size: usize) -> Self {
        Self {
            path: data_dir.as_ref().join(STORE_FILE),
            page_size,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<StoreState, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(StoreState::default()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    async fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        let bytes = serde_json::to_vec_pretty(state).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|source| StoreError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), "store written");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn read<T>(
        &self,
        op: impl FnOnce(&StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let state = self.load().await?;
        op(&state)
    }

    async fn write<T>(
        &self,
        op: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        let mut state = self.load().await?;
        let out = op(&mut state)?;
        self.persist(&state).await?;
        Ok(out)
    }
}

#[async_trait]
impl FormStore for FsFormStore {
    async fn create_form(&self, owner: &UserId, form: NewForm) -> Result<FormId, StoreError> {
        let now = OffsetDateTime::now_utc();
        let id = self
            .write(|state| state.create_form(owner, form, now))
            .await?;
        info!(%owner, form = %id, "form created");
        Ok(id)
    }

    async fn list_forms(&self, owner: &UserId) -> Result<Vec<FormSummary>, StoreError> {
        self.read(|state| Ok(state.list_forms(owner, self.page_size)))
            .await
    }

    async fn load_form(&self, owner: &UserId, id: FormId) -> Result<FormRecord, StoreError> {
        self.read(|state| state.form(owner, id).cloned()).await
    }

    async fn save_form(&self, owner: &UserId, id: FormId, content: String) -> Result<(), StoreError> {
        self.write(|state| state.save_form(owner, id, content))
            .await?;
        info!(%owner, form = %id, "form saved");
        Ok(())
    }

    async fn publish_form(&self, owner: &UserId, id: FormId) -> Result<ShareToken, StoreError> {
        let token = self.write(|state| state.publish_form(owner, id)).await?;
        info!(%owner, form = %id, "form published");
        Ok(token)
    }

    async fn record_visit(&self, token: &ShareToken) -> Result<String, StoreError> {
        self.write(|state| state.record_visit(token)).await
    }

    async fn submit_form(&self, token: &ShareToken, content: String) -> Result<SubmissionId, StoreError> {
        let now = OffsetDateTime::now_utc();
        let id = self
            .write(|state| state.submit_form(token, content, now))
            .await?;
        info!(submission = %id, "submission stored");
        Ok(id)
    }

    async fn form_with_submissions(
        &self,
        owner: &UserId,
        id: FormId,
    ) -> Result<(FormRecord, Vec<SubmissionRecord>), StoreError> {
        self.read(|state| state.form_with_submissions(owner, id))
            .await
    }

    async fn stats(&self, owner: &UserId) -> Result<FormStats, StoreError> {
        self.read(|state| Ok(state.stats(owner))).await
    }
}
