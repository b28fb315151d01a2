//! Persistence boundary for forms, their share tokens and their submissions.
//!
//! Form content and submission content are stored as opaque JSON text; the
//! store never parses them. Owner-scoped calls treat a form that belongs to
//! someone else exactly like a missing one.

use async_trait::async_trait;
use form_spec::FormStats;

pub mod error;
#[cfg(feature = "fs")]
pub mod fs;
pub mod memory;
pub mod model;
mod state;

pub use error::StoreError;
#[cfg(feature = "fs")]
pub use fs::FsFormStore;
pub use memory::MemoryFormStore;
pub use model::{
    FormId, FormRecord, FormSummary, NewForm, ShareToken, SubmissionId, SubmissionRecord, UserId,
};

/// Listing size used when the caller does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 50;

#[async_trait]
pub trait FormStore: Send + Sync {
    /// Creates an unpublished, empty form and returns its id.
    async fn create_form(&self, owner: &UserId, form: NewForm) -> Result<FormId, StoreError>;

    /// The owner's forms, newest first, at most one page.
    async fn list_forms(&self, owner: &UserId) -> Result<Vec<FormSummary>, StoreError>;

    async fn load_form(&self, owner: &UserId, id: FormId) -> Result<FormRecord, StoreError>;

    /// Replaces the form content. Fails with `AlreadyPublished` once published.
    async fn save_form(&self, owner: &UserId, id: FormId, content: String) -> Result<(), StoreError>;

    /// Publishes the form (one way, repeatable) and returns its share token.
    async fn publish_form(&self, owner: &UserId, id: FormId) -> Result<ShareToken, StoreError>;

    /// Counts a visit to the form behind `token` and returns its content.
    /// Drafts can be visited; only submissions require a published form.
    async fn record_visit(&self, token: &ShareToken) -> Result<String, StoreError>;

    /// Stores a submission for a published form and bumps its counter.
    async fn submit_form(&self, token: &ShareToken, content: String) -> Result<SubmissionId, StoreError>;

    async fn form_with_submissions(
        &self,
        owner: &UserId,
        id: FormId,
    ) -> Result<(FormRecord, Vec<SubmissionRecord>), StoreError>;

    /// Visit and submission totals across all of the owner's forms.
    async fn stats(&self, owner: &UserId) -> Result<FormStats, StoreError>;
}
