//! Store contents and the operations on them, shared by every backend.

use std::collections::BTreeMap;

use form_spec::FormStats;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::StoreError;
use crate::model::{
    EMPTY_CONTENT, FormId, FormRecord, FormSummary, NewForm, ShareToken, SubmissionId,
    SubmissionRecord, UserId,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoreState {
    next_form_id: u64,
    next_submission_id: u64,
    forms: BTreeMap<FormId, FormRecord>,
    submissions: Vec<SubmissionRecord>,
}

impl StoreState {
    pub(crate) fn create_form(
        &mut self,
        owner: &UserId,
        form: NewForm,
        now: OffsetDateTime,
    ) -> Result<FormId, StoreError> {
        let form = form.validated()?;
        self.next_form_id += 1;
        let id = FormId(self.next_form_id);
        self.forms.insert(
            id,
            FormRecord {
                id,
                owner: owner.clone(),
                name: form.name,
                description: form.description,
                content: EMPTY_CONTENT.to_string(),
                published: false,
                share_token: ShareToken::generate(),
                visits: 0,
                submissions: 0,
                created_at: now,
            },
        );
        Ok(id)
    }

    /// Newest first; ties broken by the higher id.
    pub(crate) fn list_forms(&self, owner: &UserId, limit: usize) -> Vec<FormSummary> {
        let mut forms: Vec<&FormRecord> = self
            .forms
            .values()
            .filter(|form| &form.owner == owner)
            .collect();
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        forms.into_iter().take(limit).map(FormRecord::summary).collect()
    }

    pub(crate) fn form(&self, owner: &UserId, id: FormId) -> Result<&FormRecord, StoreError> {
        self.forms
            .get(&id)
            .filter(|form| &form.owner == owner)
            .ok_or_else(|| StoreError::form_not_found(id))
    }

    fn form_mut(&mut self, owner: &UserId, id: FormId) -> Result<&mut FormRecord, StoreError> {
        self.forms
            .get_mut(&id)
            .filter(|form| &form.owner == owner)
            .ok_or_else(|| StoreError::form_not_found(id))
    }

    fn by_token_mut(&mut self, token: &ShareToken) -> Result<&mut FormRecord, StoreError> {
        self.forms
            .values_mut()
            .find(|form| &form.share_token == token)
            .ok_or_else(|| StoreError::token_not_found(token.as_str()))
    }

    fn published_by_token(&mut self, token: &ShareToken) -> Result<&mut FormRecord, StoreError> {
        let form = self.by_token_mut(token)?;
        if !form.published {
            return Err(StoreError::NotPublished(token.to_string()));
        }
        Ok(form)
    }

    pub(crate) fn save_form(
        &mut self,
        owner: &UserId,
        id: FormId,
        content: String,
    ) -> Result<(), StoreError> {
        let form = self.form_mut(owner, id)?;
        if form.published {
            return Err(StoreError::AlreadyPublished(id));
        }
        form.content = content;
        Ok(())
    }

    pub(crate) fn publish_form(
        &mut self,
        owner: &UserId,
        id: FormId,
    ) -> Result<ShareToken, StoreError> {
        let form = self.form_mut(owner, id)?;
        form.published = true;
        Ok(form.share_token.clone())
    }

    pub(crate) fn record_visit(&mut self, token: &ShareToken) -> Result<String, StoreError> {
        let form = self.by_token_mut(token)?;
        form.visits += 1;
        Ok(form.content.clone())
    }

    pub(crate) fn submit_form(
        &mut self,
        token: &ShareToken,
        content: String,
        now: OffsetDateTime,
    ) -> Result<SubmissionId, StoreError> {
        let form = self.published_by_token(token)?;
        form.submissions += 1;
        let form_id = form.id;
        self.next_submission_id += 1;
        let id = SubmissionId(self.next_submission_id);
        self.submissions.push(SubmissionRecord {
            id,
            form_id,
            content,
            created_at: now,
        });
        Ok(id)
    }

    pub(crate) fn form_with_submissions(
        &self,
        owner: &UserId,
        id: FormId,
    ) -> Result<(FormRecord, Vec<SubmissionRecord>), StoreError> {
        let form = self.form(owner, id)?.clone();
        let submissions = self
            .submissions
            .iter()
            .filter(|submission| submission.form_id == id)
            .cloned()
            .collect();
        Ok((form, submissions))
    }

    pub(crate) fn stats(&self, owner: &UserId) -> FormStats {
        let (visits, submissions) = self
            .forms
            .values()
            .filter(|form| &form.owner == owner)
            .fold((0, 0), |(visits, submissions), form| {
                (visits + form.visits, submissions + form.submissions)
            });
        FormStats::from_counts(visits, submissions)
    }
}
