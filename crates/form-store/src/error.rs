use std::path::PathBuf;

use thiserror::Error;

use crate::model::FormId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{what} '{key}' not found")]
    NotFound { what: &'static str, key: String },
    #[error("form {0} is published and can no longer be edited")]
    AlreadyPublished(FormId),
    #[error("form behind share token '{0}' is not published")]
    NotPublished(String),
    #[error("invalid form: {0}")]
    InvalidForm(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt store file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn form_not_found(id: FormId) -> Self {
        StoreError::NotFound {
            what: "form",
            key: id.to_string(),
        }
    }

    pub(crate) fn token_not_found(token: &str) -> Self {
        StoreError::NotFound {
            what: "share token",
            key: token.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
