use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::StoreError;

/// Empty form content: no elements.
pub const EMPTY_CONTENT: &str = "[]";

pub const NAME_MIN_CHARS: usize = 4;
pub const NAME_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Opaque identity of a form owner, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FormId(pub u64);

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormId {
    type Err = std::num::ParseIntError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim().parse().map(FormId)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public, unauthenticated handle of a form's submission page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input of `create_form`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewForm {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Trims both fields and checks their lengths.
    pub fn validated(self) -> Result<Self, StoreError> {
        let name = self.name.trim().to_string();
        let description = self.description.trim().to_string();
        let name_len = name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
            return Err(StoreError::InvalidForm(format!(
                "name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
            )));
        }
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(StoreError::InvalidForm(format!(
                "description must be at most {DESCRIPTION_MAX_CHARS} characters"
            )));
        }
        Ok(Self { name, description })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: FormId,
    pub owner: UserId,
    pub name: String,
    pub description: String,
    /// Serialized element list; the store never looks inside.
    pub content: String,
    pub published: bool,
    pub share_token: ShareToken,
    pub visits: u64,
    pub submissions: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl FormRecord {
    pub fn summary(&self) -> FormSummary {
        FormSummary {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            published: self.published,
            visits: self.visits,
            submissions: self.submissions,
            created_at: self.created_at,
        }
    }
}

/// Listing entry, without content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: FormId,
    pub name: String,
    pub description: String,
    pub published: bool,
    pub visits: u64,
    pub submissions: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub form_id: FormId,
    /// Serialized value map, as submitted.
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_bounded() {
        let form = NewForm::new("  Survey  ", "").validated().unwrap();
        assert_eq!(form.name, "Survey");
        assert!(NewForm::new("abc", "").validated().is_err());
        assert!(NewForm::new("x".repeat(51), "").validated().is_err());
        assert!(NewForm::new("Valid", "d".repeat(201)).validated().is_err());
    }

    #[test]
    fn form_id_parses() {
        assert_eq!(" 12 ".parse::<FormId>().unwrap(), FormId(12));
        assert!("twelve".parse::<FormId>().is_err());
    }
}
