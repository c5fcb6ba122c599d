//! # Documents
//!
//! A [`Document`] is a titled reference to a file owned by one user. Listing
//! queries embed a [`UserSummary`] of the owner; mutation responses usually do
//! not, so `user` is optional. When present it must agree with `userId`
//! ([`Document::owner_consistent`]).

use serde::{Deserialize, Serialize};

/// Owner projection embedded in document listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub full_name: String,
}

/// A document record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Document {
    /// The embedded owner, if any, is the one `user_id` names.
    pub fn owner_consistent(&self) -> bool {
        self.user.as_ref().is_none_or(|u| u.id == self.user_id)
    }
}

/// The file a new document points at.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentFile {
    /// Register an already-hosted file by URL.
    Url(String),
    /// Upload the file contents (multipart, REST backend only).
    Upload {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Input for creating a document.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDocumentInput {
    pub title: String,
    pub description: String,
    pub file: DocumentFile,
}

impl CreateDocumentInput {
    /// Link-based input, supported by every backend.
    pub fn link(
        title: impl Into<String>,
        description: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            file: DocumentFile::Url(file_url.into()),
        }
    }

    pub fn file_url(&self) -> Option<&str> {
        match &self.file {
            DocumentFile::Url(url) => Some(url),
            DocumentFile::Upload { .. } => None,
        }
    }
}

/// Partial update of a document. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentInput {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}
