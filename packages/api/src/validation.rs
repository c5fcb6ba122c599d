//! Client-side form checks. Failing any of these blocks submission; nothing
//! is sent to the backend.

use reqwest::Url;

use crate::error::ApiError;
use crate::models::{CreateDocumentInput, DocumentFile, UpdateDocumentInput};

const FILE_URL_MESSAGE: &str = "The file URL must be a valid http:// or https:// link";

/// Loose structural check: one `@`, a non-empty local part, and a dotted
/// domain. The backend remains the authority on deliverability.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() {
        return Err(ApiError::validation("Please enter your email"));
    }
    if !is_valid_email(email) {
        return Err(ApiError::validation("Please enter a valid email"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Please enter your password"));
    }
    Ok(())
}

pub fn validate_registration(
    email: &str,
    password: &str,
    full_name: &str,
    min_password_len: usize,
) -> Result<(), ApiError> {
    if full_name.trim().is_empty() {
        return Err(ApiError::validation("Full name is required"));
    }
    if !is_valid_email(email) {
        return Err(ApiError::validation("Please enter a valid email"));
    }
    if password.chars().count() < min_password_len {
        return Err(ApiError::validation(format!(
            "Password must be at least {min_password_len} characters"
        )));
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), ApiError> {
    if password != confirmation {
        return Err(ApiError::validation("Passwords do not match"));
    }
    Ok(())
}

/// Absolute `http`/`https` URL with a host.
pub fn is_http_url(url: &str) -> bool {
    match Url::parse(url.trim()) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// All fields are required; a link must be an absolute http(s) URL.
pub fn validate_new_document(input: &CreateDocumentInput) -> Result<(), ApiError> {
    if input.title.trim().is_empty()
        || input.description.trim().is_empty()
        || input.file_url().is_some_and(|url| url.trim().is_empty())
    {
        return Err(ApiError::validation("All fields are required"));
    }
    match &input.file {
        DocumentFile::Url(url) if !is_http_url(url) => Err(ApiError::validation(FILE_URL_MESSAGE)),
        DocumentFile::Url(_) => Ok(()),
        DocumentFile::Upload { bytes, .. } if bytes.is_empty() => {
            Err(ApiError::validation("The selected file is empty"))
        }
        DocumentFile::Upload { .. } => Ok(()),
    }
}

/// Fields being changed must not be blank; a new link must be an http(s) URL.
pub fn validate_update(input: &UpdateDocumentInput) -> Result<(), ApiError> {
    if input.title.is_none() && input.description.is_none() && input.file_url.is_none() {
        return Err(ApiError::validation("Nothing to update"));
    }
    if input.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(ApiError::validation("Title cannot be empty"));
    }
    if input.description.as_deref().is_some_and(|d| d.trim().is_empty()) {
        return Err(ApiError::validation("Description cannot be empty"));
    }
    if input.file_url.as_deref().is_some_and(|url| !is_http_url(url)) {
        return Err(ApiError::validation(FILE_URL_MESSAGE));
    }
    Ok(())
}
