//! # REST binding
//!
//! | Operation | Request |
//! |-----------|---------|
//! | login | `POST /auth/login` `{email, password}` |
//! | register | `POST /auth/register` `{email, password, fullName}` |
//! | current user | `GET /auth/me` |
//! | list | `GET /documents` (scoped to the caller by the server) |
//! | get | `GET /documents/:id` |
//! | create | `POST /documents` multipart `title`, `description`, `file` or `fileUrl` |
//! | delete | `DELETE /documents/:id` → `204` |
//!
//! Error bodies follow `{ "statusCode": 401, "message": "..." }`, where
//! `message` may also be a list of validation messages.

use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::{check_owner, check_owners, BearerToken, DocumentBackend};
use crate::error::ApiError;
use crate::models::{
    AuthResponse, CreateDocumentInput, Credentials, Document, DocumentFile, Registration,
    UpdateDocumentInput, User,
};

#[derive(Clone, Debug)]
pub struct RestBackend {
    client: reqwest::Client,
    base_url: String,
    token: BearerToken,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: BearerToken::default(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error_for_status(status.as_u16(), &body))
        }
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error_for_status(status.as_u16(), &body))
        }
    }
}

/// Map a non-success status and its body to an [`ApiError`].
pub(crate) fn error_for_status(status: u16, body: &str) -> ApiError {
    let message = error_message(body);
    match status {
        401 => ApiError::Unauthenticated,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        400 | 409 | 422 => ApiError::Validation(
            message.unwrap_or_else(|| "The request was rejected".to_string()),
        ),
        _ => ApiError::Server {
            status,
            message: message.unwrap_or_default(),
        },
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

fn document_form(input: &CreateDocumentInput) -> Result<Form, ApiError> {
    let form = Form::new()
        .text("title", input.title.clone())
        .text("description", input.description.clone());
    match &input.file {
        DocumentFile::Url(url) => Ok(form.text("fileUrl", url.clone())),
        DocumentFile::Upload {
            file_name,
            content_type,
            bytes,
        } => {
            let part = Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str(content_type)
                .map_err(|e| ApiError::validation(format!("Invalid file type: {e}")))?;
            Ok(form.part("file", part))
        }
    }
}

impl DocumentBackend for RestBackend {
    fn token(&self) -> &BearerToken {
        &self.token
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let request = self.client.post(self.url("/auth/login")).json(credentials);
        self.send_json(request)
            .await
            .map_err(ApiError::into_credentials_error)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let request = self.client.post(self.url("/auth/register")).json(registration);
        self.send_json(request)
            .await
            .map_err(ApiError::into_credentials_error)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.send_json(self.client.get(self.url("/auth/me"))).await
    }

    async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        let documents = self.send_json(self.client.get(self.url("/documents"))).await?;
        check_owners(documents)
    }

    async fn my_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.documents().await
    }

    async fn document(&self, id: &str) -> Result<Document, ApiError> {
        let path = format!("/documents/{id}");
        let document = self.send_json(self.client.get(self.url(&path))).await?;
        check_owner(document)
    }

    async fn create_document(&self, input: &CreateDocumentInput) -> Result<Document, ApiError> {
        let form = document_form(input)?;
        let request = self.client.post(self.url("/documents")).multipart(form);
        let document = self.send_json(request).await?;
        check_owner(document)
    }

    async fn update_document(&self, _input: &UpdateDocumentInput) -> Result<Document, ApiError> {
        Err(ApiError::Unsupported(
            "Editing documents requires the GraphQL backend".to_string(),
        ))
    }

    async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/documents/{id}");
        self.send_empty(self.client.delete(self.url(&path))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(error_for_status(401, ""), ApiError::Unauthenticated);
        assert_eq!(error_for_status(403, ""), ApiError::Forbidden);
        assert_eq!(error_for_status(404, "{}"), ApiError::NotFound);
        assert_eq!(
            error_for_status(500, r#"{"statusCode":500,"message":"Internal server error"}"#),
            ApiError::Server {
                status: 500,
                message: "Internal server error".to_string()
            }
        );
    }

    #[test]
    fn test_validation_messages_joined() {
        let body = r#"{"statusCode":400,"message":["email must be an email","password too short"],"error":"Bad Request"}"#;
        assert_eq!(
            error_for_status(400, body),
            ApiError::Validation("email must be an email, password too short".to_string())
        );
        assert_eq!(
            error_for_status(409, r#"{"message":"Email already in use"}"#),
            ApiError::Validation("Email already in use".to_string())
        );
        assert_eq!(
            error_for_status(400, "<html>bad gateway</html>"),
            ApiError::Validation("The request was rejected".to_string())
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = RestBackend::new("http://localhost:3000/");
        assert_eq!(backend.url("/auth/me"), "http://localhost:3000/auth/me");
    }

    #[test]
    fn test_form_rejects_bad_mime() {
        let input = CreateDocumentInput {
            title: "T".to_string(),
            description: "D".to_string(),
            file: DocumentFile::Upload {
                file_name: "y.pdf".to_string(),
                content_type: "not a mime type".to_string(),
                bytes: vec![1, 2, 3],
            },
        };
        assert!(matches!(document_form(&input), Err(ApiError::Validation(_))));
        assert!(document_form(&CreateDocumentInput::link("T", "D", "https://x/y.pdf")).is_ok());
    }

    #[tokio::test]
    async fn test_update_is_unsupported() {
        let backend = RestBackend::new("http://localhost:3000");
        let result = backend
            .update_document(&UpdateDocumentInput {
                id: "d1".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ApiError::Unsupported(_))));
    }
}
