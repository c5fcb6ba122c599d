//! # GraphQL binding
//!
//! Every call is a POST of `{query, operationName, variables}` to a single
//! endpoint. The response envelope is `{data, errors}`; the first entry of
//! `errors` decides the failure, classified by `extensions.code`, then by an
//! HTTP-style status carried in the extensions, then by message text.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::{json, Value};

use super::rest::error_for_status;
use super::{check_owner, check_owners, BearerToken, DocumentBackend};
use crate::error::ApiError;
use crate::models::{
    AuthResponse, CreateDocumentInput, Credentials, Document, DocumentFile, Registration,
    UpdateDocumentInput, User,
};

pub mod operations;
use operations::Operation;

#[derive(Clone, Debug)]
pub struct GraphqlBackend {
    client: reqwest::Client,
    endpoint: String,
    token: BearerToken,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    extensions: Value,
}

impl GraphqlBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: BearerToken::default(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: Operation,
        variables: Value,
    ) -> Result<T, ApiError> {
        let body = request_body(operation, variables);
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = self.token.get() {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        decode_response(operation, status, &text)
    }
}

fn request_body(operation: Operation, variables: Value) -> Value {
    json!({
        "query": operation.query,
        "operationName": operation.name,
        "variables": variables,
    })
}

/// Decode a GraphQL HTTP response into the operation's result field.
fn decode_response<T: DeserializeOwned>(
    operation: Operation,
    status: u16,
    body: &str,
) -> Result<T, ApiError> {
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Err(match status {
                401 => ApiError::Unauthenticated,
                403 => ApiError::Forbidden,
                200..=299 => ApiError::Decode(e.to_string()),
                _ => ApiError::Server {
                    status,
                    message: body.chars().take(200).collect(),
                },
            })
        }
    };

    if let Some(error) = envelope.errors.first() {
        return Err(classify(error, status));
    }
    if !(200..300).contains(&status) {
        return Err(error_for_status(status, body));
    }

    let field = envelope
        .data
        .and_then(|mut data| data.get_mut(operation.field).map(Value::take))
        .unwrap_or(Value::Null);
    if field.is_null() {
        return Err(if operation.field == operations::DOCUMENT.field {
            ApiError::NotFound
        } else {
            ApiError::Decode(format!("{} returned no `{}`", operation.name, operation.field))
        });
    }
    Ok(serde_json::from_value(field)?)
}

fn classify(error: &GraphqlError, http_status: u16) -> ApiError {
    let extensions = &error.extensions;
    let code = extensions.get("code").and_then(Value::as_str).unwrap_or("");
    let status = extensions
        .pointer("/originalError/statusCode")
        .or_else(|| extensions.get("status"))
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(http_status);
    let message = error.message.clone();

    match (code, status) {
        ("UNAUTHENTICATED", _) | (_, 401) => ApiError::Unauthenticated,
        ("FORBIDDEN", _) | (_, 403) => ApiError::Forbidden,
        ("NOT_FOUND", _) | (_, 404) => ApiError::NotFound,
        ("BAD_USER_INPUT", _) | ("BAD_REQUEST", _) | (_, 400) | (_, 409) => {
            ApiError::Validation(message)
        }
        _ => {
            let lower = message.to_lowercase();
            if lower.contains("unauthorized") || lower.contains("unauthenticated") {
                ApiError::Unauthenticated
            } else if lower.contains("forbidden") {
                ApiError::Forbidden
            } else if lower.contains("not found") {
                ApiError::NotFound
            } else {
                ApiError::Server { status, message }
            }
        }
    }
}

impl DocumentBackend for GraphqlBackend {
    fn token(&self) -> &BearerToken {
        &self.token
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.execute(operations::LOGIN, json!({ "loginInput": credentials }))
            .await
            .map_err(ApiError::into_credentials_error)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.execute(operations::REGISTER, json!({ "registerInput": registration }))
            .await
            .map_err(ApiError::into_credentials_error)
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.execute(operations::CURRENT_USER, json!({})).await
    }

    async fn documents(&self) -> Result<Vec<Document>, ApiError> {
        let documents = self.execute(operations::ALL_DOCUMENTS, json!({})).await?;
        check_owners(documents)
    }

    async fn my_documents(&self) -> Result<Vec<Document>, ApiError> {
        let documents = self.execute(operations::MY_DOCUMENTS, json!({})).await?;
        check_owners(documents)
    }

    async fn document(&self, id: &str) -> Result<Document, ApiError> {
        let document = self.execute(operations::DOCUMENT, json!({ "id": id })).await?;
        check_owner(document)
    }

    async fn create_document(&self, input: &CreateDocumentInput) -> Result<Document, ApiError> {
        let DocumentFile::Url(file_url) = &input.file else {
            return Err(ApiError::Unsupported(
                "Uploading files requires the REST backend; provide a file URL instead"
                    .to_string(),
            ));
        };
        let variables = json!({
            "createDocumentInput": {
                "title": input.title,
                "description": input.description,
                "fileUrl": file_url,
            }
        });
        let document = self.execute(operations::CREATE_DOCUMENT, variables).await?;
        check_owner(document)
    }

    async fn update_document(&self, input: &UpdateDocumentInput) -> Result<Document, ApiError> {
        let document = self
            .execute(
                operations::UPDATE_DOCUMENT,
                json!({ "updateDocumentInput": input }),
            )
            .await?;
        check_owner(document)
    }

    async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .execute(operations::REMOVE_DOCUMENT, json!({ "id": id }))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_request_body_shape() {
        let body = request_body(operations::DOCUMENT, json!({ "id": "d1" }));
        assert_eq!(body["operationName"], "GetDocument");
        assert_eq!(body["variables"]["id"], "d1");
        assert!(body["query"].as_str().unwrap().starts_with("query GetDocument"));
    }

    #[test]
    fn test_decode_me() {
        let body = r#"{"data":{"me":{"id":"u1","email":"a@b.com","fullName":"A B","role":"USER","createdAt":"now"}}}"#;
        let user: User = decode_response(operations::CURRENT_USER, 200, body).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_decode_document_list() {
        let body = r#"{"data":{"myDocuments":[
            {"id":"d1","title":"T","description":"D","fileUrl":"https://x/y.pdf","userId":"u1",
             "createdAt":"now","updatedAt":null,"user":{"id":"u1","email":"a@b.com","fullName":"A B"}}
        ]}}"#;
        let docs: Vec<Document> = decode_response(operations::MY_DOCUMENTS, 200, body).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].user_id, "u1");
        assert!(docs[0].updated_at.is_none());
    }

    #[test]
    fn test_unauthenticated_error_code() {
        let body = r#"{"errors":[{"message":"Unauthorized","extensions":{"code":"UNAUTHENTICATED"}}],"data":null}"#;
        let result: Result<User, _> = decode_response(operations::CURRENT_USER, 200, body);
        assert_eq!(result, Err(ApiError::Unauthenticated));
    }

    #[test]
    fn test_status_inside_original_error() {
        let body = r#"{"errors":[{"message":"Forbidden resource","extensions":{"code":"INTERNAL_SERVER_ERROR","originalError":{"statusCode":403,"message":"Forbidden resource"}}}]}"#;
        let result: Result<IgnoredAny, _> =
            decode_response(operations::REMOVE_DOCUMENT, 200, body);
        assert_eq!(result.err(), Some(ApiError::Forbidden));
    }

    #[test]
    fn test_message_fallback_classification() {
        let body = r#"{"errors":[{"message":"Document with id d9 not found"}]}"#;
        let result: Result<Document, _> = decode_response(operations::DOCUMENT, 200, body);
        assert_eq!(result, Err(ApiError::NotFound));

        let body = r#"{"errors":[{"message":"Something exploded"}]}"#;
        let result: Result<Document, _> = decode_response(operations::DOCUMENT, 200, body);
        assert_eq!(
            result,
            Err(ApiError::Server {
                status: 200,
                message: "Something exploded".to_string()
            })
        );
    }

    #[test]
    fn test_bad_user_input_is_validation() {
        let body = r#"{"errors":[{"message":"Email already exists","extensions":{"code":"BAD_USER_INPUT"}}]}"#;
        let result: Result<AuthResponse, _> = decode_response(operations::REGISTER, 200, body);
        assert_eq!(
            result,
            Err(ApiError::Validation("Email already exists".to_string()))
        );
    }

    #[test]
    fn test_null_document_is_not_found() {
        let body = r#"{"data":{"document":null}}"#;
        let result: Result<Document, _> = decode_response(operations::DOCUMENT, 200, body);
        assert_eq!(result, Err(ApiError::NotFound));
    }

    #[test]
    fn test_non_json_bodies() {
        let result: Result<User, _> = decode_response(operations::CURRENT_USER, 401, "Unauthorized");
        assert_eq!(result, Err(ApiError::Unauthenticated));

        let result: Result<User, _> = decode_response(operations::CURRENT_USER, 502, "Bad Gateway");
        assert_eq!(
            result,
            Err(ApiError::Server {
                status: 502,
                message: "Bad Gateway".to_string()
            })
        );

        let result: Result<User, _> = decode_response(operations::CURRENT_USER, 200, "<html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_error_status_without_errors_array() {
        let body = r#"{"statusCode":403,"message":"Forbidden resource","error":"Forbidden"}"#;
        let result: Result<IgnoredAny, _> =
            decode_response(operations::REMOVE_DOCUMENT, 403, body);
        assert_eq!(result.err(), Some(ApiError::Forbidden));

        let body = r#"{"statusCode":500,"message":"Internal server error"}"#;
        let result: Result<Document, _> = decode_response(operations::DOCUMENT, 500, body);
        assert_eq!(
            result,
            Err(ApiError::Server {
                status: 500,
                message: "Internal server error".to_string()
            })
        );

        let body = r#"{"statusCode":401,"message":"Unauthorized"}"#;
        let result: Result<User, _> = decode_response(operations::CURRENT_USER, 401, body);
        assert_eq!(result, Err(ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_upload_rejected_before_sending() {
        let backend = GraphqlBackend::new("http://localhost:3000/graphql");
        let input = CreateDocumentInput {
            title: "T".to_string(),
            description: "D".to_string(),
            file: DocumentFile::Upload {
                file_name: "y.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: vec![1],
            },
        };
        assert!(matches!(
            backend.create_document(&input).await,
            Err(ApiError::Unsupported(_))
        ));
    }
}
