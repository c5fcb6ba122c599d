//! Error taxonomy for the data-access and session layers.

/// Everything that can go wrong between a view and the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Client-side form check failed; nothing was sent.
    #[error("{0}")]
    Validation(String),
    /// The backend rejected the submitted credentials.
    #[error("{0}")]
    Auth(String),
    /// The bearer token is missing, expired or revoked.
    #[error("Your session has expired, please sign in again")]
    Unauthenticated,
    /// Authenticated, but not allowed to act on this resource.
    #[error("You are not allowed to perform this action")]
    Forbidden,
    #[error("Document not found")]
    NotFound,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Unsupported(String),
    #[error(transparent)]
    Storage(#[from] store::StoreError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error means the session is no longer valid.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }

    /// Text suitable for a toast or inline form message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Unable to reach the server, please try again".to_string(),
            ApiError::Decode(_) | ApiError::Storage(_) => {
                "Something went wrong, please try again".to_string()
            }
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Server { .. } => "Something went wrong, please try again".to_string(),
            other => other.to_string(),
        }
    }

    /// Login and registration report a rejected token as bad credentials:
    /// there is no session to tear down yet.
    pub(crate) fn into_credentials_error(self) -> Self {
        match self {
            ApiError::Unauthenticated | ApiError::Forbidden => {
                ApiError::Auth("Invalid email or password".to_string())
            }
            other => other,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
