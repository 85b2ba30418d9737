//! Error handling module for the discussion viewer.
//!
//! Every failure a repository operation can surface maps to one `ForumError`
//! variant. The API layer turns them into status codes and response envelopes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::repository::Mode;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
    pub const AUTH_REQUIRED: &str = "AUTH_REQUIRED";
    pub const EMPTY_QUERY: &str = "EMPTY_QUERY";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForumError {
    /// Network failure or non-success HTTP status from an upstream service
    Transport {
        status: Option<u16>,
        message: String,
    },
    /// The GraphQL envelope carried an `errors` array; holds the first message
    Graph(String),
    /// A mutation was attempted without a credential
    AuthRequired(String),
    /// Live search invoked with blank text
    EmptyQuery,
    /// Discussion number absent from the snapshot
    NotFound(i64),
    /// Response body did not have the expected shape
    Decode(String),
    /// Key-value store failure
    Storage(String),
    /// Invalid configuration
    Config(String),
    /// Invalid request parameters
    BadRequest(String),
}

impl ForumError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        ForumError::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn auth_required(operation: &str) -> Self {
        ForumError::AuthRequired(operation.to_string())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForumError::Transport { .. } => StatusCode::BAD_GATEWAY,
            ForumError::Graph(_) => StatusCode::BAD_GATEWAY,
            ForumError::AuthRequired(_) => StatusCode::UNAUTHORIZED,
            ForumError::EmptyQuery => StatusCode::BAD_REQUEST,
            ForumError::NotFound(_) => StatusCode::NOT_FOUND,
            ForumError::Decode(_) => StatusCode::BAD_GATEWAY,
            ForumError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ForumError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ForumError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ForumError::Transport { .. } => codes::TRANSPORT_ERROR,
            ForumError::Graph(_) => codes::GRAPH_ERROR,
            ForumError::AuthRequired(_) => codes::AUTH_REQUIRED,
            ForumError::EmptyQuery => codes::EMPTY_QUERY,
            ForumError::NotFound(_) => codes::NOT_FOUND,
            ForumError::Decode(_) => codes::DECODE_ERROR,
            ForumError::Storage(_) => codes::STORAGE_ERROR,
            ForumError::Config(_) => codes::CONFIG_ERROR,
            ForumError::BadRequest(_) => codes::BAD_REQUEST,
        }
    }

    /// Get the diagnostic message.
    pub fn message(&self) -> String {
        match self {
            ForumError::Transport {
                status: Some(status),
                message,
            } => format!("HTTP {}: {}", status, message),
            ForumError::Transport {
                status: None,
                message,
            } => message.clone(),
            ForumError::Graph(msg) => msg.clone(),
            ForumError::AuthRequired(operation) => {
                format!("{} requires an access token", operation)
            }
            ForumError::EmptyQuery => "Search text must not be empty".to_string(),
            ForumError::NotFound(number) => format!("Discussion #{} not found", number),
            ForumError::Decode(msg) => msg.clone(),
            ForumError::Storage(msg) => msg.clone(),
            ForumError::Config(msg) => msg.clone(),
            ForumError::BadRequest(msg) => msg.clone(),
        }
    }

    /// Human-readable message shown to readers, one per error kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            ForumError::Transport { .. } => "Could not reach GitHub. Check your connection and try again.",
            ForumError::Graph(_) => "GitHub rejected the request.",
            ForumError::AuthRequired(_) => "Please sign in with a GitHub token to do that.",
            ForumError::EmptyQuery => "Type something to search for.",
            ForumError::NotFound(_) => "This discussion has not been synced yet or does not exist.",
            ForumError::Decode(_) => "GitHub sent a response we could not understand.",
            ForumError::Storage(_) => "Local storage is unavailable.",
            ForumError::Config(_) => "The viewer is misconfigured.",
            ForumError::BadRequest(_) => "The request was invalid.",
        }
    }

    /// Whether this failure proves the supplied token is invalid or expired.
    ///
    /// GitHub answers a bad token with HTTP 401. A GraphQL error only counts
    /// when its message is about the credential; rate limits and permission
    /// errors on a single resource leave the token alone.
    pub fn is_credential_rejection(&self) -> bool {
        match self {
            ForumError::Graph(message) => {
                let message = message.to_lowercase();
                message.contains("bad credentials") || message.contains("token")
            }
            ForumError::Transport {
                status: Some(status),
                ..
            } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

impl std::fmt::Display for ForumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for ForumError {}

impl From<reqwest::Error> for ForumError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        if err.is_decode() {
            return ForumError::Decode(format!("Malformed response body: {}", err));
        }
        ForumError::transport(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

impl From<sqlx::Error> for ForumError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        ForumError::Storage(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for ForumError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        ForumError::Decode(format!("JSON error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    pub user_message: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
    pub mode: Mode,
}

impl ErrorResponse {
    pub fn new(error: &ForumError, mode: Mode) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                user_message: error.user_message().to_string(),
            },
            mode,
        }
    }
}

/// Wrapper type for errors that carry the mode the request ran in.
pub struct ForumErrorWithMode {
    pub error: ForumError,
    pub mode: Mode,
}

impl IntoResponse for ForumErrorWithMode {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = ErrorResponse::new(&self.error, self.mode);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_kind_has_distinct_user_message() {
        let errors = [
            ForumError::transport(Some(500), "boom"),
            ForumError::Graph("rate limited".into()),
            ForumError::auth_required("addComment"),
            ForumError::EmptyQuery,
            ForumError::NotFound(4),
            ForumError::Decode("bad".into()),
            ForumError::Storage("full".into()),
            ForumError::Config("bad".into()),
            ForumError::BadRequest("bad".into()),
        ];

        let mut messages: Vec<&str> = errors.iter().map(|e| e.user_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_graph_error_keeps_exact_message() {
        let err = ForumError::Graph("rate limited".into());
        assert_eq!(err.message(), "rate limited");
        assert_eq!(err.to_string(), "GRAPH_ERROR: rate limited");
    }

    #[test]
    fn test_credential_rejection() {
        assert!(ForumError::Graph("Bad credentials".into()).is_credential_rejection());
        assert!(ForumError::Graph("The token has expired".into()).is_credential_rejection());
        assert!(!ForumError::Graph("API rate limit exceeded".into()).is_credential_rejection());
        assert!(ForumError::transport(Some(401), "Unauthorized").is_credential_rejection());
        assert!(!ForumError::transport(Some(502), "Bad Gateway").is_credential_rejection());
        assert!(!ForumError::transport(None, "connection refused").is_credential_rejection());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ForumError::auth_required("pin").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ForumError::NotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ForumError::EmptyQuery.status_code(), StatusCode::BAD_REQUEST);
    }
}
