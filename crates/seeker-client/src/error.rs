//! Client error types.

use seeker_auth::AuthError;
use thiserror::Error;

use crate::protocol::JsonRpcError;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable credential could be obtained.
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    /// Network or HTTP-level failure.
    #[error("Transport error{}: {cause}", status_suffix(.status))]
    Transport {
        /// HTTP status, when a response was received.
        status: Option<u16>,
        /// Human-readable cause.
        cause: String,
    },

    /// The server answered with a JSON-RPC error envelope.
    #[error("Remote tool error {code}: {message}")]
    RemoteTool {
        /// Error code from the server.
        code: i64,
        /// Error message from the server.
        message: String,
        /// Optional additional data.
        data: Option<serde_json::Value>,
    },

    /// The response body matched no recognized shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Caller passed an unusable request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential persistence failed.
    #[error("Credential storage error: {0}")]
    Storage(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

impl Error {
    /// Create a transport error.
    pub fn transport(status: Option<u16>, cause: impl Into<String>) -> Self {
        Self::Transport {
            status,
            cause: cause.into(),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// HTTP status carried by a transport error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::AuthRequired(_))
            || matches!(self, Error::Transport { status: Some(401 | 403), .. })
    }

    /// Check if the server could not be reached or answered non-2xx.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }
}

impl From<JsonRpcError> for Error {
    fn from(e: JsonRpcError) -> Self {
        Error::RemoteTool {
            code: e.code,
            message: e.message,
            data: e.data,
        }
    }
}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::AuthRequired(msg) => Error::AuthRequired(msg),
            AuthError::Storage(msg) | AuthError::Serialization(msg) => Error::Storage(msg),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        let cause = if e.is_timeout() {
            "request timed out".to_string()
        } else if e.is_connect() {
            format!("could not connect: {}", e)
        } else {
            e.to_string()
        };
        Error::Transport { status, cause }
    }
}
