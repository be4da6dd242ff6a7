//! Error types for credential management.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while obtaining or persisting a credential.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No usable credential could be obtained.
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    /// Reading or writing the credential store failed.
    #[error("Credential storage error: {0}")]
    Storage(String),

    /// The credential store contents could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Create an auth-required error.
    pub fn auth_required(msg: impl Into<String>) -> Self {
        Self::AuthRequired(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
