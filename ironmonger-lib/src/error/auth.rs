//! Authentication and authorization error types

/// Errors that can occur during authentication or role checks.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid email or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The session token has expired or was revoked.
    #[error("Session expired")]
    SessionExpired,

    /// The session's role does not permit the requested operation.
    #[error("Forbidden: {reason}")]
    Forbidden {
        /// What was refused and why.
        reason: String,
    },

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}

impl AuthError {
    /// Creates a new forbidden error.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }
}
