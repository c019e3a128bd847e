//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The server reports the resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the status reason.
        message: String,
    },

    /// The request exceeded the client timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request never completed (connection, TLS, body decoding).
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Export payload was not valid base64.
    #[error("Decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential storage error.
    #[error("Credential error: {0}")]
    Credential(#[from] crate::credentials::CredentialError),
}

impl Error {
    /// Returns true for a server-side 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
