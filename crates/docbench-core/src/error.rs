//! Error types for docbench.

use thiserror::Error;

/// Result type alias using docbench's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for docbench operations.
///
/// Every variant carries a message fit for showing to the user as-is; the
/// workbench surfaces `to_string()` of the error as a transient notice.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote model call failed (transport, auth, quota)
    #[error("{0}")]
    Gateway(String),

    /// Structured output could not be parsed
    #[error("{0}")]
    InvalidFormat(String),

    /// Local validation failed before any network call
    #[error("{0}")]
    Precondition(String),

    /// Document not found
    #[error("Document not found: {0}")]
    NotFound(String),

    /// File kind cannot be ingested
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error was raised locally, before any round trip.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Precondition(_)
                | Error::NotFound(_)
                | Error::UnsupportedFileType(_)
                | Error::Config(_)
                | Error::Io(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
