//! Gemini-specific error handling.

use docbench_core::Error;

/// Gemini API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiErrorCode {
    /// Missing, invalid, or unauthorised API key.
    AuthenticationError,
    /// Quota or rate limit exhausted.
    QuotaExceeded,
    /// Model name not found.
    ModelNotFound,
    /// Malformed payload or unsupported argument.
    InvalidRequest,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl GeminiErrorCode {
    /// Determine error code from HTTP status, the API's status string, and
    /// its message. The API reports a bad key as 400 `INVALID_ARGUMENT`, so
    /// the message is consulted too.
    pub fn from_response(status: u16, api_status: &str, message: &str) -> Self {
        match (status, api_status) {
            (401 | 403, _) | (_, "UNAUTHENTICATED" | "PERMISSION_DENIED") => {
                Self::AuthenticationError
            }
            (400, _) if message.contains("API key") => Self::AuthenticationError,
            (429, _) | (_, "RESOURCE_EXHAUSTED") => Self::QuotaExceeded,
            (404, _) | (_, "NOT_FOUND") => Self::ModelNotFound,
            (400, _) | (_, "INVALID_ARGUMENT" | "FAILED_PRECONDITION") => Self::InvalidRequest,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Human-readable category prefix.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::AuthenticationError => "Authentication failed",
            Self::QuotaExceeded => "Quota exceeded",
            Self::ModelNotFound => "Model not found",
            Self::InvalidRequest => "Invalid request",
            Self::ServerError => "Server error",
            Self::Unknown => "Request failed",
        }
    }
}

/// Convert a Gemini error into a docbench gateway error.
pub fn to_docbench_error(code: GeminiErrorCode, message: &str) -> Error {
    if message.is_empty() {
        Error::Gateway(code.describe().to_string())
    } else {
        Error::Gateway(format!("{}: {}", code.describe(), message))
    }
}
