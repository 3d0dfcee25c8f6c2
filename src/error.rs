//! Error types and handling for the wavesearch service

use thiserror::Error;

/// Application error taxonomy.
///
/// The search component is pure and offline, so the set stays small: bad
/// queries, bad upstream data, and the request budget the transport layer
/// imposes. Errors are never retried internally; every failure surfaces to
/// the caller, which decides the user-visible behavior.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the machine-readable code for transport responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidQuery(_) => "invalid_query",
            AppError::MalformedInput(_) => "malformed_input",
            AppError::Timeout(_) => "timeout",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Convert serde_json::Error to AppError
///
/// Decode failures always mean the upstream snapshot is bad, not the query.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedInput(err.to_string())
    }
}

/// Convert std::io::Error to AppError
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
