//! Build server client errors

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the build server
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, including timeouts
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error body returned by the server
        message: String,
    },

    /// Response body or header in an unexpected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// A 404, e.g. a job or endpoint the server does not have
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        assert!(ClientError::api_error(404, "no such job").is_not_found());

        let unavailable = ClientError::api_error(503, "Jenkins is restarting");
        assert!(!unavailable.is_not_found());
        assert_eq!(
            unavailable.to_string(),
            "API error (status 503): Jenkins is restarting"
        );
    }
}
