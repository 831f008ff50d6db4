//! Error types for Drive API operations.

use thiserror::Error;

/// Result type alias for Drive operations.
pub type DriveResult<T> = Result<T, DriveError>;

/// Errors related to Drive API operations.
#[derive(Debug, Error)]
pub enum DriveError {
    /// API request failed with an HTTP error status.
    #[error("Drive API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The access token was rejected or lacks permission.
    #[error("Drive API refused access (status {status}): {url}")]
    Unauthorized {
        /// HTTP status code (401 or 403)
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The requested file or folder does not exist.
    #[error("Drive resource not found: {url}")]
    NotFound {
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from Drive API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The configured base URL cannot carry path segments.
    #[error("Invalid Drive base URL: {url}")]
    InvalidBaseUrl {
        /// The configured URL
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Local I/O error while writing downloaded content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_failed_error_message() {
        let error = DriveError::ApiRequestFailed {
            status: 500,
            url: "https://www.googleapis.com/drive/v2/files".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("googleapis.com"));
    }

    #[test]
    fn test_unauthorized_error_message() {
        let error = DriveError::Unauthorized {
            status: 401,
            url: "https://www.googleapis.com/drive/v2/files".to_string(),
        };
        assert!(error.to_string().contains("401"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: DriveError = io.into();
        assert!(matches!(error, DriveError::Io(_)));
        assert!(error.to_string().contains("denied"));
    }
}
