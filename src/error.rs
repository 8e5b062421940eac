//! Error types for the API client
//!
//! Every failure the client can report is a variant of [`ApiError`].
//! File validation does not use this type; it returns a
//! [`ValidationResult`](crate::utils::validation::ValidationResult) instead.

use thiserror::Error;

/// Errors returned by [`ApiClient`](crate::api::ApiClient) operations
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, I/O)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// A 2xx response body could not be parsed as JSON
    #[error("Failed to parse response body: {source} - Response body: {body}")]
    Decode {
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// The request payload could not be serialized
    #[error("Failed to serialize request payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The configured base URL cannot be joined with an endpoint path
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// An attachment could not be read or described
    #[error("Invalid attachment: {0}")]
    Attachment(String),
}

impl ApiError {
    /// HTTP status code, if the backend produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 4xx responses
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(code) if (400..500).contains(&code))
    }

    /// True for 5xx responses
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(code) if code >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_classification() {
        let not_found = ApiError::Status {
            status: 404,
            body: "missing".to_string(),
        };
        assert_eq!(not_found.status_code(), Some(404));
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let unavailable = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        assert!(unavailable.is_server_error());
        assert!(!unavailable.is_client_error());
    }

    #[test]
    fn test_non_status_errors_have_no_code() {
        let err = ApiError::Attachment("unreadable".to_string());
        assert_eq!(err.status_code(), None);
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("unreadable"));
    }

    #[test]
    fn test_decode_error_message_includes_body() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ApiError::Decode {
            source,
            body: "not json".to_string(),
        };
        assert!(err.to_string().contains("Failed to parse response body"));
        assert!(err.to_string().contains("not json"));
    }
}
