//! HTTP-specific error types.
//!
//! The SDK uses specific error types for different failure scenarios:
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`MaxHttpRetriesExceededError`]: When retry attempts are exhausted
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Every variant is `Clone`: the query cache coalesces concurrent reads for
//! one key into a single network call, and each waiter receives its own copy
//! of the outcome. Network failures therefore carry the underlying error as
//! a message rather than the non-cloneable `reqwest::Error` itself.

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use commerce_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: r#"{"Errors":[{"ErrorCode":"NotFound"}]}"#.to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// println!("Status {}: {}", error.code, error.message);
/// ```
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Serialized error message from the response body.
    pub message: String,
    /// Reference ID for error reporting (from the X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when maximum retry attempts have been exhausted.
///
/// Raised when a request keeps failing with a retryable status after all
/// configured attempts have been made.
#[derive(Debug, Error, Clone)]
#[error("Exceeded maximum retry count of {tries}. Last message: {message}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of tries that were attempted.
    pub tries: u32,
    /// Serialized error message from the last response.
    pub message: String,
    /// Reference ID for error reporting (from the X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation before sending.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request path is empty.
    #[error("Cannot issue a request against an empty path.")]
    EmptyPath,

    /// A POST/PUT/PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust,ignore
/// use commerce_api::clients::HttpError;
///
/// match client.request(request).await {
///     Ok(response) => println!("Success: {}", response.body),
///     Err(e) if e.is_unauthorized() => { /* trigger session recovery */ }
///     Err(HttpError::MaxRetries(e)) => println!("gave up after {} tries", e.tries),
///     Err(e) => println!("request failed: {e}"),
/// }
/// ```
#[derive(Debug, Error, Clone)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Maximum retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the underlying transport failure.
        message: String,
    },
}

impl HttpError {
    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::MaxRetries(e) => Some(e.code),
            Self::InvalidRequest(_) | Self::Network { .. } => None,
        }
    }

    /// Returns true for 401 Unauthorized responses.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true for 403 Forbidden responses.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_error_message_is_body() {
        let error = HttpResponseError {
            code: 404,
            message: r#"{"Errors":[{"ErrorCode":"NotFound"}]}"#.to_string(),
            error_reference: None,
        };
        assert_eq!(error.to_string(), r#"{"Errors":[{"ErrorCode":"NotFound"}]}"#);
    }

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError {
            code: 500,
            tries: 3,
            message: "server fell over".to_string(),
            error_reference: None,
        };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_status_classification() {
        let unauthorized = HttpError::Response(HttpResponseError {
            code: 401,
            message: String::new(),
            error_reference: None,
        });
        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_forbidden());

        let forbidden = HttpError::Response(HttpResponseError {
            code: 403,
            message: String::new(),
            error_reference: None,
        });
        assert!(forbidden.is_forbidden());

        let network = HttpError::Network {
            message: "connection reset".to_string(),
        };
        assert_eq!(network.status(), None);
    }

    #[test]
    fn test_errors_are_cloneable() {
        let error = HttpError::Response(HttpResponseError {
            code: 500,
            message: "boom".to_string(),
            error_reference: Some("req-1".to_string()),
        });
        let copy = error.clone();
        assert_eq!(copy.status(), Some(500));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
        let _ = error;
    }
}
