//! Resource-layer error types.

use thiserror::Error;

use crate::clients::HttpError;

/// Error returned by resource operations.
///
/// 401 and 403 are surfaced as their own variants because callers handle
/// them structurally: 401 feeds a session-recovery flow, 403 is a hard
/// permission boundary. Neither is ever retried by the transport.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The bearer token was rejected (401).
    #[error("unauthorized: {message}")]
    Unauthorized {
        /// Serialized error body from the response.
        message: String,
    },

    /// The token's roles do not permit the operation (403).
    #[error("forbidden: {message}")]
    Forbidden {
        /// Serialized error body from the response.
        message: String,
    },

    /// Any other transport or response failure.
    #[error(transparent)]
    Http(HttpError),

    /// The response body did not match the expected type.
    #[error("response body could not be deserialized: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl ResourceError {
    /// Classifies an [`HttpError`] into the resource error taxonomy.
    #[must_use]
    pub fn from_http(error: HttpError) -> Self {
        if error.is_unauthorized() {
            Self::Unauthorized {
                message: error.to_string(),
            }
        } else if error.is_forbidden() {
            Self::Forbidden {
                message: error.to_string(),
            }
        } else {
            Self::Http(error)
        }
    }

    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Http(e) => e.status(),
            Self::Deserialize(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    fn response_error(code: u16) -> HttpError {
        HttpError::Response(HttpResponseError {
            code,
            message: "denied".to_string(),
            error_reference: None,
        })
    }

    #[test]
    fn test_from_http_classifies_auth_failures() {
        assert!(matches!(
            ResourceError::from_http(response_error(401)),
            ResourceError::Unauthorized { .. }
        ));
        assert!(matches!(
            ResourceError::from_http(response_error(403)),
            ResourceError::Forbidden { .. }
        ));
        assert!(matches!(
            ResourceError::from_http(response_error(500)),
            ResourceError::Http(_)
        ));
    }

    #[test]
    fn test_status_passthrough() {
        assert_eq!(
            ResourceError::from_http(response_error(401)).status(),
            Some(401)
        );
        assert_eq!(
            ResourceError::from_http(response_error(404)).status(),
            Some(404)
        );
        let network = ResourceError::from_http(HttpError::Network {
            message: "reset".to_string(),
        });
        assert_eq!(network.status(), None);
    }
}
