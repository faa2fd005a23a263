//! HTTP response types.

use std::collections::HashMap;

/// A parsed HTTP response from the platform API.
///
/// The body is retained as raw JSON; typed deserialization happens at the
/// resource layer where the expected shape is known.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keys lowercased.
    pub headers: HashMap<String, String>,
    /// The response body parsed as JSON (empty object for empty bodies).
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, String>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns true for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the request ID from the `x-request-id` header, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers.get("x-request-id").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_ok_for_2xx() {
        for code in [200, 201, 204, 299] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(response.is_ok(), "{code} should be ok");
        }
    }

    #[test]
    fn test_is_not_ok_for_errors() {
        for code in [301, 400, 401, 403, 404, 500] {
            let response = HttpResponse::new(code, HashMap::new(), json!({}));
            assert!(!response.is_ok(), "{code} should not be ok");
        }
    }

    #[test]
    fn test_request_id_extraction() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), "req-42".to_string());

        let response = HttpResponse::new(200, headers, json!({}));
        assert_eq!(response.request_id(), Some("req-42"));

        let response = HttpResponse::new(200, HashMap::new(), json!({}));
        assert_eq!(response.request_id(), None);
    }
}
