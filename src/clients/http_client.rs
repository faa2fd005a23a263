//! HTTP client for platform API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests with automatic retry handling.

use std::collections::HashMap;

use crate::auth::Session;
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ApiConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the platform API.
///
/// The client handles:
/// - Base URL construction from the configured base API URL
/// - Default headers including User-Agent and the bearer token
/// - Retry logic: 401/403 responses are terminal, anything else failing is
///   retried up to the request's `tries` cap with a fixed wait
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use commerce_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let client = HttpClient::new(&config, &session);
/// let request = HttpRequest::builder(HttpMethod::Get, "/products").build()?;
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Versioned base URL (e.g. `https://api.example.com/v1`).
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration and session.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: &ApiConfig, session: &Session) -> Self {
        let base_url = config.api_url();

        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Commerce API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        if !session.access_token().is_empty() {
            default_headers.insert(
                "Authorization".to_string(),
                format!("Bearer {}", session.access_token()),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            default_headers,
        }
    }

    /// Returns the versioned base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the platform API.
    ///
    /// Handles request validation, URL construction, header merging, response
    /// parsing, and the retry loop.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error occurs (`Network`)
    /// - A 401/403 or other non-retryable response is received (`Response`)
    /// - The retry cap is exhausted (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}", self.base_url, request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Put => self.client.put(&url),
                HttpMethod::Patch => self.client.patch(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            // Network-level failures carry no status and retry like any
            // other non-terminal failure.
            let res = match req_builder.send().await {
                Ok(res) => res,
                Err(err) => {
                    if tries >= request.tries {
                        tracing::warn!(
                            path = %request.path,
                            tries,
                            error = %err,
                            "network error after exhausting retries"
                        );
                        return Err(HttpError::from(err));
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(RETRY_WAIT_TIME)).await;
                    continue;
                }
            };

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = response.body.to_string();

            // 401/403 are handled by an external session-recovery flow and
            // must never be retried here.
            let terminal = code == 401 || code == 403;
            if terminal || tries >= request.tries {
                if terminal || request.tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_reference: response.request_id().map(String::from),
                    }));
                }
                tracing::warn!(
                    path = %request.path,
                    code,
                    tries,
                    "request failed after exhausting retries"
                );
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            tokio::time::sleep(std::time::Duration::from_secs(RETRY_WAIT_TIME)).await;
        }
    }

    /// Parses response headers into a lowercased-key map.
    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut result = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.insert(key, value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseApiUrl;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn create_test_session() -> Session {
        let token = encode(
            &Header::default(),
            &json!({ "role": "Shopper" }),
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        Session::from_token(token).unwrap()
    }

    fn create_test_config() -> ApiConfig {
        ApiConfig::builder()
            .base_api_url(BaseApiUrl::new("https://api.example.com").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction_sets_base_url() {
        let client = HttpClient::new(&create_test_config(), &create_test_session());
        assert_eq!(client.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn test_bearer_token_header_injection() {
        let session = create_test_session();
        let client = HttpClient::new(&create_test_config(), &session);

        assert_eq!(
            client.default_headers().get("Authorization"),
            Some(&format!("Bearer {}", session.access_token()))
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&create_test_config(), &create_test_session());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("Commerce API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ApiConfig::builder()
            .base_api_url(BaseApiUrl::new("https://api.example.com").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, &create_test_session());

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&create_test_config(), &create_test_session());
        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[tokio::test]
    async fn test_network_errors_retry_to_cap() {
        use crate::clients::http_request::DEFAULT_TRIES;
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        // Accept connections and immediately drop them so every attempt
        // fails at the transport level, counting attempts as we go.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                drop(stream);
            }
        });

        let config = ApiConfig::builder()
            .base_api_url(BaseApiUrl::new(format!("http://{addr}")).unwrap())
            .build()
            .unwrap();
        let client = HttpClient::new(&config, &create_test_session());
        let request = HttpRequest::builder(HttpMethod::Get, "/products")
            .build()
            .unwrap();

        let result = client.request(request).await;
        assert!(matches!(result, Err(HttpError::Network { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), DEFAULT_TRIES);
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
