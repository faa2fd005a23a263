//! HTTP transport for the platform API.
//!
//! This module provides the authenticated [`HttpClient`], the
//! [`HttpRequest`]/[`HttpResponse`] types, and HTTP error types. The
//! transport is deliberately thin: URL routing, query serialization, and
//! cache behavior live in the [`rest`](crate::rest) and
//! [`cache`](crate::cache) modules.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{
    HttpError, HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};
pub use http_client::{HttpClient, RETRY_WAIT_TIME, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, DEFAULT_TRIES};
pub use http_response::HttpResponse;
