//! # Commerce API SDK
//!
//! A client-side data-access layer for OpenAPI-described commerce platforms.
//! Instead of hardcoding endpoints, the SDK downloads the platform's
//! dereferenced OpenAPI document, flattens it into an operation index, and
//! resolves resource names and intents to operations by naming convention at
//! call time. Reads are cached and coalesced; writes patch the cache so it
//! stays consistent with the server.
//!
//! ## Getting started
//!
//! ```rust,ignore
//! use commerce_api::{ApiConfig, BaseApiUrl, CommerceClient, Session};
//! use commerce_api::rest::{route_params, ListOptions};
//!
//! let config = ApiConfig::builder()
//!     .base_api_url(BaseApiUrl::new("https://api.example.com")?)
//!     .build()?;
//! let session = Session::from_token(bearer_token)?;
//!
//! let client = CommerceClient::new(config, session);
//! client.load_spec().await?;
//!
//! let products = client.resource("products");
//! let page = products
//!     .list::<Product>(&route_params([]), Some(&ListOptions::new().search("chair")))
//!     .await?;
//! ```
//!
//! ## Design
//!
//! - **No global state.** Configuration, session, index, and cache all hang
//!   off a [`CommerceClient`] instance.
//! - **Capability, not error.** A resource call the connected instance does
//!   not support returns [`rest::ResourceOutcome::Disabled`]; transport
//!   failures return [`rest::ResourceError`].
//! - **Client-side gating only.** [`CommerceClient::has_access`] and
//!   [`CommerceClient::is_resource_admin`] gate UI; the server remains the
//!   authority on every request.

#![warn(missing_docs)]

pub mod auth;
pub mod cache;
mod client;
pub mod clients;
pub mod config;
mod error;
pub mod rest;
pub mod spec;

pub use auth::Session;
pub use client::CommerceClient;
pub use config::{ApiConfig, BaseApiUrl};
pub use error::ConfigError;
