//! Authentication support: token claims, sessions, and access evaluation.
//!
//! Token acquisition and refresh are external collaborators; this module only
//! consumes a valid bearer token. It provides:
//!
//! - [`TokenClaims`]: decoded claims from an opaque bearer token
//! - [`Session`]: a token paired with its claims, passed to the HTTP client
//! - [`is_allowed_access`] / [`is_resource_admin`]: pure access-gating rules

mod access;
mod claims;
mod session;

pub use access::{is_allowed_access, is_resource_admin, AccessQualifier, FULL_ACCESS_ROLE};
pub use claims::{AuthError, RoleClaim, TokenClaims};
pub use session::Session;
