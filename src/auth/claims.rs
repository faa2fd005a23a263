//! Bearer token claim decoding.
//!
//! The platform issues opaque JWT bearer tokens. This module reads the claims
//! the SDK cares about (roles, anonymous-order marker, expiry) without
//! verifying the signature: the server remains the authority on every request,
//! and the decoded claims are used only for client-side UI gating.

use chrono::{TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when decoding a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token is not a structurally valid JWT.
    #[error("invalid bearer token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// The `role` claim, which the platform encodes as either a single string
/// or an array of strings depending on how many roles the caller holds.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoleClaim {
    /// A single assigned role.
    One(String),
    /// Multiple assigned roles.
    Many(Vec<String>),
}

impl RoleClaim {
    /// Returns the claim as a uniform list of role names.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(role) => vec![role.clone()],
            Self::Many(roles) => roles.clone(),
        }
    }
}

/// Claims decoded from a platform bearer token.
///
/// Only the claims consumed by this SDK are modeled; unknown claims are
/// ignored during deserialization.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenClaims {
    /// Assigned security roles (string or string array).
    #[serde(default)]
    pub role: Option<RoleClaim>,
    /// Username, absent for anonymous shopper tokens.
    #[serde(default)]
    pub usr: Option<String>,
    /// Anonymous-order identifier; presence marks an anonymous token.
    #[serde(default)]
    pub orderid: Option<String>,
    /// Expiry as a unix timestamp.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issuer.
    #[serde(default)]
    pub iss: Option<String>,
}

impl TokenClaims {
    /// Decodes claims from a bearer token without verifying its signature.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is not a decodable JWT.
    pub fn parse(token: &str) -> Result<Self, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<Self>(token, &DecodingKey::from_secret(b""), &validation)?;
        Ok(data.claims)
    }

    /// Returns the caller's roles as a list, if the token carries any.
    #[must_use]
    pub fn roles(&self) -> Option<Vec<String>> {
        self.role.as_ref().map(RoleClaim::to_vec)
    }

    /// Returns true when the token belongs to an anonymous shopper.
    ///
    /// Anonymous tokens carry an `orderid` claim tying them to an
    /// unauthenticated order.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.orderid.is_some()
    }

    /// Returns true when the token's `exp` claim is in the past.
    ///
    /// Tokens without an `exp` claim are treated as unexpired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.exp
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
            .is_some_and(|expiry| expiry <= Utc::now())
    }
}
