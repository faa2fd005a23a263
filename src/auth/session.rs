//! Session management for authenticated API calls.
//!
//! A [`Session`] pairs a raw bearer token with its decoded claims. The token
//! string is what the HTTP client sends; the claims feed client-side access
//! gating. Sessions are immutable after creation; token refresh is an
//! external concern and produces a new `Session`.

use crate::auth::claims::{AuthError, TokenClaims};

/// An authenticated session against a commerce platform instance.
///
/// # Example
///
/// ```rust,ignore
/// use commerce_api::Session;
///
/// let session = Session::from_token(bearer_token)?;
/// if session.is_anonymous() {
///     // prompt login before exposing admin surfaces
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    access_token: String,
    claims: TokenClaims,
}

impl Session {
    /// Creates a session by decoding the given bearer token's claims.
    ///
    /// The signature is not verified; the server validates every request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token cannot be decoded.
    pub fn from_token(token: impl Into<String>) -> Result<Self, AuthError> {
        let access_token = token.into();
        let claims = TokenClaims::parse(&access_token)?;
        Ok(Self {
            access_token,
            claims,
        })
    }

    /// Returns the raw bearer token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the decoded token claims.
    #[must_use]
    pub const fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    /// Returns the caller's roles, if the token carries any.
    #[must_use]
    pub fn roles(&self) -> Option<Vec<String>> {
        self.claims.roles()
    }

    /// Returns true for anonymous shopper tokens.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.claims.is_anonymous()
    }

    /// Returns true when the token has expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.claims.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn make_token(claims: &serde_json::Value) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_session_keeps_raw_token() {
        let token = make_token(&json!({ "role": "Shopper" }));
        let session = Session::from_token(token.clone()).unwrap();
        assert_eq!(session.access_token(), token);
    }

    #[test]
    fn test_session_exposes_roles() {
        let token = make_token(&json!({ "role": ["BuyerAdmin", "OrderAdmin"] }));
        let session = Session::from_token(token).unwrap();
        assert_eq!(
            session.roles(),
            Some(vec!["BuyerAdmin".to_string(), "OrderAdmin".to_string()])
        );
    }

    #[test]
    fn test_session_rejects_invalid_token() {
        assert!(Session::from_token("garbage").is_err());
    }
}
