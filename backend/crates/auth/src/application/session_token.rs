//! Session Tokens
//!
//! Stateless HS256 JWTs carrying the user's [`Identity`] plus `iat`/`exp`.
//! Nothing is stored server-side: a token is valid until it expires, and
//! logout only asks the browser to forget it.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::{AuthConfig, TokenSecret};
use crate::domain::entity::identity::Identity;

/// Token failures.
///
/// The first three are verification outcomes and all become the same 403
/// at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed")]
    Malformed,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// True for verification failures, false for issuing failures.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TokenError::Signing(_))
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(flatten)]
    identity: Identity,
    iat: i64,
    exp: i64,
}

/// A freshly signed token and the instant it stops being accepted
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Issues and verifies session tokens with one symmetric key.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl SessionTokens {
    pub fn new(secret: &TokenSecret, ttl: TimeDelta) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.token_secret, config.session_ttl)
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Sign a token valid for the configured lifetime.
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(identity, self.ttl)
    }

    /// Sign a token that expires `ttl` from now. A negative `ttl` yields a
    /// token that is already expired.
    pub fn issue_with_ttl(
        &self,
        identity: &Identity,
        ttl: TimeDelta,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + ttl;

        let claims = SessionClaims {
            identity: identity.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check the signature, then `exp > now`, and return the identity.
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)?;

        // The library accepts `exp == now`; a token is dead from `exp` on.
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.identity)
    }
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("algorithm", &"HS256")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    fn tokens(secret: &str) -> SessionTokens {
        SessionTokens::new(&TokenSecret::new(secret).unwrap(), TimeDelta::minutes(30))
    }

    fn identity() -> Identity {
        Identity {
            id: UserId::new(1),
            username: "alice".to_string(),
            email: "a@b.com".to_string(),
            created_on: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            last_login: None,
        }
    }

    #[test]
    fn test_issue_then_verify_returns_identity() {
        let tokens = tokens("test-secret");
        let issued = tokens.issue(&identity()).unwrap();

        assert_eq!(tokens.verify(&issued.token).unwrap(), identity());
    }

    #[test]
    fn test_expiry_is_ttl_from_now() {
        let issued = tokens("test-secret").issue(&identity()).unwrap();
        let remaining = issued.expires_at - Utc::now();

        assert!(remaining <= TimeDelta::minutes(30));
        assert!(remaining > TimeDelta::minutes(29));
    }

    #[test]
    fn test_expired_token() {
        let tokens = tokens("test-secret");
        let issued = tokens
            .issue_with_ttl(&identity(), TimeDelta::seconds(-1))
            .unwrap();

        assert_eq!(tokens.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_expiring_now_is_rejected() {
        let tokens = tokens("test-secret");
        let issued = tokens.issue_with_ttl(&identity(), TimeDelta::zero()).unwrap();

        assert_eq!(tokens.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_foreign_key_is_invalid_signature() {
        let issued = tokens("other-secret").issue(&identity()).unwrap();

        assert_eq!(
            tokens("test-secret").verify(&issued.token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        let tokens = tokens("test-secret");

        for input in ["", "not-a-token", "a.b.c", "invalidated", "ey.ey.ey.ey"] {
            assert_eq!(tokens.verify(input), Err(TokenError::Malformed), "{input}");
        }
    }

    #[test]
    fn test_wrong_claim_shape_is_malformed() {
        #[derive(Serialize)]
        struct Foreign {
            sub: String,
            exp: i64,
        }

        let secret = TokenSecret::new("test-secret").unwrap();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Foreign {
                sub: "1".into(),
                exp: Utc::now().timestamp() + 600,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(
            tokens("test-secret").verify(&token),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_issued_token_debug_is_redacted() {
        let issued = tokens("test-secret").issue(&identity()).unwrap();
        let payload = issued.token.split('.').nth(1).unwrap();

        assert!(!format!("{:?}", issued).contains(payload));
    }
}
