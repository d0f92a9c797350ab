//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at start-up and
//! shared behind an `Arc`.

use std::fmt;

use chrono::TimeDelta;
use platform::cookie::CookieConfig;
use platform::password::PasswordHasher;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session token lifetime in minutes
pub const SESSION_TTL_MINUTES: i64 = 30;

/// Cookie name used when none is configured
pub const DEFAULT_COOKIE_NAME: &str = "auth_session";

/// Value written over the session cookie on logout
pub const LOGGED_OUT_COOKIE_VALUE: &str = "invalidated";

/// Configuration errors, reported before the server starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("JWT signing secret must be set and non-empty")]
    MissingSecret,

    #[error("Session cookie name must not be empty")]
    EmptyCookieName,

    #[error("Invalid bcrypt cost: {0}")]
    InvalidBcryptCost(u32),
}

/// HMAC signing key, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        Ok(Self(secret.into_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret([REDACTED])")
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie attributes (name, Secure, SameSite, Path)
    pub cookie: CookieConfig,
    /// HS256 signing key
    pub token_secret: TokenSecret,
    /// Session token lifetime
    pub session_ttl: TimeDelta,
    /// Credential hasher (bcrypt cost)
    pub password_hasher: PasswordHasher,
}

impl AuthConfig {
    /// Validate the two required inputs.
    ///
    /// The cookie defaults to `HttpOnly; Secure; SameSite=Lax; Path=/`.
    pub fn new(
        secret: impl Into<String>,
        cookie_name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let token_secret = TokenSecret::new(secret)?;

        let cookie_name = cookie_name.into();
        if cookie_name.trim().is_empty() {
            return Err(ConfigError::EmptyCookieName);
        }

        Ok(Self {
            cookie: CookieConfig::new(cookie_name),
            token_secret,
            session_ttl: TimeDelta::minutes(SESSION_TTL_MINUTES),
            password_hasher: PasswordHasher::default(),
        })
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie.secure = secure;
        self
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.cookie.same_site = same_site;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Result<Self, ConfigError> {
        self.password_hasher =
            PasswordHasher::new(cost).map_err(|_| ConfigError::InvalidBcryptCost(cost))?;
        Ok(self)
    }

    /// Session cookie name
    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }
}
