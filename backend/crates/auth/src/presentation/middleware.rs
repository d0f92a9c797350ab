//! Auth Middleware
//!
//! The Auth Gate: reads the session cookie, verifies the token and attaches
//! the caller's [`Identity`] to the request. Every failure is the same 403.

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokens;
use crate::domain::entity::identity::Identity;
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Debug, Clone)]
pub struct AuthGate {
    config: Arc<AuthConfig>,
    tokens: Arc<SessionTokens>,
}

impl AuthGate {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let tokens = Arc::new(SessionTokens::from_config(&config));
        Self { config, tokens }
    }

    pub fn tokens(&self) -> Arc<SessionTokens> {
        self.tokens.clone()
    }

    /// Resolve the identity behind the session cookie, if any.
    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<Identity> {
        let token = platform::cookie::extract_cookie(headers, self.config.cookie_name())
            .ok_or(AuthError::SessionRejected)?;

        Ok(self.tokens.verify(&token)?)
    }
}

/// Middleware that requires a valid session
///
/// Apply with `axum::middleware::from_fn_with_state(gate, require_session)`.
pub async fn require_session(
    State(gate): State<AuthGate>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let identity = gate
        .authenticate(req.headers())
        .map_err(IntoResponse::into_response)?;

    tracing::debug!(user_id = %identity.id, "Session accepted");

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// The identity attached by [`require_session`]
///
/// Rejects with the gate's 403 when used on a route the gate does not cover.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::SessionRejected)
    }
}
