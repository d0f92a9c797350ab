//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::{TimeDelta, Utc};
use std::sync::Arc;

use crate::application::config::{AuthConfig, LOGGED_OUT_COOKIE_VALUE};
use crate::application::{LogInInput, LogInUseCase, SessionTokens, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{LogInRequest, LogInResponse, SignUpRequest, SignUpResponse};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<SessionTokens>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<SignUpResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(req.into()).await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

// ============================================================================
// Log In
// ============================================================================

/// POST /login
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LogInRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = LogInUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LogInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .cookie
        .build_set_cookie(&output.session.token, output.session.expires_at);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LogInResponse::from(output.identity)),
    ))
}

// ============================================================================
// Log Out
// ============================================================================

/// POST /logout
///
/// Overwrites the cookie with an expired sentinel. The token itself stays
/// valid until `exp`.
pub async fn log_out<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = state
        .config
        .cookie
        .build_expired_cookie(LOGGED_OUT_COOKIE_VALUE, Utc::now() - TimeDelta::days(7));

    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)])
}

// ============================================================================
// Current User
// ============================================================================

/// GET /me
pub async fn me(CurrentUser(identity): CurrentUser) -> Json<LogInResponse> {
    Json(identity.into())
}
