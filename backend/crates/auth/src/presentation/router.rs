//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGate, require_session};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let gate = AuthGate::new(config.clone());

    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        tokens: gate.tokens(),
    };

    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(gate, require_session))
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::log_in::<R>))
        .route("/logout", post(handlers::log_out::<R>))
        .with_state(state)
}
