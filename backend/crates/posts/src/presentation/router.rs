//! Posts Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use auth::{AuthGate, require_session};

use crate::domain::repository::PostRepository;
use crate::infra::postgres::PgPostRepository;
use crate::presentation::handlers::{self, PostsAppState};

/// Create the Posts router with PostgreSQL repository
pub fn posts_router(repo: PgPostRepository, gate: AuthGate) -> Router {
    posts_router_generic(repo, gate)
}

/// Create a generic Posts router for any repository implementation
///
/// Reads are public. Writes sit behind the Auth Gate.
pub fn posts_router_generic<R>(repo: R, gate: AuthGate) -> Router
where
    R: PostRepository + Clone + Send + Sync + 'static,
{
    let state = PostsAppState {
        repo: Arc::new(repo),
    };

    let protected = Router::new()
        .route("/posts", post(handlers::create_post::<R>))
        .route(
            "/posts/{id}",
            put(handlers::update_post::<R>).delete(handlers::delete_post::<R>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_session));

    let public = Router::new()
        .route("/posts", get(handlers::list_posts::<R>))
        .route("/posts/{id}", get(handlers::get_post::<R>));

    public.merge(protected).with_state(state)
}
