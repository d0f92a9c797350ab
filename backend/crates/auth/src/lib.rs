//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Signup with email + password, login by email
//! - Stateless session tokens (HS256 JWT, 30 minutes) in an HttpOnly cookie
//! - Auth Gate middleware exposing the caller's identity to handlers
//!
//! ## Security Model
//! - Passwords hashed with bcrypt, never truncated
//! - Unknown email and wrong password are indistinguishable (401)
//! - Missing, forged and expired sessions are indistinguishable (403)
//! - No server-side revocation: logout only clears the cookie

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::identity::Identity;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{AuthGate, CurrentUser, require_session};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::identity::Identity;
    pub use crate::domain::entity::user::{NewUser, User};
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgUserRepository as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
