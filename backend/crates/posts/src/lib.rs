//! Posts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Post entity, status, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Reads are public and only list `posted` posts. Creating, editing and
//! deleting require a session accepted by `auth::AuthGate`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::{Post, PostDraft, PostStatus};
pub use error::{PostError, PostResult};
pub use infra::postgres::PgPostRepository;
pub use presentation::router::posts_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgPostRepository as PostStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
