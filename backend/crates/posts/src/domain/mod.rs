//! Domain Layer
//!
//! Post entity, status, and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Post, PostDraft};
pub use repository::PostRepository;
pub use value_object::PostStatus;
