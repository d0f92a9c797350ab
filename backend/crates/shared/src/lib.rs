//! Shared Kernel - Domain-crossing minimal core
//!
//! The vocabulary every feature crate agrees on:
//! - Common error types and result aliases
//! - Typed integer IDs for users and posts
//! - Field validation rules shared by request payloads
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod validate;
