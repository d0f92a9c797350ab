//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return it with its assigned id.
    ///
    /// Fails with `AuthError::EmailTaken` when the email is already stored.
    async fn create(&self, user: NewUser) -> AuthResult<User>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Set `last_login`
    async fn update_last_login(&self, user_id: UserId, at: DateTime<Utc>) -> AuthResult<()>;
}
