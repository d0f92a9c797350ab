//! User Entity
//!
//! A registered account as stored in the `users` table.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::{email::Email, user_name::UserName};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Serial primary key
    pub user_id: UserId,
    /// Display name
    pub username: UserName,
    /// Login identifier (unique)
    pub email: Email,
    /// bcrypt hash, never serialized to clients
    pub password_hash: HashedPassword,
    pub created_on: DateTime<Utc>,
    /// Last successful login time
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Record successful login
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login = Some(at);
    }

    /// The claims carried by a session token for this user
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.user_id,
            username: self.username.to_string(),
            email: self.email.to_string(),
            created_on: self.created_on,
            last_login: self.last_login,
        }
    }
}

/// A user that has not been inserted yet; the database assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: UserName,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub created_on: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: UserName, email: Email, password_hash: HashedPassword) -> Self {
        Self {
            username,
            email,
            password_hash,
            created_on: Utc::now(),
        }
    }

    /// Attach the assigned id
    pub fn into_user(self, user_id: UserId) -> User {
        User {
            user_id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_on: self.created_on,
            last_login: None,
        }
    }
}
