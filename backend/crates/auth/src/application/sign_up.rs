//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;
use zeroize::Zeroize;

use crate::application::config::AuthConfig;
use crate::application::credentials::hash_password;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub username: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let SignUpInput {
            email,
            password,
            mut confirm_password,
            username,
        } = input;

        let email = Email::new(email)?;
        let username =
            UserName::new(&username).map_err(|e| AuthError::Validation(e.to_string()))?;

        let matches = password == confirm_password;
        confirm_password.zeroize();
        if !matches {
            return Err(AuthError::PasswordMismatch);
        }

        // Blank passwords are rejected by the policy.
        let password = ClearTextPassword::new(password)?;

        // Fast path; the unique index still decides under a race.
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(self.config.password_hasher, password).await?;

        let user = self
            .user_repo
            .create(NewUser::new(username, email, password_hash))
            .await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput {
            user_id: user.user_id,
            username: user.username.into_inner(),
            email: user.email.into_inner(),
        })
    }
}
