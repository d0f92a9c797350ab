//! Log In Use Case
//!
//! Checks an email/password pair and issues a session token.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::credentials::verify_password;
use crate::application::session_token::{IssuedToken, SessionTokens};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Log in input
pub struct LogInInput {
    pub email: String,
    pub password: String,
}

/// Log in output
#[derive(Debug)]
pub struct LogInOutput {
    pub identity: Identity,
    pub session: IssuedToken,
}

/// Log in use case
pub struct LogInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<SessionTokens>,
    config: Arc<AuthConfig>,
}

impl<U> LogInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<SessionTokens>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    /// Unknown email and wrong password both end in `InvalidCredentials`.
    pub async fn execute(&self, input: LogInInput) -> AuthResult<LogInOutput> {
        let candidate = ClearTextPassword::candidate(input.password);

        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_valid = verify_password(
            self.config.password_hasher,
            candidate,
            user.password_hash.clone(),
        )
        .await?;

        if !password_valid {
            tracing::debug!(user_id = %user.user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        if let Err(e) = self.user_repo.update_last_login(user.user_id, now).await {
            tracing::warn!(user_id = %user.user_id, error = %e, "Failed to record last login");
        }
        user.record_login(now);

        let identity = user.identity();
        let session = self.tokens.issue(&identity)?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at = %session.expires_at,
            "User logged in"
        );

        Ok(LogInOutput { identity, session })
    }
}
