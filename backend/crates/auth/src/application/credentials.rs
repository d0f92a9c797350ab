//! bcrypt off the async executor.

use platform::password::{ClearTextPassword, HashedPassword, PasswordHasher};

use crate::error::{AuthError, AuthResult};

pub(crate) async fn hash_password(
    hasher: PasswordHasher,
    password: ClearTextPassword,
) -> AuthResult<HashedPassword> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(AuthError::from)
}

pub(crate) async fn verify_password(
    hasher: PasswordHasher,
    candidate: ClearTextPassword,
    hashed: HashedPassword,
) -> AuthResult<bool> {
    tokio::task::spawn_blocking(move || hasher.verify(&candidate, &hashed))
        .await
        .map_err(|e| AuthError::Internal(format!("Verification task failed: {e}")))
}
