//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let user_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, password, email, created_on)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.email.as_str())
        .bind(user.created_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::EmailTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        Ok(user.into_user(UserId::new(user_id)))
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password,
                email,
                created_on,
                last_login
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_last_login(&self, user_id: UserId, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(user_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION))
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password: String,
    email: String,
    created_on: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::new(self.id),
            username: UserName::from_db(self.username),
            email: Email::from_db(self.email),
            password_hash: HashedPassword::from_db(self.password),
            created_on: self.created_on,
            last_login: self.last_login,
        }
    }
}
