//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{Post, PostDraft};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::PostStatus;
use crate::error::{PostError, PostResult};

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PostRepository for PgPostRepository {
    async fn list_by_status(&self, status: PostStatus) -> PostResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, status, create_time, update_time
            FROM posts
            WHERE status = $1
            ORDER BY create_time DESC, id DESC
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PostRow::into_post).collect()
    }

    async fn find_by_id(&self, post_id: PostId) -> PostResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, status, create_time, update_time
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PostRow::into_post).transpose()
    }

    async fn create(
        &self,
        user_id: UserId,
        draft: PostDraft,
        create_time: DateTime<Utc>,
    ) -> PostResult<Post> {
        let post_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO posts (user_id, title, content, status, create_time)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id.get())
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(draft.status.as_str())
        .bind(create_time)
        .fetch_one(&self.pool)
        .await?;

        Ok(draft.into_post(PostId::new(post_id), user_id, create_time))
    }

    async fn update(
        &self,
        post_id: PostId,
        draft: PostDraft,
        update_time: DateTime<Utc>,
    ) -> PostResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $1, content = $2, status = $3, update_time = $4
            WHERE id = $5
            RETURNING id, user_id, title, content, status, create_time, update_time
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(draft.status.as_str())
        .bind(update_time)
        .bind(post_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PostRow::into_post).transpose()
    }

    async fn delete(&self, post_id: PostId) -> PostResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i32,
    user_id: i32,
    title: String,
    content: String,
    status: String,
    create_time: DateTime<Utc>,
    update_time: Option<DateTime<Utc>>,
}

impl PostRow {
    fn into_post(self) -> PostResult<Post> {
        // A status outside the enum means the table was written by something else.
        let status = self.status.parse::<PostStatus>().map_err(|_| {
            PostError::Internal(format!(
                "post {} has unknown status '{}'",
                self.id, self.status
            ))
        })?;

        Ok(Post {
            post_id: PostId::new(self.id),
            user_id: UserId::new(self.user_id),
            title: self.title,
            content: self.content,
            status,
            create_time: self.create_time,
            update_time: self.update_time,
        })
    }
}
