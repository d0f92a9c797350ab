//! Update Post Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{PostId, UserId};

use crate::domain::entity::{Post, PostDraft};
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};

/// Update post input
pub struct UpdatePostInput {
    pub post_id: PostId,
    /// Caller, for the audit log only
    pub editor: UserId,
    pub title: String,
    pub content: String,
    pub status: String,
}

/// Update post use case
///
/// Any authenticated user may edit any post.
pub struct UpdatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> UpdatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: UpdatePostInput) -> PostResult<Post> {
        let draft = PostDraft::new(input.title, input.content, &input.status)?;

        let post = self
            .repo
            .update(input.post_id, draft, Utc::now())
            .await?
            .ok_or(PostError::NotFound)?;

        tracing::info!(
            post_id = %post.post_id,
            editor = %input.editor,
            status = %post.status,
            "Post updated"
        );

        Ok(post)
    }
}
