//! Create Post Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::entity::{Post, PostDraft};
use crate::domain::repository::PostRepository;
use crate::error::PostResult;

/// Create post input
pub struct CreatePostInput {
    /// Always the authenticated caller
    pub author: UserId,
    pub title: String,
    pub content: String,
    pub status: String,
}

/// Create post use case
pub struct CreatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreatePostInput) -> PostResult<Post> {
        let draft = PostDraft::new(input.title, input.content, &input.status)?;

        let post = self.repo.create(input.author, draft, Utc::now()).await?;

        tracing::info!(
            post_id = %post.post_id,
            user_id = %post.user_id,
            status = %post.status,
            "Post created"
        );

        Ok(post)
    }
}
