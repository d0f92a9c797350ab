//! List Posts Use Case

use std::sync::Arc;

use crate::domain::entity::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::PostStatus;
use crate::error::PostResult;

/// Public listing: published posts only, newest first
pub struct ListPostsUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> ListPostsUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> PostResult<Vec<Post>> {
        self.repo.list_by_status(PostStatus::Posted).await
    }
}
