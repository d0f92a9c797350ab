//! Repository Traits

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::entity::{Post, PostDraft};
use crate::domain::value_object::PostStatus;
use crate::error::PostResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// All posts with the given status, newest first
    async fn list_by_status(&self, status: PostStatus) -> PostResult<Vec<Post>>;

    async fn find_by_id(&self, post_id: PostId) -> PostResult<Option<Post>>;

    /// Insert and return the stored post
    async fn create(
        &self,
        user_id: UserId,
        draft: PostDraft,
        create_time: DateTime<Utc>,
    ) -> PostResult<Post>;

    /// Overwrite title, content and status. `None` when no row matched.
    async fn update(
        &self,
        post_id: PostId,
        draft: PostDraft,
        update_time: DateTime<Utc>,
    ) -> PostResult<Option<Post>>;

    /// `false` when no row matched
    async fn delete(&self, post_id: PostId) -> PostResult<bool>;
}
