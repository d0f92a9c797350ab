//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Post;
use crate::domain::value_object::PostStatus;

/// Body of `POST /posts` and `PUT /posts/{id}`
///
/// A `userId` in the body is ignored; the author is the session's user.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: String,
}

/// Post as returned by every posts endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub create_time: DateTime<Utc>,
    pub update_time: Option<DateTime<Utc>>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.post_id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            status: post.status,
            create_time: post.create_time,
            update_time: post.update_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ignores_user_id() {
        let req: PostRequest = serde_json::from_str(
            r#"{"title":"t","content":"c","status":"posted","userId":99}"#,
        )
        .unwrap();
        assert_eq!(req.title, "t");
        assert_eq!(req.status, "posted");
    }

    #[test]
    fn test_request_missing_fields_default_empty() {
        let req: PostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_empty() && req.content.is_empty() && req.status.is_empty());
    }

    #[test]
    fn test_response_shape() {
        let post = Post {
            post_id: PostId::new(3),
            user_id: UserId::new(1),
            title: "Hello".into(),
            content: "World".into(),
            status: PostStatus::Posted,
            create_time: Utc::now(),
            update_time: None,
        };

        let json = serde_json::to_value(PostResponse::from(post)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["userId"], 1);
        assert_eq!(json["status"], "posted");
        assert!(json["createTime"].is_string());
        assert!(json["updateTime"].is_null());
    }
}
