//! Post Entities

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};
use kernel::validate;

use crate::domain::value_object::PostStatus;
use crate::error::PostResult;

/// Maximum title length in characters
pub const TITLE_MAX_LENGTH: usize = 200;

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: PostId,
    /// Author
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub create_time: DateTime<Utc>,
    /// Unset until the first edit
    pub update_time: Option<DateTime<Utc>>,
}

/// The editable part of a post, validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub status: PostStatus,
}

impl PostDraft {
    /// - `title`: required, at most [`TITLE_MAX_LENGTH`] characters
    /// - `content`: required
    /// - `status`: `posted` or `hidden`
    pub fn new(title: String, content: String, status: &str) -> PostResult<Self> {
        validate::required("title", &title)?;
        validate::max_chars("title", title.trim(), TITLE_MAX_LENGTH)?;
        validate::required("content", &content)?;
        let status = status.parse()?;

        Ok(Self {
            title: title.trim().to_string(),
            content,
            status,
        })
    }

    pub fn into_post(self, post_id: PostId, user_id: UserId, create_time: DateTime<Utc>) -> Post {
        Post {
            post_id,
            user_id,
            title: self.title,
            content: self.content,
            status: self.status,
            create_time,
            update_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PostError;

    #[test]
    fn test_valid_draft() {
        let draft = PostDraft::new("  Hello ".into(), "World".into(), "posted").unwrap();
        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.status, PostStatus::Posted);
    }

    #[test]
    fn test_required_fields() {
        for (title, content, status, message) in [
            ("", "body", "posted", "title is required"),
            ("Title", "  ", "posted", "content is required"),
            ("Title", "body", "", "status is required"),
        ] {
            let err = PostDraft::new(title.into(), content.into(), status).unwrap_err();
            assert!(matches!(err, PostError::Validation(ref m) if m == message), "{err}");
        }
    }

    #[test]
    fn test_title_length() {
        let long = "t".repeat(TITLE_MAX_LENGTH + 1);
        assert!(PostDraft::new(long, "body".into(), "posted").is_err());

        let exact = "t".repeat(TITLE_MAX_LENGTH);
        assert!(PostDraft::new(exact, "body".into(), "posted").is_ok());
    }

    #[test]
    fn test_invalid_status() {
        assert!(PostDraft::new("Title".into(), "body".into(), "draft").is_err());
    }
}
