//! Post Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PostError;

/// Visibility of a post. Only `Posted` posts are listed publicly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Posted,
    Hidden,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Posted => "posted",
            PostStatus::Hidden => "hidden",
        }
    }
}

impl FromStr for PostStatus {
    type Err = PostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posted" => Ok(PostStatus::Posted),
            "hidden" => Ok(PostStatus::Hidden),
            "" => Err(PostError::Validation("status is required".to_string())),
            other => Err(PostError::Validation(format!(
                "status must be 'posted' or 'hidden' (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
