use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

/// Who a request is acting as.
///
/// Decoded from a verified session token by the Auth Gate and attached to
/// that one request. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_on: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}
