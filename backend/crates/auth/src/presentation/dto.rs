//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::{SignUpInput, SignUpOutput};
use crate::domain::entity::identity::Identity;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
///
/// Missing fields deserialize as empty and fail validation with a field name.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub username: String,
}

impl From<SignUpRequest> for SignUpInput {
    fn from(req: SignUpRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            username: req.username,
        }
    }
}

/// Sign up response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl From<SignUpOutput> for SignUpResponse {
    fn from(output: SignUpOutput) -> Self {
        Self {
            id: output.user_id,
            username: output.username,
            email: output.email,
        }
    }
}

// ============================================================================
// Log In
// ============================================================================

/// Log in request
#[derive(Deserialize)]
pub struct LogInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Log in response, also returned by `GET /me`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInResponse {
    pub id: UserId,
    #[serde(rename = "user")]
    pub username: String,
    pub email: String,
    pub created_on: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<Identity> for LogInResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            email: identity.email,
            created_on: identity.created_on,
            last_login: identity.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_in_response_field_names() {
        let response = LogInResponse {
            id: UserId::new(1),
            username: "alice".into(),
            email: "a@b.com".into(),
            created_on: DateTime::from_timestamp(0, 0).unwrap(),
            last_login: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["user"], "alice");
        assert!(json.get("createdOn").is_some());
        assert!(json["lastLogin"].is_null());
    }

    #[test]
    fn test_sign_up_request_reads_confirm_password() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"secret123","confirmPassword":"secret123","username":"a"}"#,
        )
        .unwrap();
        assert_eq!(req.confirm_password, "secret123");

        let empty: SignUpRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.email.is_empty());
    }
}
