//! HTTP-level tests: the real router over an in-memory user store.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::UserId;
use platform::password::{ClearTextPassword, MAX_PASSWORD_BYTES, PasswordHasher};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::SessionTokens;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult, INVALID_BODY_DETAIL};
use crate::presentation::router::auth_router_generic;

const COOKIE_NAME: &str = "test_session";
const SECRET: &str = "test-signing-secret";

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryUsers {
    users: Arc<Mutex<Vec<User>>>,
    fail_last_login: bool,
}

impl MemoryUsers {
    fn get(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }
}

impl UserRepository for MemoryUsers {
    async fn create(&self, user: NewUser) -> AuthResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        let user = user.into_user(UserId::new(users.len() as i32 + 1));
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.get(email.as_str()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.get(email.as_str()).is_some())
    }

    async fn update_last_login(&self, user_id: UserId, at: DateTime<Utc>) -> AuthResult<()> {
        if self.fail_last_login {
            return Err(AuthError::Internal("connection reset".into()));
        }
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.user_id == user_id) {
            user.record_login(at);
        }
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn config() -> Arc<AuthConfig> {
    Arc::new(
        AuthConfig::new(SECRET, COOKIE_NAME)
            .unwrap()
            .with_cookie_secure(false)
            .with_bcrypt_cost(4)
            .unwrap(),
    )
}

fn app(repo: MemoryUsers) -> Router {
    auth_router_generic(repo, config())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

/// `name=value` from a Set-Cookie header
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().to_string()
}

fn sign_up_body() -> Value {
    json!({
        "email": "a@b.com",
        "password": "secret123",
        "confirmPassword": "secret123",
        "username": "alice",
    })
}

async fn signed_up(repo: &MemoryUsers) {
    let response = app(repo.clone())
        .oneshot(post_json("/signup", sign_up_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn logged_in_cookie(repo: &MemoryUsers) -> String {
    let response = app(repo.clone())
        .oneshot(post_json(
            "/login",
            json!({"email": "a@b.com", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    cookie_pair(&set_cookie(&response).unwrap())
}

// ============================================================================
// Sign Up
// ============================================================================

#[tokio::test]
async fn test_sign_up_stores_verifiable_hash() {
    let repo = MemoryUsers::default();

    let response = app(repo.clone())
        .oneshot(post_json("/signup", sign_up_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@b.com");
    assert!(body.get("password").is_none());

    let stored = repo.get("a@b.com").unwrap();
    let hasher = PasswordHasher::new(4).unwrap();
    assert!(hasher.verify(
        &ClearTextPassword::candidate("secret123".into()),
        &stored.password_hash
    ));
    assert!(!hasher.verify(
        &ClearTextPassword::candidate("wrong".into()),
        &stored.password_hash
    ));
}

#[tokio::test]
async fn test_sign_up_duplicate_email_conflicts() {
    let repo = MemoryUsers::default();
    signed_up(&repo).await;

    let mut body = sign_up_body();
    body["email"] = json!("A@B.com");

    let response = app(repo).oneshot(post_json("/signup", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sign_up_validation() {
    let cases = [
        ("email", json!("")),
        ("email", json!("not-an-email")),
        ("username", json!("   ")),
        ("confirmPassword", json!("different123")),
        ("password", json!("short")),
    ];

    for (field, value) in cases {
        let mut body = sign_up_body();
        body[field] = value.clone();
        if field == "password" {
            body["confirmPassword"] = value;
        }

        let response = app(MemoryUsers::default())
            .oneshot(post_json("/signup", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field}");
    }
}

#[tokio::test]
async fn test_sign_up_rejects_invalid_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app(MemoryUsers::default()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_up_blank_password_reports_policy() {
    let mut body = sign_up_body();
    body["password"] = json!("   ");
    body["confirmPassword"] = json!("   ");

    let response = app(MemoryUsers::default())
        .oneshot(post_json("/signup", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["detail"],
        "Password cannot be empty or contain only whitespace"
    );
}

#[tokio::test]
async fn test_sign_up_password_byte_limit() {
    let repo = MemoryUsers::default();

    let longest = "p".repeat(MAX_PASSWORD_BYTES);
    let mut body = sign_up_body();
    body["password"] = json!(longest);
    body["confirmPassword"] = json!(longest);

    let response = app(repo.clone())
        .oneshot(post_json("/signup", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app(repo)
        .oneshot(post_json(
            "/login",
            json!({"email": "a@b.com", "password": longest}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let over = "p".repeat(MAX_PASSWORD_BYTES + 1);
    let mut body = sign_up_body();
    body["email"] = json!("c@d.com");
    body["password"] = json!(over);
    body["confirmPassword"] = json!(over);

    let response = app(MemoryUsers::default())
        .oneshot(post_json("/signup", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["detail"],
        format!(
            "Password must be at most {} bytes (got {})",
            MAX_PASSWORD_BYTES,
            MAX_PASSWORD_BYTES + 1
        )
    );
}

#[tokio::test]
async fn test_body_errors_do_not_echo_values() {
    for uri in ["/signup", "/login"] {
        let response = app(MemoryUsers::default())
            .oneshot(post_json(
                uri,
                json!({"email": "a@b.com", "password": 12345678, "confirmPassword": "x"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body = json_body(response).await;
        assert_eq!(body["detail"], INVALID_BODY_DETAIL);
        assert!(!body.to_string().contains("12345678"));
    }
}

// ============================================================================
// Log In
// ============================================================================

#[tokio::test]
async fn test_log_in_sets_verifiable_cookie() {
    let repo = MemoryUsers::default();
    signed_up(&repo).await;

    let response = app(repo.clone())
        .oneshot(post_json(
            "/login",
            json!({"email": "a@b.com", "password": "secret123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = set_cookie(&response).unwrap();
    assert!(set_cookie.starts_with(&format!("{COOKIE_NAME}=")));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Expires="));

    let token = cookie_pair(&set_cookie)
        .split_once('=')
        .unwrap()
        .1
        .to_string();
    let identity = SessionTokens::from_config(&config()).verify(&token).unwrap();
    assert_eq!(identity.id, UserId::new(1));
    assert_eq!(identity.username, "alice");
    assert_eq!(identity.email, "a@b.com");

    let body = json_body(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["user"], "alice");
    assert_eq!(body["email"], "a@b.com");
    assert!(!body["lastLogin"].is_null());

    assert!(repo.get("a@b.com").unwrap().last_login.is_some());
}

#[tokio::test]
async fn test_log_in_wrong_password_is_unauthorized_without_cookie() {
    let repo = MemoryUsers::default();
    signed_up(&repo).await;

    let response = app(repo)
        .oneshot(post_json(
            "/login",
            json!({"email": "a@b.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).is_none());
}

#[tokio::test]
async fn test_log_in_unknown_email_matches_wrong_password() {
    let repo = MemoryUsers::default();
    signed_up(&repo).await;

    let unknown = app(repo.clone())
        .oneshot(post_json(
            "/login",
            json!({"email": "nobody@b.com", "password": "secret123"}),
        ))
        .await
        .unwrap();
    let wrong = app(repo)
        .oneshot(post_json(
            "/login",
            json!({"email": "a@b.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(unknown).await, json_body(wrong).await);
}

#[tokio::test]
async fn test_log_in_survives_last_login_failure() {
    let repo = MemoryUsers {
        fail_last_login: true,
        ..MemoryUsers::default()
    };
    signed_up(&repo).await;

    let cookie = logged_in_cookie(&repo).await;
    assert!(cookie.starts_with(COOKIE_NAME));
    assert!(repo.get("a@b.com").unwrap().last_login.is_none());
}

// ============================================================================
// Log Out
// ============================================================================

#[tokio::test]
async fn test_log_out_expires_cookie() {
    let response = app(MemoryUsers::default())
        .oneshot(post_json("/logout", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with(&format!("{COOKIE_NAME}=invalidated")));
    assert!(cookie.contains("Max-Age=0"));
}

// ============================================================================
// Auth Gate
// ============================================================================

#[tokio::test]
async fn test_me_returns_identity() {
    let repo = MemoryUsers::default();
    signed_up(&repo).await;
    let cookie = logged_in_cookie(&repo).await;

    let response = app(repo)
        .oneshot(get_with_cookie("/me", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["user"], "alice");
    assert_eq!(body["email"], "a@b.com");
}

#[tokio::test]
async fn test_me_without_cookie_is_forbidden() {
    let response = app(MemoryUsers::default())
        .oneshot(get_with_cookie("/me", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_gate_rejections_are_indistinguishable() {
    let repo = MemoryUsers::default();
    signed_up(&repo).await;
    let user = repo.get("a@b.com").unwrap();

    let expired = SessionTokens::from_config(&config())
        .issue_with_ttl(&user.identity(), TimeDelta::seconds(-1))
        .unwrap();

    let forged_config = AuthConfig::new("someone-elses-secret", COOKIE_NAME).unwrap();
    let forged = SessionTokens::from_config(&forged_config)
        .issue(&user.identity())
        .unwrap();

    let cookies = [
        None,
        Some(format!("{COOKIE_NAME}={}", expired.token)),
        Some(format!("{COOKIE_NAME}={}", forged.token)),
        Some(format!("{COOKIE_NAME}=invalidated")),
        Some(format!("other_cookie={}", expired.token)),
    ];

    let mut bodies = Vec::new();
    for cookie in cookies {
        let response = app(repo.clone())
            .oneshot(get_with_cookie("/me", cookie.as_deref()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        bodies.push(json_body(response).await);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}
