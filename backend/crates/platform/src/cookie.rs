//! Cookie Management Infrastructure
//!
//! Builds `Set-Cookie` header values and reads cookies back out of requests.

use chrono::{DateTime, Utc};
use http::{HeaderMap, header};

/// RFC 7231 IMF-fixdate, the format browsers expect for `Expires`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a Set-Cookie value that lives until `expires_at`.
    ///
    /// Carries both `Expires` and `Max-Age`; the latter wins in modern
    /// browsers, the former covers clients that ignore it.
    pub fn build_set_cookie(&self, value: &str, expires_at: DateTime<Utc>) -> String {
        let max_age = (expires_at - Utc::now()).num_seconds().max(0);

        let mut cookie = format!("{}={}", self.name, value);
        self.push_attributes(&mut cookie);
        cookie.push_str(&format!(
            "; Expires={}",
            expires_at.format(HTTP_DATE_FORMAT)
        ));
        cookie.push_str(&format!("; Max-Age={}", max_age));

        cookie
    }

    /// Build a Set-Cookie value that overwrites the cookie with `sentinel`
    /// and an expiry already in the past.
    pub fn build_expired_cookie(&self, sentinel: &str, expired_at: DateTime<Utc>) -> String {
        let mut cookie = format!("{}={}", self.name, sentinel);
        self.push_attributes(&mut cookie);
        cookie.push_str(&format!(
            "; Expires={}",
            expired_at.format(HTTP_DATE_FORMAT)
        ));
        cookie.push_str("; Max-Age=0");

        cookie
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
    }
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is searched; the first pair named `name` wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}
