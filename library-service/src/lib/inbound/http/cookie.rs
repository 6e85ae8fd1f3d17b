//! Session cookie transport.

use axum::http::header;
use axum::http::HeaderMap;
use chrono::DateTime;
use chrono::Utc;

use crate::config::CookieConfig;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Builds and reads the HTTP-only session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    /// `Set-Cookie` value carrying `token`, expiring with it.
    pub fn issue(&self, token: &str, expires_at: DateTime<Utc>) -> String {
        let max_age = (expires_at - Utc::now()).num_seconds().max(0);
        self.build(token, &expires_at.format(HTTP_DATE).to_string(), max_age)
    }

    /// `Set-Cookie` value that removes the cookie.
    pub fn clear(&self) -> String {
        self.build("", "Thu, 01 Jan 1970 00:00:00 GMT", 0)
    }

    /// Session token from the request's `Cookie` header, if present.
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .find_map(|cookie| {
                let (key, value) = cookie.trim().split_once('=')?;
                (key == self.name && !value.is_empty()).then(|| value.to_string())
            })
    }

    fn build(&self, value: &str, expires: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Expires={}; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, value, expires, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

impl From<&CookieConfig> for SessionCookie {
    fn from(config: &CookieConfig) -> Self {
        Self::new(config.name.clone(), config.secure)
    }
}
