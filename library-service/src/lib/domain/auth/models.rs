use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::Account;

/// Raw signup input. Blank strings count as missing.
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// An authenticated account with a freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub account: Account,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
