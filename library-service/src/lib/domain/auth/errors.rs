use auth::JwtError;
use thiserror::Error;

use crate::domain::account::errors::AccountError;
use crate::domain::errors::StoreError;

/// Error for signup, login and session verification
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Validation, conflict and store failures from account registration.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Unknown email or wrong password; the two are never distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid session token: {0}")]
    InvalidToken(JwtError),

    #[error("Session token could not be issued: {0}")]
    TokenIssue(JwtError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Account(AccountError::from(err))
    }
}
