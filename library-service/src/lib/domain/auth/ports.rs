use async_trait::async_trait;
use auth::SessionClaims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::LoginRequest;
use crate::domain::auth::models::SignupRequest;

/// Port for credential and session operations.
#[async_trait]
pub trait CredentialServicePort: Send + Sync + 'static {
    /// Register an account and open a session for it.
    ///
    /// Input is fully validated before any store access. Uniqueness checks and
    /// password hashing then run concurrently. On any failure no account is
    /// created and no token is issued.
    ///
    /// # Errors
    /// * `MissingField` - Name, email or password is blank
    /// * `PasswordMismatch` - Confirmation absent or different
    /// * `Account` - Invalid field format, email/phone taken, or store failure
    /// * `TokenIssue` - Signing failed after the account was created
    async fn signup(&self, request: SignupRequest) -> Result<AuthenticatedSession, AuthError>;

    /// Authenticate by email and password.
    ///
    /// # Errors
    /// * `MissingField` - Email or password is blank
    /// * `InvalidCredentials` - No such account, wrong password, or lookup failure
    /// * `TokenIssue` - Signing failed
    async fn login(&self, request: LoginRequest) -> Result<AuthenticatedSession, AuthError>;

    /// Verify a session token and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, expired, or malformed
    fn current_session(&self, token: &str) -> Result<SessionClaims, AuthError>;
}
