use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;

/// Issues and verifies stateless session tokens.
///
/// Tokens are HS256-signed [`SessionClaims`] valid for a fixed TTL. There is
/// no server-side revocation: a token is valid until its `exp` second.
pub struct SessionIssuer {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

/// A freshly signed session token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
    /// Expiry instant, for aligning cookie expiry with the token.
    pub expires_at: DateTime<Utc>,
}

impl SessionIssuer {
    /// Create an issuer signing with `secret` and issuing tokens valid for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for a subject, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(
        &self,
        subject_id: impl ToString,
        subject_email: impl ToString,
    ) -> Result<IssuedSession, JwtError> {
        self.issue_at(Utc::now(), subject_id, subject_email)
    }

    fn issue_at(
        &self,
        now: DateTime<Utc>,
        subject_id: impl ToString,
        subject_email: impl ToString,
    ) -> Result<IssuedSession, JwtError> {
        let claims = SessionClaims::new(subject_id, subject_email, now, self.ttl);
        let token = self.jwt_handler.encode(&claims)?;
        let expires_at = claims.expires_at().unwrap_or(now + self.ttl);

        Ok(IssuedSession {
            token,
            claims,
            expires_at,
        })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// Tokens are rejected at or past `exp`, with no grace period.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with another secret or tampered with
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `MissingClaim` - `exp` is absent, or `sub` is empty
    /// * `DecodingFailed` - Token is malformed, or `iat`/`email` is absent
    pub fn verify(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let claims: SessionClaims = self.jwt_handler.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }
        if claims.sub.is_empty() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }

        Ok(claims)
    }
}
