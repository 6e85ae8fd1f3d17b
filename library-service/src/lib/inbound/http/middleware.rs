use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::auth::ports::CredentialServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the verified session in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub account_id: AccountId,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Middleware that verifies the session token and adds the account to request extensions.
///
/// The token is read from the session cookie, or else from an
/// `Authorization: Bearer` header.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = state
        .session_cookie
        .extract(req.headers())
        .or_else(|| bearer_token(req.headers()))
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing session token".to_string()).into_response()
        })?;

    let claims = state.credential_service.current_session(&token).map_err(|e| {
        tracing::warn!(error = %e, "Session verification failed");
        ApiError::from(e).into_response()
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Session subject is not an account ID");
        ApiError::Unauthorized("Invalid or expired session".to_string()).into_response()
    })?;

    let issued_at = DateTime::from_timestamp(claims.iat, 0).unwrap_or_default();
    let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or_default();

    req.extensions_mut().insert(AuthenticatedAccount {
        account_id,
        email: claims.email,
        issued_at,
        expires_at,
    });

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
