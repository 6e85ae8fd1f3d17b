use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedAccount;

/// Claims of the verified session carrying this request.
pub async fn current_session(
    Extension(session): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<SessionClaimsData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionClaimsData {
            account_id: session.account_id.to_string(),
            email: session.email,
            issued_at: session.issued_at,
            expires_at: session.expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaimsData {
    pub account_id: String,
    pub email: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
