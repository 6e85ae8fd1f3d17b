use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::get_account::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::LoginRequest;
use crate::domain::auth::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .credential_service
        .login(body.into())
        .await
        .map_err(|e| match e {
            AuthError::MissingField(_) | AuthError::InvalidCredentials => {
                ApiError::invalid_credentials()
            }
            other => ApiError::from(other),
        })?;

    session_response(&state, StatusCode::OK, &session)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

impl From<LoginRequestBody> for LoginRequest {
    fn from(body: LoginRequestBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub account: AccountData,
    pub expires_at: DateTime<Utc>,
}

/// Envelope the account and set the session cookie.
///
/// The token itself travels only in the HTTP-only cookie.
pub(super) fn session_response(
    state: &AppState,
    status: StatusCode,
    session: &AuthenticatedSession,
) -> Result<impl IntoResponse, ApiError> {
    let cookie = state
        .session_cookie
        .issue(&session.token, session.expires_at);
    let cookie = HeaderValue::from_str(&cookie).map_err(|e| {
        tracing::error!(error = %e, "Session cookie is not a valid header value");
        ApiError::InternalServerError("Internal server error".to_string())
    })?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiSuccess::new(
            status,
            SessionData {
                account: (&session.account).into(),
                expires_at: session.expires_at,
            },
        ),
    ))
}
