use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Expire the session cookie. Tokens are stateless, so nothing is revoked.
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cookie = HeaderValue::from_str(&state.session_cookie.clear())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiSuccess::new(StatusCode::NO_CONTENT, ()),
    ))
}
