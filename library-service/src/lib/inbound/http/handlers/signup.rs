use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::login::session_response;
use super::ApiError;
use crate::domain::auth::models::SignupRequest;
use crate::domain::auth::ports::CredentialServicePort;
use crate::inbound::http::router::AppState;

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequestBody>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.credential_service.signup(body.into()).await?;

    session_response(&state, StatusCode::CREATED, &session)
}

/// `{name?, email, password, passwordConfirm?, phone?}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequestBody {
    name: String,
    email: String,
    password: String,
    password_confirm: String,
    phone: Option<String>,
}

impl From<SignupRequestBody> for SignupRequest {
    fn from(body: SignupRequestBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            password_confirm: body.password_confirm,
            phone: body.phone,
        }
    }
}
