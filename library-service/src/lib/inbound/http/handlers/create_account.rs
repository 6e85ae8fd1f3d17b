use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_account::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

/// Administrative create. Unlike signup, no session is opened.
pub async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .create_account(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateAccountRequest {
    name: String,
    email: String,
    password: String,
    phone: Option<String>,
}

impl CreateAccountRequest {
    fn try_into_command(self) -> Result<CreateAccountCommand, AccountError> {
        let name = DisplayName::new(&self.name)?;
        let email = EmailAddress::new(&self.email)?;
        let password = Password::new(&self.password)?;
        let phone = match self.phone.as_deref().map(str::trim) {
            Some(phone) if !phone.is_empty() => Some(PhoneNumber::new(phone)?),
            _ => None,
        };
        Ok(CreateAccountCommand::new(name, email, password, phone))
    }
}
