use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::get_account::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountPatch;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::ports::AccountServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id = AccountId::from_string(&account_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid account ID: {}", e)))?;

    state
        .account_service
        .update_account(&account_id, body.try_into_patch()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

/// HTTP request body for updating an account. Blank fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateAccountRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

fn provided(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl UpdateAccountRequest {
    fn try_into_patch(self) -> Result<AccountPatch, AccountError> {
        Ok(AccountPatch {
            name: provided(&self.name).map(DisplayName::new).transpose()?,
            email: provided(&self.email).map(EmailAddress::new).transpose()?,
            phone: provided(&self.phone).map(PhoneNumber::new).transpose()?,
        })
    }
}
