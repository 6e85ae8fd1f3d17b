use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use super::get_account::AccountData;
use super::ApiError;
use super::ApiSuccess;
use super::ListResponseData;
use crate::domain::account::models::ACCOUNT_LIST_POLICY;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::query::compile;
use crate::inbound::http::router::AppState;

/// `GET /users` with whitelisted filters, `q`, `sort`, `page` and `limit`.
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<ListResponseData<AccountData>>, ApiError> {
    let spec = compile(&params, &ACCOUNT_LIST_POLICY);

    let page = state.account_service.list_accounts(spec.clone()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListResponseData::from_page(page, &spec, |account| AccountData::from(account)),
    ))
}
