use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;

use super::get_book::BookData;
use super::ApiError;
use super::ApiSuccess;
use super::ListResponseData;
use crate::domain::book::models::BOOK_LIST_POLICY;
use crate::domain::book::ports::BookServicePort;
use crate::domain::query::compile;
use crate::inbound::http::router::AppState;

pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<ApiSuccess<ListResponseData<BookData>>, ApiError> {
    let spec = compile(&params, &BOOK_LIST_POLICY);

    let page = state.book_service.list_books(spec.clone()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ListResponseData::from_page(page, &spec, |book| BookData::from(book)),
    ))
}
